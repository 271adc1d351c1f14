//! 店家排班管理
//!
//! # 架構概述
//!
//! - **排班存放區** (`schedule::store`): 班次與員工集合及其一致性規則
//! - **匯出** (`schedule::export`): 含 BOM 的 CSV 班表
//! - **儲存** (`schedule::storage`): 以 redb 保存每個店家的排班文件
//! - **工作階段** (`schedule::session`): 選擇店家時載入、按需儲存
//!
//! # 模組結構
//!
//! ```text
//! schedule-store/src/
//! ├── core/          # 配置
//! ├── schedule/      # 存放區、匯出、儲存、工作階段
//! └── utils/         # 日誌、驗證
//! ```

pub mod core;
pub mod schedule;
pub mod utils;

// Re-export 公共類型
pub use core::Config;
pub use schedule::{
    DeleteOutcome, EditSession, ExportArtifact, LoadedSession, ScheduleStorage,
    ShiftAssignmentStore, open_session, save_session,
};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
