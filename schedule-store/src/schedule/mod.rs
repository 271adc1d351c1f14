//! 排班管理
//!
//! - [`store`]: in-memory shifts and staff with their consistency rules
//! - [`export`]: CSV rows and the downloadable export file
//! - [`storage`]: redb key-value storage of the per-merchant document
//! - [`session`]: load on merchant selection, save on demand

pub mod export;
pub mod session;
pub mod storage;
pub mod store;

pub use export::{ExportArtifact, ExportRow};
pub use session::{LoadedSession, open_session, save_session};
pub use storage::{ScheduleStorage, StorageError, StorageResult};
pub use store::{DeleteOutcome, EditSession, ShiftAssignmentStore};
