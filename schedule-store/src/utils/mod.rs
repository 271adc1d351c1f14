//! 工具模組
//!
//! - [`logger`] - 日誌初始化
//! - [`validation`] - 表單欄位驗證

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
