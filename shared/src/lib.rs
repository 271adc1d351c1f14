//! Shared types for the merchant scheduling workspace
//!
//! Domain models, the unified error system and small utilities used by the
//! store crate and anything that reads its persisted documents.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
