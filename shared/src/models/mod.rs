//! Data models
//!
//! Shift and staff records, the persisted schedule document, and the
//! merchant identity that keys it. Ids are `i64` creation timestamps.

pub mod merchant;
pub mod schedule;
pub mod shift;
pub mod staff;

// Re-exports
pub use merchant::*;
pub use schedule::*;
pub use shift::*;
pub use staff::*;
