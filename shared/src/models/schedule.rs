//! Schedule document and derived figures

use super::{shift::Shift, staff::Staff};
use serde::{Deserialize, Serialize};

/// Persisted schedule of one merchant: `{ "shifts": [...], "staff": [...] }`
///
/// A missing collection loads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub staff: Vec<Staff>,
}

impl ScheduleDocument {
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty() && self.staff.is_empty()
    }
}

/// Headcount summary over all shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub total_needed: u32,
    /// Only assignments that still reference an existing staff record
    pub total_assigned: u32,
    /// `max(0, total_needed - total_assigned)`
    pub shortage: u32,
}

impl ScheduleSummary {
    pub fn new(total_needed: u32, total_assigned: u32) -> Self {
        Self {
            total_needed,
            total_assigned,
            shortage: total_needed.saturating_sub(total_assigned),
        }
    }
}
