//! Staff Model

use serde::{Deserialize, Serialize};

pub type StaffId = i64;

/// Staff member available for scheduling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    /// Position (外場, 吧台, 主廚, ...)
    pub role: String,
    /// Free-text availability note (本週可排, 可支援午班, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Staff form input (create or update)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaffInput {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl StaffInput {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl From<&Staff> for StaffInput {
    fn from(staff: &Staff) -> Self {
        Self {
            name: staff.name.clone(),
            role: staff.role.clone(),
            status: staff.status.clone(),
        }
    }
}
