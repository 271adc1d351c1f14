//! Merchant identity and the storage key derived from it

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix of every schedule document key
pub const STORAGE_NAMESPACE: &str = "merchantScheduleData_";

/// Whatever identifiers the signed-in merchant account carries
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MerchantIdentity {
    pub id: Option<String>,
    /// External auth provider subject (e.g. firebase uid)
    pub auth_subject: Option<String>,
    pub username: Option<String>,
}

impl MerchantIdentity {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// First non-blank of id, auth subject, username
    pub fn resolve(&self) -> Option<&str> {
        [&self.id, &self.auth_subject, &self.username]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    /// `None` when no identifier is available (nobody signed in)
    pub fn storage_key(&self) -> Option<StorageKey> {
        self.resolve()
            .map(|merchant| StorageKey(format!("{STORAGE_NAMESPACE}{merchant}")))
    }
}

/// Key of one merchant's schedule document in the key-value store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
