//! Session boundary: load on merchant selection, save on demand
//!
//! A session belongs to exactly one merchant. Switching merchants means
//! opening a new session; stores are never shared between merchants.

use shared::models::MerchantIdentity;
use shared::{AppError, AppResult};

use super::storage::ScheduleStorage;
use super::store::ShiftAssignmentStore;

/// Store for the selected merchant, plus any non-blocking load problem
#[derive(Debug)]
pub struct LoadedSession {
    pub store: ShiftAssignmentStore,
    /// Set when the stored document was unreadable and the session
    /// started empty instead
    pub warning: Option<AppError>,
}

/// Open the schedule of the signed-in merchant.
///
/// - no identity → `NotAuthenticated`
/// - nothing stored → empty store
/// - unreadable document → empty store and a `PersistenceParse` warning
pub fn open_session(
    storage: &ScheduleStorage,
    identity: &MerchantIdentity,
) -> AppResult<LoadedSession> {
    let key = identity.storage_key().ok_or_else(AppError::not_authenticated)?;
    let mut store = ShiftAssignmentStore::new(key);

    let Some(bytes) = storage.load(store.key())? else {
        tracing::info!(key = %store.key(), "No stored schedule, starting empty");
        return Ok(LoadedSession {
            store,
            warning: None,
        });
    };

    let warning = match store.deserialize(&bytes) {
        Ok(()) => {
            tracing::info!(
                key = %store.key(),
                shifts = store.shifts().len(),
                staff = store.staff().len(),
                "Schedule loaded"
            );
            None
        }
        Err(e) => {
            tracing::warn!(
                key = %store.key(),
                code = %e.code,
                category = e.code.category().name(),
                error = %e,
                "Stored schedule unreadable, starting empty"
            );
            Some(e)
        }
    };

    Ok(LoadedSession { store, warning })
}

/// Write the current collections under the store's merchant key
pub fn save_session(storage: &ScheduleStorage, store: &ShiftAssignmentStore) -> AppResult<()> {
    let bytes = store.to_json()?;
    storage.save(store.key(), &bytes)?;
    tracing::info!(
        key = %store.key(),
        shifts = store.shifts().len(),
        staff = store.staff().len(),
        "Schedule saved"
    );
    Ok(())
}
