use std::sync::Arc;

use psikotes_core::model::ResultRecord;
use storage::session_store::{SessionStore, TEST_RESULTS_KEY};

use crate::error::ResultError;

/// Hands finished result records to the session store.
///
/// At most one record is kept; each publish overwrites the previous one.
#[derive(Clone)]
pub struct ResultPublisher {
    session: Arc<dyn SessionStore>,
}

impl ResultPublisher {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// # Errors
    ///
    /// Returns `ResultError` if the record cannot be encoded or stored.
    pub fn publish(&self, record: &ResultRecord) -> Result<(), ResultError> {
        let payload = serde_json::to_string(record)?;
        self.session.set(TEST_RESULTS_KEY, payload)?;
        tracing::info!(
            package = record.package_name(),
            score = record.score(),
            category = record.category().label(),
            "result published"
        );
        Ok(())
    }

    /// Forget the stored record, if any.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::Storage` if the session store is unavailable.
    pub fn clear(&self) -> Result<(), ResultError> {
        self.session.remove(TEST_RESULTS_KEY)?;
        Ok(())
    }
}
