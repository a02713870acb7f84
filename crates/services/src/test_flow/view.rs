use std::sync::Arc;

use psikotes_core::model::ResultRecord;
use storage::session_store::{SessionStore, TEST_RESULTS_KEY};

use crate::error::ResultError;

/// Read side of the result hand-off, used by the results page.
#[derive(Clone)]
pub struct ResultReader {
    session: Arc<dyn SessionStore>,
}

impl ResultReader {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// The most recently published record.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::MissingSession` when nothing was published in this
    /// session, or `ResultError::Corrupt` if the stored payload cannot be decoded
    /// or its score fields disagree with its questions and answers.
    pub fn latest(&self) -> Result<ResultRecord, ResultError> {
        let raw = self
            .session
            .get(TEST_RESULTS_KEY)?
            .ok_or(ResultError::MissingSession)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
