use thiserror::Error;

use crate::model::{PackageError, QuestionError, RegistrationError, ResultRecordError};
use crate::sequencer::SequencerError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Package(#[from] PackageError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    ResultRecord(#[from] ResultRecordError),
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}
