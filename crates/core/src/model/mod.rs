mod answers;
mod identity;
mod ids;
mod option;
mod package;
mod question;
mod result;

pub use answers::AnswerMap;
pub use identity::{
    Identity, MIN_PASSWORD_LEN, ParseRoleError, RegistrationDraft, RegistrationError, Role,
    ValidatedRegistration,
};
pub use ids::{PackageId, ParseIdError, QuestionId, UserId};
pub use option::{AnswerOption, OptionCode, ParseOptionCodeError};
pub use package::{
    Difficulty, Package, PackageDraft, PackageError, PackageStatus, ValidatedPackage,
};
pub use question::{Question, QuestionDraft, QuestionError, ValidatedQuestion};
pub use result::{ResultRecord, ResultRecordError};
