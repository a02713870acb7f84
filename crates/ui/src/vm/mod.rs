mod package_vm;
mod question_vm;
mod result_vm;
mod test_vm;
mod time_fmt;

pub use package_vm::{PackageCardVm, PackageForm, map_package_cards, package_error_message};
pub use question_vm::{QuestionRowVm, map_question_rows, parse_correct, question_error_message};
pub use result_vm::{ResultVm, ReviewRowVm};
pub use test_vm::{OptionRowVm, TestOutcome, TestVm};
