mod add_package;
mod dashboard;
mod manage_questions;

pub use add_package::AddPackageView;
pub use dashboard::AdminDashboardView;
pub use manage_questions::ManageQuestionsView;
