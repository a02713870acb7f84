mod admin;
mod guard;
mod header;
mod login;
mod packages;
mod register;
mod results;
mod state;
mod test_page;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::{AddPackageView, AdminDashboardView, ManageQuestionsView};
pub use guard::AuthGuard;
pub use header::AppHeader;
pub use login::LoginView;
pub use packages::PackagesView;
pub use register::RegisterView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use test_page::TestView;
