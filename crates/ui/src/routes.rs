use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};
use psikotes_core::model::Role;

use crate::views::{
    AddPackageView, AdminDashboardView, AuthGuard, LoginView, ManageQuestionsView, PackagesView,
    RegisterView, ResultsView, TestView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[layout(AdminArea)]
            #[route("/admin/dashboard", AdminDashboardView)] AdminDashboard {},
            #[route("/admin/add-package", AddPackageView)] AddPackage {},
            #[route("/admin/manage-questions", ManageQuestionsView)] ManageQuestions {},
        #[end_layout]
        #[layout(UserArea)]
            #[route("/user/packages", PackagesView)] Packages {},
            #[route("/user/test/:package_id", TestView)] Test { package_id: u64 },
            #[route("/user/results", ResultsView)] Results {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn AdminArea() -> Element {
    rsx! {
        AuthGuard { required: Some(Role::Admin),
            Outlet::<Route> {}
        }
    }
}

#[component]
fn UserArea() -> Element {
    rsx! {
        AuthGuard { required: Some(Role::User),
            Outlet::<Route> {}
        }
    }
}
