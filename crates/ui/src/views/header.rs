use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

/// Page header with the signed-in user's name and a logout button.
#[component]
pub fn AppHeader(#[props(into)] title: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let display_name = match auth.current() {
        Ok(Some(session)) => session.display_name().to_string(),
        Ok(None) => String::new(),
        Err(err) => {
            tracing::warn!(error = %err, "unreadable session in header");
            String::new()
        }
    };

    let on_logout = move |_: MouseEvent| {
        match auth.current() {
            Ok(Some(session)) => {
                if let Err(err) = auth.logout(session) {
                    tracing::error!(error = %err, "logout failed");
                }
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "unreadable session on logout"),
        }
        navigator.replace(Route::Login {});
    };

    rsx! {
        header { class: "app-header",
            h1 { class: "app-header-title", "{title}" }
            div { class: "app-header-user",
                if !display_name.is_empty() {
                    span { class: "app-header-name", "{display_name}" }
                }
                button { class: "btn btn-outline", r#type: "button", onclick: on_logout, "Keluar" }
            }
        }
    }
}
