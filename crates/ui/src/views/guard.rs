use dioxus::prelude::*;
use dioxus_router::use_navigator;
use psikotes_core::model::Role;
use services::GateDecision;

use crate::context::AppContext;
use crate::routes::Route;

/// Renders `children` only for a logged-in session holding `required`.
/// Everyone else is sent back to the login page.
#[component]
pub fn AuthGuard(required: Option<Role>, children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let gate = ctx.gate();

    let decision = use_resource(move || {
        let gate = gate.clone();
        async move { gate.check(required) }
    });

    let granted = match decision.value().read().as_ref() {
        None => None,
        Some(GateDecision::Granted(_)) => Some(true),
        Some(GateDecision::Redirect(_)) => Some(false),
    };

    use_effect(move || {
        if matches!(decision.value().read().as_ref(), Some(GateDecision::Redirect(_))) {
            navigator.replace(Route::Login {});
        }
    });

    match granted {
        None => rsx! {
            div { class: "guard-loading",
                div { class: "spinner" }
                p { "Memuat..." }
            }
        },
        Some(true) => rsx! { {children} },
        Some(false) => rsx! {},
    }
}
