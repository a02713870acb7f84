use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AppHeader, ViewError, ViewState, view_state_from_resource};
use crate::vm::{PackageCardVm, map_package_cards};

#[component]
pub fn PackagesView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let packages = ctx.packages();

    let mut resource = use_resource(move || {
        let packages = packages.clone();
        async move {
            let items = packages.list_active_summaries().await.map_err(|err| {
                tracing::error!(error = %err, "listing active packages failed");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_package_cards(&items))
        }
    });

    let on_start = use_callback(move |package_id: u64| {
        navigator.push(Route::Test { package_id });
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            AppHeader { title: "Pilih Paket Psikotes" }
            p { class: "page-subtitle", "Pilih paket tes yang sesuai dengan kebutuhan Anda" }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Memuat..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "empty", "Belum ada paket tes yang tersedia." }
                    } else {
                        div { class: "package-grid",
                            for card in cards {
                                PackageCard { key: "{card.id}", card, on_start }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "alert alert-error",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: move |_| resource.restart(),
                            "Coba Lagi"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn PackageCard(card: PackageCardVm, on_start: Callback<u64>) -> Element {
    let id = card.id;
    let can_start = card.can_start();
    rsx! {
        article { class: "card package-card",
            h2 { class: "card-title", "{card.name}" }
            p { class: "card-subtitle", "{card.description}" }
            div { class: "package-meta",
                span { "Durasi: {card.duration_label}" }
                span { "{card.question_count_label}" }
                span { class: "badge", "{card.difficulty_label}" }
            }
            button {
                class: "btn btn-primary btn-block",
                r#type: "button",
                disabled: !can_start,
                onclick: move |_| {
                    if can_start {
                        on_start.call(id);
                    }
                },
                "Mulai Tes"
            }
        }
    }
}
