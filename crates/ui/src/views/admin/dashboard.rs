use dioxus::prelude::*;
use dioxus_router::Link;
use psikotes_core::model::PackageId;
use services::PackageStats;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AppHeader, ViewError, ViewState, view_state_from_resource};
use crate::vm::{PackageCardVm, map_package_cards};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    stats: PackageStats,
    cards: Vec<PackageCardVm>,
}

#[component]
pub fn AdminDashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let packages = ctx.packages();
    let mut search = use_signal(String::new);
    let mut delete_error = use_signal(|| None::<ViewError>);

    let packages_for_resource = packages.clone();
    let mut resource = use_resource(move || {
        let packages = packages_for_resource.clone();
        let term = search();
        async move {
            let stats = packages.stats().await.map_err(|_| ViewError::Unknown)?;
            let items = packages
                .search_summaries(&term)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(DashboardData {
                stats,
                cards: map_package_cards(&items),
            })
        }
    });

    let on_delete = use_callback(move |id: u64| {
        let packages = packages.clone();
        spawn(async move {
            match packages.delete_package(PackageId::new(id)).await {
                Ok(()) => {
                    delete_error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    tracing::error!(error = %err, package_id = id, "delete package failed");
                    delete_error.set(Some(ViewError::Unknown));
                }
            }
        });
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            AppHeader { title: "Dashboard Admin Psikotes" }
            p { class: "page-subtitle", "Kelola semua paket soal psikotes yang tersedia" }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Memuat..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "stats-grid",
                        StatCard { title: "Total Paket", value: data.stats.total_packages.to_string(), note: "Paket soal tersedia" }
                        StatCard { title: "Paket Aktif", value: data.stats.active_packages.to_string(), note: "Paket yang dapat diakses" }
                        StatCard { title: "Total Soal", value: data.stats.total_questions.to_string(), note: "Soal dalam semua paket" }
                    }

                    section { class: "card",
                        div { class: "card-header-row",
                            h2 { class: "card-title", "Daftar Paket Soal" }
                            div { class: "card-actions",
                                Link { class: "btn btn-outline", to: Route::ManageQuestions {}, "Kelola Soal" }
                                Link { class: "btn btn-primary", to: Route::AddPackage {}, "Tambah Paket" }
                            }
                        }
                        input {
                            class: "form-input search",
                            placeholder: "Cari paket soal...",
                            value: "{search}",
                            oninput: move |evt| search.set(evt.value()),
                        }
                        if let Some(err) = delete_error() {
                            div { class: "alert alert-error", "{err.message()}" }
                        }
                        if data.cards.is_empty() {
                            p { class: "empty", "Tidak ada paket soal." }
                        } else {
                            table { class: "table",
                                thead {
                                    tr {
                                        th { "Nama Paket" }
                                        th { "Durasi" }
                                        th { "Jumlah Soal" }
                                        th { "Tingkat Kesulitan" }
                                        th { "Status" }
                                        th { "Dibuat" }
                                        th { "" }
                                    }
                                }
                                tbody {
                                    for card in data.cards {
                                        PackageRow { key: "{card.id}", card, on_delete }
                                    }
                                }
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
fn StatCard(
    #[props(into)] title: String,
    value: String,
    #[props(into)] note: String,
) -> Element {
    rsx! {
        div { class: "card stat-card",
            p { class: "stat-title", "{title}" }
            p { class: "stat-value", "{value}" }
            p { class: "stat-note", "{note}" }
        }
    }
}

#[component]
fn PackageRow(card: PackageCardVm, on_delete: Callback<u64>) -> Element {
    let id = card.id;
    let status_class = if card.is_active { "badge badge-active" } else { "badge badge-draft" };
    rsx! {
        tr {
            td {
                p { class: "package-name", "{card.name}" }
                p { class: "package-description", "{card.description}" }
            }
            td { "{card.duration_label}" }
            td { "{card.question_count_label}" }
            td { "{card.difficulty_label}" }
            td { span { class: "{status_class}", "{card.status_label}" } }
            td { "{card.created_at_str}" }
            td {
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| on_delete.call(id),
                    "Hapus"
                }
            }
        }
    }
}
