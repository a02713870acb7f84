use dioxus::prelude::*;
use dioxus_router::use_navigator;
use psikotes_core::model::ResultRecord;
use services::ResultError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AppHeader, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultVm, ReviewRowVm};

#[derive(Clone, Debug, PartialEq)]
struct LoadedResult {
    record: ResultRecord,
    vm: ResultVm,
}

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let results = ctx.results();
    let exporter = ctx.exporter();

    let mut show_details = use_signal(|| false);
    let mut export_status = use_signal(|| None::<Result<String, String>>);

    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            match results.latest() {
                Ok(record) => Ok::<_, ViewError>(Some(LoadedResult {
                    vm: ResultVm::from(&record),
                    record,
                })),
                Err(ResultError::MissingSession) => Ok(None),
                Err(err) => {
                    tracing::error!(error = %err, "stored result unreadable");
                    Err(ViewError::Unknown)
                }
            }
        }
    });

    use_effect(move || {
        if matches!(resource.value().read().as_ref(), Some(Ok(None))) {
            navigator.replace(Route::Packages {});
        }
    });

    let on_download = use_callback(move |record: ResultRecord| match exporter.export(&record) {
        Ok(path) => {
            export_status.set(Some(Ok(format!("Hasil disimpan ke {}", path.display()))));
        }
        Err(err) => {
            tracing::error!(error = %err, "export failed");
            export_status.set(Some(Err("Gagal menyimpan hasil tes.".to_string())));
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Memuat..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "alert alert-error", "{err.message()}" }
                    BackButton {}
                },
                ViewState::Ready(None) => rsx! {
                    section { class: "card empty-result",
                        h2 { class: "card-title", "Tidak Ada Data Hasil" }
                        p { class: "card-subtitle", "Anda belum menyelesaikan tes apapun." }
                        BackButton {}
                    }
                },
                ViewState::Ready(Some(LoadedResult { record, vm })) => rsx! {
                    AppHeader { title: "Hasil Psikotes" }
                    p { class: "page-subtitle", "{vm.package_name}" }

                    div { class: "stats-grid",
                        div { class: "card stat-card",
                            p { class: "stat-title", "Skor Total" }
                            p { class: "stat-value", "{vm.score}" }
                            span { class: "{vm.category_class}", "{vm.category_label}" }
                        }
                        div { class: "card stat-card",
                            p { class: "stat-title", "Jawaban Benar" }
                            p { class: "stat-value", "{vm.correct_answers}/{vm.total_questions}" }
                            p { class: "stat-note", "Akurasi: {vm.accuracy}%" }
                        }
                        div { class: "card stat-card",
                            p { class: "stat-title", "Waktu Pengerjaan" }
                            p { class: "stat-value", "{vm.completion_time}" }
                        }
                    }

                    section { class: "card",
                        h2 { class: "card-title", "Analisis Hasil" }
                        p { "{vm.analysis}" }
                    }

                    div { class: "result-actions",
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: move |_| show_details.toggle(),
                            if show_details() { "Sembunyikan Detail Jawaban" } else { "Lihat Detail Jawaban" }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_download.call(record.clone()),
                            "Unduh Hasil"
                        }
                        BackButton {}
                    }

                    match export_status() {
                        Some(Ok(message)) => rsx! {
                            div { class: "alert alert-success", "{message}" }
                        },
                        Some(Err(message)) => rsx! {
                            div { class: "alert alert-error", "{message}" }
                        },
                        None => rsx! {},
                    }

                    if show_details() {
                        section { class: "card",
                            h2 { class: "card-title", "Detail Jawaban" }
                            table { class: "table",
                                thead {
                                    tr {
                                        th { "No" }
                                        th { "Pertanyaan" }
                                        th { "Jawaban Anda" }
                                        th { "Jawaban Benar" }
                                        th { "Status" }
                                    }
                                }
                                tbody {
                                    for row in vm.rows {
                                        ReviewRow { key: "{row.number}", row }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    let status_class = if row.is_correct { "badge badge-excellent" } else { "badge badge-improve" };
    rsx! {
        tr {
            td { "{row.number}" }
            td { "{row.prompt}" }
            td { "{row.user_answer}" }
            td { "{row.correct_answer}" }
            td { span { class: "{status_class}", "{row.status}" } }
        }
    }
}

#[component]
fn BackButton() -> Element {
    let navigator = use_navigator();
    rsx! {
        button {
            class: "btn btn-outline",
            r#type: "button",
            onclick: move |_| {
                navigator.push(Route::Packages {});
            },
            "Kembali ke Halaman Paket"
        }
    }
}
