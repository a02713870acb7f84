use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use psikotes_core::model::Difficulty;
use services::PackageServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::AppHeader;
use crate::vm::{PackageForm, package_error_message};

#[component]
pub fn AddPackageView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let packages = ctx.packages();

    let mut form = use_signal(PackageForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match form.read().to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(package_error_message(&err).to_string()));
                return;
            }
        };
        let packages = packages.clone();
        spawn(async move {
            saving.set(true);
            match packages.create_package(draft).await {
                Ok(_) => {
                    navigator.push(Route::AdminDashboard {});
                }
                Err(PackageServiceError::Package(err)) => {
                    error.set(Some(package_error_message(&err).to_string()));
                }
                Err(err) => {
                    tracing::error!(error = %err, "create package failed");
                    error.set(Some("Gagal menyimpan paket. Silakan coba lagi.".to_string()));
                }
            }
            saving.set(false);
        });
    };

    let current = form.read().clone();

    rsx! {
        div { class: "page",
            AppHeader { title: "Tambah Paket Soal Baru" }
            Link { class: "back-link", to: Route::AdminDashboard {}, "← Kembali ke dashboard" }

            section { class: "card",
                h2 { class: "card-title", "Informasi Paket Soal" }
                p { class: "card-subtitle", "Masukkan detail paket soal psikotes yang akan dibuat" }

                if let Some(message) = error() {
                    div { class: "alert alert-error", "{message}" }
                }

                form { class: "form", onsubmit: on_submit,
                    label { class: "form-label", "Nama Paket *" }
                    input {
                        class: "form-input",
                        placeholder: "Contoh: Paket A - Tes Kepribadian",
                        value: "{current.name}",
                        oninput: move |evt| form.write().name = evt.value(),
                    }

                    label { class: "form-label", "Deskripsi Paket *" }
                    textarea {
                        class: "form-input",
                        rows: 4,
                        placeholder: "Jelaskan tujuan dan cakupan dari paket tes ini...",
                        value: "{current.description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }

                    div { class: "form-row",
                        div {
                            label { class: "form-label", "Durasi (menit)" }
                            input {
                                class: "form-input",
                                r#type: "number",
                                min: "1",
                                placeholder: "30",
                                value: "{current.duration}",
                                oninput: move |evt| form.write().duration = evt.value(),
                            }
                        }
                        div {
                            label { class: "form-label", "Tingkat Kesulitan" }
                            select {
                                class: "form-input",
                                value: "{current.difficulty}",
                                onchange: move |evt| form.write().difficulty = evt.value(),
                                option { value: "", "Pilih tingkat kesulitan" }
                                for difficulty in Difficulty::ALL {
                                    option { value: "{difficulty.label()}", "{difficulty.label()}" }
                                }
                            }
                        }
                    }

                    div { class: "form-actions",
                        Link { class: "btn btn-outline", to: Route::AdminDashboard {}, "Batal" }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving(),
                            "Simpan Paket"
                        }
                    }
                }
            }
        }
    }
}
