use dioxus::prelude::*;
use dioxus_router::Link;
use psikotes_core::model::{OptionCode, PackageId, QuestionDraft, QuestionId};
use services::QuestionServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AppHeader, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    PackageCardVm, QuestionRowVm, map_package_cards, map_question_rows, parse_correct,
    question_error_message,
};

#[component]
pub fn ManageQuestionsView() -> Element {
    let ctx = use_context::<AppContext>();
    let packages = ctx.packages();
    let questions = ctx.questions();

    let mut selected = use_signal(|| None::<u64>);
    let mut draft = use_signal(QuestionDraft::default);
    let mut editing = use_signal(|| None::<u64>);
    let mut form_error = use_signal(|| None::<String>);

    let packages_resource = use_resource(move || {
        let packages = packages.clone();
        async move {
            let items = packages.list_summaries().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_package_cards(&items))
        }
    });

    let questions_for_resource = questions.clone();
    let mut questions_resource = use_resource(move || {
        let questions = questions_for_resource.clone();
        let package = selected();
        async move {
            let Some(package) = package else {
                return Ok::<_, ViewError>(Vec::new());
            };
            let items = questions
                .list_for_package(PackageId::new(package))
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(map_question_rows(&items))
        }
    });

    let reset_form = use_callback(move |()| {
        draft.set(QuestionDraft::default());
        editing.set(None);
        form_error.set(None);
    });

    let questions_for_submit = questions.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(package) = selected() else {
            return;
        };
        let questions = questions_for_submit.clone();
        let current = draft.read().clone();
        let editing_id = editing();
        spawn(async move {
            let outcome = match editing_id {
                Some(id) => questions
                    .update_question(QuestionId::new(id), current)
                    .await
                    .map(|_| ()),
                None => questions
                    .add_question(PackageId::new(package), current)
                    .await
                    .map(|_| ()),
            };
            match outcome {
                Ok(()) => {
                    reset_form.call(());
                    questions_resource.restart();
                }
                Err(QuestionServiceError::Question(err)) => {
                    form_error.set(Some(question_error_message(&err)));
                }
                Err(err) => {
                    tracing::error!(error = %err, "saving question failed");
                    form_error.set(Some(ViewError::Unknown.message().to_string()));
                }
            }
        });
    };

    let on_edit = use_callback(move |row: QuestionRowVm| {
        let mut options: [String; 4] = Default::default();
        for (letter, text) in row.options {
            if let Some(code) = OptionCode::parse_selection(letter) {
                options[code.index()] = text;
            }
        }
        draft.set(QuestionDraft {
            prompt: row.prompt,
            options,
            correct: parse_correct(row.correct),
        });
        editing.set(Some(row.id));
        form_error.set(None);
    });

    let on_delete = use_callback(move |id: u64| {
        let questions = questions.clone();
        spawn(async move {
            if let Err(err) = questions.delete_question(QuestionId::new(id)).await {
                tracing::error!(error = %err, question_id = id, "delete question failed");
                form_error.set(Some(ViewError::Unknown.message().to_string()));
            }
            questions_resource.restart();
        });
    });

    let packages_state = view_state_from_resource(packages_resource);
    let questions_state = view_state_from_resource(questions_resource);
    let current = draft.read().clone();
    let selected_value = selected().map(|id| id.to_string()).unwrap_or_default();
    let correct_value = current.correct.map_or("", OptionCode::as_str);
    let option_texts = current.options.clone();
    let form_title = if editing().is_some() { "Edit Soal" } else { "Tambah Soal Baru" };
    let submit_label = if editing().is_some() { "Perbarui Soal" } else { "Tambah Soal" };

    rsx! {
        div { class: "page",
            AppHeader { title: "Kelola Soal Paket" }
            Link { class: "back-link", to: Route::AdminDashboard {}, "← Kembali ke dashboard" }

            section { class: "card",
                h2 { class: "card-title", "Pilih Paket Soal" }
                p { class: "card-subtitle", "Pilih paket yang ingin Anda kelola soalnya" }
                match packages_state {
                    ViewState::Ready(cards) => rsx! {
                        PackageSelect {
                            cards,
                            value: selected_value,
                            on_change: move |value: String| {
                                selected.set(value.parse::<u64>().ok());
                                reset_form.call(());
                            },
                        }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "alert alert-error", "{err.message()}" }
                    },
                    _ => rsx! {
                        p { "Memuat..." }
                    },
                }
            }

            if selected().is_some() {
                section { class: "card",
                    h2 { class: "card-title", "{form_title}" }
                    if let Some(message) = form_error() {
                        div { class: "alert alert-error", "{message}" }
                    }
                    form { class: "form", onsubmit: on_submit,
                        label { class: "form-label", "Pertanyaan *" }
                        textarea {
                            class: "form-input",
                            rows: 3,
                            placeholder: "Masukkan pertanyaan...",
                            value: "{current.prompt}",
                            oninput: move |evt| draft.write().prompt = evt.value(),
                        }
                        for (code, text) in OptionCode::ALL.into_iter().zip(option_texts) {
                            label { key: "{code}", class: "form-label", "Pilihan {code} *" }
                            input {
                                class: "form-input",
                                placeholder: "Pilihan {code}",
                                value: "{text}",
                                oninput: move |evt| draft.write().options[code.index()] = evt.value(),
                            }
                        }
                        label { class: "form-label", "Jawaban Benar *" }
                        select {
                            class: "form-input",
                            value: "{correct_value}",
                            onchange: move |evt| draft.write().correct = parse_correct(&evt.value()),
                            option { value: "", "Pilih jawaban benar" }
                            for code in OptionCode::ALL {
                                option { value: "{code}", "{code}" }
                            }
                        }
                        div { class: "form-actions",
                            if editing().is_some() {
                                button {
                                    class: "btn btn-outline",
                                    r#type: "button",
                                    onclick: move |_| reset_form.call(()),
                                    "Batal"
                                }
                            }
                            button { class: "btn btn-primary", r#type: "submit", "{submit_label}" }
                        }
                    }
                }

                section { class: "card",
                    h2 { class: "card-title", "Daftar Soal" }
                    p { class: "card-subtitle", "Soal-soal yang tersedia dalam paket ini" }
                    match questions_state {
                        ViewState::Ready(rows) => rsx! {
                            if rows.is_empty() {
                                p { class: "empty", "Belum ada soal dalam paket ini." }
                            } else {
                                for row in rows {
                                    QuestionCard { key: "{row.id}", row, on_edit, on_delete }
                                }
                            }
                        },
                        ViewState::Error(err) => rsx! {
                            p { class: "alert alert-error", "{err.message()}" }
                        },
                        _ => rsx! {
                            p { "Memuat..." }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn PackageSelect(cards: Vec<PackageCardVm>, value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        select {
            class: "form-input",
            value: "{value}",
            onchange: move |evt| on_change.call(evt.value()),
            option { value: "", "Pilih paket soal..." }
            for card in cards {
                option { key: "{card.id}", value: "{card.id}", "{card.name}" }
            }
        }
    }
}

#[component]
fn QuestionCard(
    row: QuestionRowVm,
    on_edit: Callback<QuestionRowVm>,
    on_delete: Callback<u64>,
) -> Element {
    let for_edit = row.clone();
    let QuestionRowVm { id, number, prompt, options, correct } = row;
    rsx! {
        article { class: "question-card",
            p { class: "question-prompt", "{number}. {prompt}" }
            ul { class: "question-options",
                for (letter, text) in options {
                    li {
                        key: "{letter}",
                        class: if letter == correct { "option correct" } else { "option" },
                        strong { "{letter}. " }
                        "{text}"
                    }
                }
            }
            div { class: "question-actions",
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: move |_| on_edit.call(for_edit.clone()),
                    "Edit"
                }
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
