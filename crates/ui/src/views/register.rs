use dioxus::prelude::*;
use dioxus_router::Link;
use psikotes_core::model::{RegistrationDraft, Role};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::login::parse_role;

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();

    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut role = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut registered = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = auth.clone();
        let draft = RegistrationDraft {
            full_name: full_name(),
            email: email(),
            password: password(),
            confirm_password: confirm(),
            role: parse_role(&role()),
        };
        spawn(async move {
            error.set(None);
            match auth.register(draft).await {
                Ok(_) => registered.set(true),
                Err(err) => {
                    if !err.is_validation() {
                        tracing::error!(error = %err, "registration failed");
                    }
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    if registered() {
        return rsx! {
            div { class: "page auth-page",
                div { class: "card auth-card success",
                    h1 { class: "card-title", "Pendaftaran Berhasil!" }
                    p { "Akun Anda telah berhasil dibuat. Silakan masuk untuk melanjutkan." }
                    Link { class: "btn btn-primary", to: Route::Login {}, "Masuk" }
                }
            }
        };
    }

    rsx! {
        div { class: "page auth-page",
            div { class: "card auth-card",
                h1 { class: "card-title", "Daftar Akun Baru" }
                p { class: "card-subtitle", "Buat akun untuk mengakses sistem psikotes online" }

                if let Some(message) = error() {
                    div { class: "alert alert-error", "{message}" }
                }

                form { class: "form", onsubmit: on_submit,
                    label { class: "form-label", "Nama Lengkap" }
                    input {
                        class: "form-input",
                        value: "{full_name}",
                        oninput: move |evt| full_name.set(evt.value()),
                    }

                    label { class: "form-label", "Email" }
                    input {
                        class: "form-input",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { class: "form-label", "Kata Sandi" }
                    input {
                        class: "form-input",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }

                    label { class: "form-label", "Konfirmasi Kata Sandi" }
                    input {
                        class: "form-input",
                        r#type: "password",
                        value: "{confirm}",
                        oninput: move |evt| confirm.set(evt.value()),
                    }

                    label { class: "form-label", "Peran" }
                    select {
                        class: "form-input",
                        value: "{role}",
                        onchange: move |evt| role.set(evt.value()),
                        option { value: "", "Pilih peran" }
                        option { value: "admin", {Role::Admin.label()} }
                        option { value: "user", {Role::User.label()} }
                    }

                    button { class: "btn btn-primary", r#type: "submit", "Daftar" }
                }

                p { class: "auth-switch",
                    "Sudah punya akun? "
                    Link { to: Route::Login {}, "Masuk di sini" }
                }
            }
        }
    }
}
