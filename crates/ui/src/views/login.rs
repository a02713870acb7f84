use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use psikotes_core::model::Role;
use services::LoginForm;

use crate::context::AppContext;
use crate::routes::Route;

pub(crate) fn parse_role(value: &str) -> Option<Role> {
    value.parse::<Role>().ok()
}

pub(crate) fn role_home(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard {},
        Role::User => Route::Packages {},
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = auth.clone();
        let form = LoginForm {
            email: email(),
            password: password(),
            role: parse_role(&role()),
        };
        spawn(async move {
            submitting.set(true);
            error.set(None);
            match auth.login(form).await {
                Ok(session) => {
                    navigator.push(role_home(session.role()));
                }
                Err(err) => {
                    if !err.is_validation() {
                        tracing::error!(error = %err, "login failed");
                    }
                    error.set(Some(err.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "page auth-page",
            div { class: "card auth-card",
                h1 { class: "card-title", "Sistem Psikotes Online" }
                p { class: "card-subtitle", "Masuk ke akun Anda untuk melanjutkan" }

                if let Some(message) = error() {
                    div { class: "alert alert-error", "{message}" }
                }

                form { class: "form", onsubmit: on_submit,
                    label { class: "form-label", r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        class: "form-input",
                        r#type: "email",
                        placeholder: "nama@email.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { class: "form-label", r#for: "login-password", "Kata Sandi" }
                    input {
                        id: "login-password",
                        class: "form-input",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }

                    label { class: "form-label", r#for: "login-role", "Peran" }
                    select {
                        id: "login-role",
                        class: "form-input",
                        value: "{role}",
                        onchange: move |evt| role.set(evt.value()),
                        option { value: "", "Pilih peran" }
                        option { value: "admin", {Role::Admin.label()} }
                        option { value: "user", {Role::User.label()} }
                    }

                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Memproses..." } else { "Masuk" }
                    }
                }

                p { class: "auth-switch",
                    "Belum punya akun? "
                    Link { to: Route::Register {}, "Daftar di sini" }
                }

                div { class: "demo-credentials",
                    p { strong { "Demo Credentials:" } }
                    p { strong { "Admin:" } " admin@demo.com" }
                    p { strong { "User:" } " user@demo.com" }
                    p { strong { "Password:" } " password123" }
                }
            }
        }
    }
}
