use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use psikotes_core::model::{OptionCode, PackageId};
use services::TestFlowError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionRowVm, TestOutcome, TestVm};

/// Snapshot of the running test used for a single render.
#[derive(Clone, Debug, PartialEq)]
struct TestFrame {
    package_name: String,
    prompt: String,
    options: Vec<OptionRowVm>,
    counter: String,
    percent: u8,
    is_first: bool,
    next_label: &'static str,
    timer: String,
    warning: Option<String>,
}

impl From<&TestVm> for TestFrame {
    fn from(vm: &TestVm) -> Self {
        Self {
            package_name: vm.package_name().to_string(),
            prompt: vm.prompt().to_string(),
            options: vm.options(),
            counter: vm.counter_label(),
            percent: vm.progress_percent(),
            is_first: vm.is_first(),
            next_label: vm.next_label(),
            timer: vm.timer_label(),
            warning: vm.warning().map(str::to_string),
        }
    }
}

fn start_error(err: &TestFlowError) -> ViewError {
    match err {
        TestFlowError::PackageNotFound => ViewError::NotFound,
        TestFlowError::Empty => ViewError::Empty,
        other => {
            tracing::error!(error = %other, "starting test failed");
            ViewError::Unknown
        }
    }
}

#[component]
pub fn TestView(package_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let flow = ctx.test_flow();

    let mut test = use_signal(|| None::<TestVm>);
    let mut failure = use_signal(|| None::<ViewError>);
    let mut tick = use_signal(|| 0_u64);

    let flow_for_start = flow.clone();
    let resource = use_resource(move || {
        let flow = flow_for_start.clone();
        async move {
            let session = flow
                .start(PackageId::new(package_id))
                .await
                .map_err(|err| start_error(&err))?;
            test.set(Some(TestVm::new(session)));
            Ok::<_, ViewError>(())
        }
    });

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            tick += 1;
        }
    });

    let flow_for_select = flow.clone();
    let on_select = use_callback(move |code: OptionCode| {
        if let Some(vm) = test.write().as_mut() {
            vm.select(&flow_for_select, code);
        }
    });

    let flow_for_previous = flow.clone();
    let on_previous = move |_: MouseEvent| {
        if let Some(vm) = test.write().as_mut() {
            vm.previous(&flow_for_previous);
        }
    };

    let on_next = move |_: MouseEvent| {
        let outcome = match test.write().as_mut() {
            Some(vm) => vm.next(&flow),
            None => return,
        };
        match outcome {
            Ok(TestOutcome::Continue) => {}
            Ok(TestOutcome::Completed(_)) => {
                navigator.replace(Route::Results {});
            }
            Err(err) => failure.set(Some(err)),
        }
    };

    // Subscribe to the one-second tick so the timer label refreshes.
    let _ = tick();
    let frame = test.read().as_ref().map(TestFrame::from);

    let state = match (view_state_from_resource(resource), failure()) {
        (_, Some(err)) => ViewState::Error(err),
        (ViewState::Ready(()), None) => match frame {
            Some(frame) => ViewState::Ready(frame),
            None => ViewState::Loading,
        },
        (ViewState::Error(err), None) => ViewState::Error(err),
        (ViewState::Loading, None) => ViewState::Loading,
        (ViewState::Idle, None) => ViewState::Idle,
    };

    rsx! {
        div { class: "page test-page",
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    div { class: "guard-loading",
                        div { class: "spinner" }
                        p { "Memuat soal..." }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card",
                        p { class: "alert alert-error", "{err.message()}" }
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: move |_| {
                                navigator.push(Route::Packages {});
                            },
                            "Kembali ke Halaman Paket"
                        }
                    }
                },
                ViewState::Ready(frame) => rsx! {
                    header { class: "test-header",
                        h1 { class: "app-header-title", "{frame.package_name}" }
                        span { class: "test-timer", "Waktu: {frame.timer}" }
                    }
                    div { class: "progress-row",
                        span { "{frame.counter}" }
                        span { "{frame.percent}%" }
                    }
                    div { class: "progress",
                        div { class: "progress-bar", style: "width: {frame.percent}%" }
                    }

                    section { class: "card",
                        h2 { class: "question-prompt", "{frame.prompt}" }
                        div { class: "option-list",
                            for row in frame.options {
                                OptionRow { key: "{row.code}", row, on_select }
                            }
                        }
                        if let Some(message) = frame.warning {
                            div { class: "alert alert-warning", "{message}" }
                        }
                    }

                    div { class: "test-actions",
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            disabled: frame.is_first,
                            onclick: on_previous,
                            "Sebelumnya"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: on_next,
                            "{frame.next_label}"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn OptionRow(row: OptionRowVm, on_select: Callback<OptionCode>) -> Element {
    let code = row.code;
    let id = format!("option-{code}");
    rsx! {
        label {
            class: if row.selected { "option-row selected" } else { "option-row" },
            r#for: "{id}",
            input {
                id: "{id}",
                r#type: "radio",
                name: "answer",
                value: "{code}",
                checked: row.selected,
                onchange: move |_| on_select.call(code),
            }
            span { class: "option-code", "{code}." }
            span { "{row.text}" }
        }
    }
}
