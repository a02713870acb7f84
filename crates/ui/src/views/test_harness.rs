use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use psikotes_core::model::Role;
use psikotes_core::time::fixed_now;
use services::{
    AuthService, Clock, LoginForm, PackageService, QuestionService, ResultExporter,
    ResultPublisher, ResultReader, TestFlowService,
};
use storage::Storage;
use storage::demo::{DEMO_ADMIN_EMAIL, DEMO_PASSWORD, DEMO_USER_EMAIL, seed_demo_data};
use storage::repository::PackageRepository;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AdminDashboardView, AuthGuard, LoginView, ManageQuestionsView, PackagesView, ResultsView,
    TestView,
};

#[derive(Clone)]
struct TestApp {
    auth: Arc<AuthService>,
    packages: Arc<PackageService>,
    questions: Arc<QuestionService>,
    test_flow: Arc<TestFlowService>,
    results: Arc<ResultReader>,
    exporter: Arc<ResultExporter>,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn packages(&self) -> Arc<PackageService> {
        Arc::clone(&self.packages)
    }

    fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    fn test_flow(&self) -> Arc<TestFlowService> {
        Arc::clone(&self.test_flow)
    }

    fn results(&self) -> Arc<ResultReader> {
        Arc::clone(&self.results)
    }

    fn exporter(&self) -> Arc<ResultExporter> {
        Arc::clone(&self.exporter)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    AdminDashboard,
    ManageQuestions,
    Packages,
    Test(u64),
    Results,
    /// `PackagesView` wrapped in a guard requiring `Role::Admin`.
    AdminOnly,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/:..segments")]
    Elsewhere { segments: Vec<String> },
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::AdminDashboard => rsx! { AdminDashboardView {} },
        ViewKind::ManageQuestions => rsx! { ManageQuestionsView {} },
        ViewKind::Packages => rsx! { PackagesView {} },
        ViewKind::Test(package_id) => rsx! { TestView { package_id } },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::AdminOnly => rsx! {
            AuthGuard { required: Some(Role::Admin),
                PackagesView {}
            }
        },
    }
}

/// Stand-in for every real route; shows where a view navigated to.
#[component]
fn Elsewhere(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        p { "navigated:/{path}" }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub auth: Arc<AuthService>,
    pub test_flow: Arc<TestFlowService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub async fn login_as(&self, role: Role) {
        let email = match role {
            Role::Admin => DEMO_ADMIN_EMAIL,
            Role::User => DEMO_USER_EMAIL,
        };
        self.auth
            .login(LoginForm {
                email: email.to_string(),
                password: DEMO_PASSWORD.to_string(),
                role: Some(role),
            })
            .await
            .expect("demo login");
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let packages = Arc::clone(&storage.packages);
    setup_view_harness_with_package_repo(view, storage, packages).await
}

pub async fn setup_view_harness_with_package_repo(
    view: ViewKind,
    storage: Storage,
    packages: Arc<dyn PackageRepository>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    seed_demo_data(&storage, clock.now())
        .await
        .expect("seed demo data");

    let export_dir = std::env::temp_dir().join("psikotes-ui-tests");
    let auth = Arc::new(AuthService::new(
        Arc::clone(&storage.users),
        Arc::clone(&storage.session),
    ));
    let test_flow = Arc::new(TestFlowService::new(
        clock,
        Arc::clone(&packages),
        Arc::clone(&storage.questions),
        ResultPublisher::new(Arc::clone(&storage.session)),
    ));
    let app = Arc::new(TestApp {
        auth: Arc::clone(&auth),
        packages: Arc::new(PackageService::new(
            clock,
            packages,
            Arc::clone(&storage.questions),
        )),
        questions: Arc::new(QuestionService::new(Arc::clone(&storage.questions))),
        test_flow: Arc::clone(&test_flow),
        results: Arc::new(ResultReader::new(Arc::clone(&storage.session))),
        exporter: Arc::new(ResultExporter::new(clock, export_dir)),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        auth,
        test_flow,
    }
}
