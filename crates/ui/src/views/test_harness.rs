use std::sync::Arc;

use course_core::model::UserId;
use course_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    ActivityService, AppServices, Clock, EmbeddedContent, LessonService, ProductService,
    ProgressService,
};
use storage::repository::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{ArsenalView, DashboardView, LessonView, NotFoundView, SurpriseView};

#[derive(Clone)]
struct TestApp {
    user_id: UserId,
    services: AppServices,
}

impl UiApp for TestApp {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn products(&self) -> Arc<ProductService> {
        self.services.products()
    }

    fn activity(&self) -> Arc<ActivityService> {
        self.services.activity()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Lesson(&'static str),
    Surprise,
    Arsenal,
    NotFound,
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

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Lesson(slug) => rsx! { LessonView { slug: slug.to_string() } },
        ViewKind::Surprise => rsx! { SurpriseView {} },
        ViewKind::Arsenal => rsx! { ArsenalView {} },
        ViewKind::NotFound => rsx! { NotFoundView { segments: vec!["nada".to_string()] } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub user_id: UserId,
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

    /// Rebuild and poll until pending resources have resolved.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_user() -> UserId {
    UserId::new(uuid::Uuid::from_u128(42))
}

/// Harness over a fresh in-memory store.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_repo(view, InMemoryRepository::new())
}

/// Harness over a pre-seeded in-memory store.
pub fn setup_view_harness_with_repo(view: ViewKind, repo: InMemoryRepository) -> ViewHarness {
    setup_view_harness_with_storage(view, &Storage::from_in_memory(repo))
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let services = AppServices::new(storage, clock, Arc::new(EmbeddedContent));
    let user_id = test_user();

    let app = Arc::new(TestApp {
        user_id,
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        services,
        user_id,
    }
}
