use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_now;
use services::{Clock, LeaderboardService, QuizLoopService, SeriesService};
use storage::{QuestionRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{AuthorView, HomeView, LeaderboardView, QuizView, SelectView};

#[derive(Clone)]
struct TestApp {
    series_service: Arc<SeriesService>,
    quiz_loop: Arc<QuizLoopService>,
    leaderboard: Arc<LeaderboardService>,
}

impl UiApp for TestApp {
    fn series_service(&self) -> Arc<SeriesService> {
        Arc::clone(&self.series_service)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Author,
    Select,
    Quiz(String),
    Leaderboard,
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
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Author => rsx! { AuthorView {} },
        ViewKind::Select => rsx! { SelectView {} },
        ViewKind::Quiz(series) => rsx! { QuizView { series } },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_repo(view, Storage::in_memory())
}

pub fn setup_view_harness_with_repo(view: ViewKind, storage: Storage) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let questions: Arc<dyn QuestionRepository> = Arc::clone(&storage.questions);
    let app = Arc::new(TestApp {
        series_service: Arc::new(SeriesService::new(Arc::clone(&questions))),
        quiz_loop: Arc::new(QuizLoopService::new(clock, Arc::clone(&questions))),
        leaderboard: Arc::new(LeaderboardService::new(clock, questions)),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage }
}
