use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AuthorView, HomeView, LeaderboardView, QuizView, SelectView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/author", AuthorView)] Author {},
        #[route("/play", SelectView)] Select {},
        #[route("/play/:series", QuizView)] Quiz { series: String },
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Home {}, "Menu" } }
                li { Link { to: Route::Author {}, "Create Series" } }
                li { Link { to: Route::Select {}, "Play" } }
                li { Link { to: Route::Leaderboard {}, "Leaderboard" } }
            }
        }
    }
}
