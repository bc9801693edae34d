use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quiz Application" }
                p { class: "view-subtitle", "Write a question series, play it, climb the leaderboard." }
            }
            div { class: "view-divider" }
            div { class: "menu",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Author {});
                    },
                    "Create Question Series"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Select {});
                    },
                    "Play Quiz"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Leaderboard {});
                    },
                    "Show Leaderboard"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| dioxus::desktop::window().close(),
                    "Exit"
                }
            }
        }
    }
}
