use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, map_leaderboard_rows};

#[derive(Clone, Debug, PartialEq)]
struct LeaderboardData {
    rows: Vec<LeaderboardRowVm>,
}

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let leaderboard = ctx.leaderboard();

    let resource = use_resource(move || {
        let leaderboard = leaderboard.clone();
        async move {
            let board = leaderboard
                .leaderboard()
                .await
                .map_err(|err| ViewError::from_leaderboard(&err))?;
            Ok::<_, ViewError>(LeaderboardData {
                rows: map_leaderboard_rows(&board),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page leaderboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "Leaderboard" }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { "No scores yet." }
                    } else {
                        table { class: "leaderboard",
                            thead {
                                tr {
                                    th { "#" }
                                    th { "Player" }
                                    th { "Score" }
                                    th { "Series" }
                                    th { "When" }
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    LeaderboardRow { row }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn LeaderboardRow(row: LeaderboardRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.rank}" }
            td { "{row.username}" }
            td { "{row.score}" }
            td { "{row.series_label}" }
            td { "{row.recorded_at_str}" }
        }
    }
}
