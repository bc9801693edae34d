use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct SelectData {
    names: Vec<String>,
}

#[component]
pub fn SelectView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let series_service = ctx.series_service();

    let resource = use_resource(move || {
        let series_service = series_service.clone();
        async move {
            let names = series_service
                .list_series_names()
                .await
                .map_err(|err| ViewError::from_series(&err))?;
            Ok::<_, ViewError>(SelectData { names })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page select-page",
            header { class: "view-header",
                h2 { class: "view-title", "Play Quiz" }
                p { class: "view-subtitle", "Choose a question series." }
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
                    if data.names.is_empty() {
                        p { "No question series yet." }
                        Link { class: "btn btn-primary", to: Route::Author {}, "Create one" }
                    } else {
                        ul { class: "series-list",
                            for name in data.names {
                                li { key: "{name}",
                                    button {
                                        class: "btn btn-primary series-pick",
                                        r#type: "button",
                                        onclick: {
                                            let series = name.clone();
                                            move |_| {
                                                let _ = navigator.push(Route::Quiz {
                                                    series: series.clone(),
                                                });
                                            }
                                        },
                                        "{name}"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
