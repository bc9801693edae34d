use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::QuizResult;
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FeedbackVm, QuestionVm, QuizVm, start_quiz};

#[derive(Clone, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Error(ViewError),
}

#[component]
pub fn QuizView(series: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let vm = use_signal(|| None::<QuizVm>);
    let mut username = use_signal(String::new);
    let mut save_state = use_signal(|| SaveState::Idle);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let series = series.clone();
        let mut vm = vm;
        async move {
            let mut started = start_quiz(&quiz_loop, &series).await?;
            let ticks = started.take_ticks();
            vm.set(Some(started));

            // Ticks stop arriving once the run finishes or is dropped.
            if let Some(mut ticks) = ticks {
                spawn(async move {
                    while let Some(tick) = ticks.recv().await {
                        if let Some(current) = vm.write().as_mut() {
                            current.on_tick(tick);
                        }
                    }
                    debug!("quiz tick pump finished");
                });
            }
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(&resource);
    let (title, question, feedback, result) = vm
        .read()
        .as_ref()
        .map(|current| {
            (
                current.series_name().to_owned(),
                current.question(),
                current.feedback().cloned(),
                current.result(),
            )
        })
        .unwrap_or_default();

    let on_quit = move |_: MouseEvent| {
        let mut vm = vm;
        if let Some(current) = vm.write().as_mut() {
            current.abandon();
        }
        let _ = navigator.push(Route::Home {});
    };

    let on_save = move |_: MouseEvent| {
        let Some(result) = vm.read().as_ref().and_then(QuizVm::result) else {
            return;
        };
        let quiz_loop = quiz_loop.clone();
        let name = username();
        save_state.set(SaveState::Saving);
        spawn(async move {
            match quiz_loop.record_result(&result, &name).await {
                Ok(_) => {
                    save_state.set(SaveState::Idle);
                    let _ = navigator.push(Route::Leaderboard {});
                }
                Err(err) => save_state.set(SaveState::Error(ViewError::from_quiz(&err))),
            }
        });
    };

    rsx! {
        div { class: "page quiz-page",
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
                            let _ = navigator.push(Route::Select {});
                        },
                        "Back"
                    }
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
                ViewState::Ready(()) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{title}" }
                    }
                    if let Some(feedback) = feedback {
                        FeedbackBanner { feedback }
                    }
                    if let Some(question) = question {
                        QuestionCard { question, vm }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: on_quit,
                            "Quit"
                        }
                    } else if let Some(result) = result {
                        FinishedCard {
                            result,
                            username: username(),
                            saving: save_state() == SaveState::Saving,
                            error: match save_state() {
                                SaveState::Error(err) => Some(err.message()),
                                _ => None,
                            },
                            on_username: move |value: String| username.set(value),
                            on_save,
                            on_skip: move |_| {
                                let _ = navigator.push(Route::Home {});
                            },
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn FeedbackBanner(feedback: FeedbackVm) -> Element {
    let class = if feedback.is_correct() {
        "feedback feedback--correct"
    } else {
        "feedback feedback--wrong"
    };
    rsx! {
        p { class: "{class}", "{feedback.message()}" }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, vm: Signal<Option<QuizVm>>) -> Element {
    let choices = question.choices.iter().enumerate().map(|(index, choice)| {
        let mut vm = vm;
        rsx! {
            button {
                key: "{index}",
                class: "btn btn-choice",
                r#type: "button",
                onclick: move |_| {
                    if let Some(current) = vm.write().as_mut() {
                        current.choose(index);
                    }
                },
                "{choice}"
            }
        }
    });

    rsx! {
        section { class: "question-card",
            div { class: "question-meta",
                span { class: "question-progress", "Question {question.number} of {question.total}" }
                span { class: "question-timer", "Time left: {question.remaining_secs}s" }
                span { class: "question-score", "Score: {question.score}" }
            }
            h3 { class: "question-text", "{question.text}" }
            div { class: "question-choices", {choices} }
        }
    }
}

#[component]
fn FinishedCard(
    result: QuizResult,
    username: String,
    saving: bool,
    error: Option<&'static str>,
    on_username: EventHandler<String>,
    on_save: EventHandler<MouseEvent>,
    on_skip: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        section { class: "finished-card",
            h3 { "Quiz finished!" }
            p { class: "final-score", "Your score: {result.score} / {result.total}" }
            label { r#for: "quiz-username", "Enter your name for the leaderboard" }
            input {
                id: "quiz-username",
                r#type: "text",
                value: "{username}",
                oninput: move |evt: FormEvent| on_username.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "error", "{message}" }
            }
            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: saving,
                    onclick: move |evt| on_save.call(evt),
                    "Save Score"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |evt| on_skip.call(evt),
                    "Skip"
                }
            }
        }
    }
}
