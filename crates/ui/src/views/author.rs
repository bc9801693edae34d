use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::CHOICE_COUNT;
use services::SeriesServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{AuthorStep, QuestionFormVm};

/// Authoring errors are shown inline; storage failures use the shared copy.
fn author_error_message(err: &SeriesServiceError) -> String {
    match err {
        SeriesServiceError::Storage(_) => ViewError::from_series(err).message().to_string(),
        other => other.to_string(),
    }
}

#[component]
pub fn AuthorView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let series_service = ctx.series_service();

    let mut step = use_signal(|| AuthorStep::Naming);
    let mut name = use_signal(String::new);
    let mut form = use_signal(QuestionFormVm::default);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let begin_service = series_service.clone();
    let on_begin = move |_: MouseEvent| {
        let series_service = begin_service.clone();
        let requested = name();
        busy.set(true);
        spawn(async move {
            match series_service.begin_draft(&requested).await {
                Ok(draft) => {
                    error.set(None);
                    step.set(AuthorStep::Questions(draft));
                }
                Err(err) => error.set(Some(author_error_message(&err))),
            }
            busy.set(false);
        });
    };

    let on_add = move |_: MouseEvent| {
        let mut current = step.write();
        if let AuthorStep::Questions(draft) = &mut *current {
            match form.write().add_to(draft) {
                Ok(()) => error.set(None),
                Err(message) => error.set(Some(message)),
            }
        }
    };

    let on_save = move |_: MouseEvent| {
        let AuthorStep::Questions(draft) = step() else {
            return;
        };
        let series_service = series_service.clone();
        busy.set(true);
        spawn(async move {
            let questions = draft.len();
            match series_service.save_draft(draft).await {
                Ok(saved) => {
                    error.set(None);
                    step.set(AuthorStep::Saved {
                        name: saved.name().to_string(),
                        questions,
                    });
                }
                Err(err) => error.set(Some(author_error_message(&err))),
            }
            busy.set(false);
        });
    };

    let on_cancel = move |_: MouseEvent| {
        let _ = navigator.push(Route::Home {});
    };

    let count = step.read().question_count();

    rsx! {
        div { class: "page author-page",
            header { class: "view-header",
                h2 { class: "view-title", "Create Question Series" }
            }
            div { class: "view-divider" }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            match step() {
                AuthorStep::Naming => rsx! {
                    label { r#for: "series-name", "Series name" }
                    input {
                        id: "series-name",
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                    div { class: "actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: busy(),
                            onclick: on_begin,
                            "Start"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: on_cancel,
                            "Cancel"
                        }
                    }
                },
                AuthorStep::Questions(draft) => rsx! {
                    p { class: "view-subtitle", "Series \"{draft.name()}\": {count} question(s) so far." }
                    QuestionForm { form }
                    div { class: "actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: on_add,
                            "Add Question"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: busy() || count == 0,
                            onclick: on_save,
                            "Save Series"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: on_cancel,
                            "Discard"
                        }
                    }
                },
                AuthorStep::Saved { name, questions } => rsx! {
                    p { class: "success", "Saved \"{name}\" with {questions} question(s)." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: on_cancel,
                        "Back to Menu"
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionForm(form: Signal<QuestionFormVm>) -> Element {
    let current = form();
    let choice_inputs = (0..CHOICE_COUNT).map(|index| {
        let mut form = form;
        let value = current.choices[index].clone();
        let position = index + 1;
        rsx! {
            div { key: "{index}", class: "choice-row",
                input {
                    r#type: "radio",
                    name: "correct-choice",
                    checked: current.correct == index,
                    onchange: move |_| form.write().correct = index,
                }
                input {
                    r#type: "text",
                    placeholder: "Choice {position}",
                    value: "{value}",
                    oninput: move |evt: FormEvent| form.write().choices[index] = evt.value(),
                }
            }
        }
    });

    rsx! {
        div { class: "question-form",
            label { r#for: "question-text", "Question" }
            textarea {
                id: "question-text",
                value: "{current.text}",
                oninput: move |evt: FormEvent| form.write().text = evt.value(),
            }
            p { class: "hint", "Mark the correct answer with the radio button." }
            {choice_inputs}
        }
    }
}
