use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    CompletionFlag, DeckPager, LessonVm, NavDirection, key_direction, map_lesson,
    swipe_direction,
};

#[component]
pub fn LessonView(slug: String) -> Element {
    // Keyed so that navigating between lessons starts from a fresh deck.
    rsx! {
        LessonLoader { key: "{slug}", slug: slug.clone() }
    }
}

#[component]
fn LessonLoader(slug: String) -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let user_id = ctx.user_id();

    let resource = use_resource({
        let slug = slug.clone();
        move || {
            let lessons = lessons.clone();
            let slug = slug.clone();
            async move {
                let page = lessons
                    .load_lesson(user_id, &slug)
                    .await
                    .map_err(|err| ViewError::from(&err))?;
                Ok(map_lesson(&page))
            }
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page lesson",
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "loading", "Carregando aula..." }
                },
                ViewState::Ready(vm) => rsx! {
                    LessonDeck { slug: slug.clone(), vm }
                },
                ViewState::Error(err) => rsx! {
                    LessonUnavailable { err }
                },
            }
        }
    }
}

#[component]
fn LessonUnavailable(err: ViewError) -> Element {
    let title = match err {
        ViewError::NotFound => "Aula não encontrada",
        ViewError::Locked { .. } => "🔒 Aula bloqueada",
        _ => "Erro ao carregar",
    };
    rsx! {
        div { class: "lesson-unavailable",
            h1 { "{title}" }
            p { "{err.message()}" }
            Link { class: "btn", to: Route::Dashboard {}, "Voltar ao Dashboard" }
        }
    }
}

#[component]
fn LessonDeck(slug: String, vm: LessonVm) -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let user_id = ctx.user_id();
    let navigator = use_navigator();

    let mut pager = use_signal(|| DeckPager::new(vm.cards.len()));
    let mut flag = use_signal(|| CompletionFlag::new(vm.is_completed));
    let mut drag_start = use_signal(|| None::<(f64, f64)>);

    let mut go = move |direction: NavDirection| {
        pager.write().step(direction);
    };

    let on_complete = move |_| {
        let Some(previous) = flag.write().begin() else {
            return;
        };
        let lessons = lessons.clone();
        let slug = slug.clone();
        spawn(async move {
            match lessons.mark_complete(user_id, &slug).await {
                Ok(_) => {
                    flag.write().succeed();
                    navigator.push(Route::Dashboard {});
                }
                Err(err) => {
                    tracing::warn!(%slug, error = %err, "could not save completion");
                    flag.write().fail(previous, ViewError::SaveFailed);
                }
            }
        });
    };

    let current = pager();
    let completion = flag();
    let complete_class = if completion.is_completed() {
        "btn btn-done"
    } else {
        "btn btn-primary"
    };
    let Some(card) = vm.cards.get(current.index()).cloned() else {
        return rsx! {
            LessonUnavailable { err: ViewError::Unknown }
        };
    };

    rsx! {
        div {
            class: "deck",
            tabindex: "0",
            autofocus: true,
            onkeydown: move |evt| {
                if let Some(direction) = key_direction(&evt.data.key()) {
                    go(direction);
                }
            },
            onpointerdown: move |evt| {
                let point = evt.client_coordinates();
                drag_start.set(Some((point.x, point.y)));
            },
            onpointerup: move |evt| {
                let Some((x0, y0)) = drag_start() else {
                    return;
                };
                drag_start.set(None);
                let point = evt.client_coordinates();
                if let Some(direction) = swipe_direction(point.x - x0, point.y - y0) {
                    go(direction);
                }
            },

            header { class: "deck-header",
                Link { class: "deck-back", to: Route::Dashboard {}, "← Dashboard" }
                if vm.is_bonus {
                    span { class: "badge", "Bônus" }
                }
                span { class: "deck-counter", "{current.label()}" }
            }
            div { class: "progress-bar progress-bar--thin",
                div { class: "progress-fill", style: "width: {current.card_pct()}%" }
            }

            article { class: "lesson-card",
                h2 { class: "lesson-card-heading", "{card.heading}" }
                div { class: "markdown", dangerous_inner_html: "{card.body_html}" }

                if current.is_last() {
                    div { class: "completion",
                        button {
                            class: "{complete_class}",
                            disabled: completion.is_saving(),
                            onclick: on_complete,
                            "{completion.button_label()}"
                        }
                        if let Some(err) = completion.error() {
                            p { class: "error", "{err.message()}" }
                        }
                    }
                }
            }

            nav { class: "deck-nav",
                button {
                    class: "btn",
                    disabled: !current.can_prev(),
                    onclick: move |_| go(NavDirection::Prev),
                    "Anterior"
                }
                button {
                    class: "btn",
                    disabled: !current.can_next(),
                    onclick: move |_| go(NavDirection::Next),
                    "Próximo"
                }
            }

            footer { class: "deck-footer",
                span { "{vm.bottom_label(&current)}" }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {vm.course_pct}%" }
                }
            }
        }
    }
}
