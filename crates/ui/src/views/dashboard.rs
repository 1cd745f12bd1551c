use dioxus::prelude::*;
use course_core::gate::LessonStatus;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, LessonRowVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let activity = ctx.activity();
    let user_id = ctx.user_id();

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        let activity = activity.clone();
        async move {
            let summary = progress
                .dashboard(user_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            // Local activity is decoration; an unreadable store shows no streak.
            let streak = activity.streak().await.unwrap_or_default();
            let last_lesson = activity.last_lesson().await.unwrap_or_default();
            Ok(map_dashboard(&summary, streak, last_lesson.as_ref()))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "loading", "Carregando..." }
                },
                ViewState::Ready(vm) => rsx! {
                    DashboardBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error",
                        p { "{err.message()}" }
                        button {
                            class: "btn",
                            onclick: move |_| resource.restart(),
                            "Tentar novamente"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(vm: DashboardVm) -> Element {
    let final_class = if vm.bonus_unlocked {
        "card final-card final-card--open"
    } else {
        "card final-card"
    };

    rsx! {
        header { class: "dashboard-header",
            h1 { "Painel de Controle" }
            if vm.streak_days > 0 {
                span { class: "streak", "🔥 {vm.streak_days} dia(s) seguidos" }
            }
        }

        if let Some(resume) = vm.resume.clone() {
            Link {
                class: "resume",
                to: Route::Lesson { slug: resume.slug },
                "Continuar: {resume.title}"
            }
        }

        section { class: "status-grid",
            div { class: "card bio-card",
                h2 { "Bio-Dados" }
                div { class: "stat",
                    span { class: "stat-label", "Progresso" }
                    span { class: "stat-value", "{vm.percentage}%" }
                }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {vm.percentage}%" }
                }
                div { class: "stat",
                    span { class: "stat-label", "Aulas" }
                    span { class: "stat-value", "{vm.lessons_label}" }
                }
                div { class: "stat",
                    span { class: "stat-label", "Nível" }
                    span { class: "stat-value", "{vm.level}" }
                }
            }

            div { class: "{final_class}",
                h2 { "Protocolo Final" }
                if vm.bonus_unlocked {
                    p { class: "final-status", "ACESSO LIBERADO" }
                    Link { class: "btn btn-primary", to: Route::Surprise {}, "Acessar Surpresa" }
                } else {
                    p { class: "final-status", "🔒 Bloqueado" }
                    p { class: "final-hint", "Requer 100% de conclusão" }
                }
            }
        }

        section { class: "lesson-list",
            h2 { "Módulos de Treinamento" }
            ul {
                for row in vm.rows {
                    LessonRow { key: "{row.slug}", row }
                }
            }
        }
    }
}

#[component]
fn LessonRow(row: LessonRowVm) -> Element {
    rsx! {
        li { class: "{row.status_class()}",
            if row.is_accessible() {
                Link { class: "lesson-link", to: Route::Lesson { slug: row.slug.clone() },
                    LessonRowBody { row: row.clone() }
                }
            } else {
                div { class: "lesson-link lesson-link--locked",
                    LessonRowBody { row: row.clone() }
                }
            }
        }
    }
}

#[component]
fn LessonRowBody(row: LessonRowVm) -> Element {
    rsx! {
        span { class: "lesson-icon", "{row.icon()}" }
        div { class: "lesson-info",
            h3 { "{row.title}" }
            p { "{row.description}" }
            div { class: "lesson-meta",
                span { "{row.duration}" }
                span { "{row.category}" }
                span { "{row.xp_label}" }
            }
        }
        if row.status == LessonStatus::Current {
            span { class: "badge", "Recomendado" }
        }
    }
}
