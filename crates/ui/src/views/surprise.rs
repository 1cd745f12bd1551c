use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::SurpriseAccess;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProductCardVm, map_product_cards};

#[derive(Clone, Debug, PartialEq)]
struct BonusLink {
    slug: String,
    title: String,
    description: String,
    duration: String,
}

#[derive(Clone, Debug, PartialEq)]
enum SurpriseData {
    Unlocked {
        bonus: Vec<BonusLink>,
        products: Vec<ProductCardVm>,
    },
    Locked,
}

#[component]
pub fn SurpriseView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let user_id = ctx.user_id();
    let navigator = use_navigator();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let access = progress
                .surprise(user_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(match access {
                SurpriseAccess::Unlocked {
                    bonus_lessons,
                    products,
                } => SurpriseData::Unlocked {
                    bonus: bonus_lessons
                        .iter()
                        .map(|lesson| BonusLink {
                            slug: lesson.slug().to_string(),
                            title: lesson.title().to_string(),
                            description: lesson.description().to_string(),
                            duration: lesson.duration().to_string(),
                        })
                        .collect(),
                    products: map_product_cards(&products),
                },
                SurpriseAccess::Locked { percentage } => {
                    tracing::debug!(percentage, "surprise page locked");
                    SurpriseData::Locked
                }
            })
        }
    });

    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if matches!(resource.value().read().as_ref(), Some(Ok(SurpriseData::Locked))) {
            navigator.replace(Route::Dashboard {});
        }
    });

    rsx! {
        div { class: "page surprise",
            match state {
                ViewState::Idle | ViewState::Ready(SurpriseData::Locked) => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "loading", "Verificando acesso..." }
                },
                ViewState::Ready(SurpriseData::Unlocked { bonus, products }) => rsx! {
                    h1 { "🎁 Protocolo Final" }
                    p { class: "lead", "Você concluiu o Método M. Aqui está o seu acesso exclusivo." }

                    section { class: "bonus-list",
                        for item in bonus {
                            Link {
                                key: "{item.slug}",
                                class: "card bonus-card",
                                to: Route::Lesson { slug: item.slug.clone() },
                                h2 { "{item.title}" }
                                p { "{item.description}" }
                                span { class: "lesson-meta", "{item.duration}" }
                            }
                        }
                    }

                    if !products.is_empty() {
                        section { class: "surprise-products",
                            h2 { "Recomendados para você" }
                            ul { class: "product-grid",
                                for product in products {
                                    li { key: "{product.id}", class: "card product-card",
                                        h3 { "{product.title}" }
                                        p { "{product.description}" }
                                        a { class: "btn", href: "{product.link}", target: "_blank", "Ver Oferta" }
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error",
                        p { "{err.message()}" }
                        Link { class: "btn", to: Route::Dashboard {}, "Voltar ao Dashboard" }
                    }
                },
            }
        }
    }
}
