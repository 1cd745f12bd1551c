use course_core::model::ProductCategory;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProductCardVm, category_tabs, map_product_cards};

#[component]
pub fn ArsenalView() -> Element {
    let ctx = use_context::<AppContext>();
    let products = ctx.products();
    let mut category = use_signal(|| ProductCategory::Saciedade);

    let mut resource = use_resource(move || {
        let products = products.clone();
        let selected = category();
        async move {
            let items = products
                .list_active(Some(selected))
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(map_product_cards(&items))
        }
    });

    let state = view_state_from_resource(&resource);
    let tabs = category_tabs(category());

    rsx! {
        div { class: "page arsenal",
            h1 { "Arsenal" }
            p { class: "lead", "Ferramentas selecionadas para acelerar seus resultados." }

            div { class: "tabs", role: "tablist",
                for tab in tabs {
                    button {
                        key: "{tab.category}",
                        class: tab.class(),
                        onclick: move |_| category.set(tab.category),
                        "{tab.label}"
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "loading", "Carregando..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "empty", "Nenhum item nesta categoria ainda." }
                    } else {
                        ul { class: "product-grid",
                            for card in cards {
                                ProductCard { key: "{card.id}", card }
                            }
                        }
                    }
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
fn ProductCard(card: ProductCardVm) -> Element {
    rsx! {
        li { class: "card product-card",
            if let Some(url) = card.image_url.clone() {
                img { class: "product-image", src: "{url}", alt: "{card.title}" }
            }
            span { class: "product-category", "{card.category_label}" }
            h3 { "{card.title}" }
            p { "{card.description}" }
            div { class: "product-footer",
                span { class: "product-price", "{card.price}" }
                a { class: "btn btn-primary", href: "{card.link}", target: "_blank", rel: "noopener", "Ver Oferta" }
            }
        }
    }
}
