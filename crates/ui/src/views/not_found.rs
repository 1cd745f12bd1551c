use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "page not-found",
            h1 { "404" }
            p { "Página não encontrada" }
            if !path.is_empty() {
                p { class: "muted", "/{path}" }
            }
            Link { class: "btn", to: Route::Dashboard {}, "Voltar ao início" }
        }
    }
}
