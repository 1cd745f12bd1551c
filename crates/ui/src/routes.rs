use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ArsenalView, DashboardView, LessonView, NotFoundView, SurpriseView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/aula/:slug", LessonView)] Lesson { slug: String },
        #[route("/surprise", SurpriseView)] Surprise {},
        #[route("/arsenal", ArsenalView)] Arsenal {},
    #[end_layout]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Navbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    rsx! {
        nav { class: "navbar",
            Link { class: "navbar-brand", to: Route::Dashboard {}, "Método M" }
            ul { class: "navbar-links",
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Arsenal {}, "Arsenal" } }
            }
        }
    }
}
