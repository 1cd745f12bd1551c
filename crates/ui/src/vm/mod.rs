mod dashboard_vm;
mod lesson_vm;
mod markdown_vm;
mod product_vm;

pub use dashboard_vm::{DashboardVm, LessonRowVm, ResumeVm, map_dashboard};
pub use lesson_vm::{
    CardVm, CompletionFlag, DeckPager, LessonVm, NavDirection, SWIPE_THRESHOLD_PX, key_direction,
    map_lesson, swipe_direction,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use product_vm::{CategoryTabVm, ProductCardVm, category_tabs, map_product_cards};
