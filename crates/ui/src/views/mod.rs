mod arsenal;
mod dashboard;
mod lesson;
mod not_found;
mod state;
mod surprise;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use arsenal::ArsenalView;
pub use dashboard::DashboardView;
pub use lesson::LessonView;
pub use not_found::NotFoundView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use surprise::SurpriseView;
