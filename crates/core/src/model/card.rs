/// One page of a lesson's paginated content.
///
/// Cards are derived from raw lesson text on every load and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCard {
    pub heading: String,
    pub body: String,
}

impl LessonCard {
    #[must_use]
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}
