use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an authenticated user, as issued by the auth backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new `UserId`
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// Identifier of an affiliate product row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Creates a new `ProductId`
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// Stable lesson identifier. Used as a route segment and as the persistence key.
///
/// Valid slugs are non-empty and contain only lowercase ASCII letters, digits and `-`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonSlug(String);

impl LessonSlug {
    /// Parses and validates a slug.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` when the value is empty or contains characters
    /// outside `[a-z0-9-]`.
    pub fn parse(value: impl Into<String>) -> Result<Self, ParseIdError> {
        let value = value.into();
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
        if !valid {
            return Err(ParseIdError {
                kind: "LessonSlug".to_string(),
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LessonSlug {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LessonSlug> for String {
    fn from(slug: LessonSlug) -> Self {
        slug.0
    }
}

impl Borrow<str> for LessonSlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LessonSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Debug for LessonSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonSlug({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(UserId::new)
            .map_err(|_| ParseIdError {
                kind: "UserId".to_string(),
            })
    }
}

impl FromStr for ProductId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ProductId::new)
            .map_err(|_| ParseIdError {
                kind: "ProductId".to_string(),
            })
    }
}

impl FromStr for LessonSlug {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_str() {
        let id: UserId = "6f1c1b8e-2f4a-4c43-9a55-0a3e9f1f2c11".parse().unwrap();
        assert_eq!(id.to_string(), "6f1c1b8e-2f4a-4c43-9a55-0a3e9f1f2c11");
    }

    #[test]
    fn test_user_id_from_str_invalid() {
        let result = "not-a-uuid".parse::<UserId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_product_id_display() {
        let raw = Uuid::nil();
        assert_eq!(ProductId::new(raw).to_string(), raw.to_string());
    }

    #[test]
    fn test_slug_accepts_catalog_shape() {
        let slug = LessonSlug::parse("01-introducao").unwrap();
        assert_eq!(slug.as_str(), "01-introducao");
        assert_eq!(slug.to_string(), "01-introducao");
    }

    #[test]
    fn test_slug_rejects_empty_and_path_characters() {
        assert!(LessonSlug::parse("").is_err());
        assert!(LessonSlug::parse("../etc").is_err());
        assert!(LessonSlug::parse("Aula 1").is_err());
        assert!(LessonSlug::parse("aula/1").is_err());
    }

    #[test]
    fn test_slug_try_from_string_validates() {
        assert!(LessonSlug::try_from("Bad Slug".to_string()).is_err());
        let slug = LessonSlug::try_from("04-sono-luz".to_string()).unwrap();
        assert_eq!(String::from(slug), "04-sono-luz");
    }
}
