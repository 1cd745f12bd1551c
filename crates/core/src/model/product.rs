use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::model::ids::ProductId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProductError {
    #[error("product title cannot be empty")]
    EmptyTitle,

    #[error("unknown product category: {0}")]
    UnknownCategory(String),

    #[error("product link must be an absolute http(s) URL")]
    InvalidLink,

    #[error("product image URL must be an absolute http(s) URL")]
    InvalidImageUrl,
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Arsenal shelves. The storage encoding is the lowercase identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductCategory {
    Saciedade,
    Sono,
    Energia,
    Habitos,
}

impl ProductCategory {
    /// Display order for the arsenal tabs.
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Saciedade,
        ProductCategory::Sono,
        ProductCategory::Energia,
        ProductCategory::Habitos,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Saciedade => "saciedade",
            ProductCategory::Sono => "sono",
            ProductCategory::Energia => "energia",
            ProductCategory::Habitos => "habitos",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Saciedade => "🧠 Saciedade & Controle",
            ProductCategory::Sono => "😴 Sono & Recuperação",
            ProductCategory::Energia => "⚡ Energia & Foco",
            ProductCategory::Habitos => "🥤 Hábitos & Rotina",
        }
    }
}

impl Default for ProductCategory {
    fn default() -> Self {
        Self::Saciedade
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "saciedade" => Ok(Self::Saciedade),
            "sono" => Ok(Self::Sono),
            "energia" => Ok(Self::Energia),
            "habitos" => Ok(Self::Habitos),
            other => Err(ProductError::UnknownCategory(other.to_string())),
        }
    }
}

//
// ─── PRODUCT ───────────────────────────────────────────────────────────────────
//

/// Unvalidated product fields, as produced by a backend row or a seed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub link: String,
    pub price: String,
    pub active: bool,
}

impl ProductDraft {
    /// Validate the draft into a `Product`.
    ///
    /// Blank image URLs are treated as "no image".
    ///
    /// # Errors
    ///
    /// Returns `ProductError` for an empty title, unknown category, or
    /// a link/image URL that is not an absolute http(s) URL.
    pub fn validate(self) -> Result<Product, ProductError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ProductError::EmptyTitle);
        }
        let category: ProductCategory = self.category.parse()?;
        let link = parse_http_url(&self.link).ok_or(ProductError::InvalidLink)?;
        let image_url = match self.image_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_http_url(raw).ok_or(ProductError::InvalidImageUrl)?),
        };

        Ok(Product {
            id: self.id,
            title,
            description: self.description.trim().to_string(),
            category,
            image_url,
            link,
            price: self.price.trim().to_string(),
            active: self.active,
        })
    }
}

fn parse_http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// An affiliate product shown in the arsenal and on the surprise page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    title: String,
    description: String,
    category: ProductCategory,
    image_url: Option<Url>,
    link: Url,
    price: String,
    active: bool,
}

impl Product {
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> ProductCategory {
        self.category
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }

    #[must_use]
    pub fn link(&self) -> &Url {
        &self.link
    }

    /// Display price, stored verbatim (e.g. `"R$ 89,90"`).
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Convert back into a draft for persistence.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.as_str().to_string(),
            image_url: self.image_url.as_ref().map(Url::to_string),
            link: self.link.to_string(),
            price: self.price.clone(),
            active: self.active,
        }
    }
}
