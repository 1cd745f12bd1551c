use course_core::model::{Product, ProductCategory};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCardVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_label: &'static str,
    pub image_url: Option<String>,
    pub link: String,
    pub price: String,
}

impl From<&Product> for ProductCardVm {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            title: product.title().to_string(),
            description: product.description().to_string(),
            category_label: product.category().label(),
            image_url: product.image_url().map(ToString::to_string),
            link: product.link().to_string(),
            price: product.price().to_string(),
        }
    }
}

#[must_use]
pub fn map_product_cards(products: &[Product]) -> Vec<ProductCardVm> {
    products.iter().map(ProductCardVm::from).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryTabVm {
    pub category: ProductCategory,
    pub label: &'static str,
    pub active: bool,
}

impl CategoryTabVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.active { "tab tab--active" } else { "tab" }
    }
}

/// Tabs for every category, in display order.
#[must_use]
pub fn category_tabs(active: ProductCategory) -> Vec<CategoryTabVm> {
    ProductCategory::ALL
        .iter()
        .map(|category| CategoryTabVm {
            category: *category,
            label: category.label(),
            active: *category == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{ProductDraft, ProductId};

    #[test]
    fn tabs_mark_only_the_active_category() {
        let tabs = category_tabs(ProductCategory::Sono);
        assert_eq!(tabs.len(), 4);
        let active: Vec<_> = tabs.iter().filter(|tab| tab.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].category, ProductCategory::Sono);
    }

    #[test]
    fn card_carries_optional_image() {
        let product = ProductDraft {
            id: ProductId::random(),
            title: "Magnésio".into(),
            description: "Sono profundo".into(),
            category: "sono".into(),
            image_url: None,
            link: "https://loja.example.com/magnesio".into(),
            price: "R$ 59,90".into(),
            active: true,
        }
        .validate()
        .unwrap();
        let card = ProductCardVm::from(&product);
        assert_eq!(card.image_url, None);
        assert_eq!(card.link, "https://loja.example.com/magnesio");
        assert_eq!(card.category_label, ProductCategory::Sono.label());
    }
}
