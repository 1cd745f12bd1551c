use std::sync::Arc;

use course_core::model::{Product, ProductCategory};
use storage::repository::ProductRepository;

use crate::error::ProductServiceError;

/// Read access to the arsenal catalog.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Active products, optionally restricted to `category`, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `ProductServiceError::Storage` if the catalog cannot be read.
    pub async fn list_active(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, ProductServiceError> {
        let products = self.products.fetch_active_products(category).await?;
        tracing::debug!(count = products.len(), ?category, "loaded products");
        Ok(products)
    }
}
