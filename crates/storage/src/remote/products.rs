use async_trait::async_trait;
use course_core::model::{Product, ProductCategory};

use super::rows::ProductRow;
use super::{RemoteRepository, check_status, transport};
use crate::repository::{ProductRepository, StorageError};

const TABLE: &str = "affiliate_products";

#[async_trait]
impl ProductRepository for RemoteRepository {
    async fn fetch_active_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, StorageError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("active", "is.true".to_string()),
            ("order", "title.asc".to_string()),
        ];
        if let Some(category) = category {
            query.push(("category", format!("eq.{category}")));
        }

        let response = self
            .get(TABLE)
            .query(&query)
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<ProductRow> = check_status(response).await?.json().await.map_err(transport)?;

        let products = rows
            .into_iter()
            .filter_map(|row| {
                let (id, title) = (row.id, row.title.clone());
                match row.into_product() {
                    Ok(product) => Some(product),
                    Err(err) => {
                        tracing::warn!(%id, %title, error = %err, "skipping invalid product row");
                        None
                    }
                }
            })
            .collect();
        Ok(products)
    }
}
