use async_trait::async_trait;
use course_core::model::{Product, ProductCategory};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{bool_to_i64, map_product_row};
use crate::repository::{ProductRepository, StorageError};

impl SqliteRepository {
    /// Insert or replace a product row. Used by the seed binary and tests;
    /// the application itself only reads products.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn upsert_product(&self, product: &Product) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO affiliate_products (id, title, description, category, image_url, link, price, active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                category = excluded.category,
                image_url = excluded.image_url,
                link = excluded.link,
                price = excluded.price,
                active = excluded.active
            ",
        )
        .bind(product.id().to_string())
        .bind(product.title())
        .bind(product.description())
        .bind(product.category().as_str())
        .bind(product.image_url().map(ToString::to_string))
        .bind(product.link().as_str())
        .bind(product.price())
        .bind(bool_to_i64(product.is_active()))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn fetch_active_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, category, image_url, link, price, active
            FROM affiliate_products
            WHERE active = 1 AND (?1 IS NULL OR category = ?1)
            ORDER BY title ASC, id ASC
            ",
        )
        .bind(category.map(ProductCategory::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let products = rows
            .iter()
            .filter_map(|row| match map_product_row(row) {
                Ok(product) => Some(product),
                Err(err) => {
                    let id: String = row.try_get("id").unwrap_or_default();
                    let title: String = row.try_get("title").unwrap_or_default();
                    tracing::warn!(%id, %title, error = %err, "skipping invalid product row");
                    None
                }
            })
            .collect();
        Ok(products)
    }
}
