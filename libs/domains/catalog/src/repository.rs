use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter};

/// Read access to product aggregates.
///
/// Products come back ordered by creation, with tags, units, unit
/// properties and unit images each in their own creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// A page of products matching `filter`
    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>>;

    /// A single product with all of its relations
    async fn get(&self, id: Uuid) -> CatalogResult<Option<Product>>;
}

/// In-memory catalog, used by tests and local runs without a database.
#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    pub async fn insert(&self, product: Product) {
        tracing::debug!(product_id = %product.id, "Seeded product");
        self.products.write().await.push(product);
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut matching: Vec<&Product> = products
            .iter()
            .filter(|p| match &filter.tag {
                Some(tag) => p.tags.iter().any(|t| t == tag),
                None => true,
            })
            .collect();
        matching.sort_by_key(|p| p.id);

        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }
}
