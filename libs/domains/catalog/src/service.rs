//! Catalog Service - paging and projection

use core_config::media::MediaConfig;
use observability::CatalogMetrics;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::images::ImageResolver;
use crate::models::ProductFilter;
use crate::repository::CatalogRepository;
use crate::views::{EntityProjector, ProductDetailView, ProductListView};

pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
    projector: EntityProjector,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R, media: MediaConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            projector: EntityProjector::new(ImageResolver::new(&media)),
        }
    }

    #[instrument(skip(self), fields(tag = ?filter.tag, limit = filter.limit, offset = filter.offset))]
    pub async fn list_products(&self, filter: ProductFilter) -> CatalogResult<Vec<ProductListView>> {
        let products = self.repository.list(filter.normalized()).await?;

        let views: Vec<ProductListView> = products
            .iter()
            .map(|product| self.projector.product_list(product))
            .collect();

        let placeholders = views
            .iter()
            .filter(|view| self.projector.images().is_placeholder(&view.image))
            .count();
        CatalogMetrics::record_products_listed(views.len(), placeholders);

        Ok(views)
    }

    /// Only the product itself can be missing; absent relations degrade in the view.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductDetailView> {
        let product = self
            .repository
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let view = self.projector.product_detail(&product);
        CatalogMetrics::record_product_detail(
            view.units.len(),
            self.projector.images().is_placeholder(&view.base.image),
        );

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, Unit};
    use crate::repository::{InMemoryCatalogRepository, MockCatalogRepository};
    use mockall::predicate::*;
    use sea_orm::DbErr;

    #[tokio::test]
    async fn test_list_products_projects_views() {
        let repo = InMemoryCatalogRepository::with_products(vec![
            Product::new("With image")
                .with_tags(["new"])
                .with_unit(Unit::new("A-1", 500).with_image("a.jpg", false)),
            Product::new("Without image"),
        ]);
        let service = CatalogService::new(repo, MediaConfig::default());

        let views = service.list_products(ProductFilter::default()).await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].image, "/media/a.jpg");
        assert_eq!(views[0].tags, vec!["new"]);
        assert_eq!(views[1].image, "product_images/empty.jpg");
    }

    #[tokio::test]
    async fn test_list_products_clamps_limit_before_repository() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list()
            .withf(|f| f.limit == 100 && f.offset == 5)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CatalogService::new(repo, MediaConfig::default());
        let views = service
            .list_products(ProductFilter {
                tag: None,
                limit: 5000,
                offset: 5,
            })
            .await
            .unwrap();

        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockCatalogRepository::new();
        repo.expect_get().with(eq(id)).times(1).returning(|_| Ok(None));

        let service = CatalogService::new(repo, MediaConfig::default());
        let err = service.get_product(id).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(got) if got == id));
    }

    #[tokio::test]
    async fn test_get_product_propagates_database_error() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_get()
            .returning(|_| Err(CatalogError::Database(DbErr::Custom("connection reset".into()))));

        let service = CatalogService::new(repo, MediaConfig::default());
        let err = service.get_product(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, CatalogError::Database(_)));
    }

    #[tokio::test]
    async fn test_get_product_detail() {
        let product = Product::new("Shoe").with_unit(
            Unit::new("SH-42", 8900)
                .with_property("size", "42")
                .with_image("shoe.jpg", true),
        );
        let id = product.id;
        let service = CatalogService::new(
            InMemoryCatalogRepository::with_products(vec![product]),
            MediaConfig::default(),
        );

        let view = service.get_product(id).await.unwrap();

        assert_eq!(view.base.id, id);
        assert_eq!(view.base.image, "/media/shoe.jpg");
        assert_eq!(view.units[0].properties[0].value, "42");
    }
}
