use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Query, SelectStatement},
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entity::{product_tags, products, properties, property_values, tags, unit_images, units};
use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, PropertyValue, Unit, UnitImage};
use crate::repository::CatalogRepository;

/// PostgreSQL implementation of CatalogRepository.
///
/// Aggregates are assembled from one query per relation for the whole page
/// rather than per product. Ids are UUIDv7, so ordering by id is creation order.
#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_aggregates(&self, rows: Vec<products::Model>) -> CatalogResult<Vec<Product>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let product_ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();

        let tag_links = product_tags::Entity::find()
            .filter(product_tags::Column::ProductId.is_in(product_ids.clone()))
            .order_by_asc(product_tags::Column::Id)
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await?;

        let unit_rows = units::Entity::find()
            .filter(units::Column::ProductId.is_in(product_ids))
            .order_by_asc(units::Column::Id)
            .all(&self.db)
            .await?;
        let unit_ids: Vec<Uuid> = unit_rows.iter().map(|u| u.id).collect();

        let (image_rows, value_rows) = if unit_ids.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let images = unit_images::Entity::find()
                .filter(unit_images::Column::UnitId.is_in(unit_ids.clone()))
                .order_by_asc(unit_images::Column::Id)
                .all(&self.db)
                .await?;
            let values = property_values::Entity::find()
                .filter(property_values::Column::UnitId.is_in(unit_ids))
                .order_by_asc(property_values::Column::Id)
                .find_also_related(properties::Entity)
                .all(&self.db)
                .await?;
            (images, values)
        };

        let mut tags_by_product: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (link, tag) in tag_links {
            if let Some(tag) = tag {
                tags_by_product.entry(link.product_id).or_default().push(tag.name);
            }
        }

        let mut images_by_unit: HashMap<Uuid, Vec<UnitImage>> = HashMap::new();
        for image in image_rows {
            images_by_unit.entry(image.unit_id).or_default().push(image.into());
        }

        let mut values_by_unit: HashMap<Uuid, Vec<PropertyValue>> = HashMap::new();
        for (value, property) in value_rows {
            if let Some(property) = property {
                values_by_unit.entry(value.unit_id).or_default().push(PropertyValue {
                    name: property.name,
                    value: value.value,
                });
            }
        }

        let mut units_by_product: HashMap<Uuid, Vec<Unit>> = HashMap::new();
        for unit in unit_rows {
            units_by_product.entry(unit.product_id).or_default().push(Unit {
                id: unit.id,
                sku: unit.sku,
                price: unit.price,
                properties: values_by_unit.remove(&unit.id).unwrap_or_default(),
                images: images_by_unit.remove(&unit.id).unwrap_or_default(),
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| Product {
                id: row.id,
                tags: tags_by_product.remove(&row.id).unwrap_or_default(),
                units: units_by_product.remove(&row.id).unwrap_or_default(),
                title: row.title,
            })
            .collect())
    }
}

/// `SELECT product_id FROM product_tags WHERE tag_id IN (SELECT id FROM tags WHERE name = $1)`
fn tagged_product_ids(tag: &str) -> SelectStatement {
    let tag_ids = Query::select()
        .column(tags::Column::Id)
        .from(tags::Entity)
        .and_where(tags::Column::Name.eq(tag))
        .to_owned();

    Query::select()
        .column(product_tags::Column::ProductId)
        .from(product_tags::Entity)
        .and_where(product_tags::Column::TagId.in_subquery(tag_ids))
        .to_owned()
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let mut query = products::Entity::find();

        if let Some(tag) = &filter.tag {
            query = query.filter(products::Column::Id.in_subquery(tagged_product_ids(tag)));
        }

        let rows = query
            .order_by_asc(products::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        self.load_aggregates(rows).await
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let Some(row) = products::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.load_aggregates(vec![row]).await?.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_get_missing_product_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()])
            .into_connection();

        let repo = PgCatalogRepository::new(db);
        assert!(repo.get(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_unknown_tag_is_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()])
            .into_connection();

        let repo = PgCatalogRepository::new(db);
        let page = repo
            .list(ProductFilter {
                tag: Some("nope".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_tag_filter_runs_in_one_paged_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()])
            .into_connection();

        let repo = PgCatalogRepository::new(db.clone());
        repo.list(ProductFilter {
            tag: Some("sale".into()),
            limit: 10,
            offset: 20,
        })
        .await
        .unwrap();

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statement = &log[0].statements()[0];
        let sql = &statement.sql;
        assert!(sql.contains(r#""products"."id" IN (SELECT "product_id" FROM "product_tags""#));
        assert!(sql.contains(r#"IN (SELECT "id" FROM "tags" WHERE "tags"."name" = $1)"#));
        assert!(sql.contains("LIMIT"));
        let values = &statement.values.as_ref().unwrap().0;
        assert_eq!(values[0], sea_orm::Value::from("sale"));
        assert_eq!(values.len(), 3);
    }

    #[tokio::test]
    async fn test_list_surfaces_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("boom".into())])
            .into_connection();

        let repo = PgCatalogRepository::new(db);
        let err = repo.list(ProductFilter::default()).await.unwrap_err();
        assert!(matches!(err, crate::CatalogError::Database(_)));
    }
}
