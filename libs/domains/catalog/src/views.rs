//! API representations of catalog records.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::images::ImageResolver;
use crate::models::{Product, Unit};
use crate::properties::properties_for_unit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PropertyView {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UnitView {
    pub sku: String,
    /// Price in minor currency units (cents)
    pub price: i64,
    pub properties: Vec<PropertyView>,
    /// Image URLs; never empty
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductListView {
    pub id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    /// Representative image URL or the placeholder
    pub image: String,
}

/// List fields plus every unit of the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub base: ProductListView,
    pub units: Vec<UnitView>,
}

/// Projects catalog records into views. Pure; missing relations become
/// empty lists or the placeholder image.
#[derive(Debug, Clone, Default)]
pub struct EntityProjector {
    images: ImageResolver,
}

impl EntityProjector {
    pub fn new(images: ImageResolver) -> Self {
        Self { images }
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn unit(&self, unit: &Unit) -> UnitView {
        UnitView {
            sku: unit.sku.clone(),
            price: unit.price,
            properties: properties_for_unit(unit),
            images: self.images.images_for_unit(unit),
        }
    }

    pub fn product_list(&self, product: &Product) -> ProductListView {
        ProductListView {
            id: product.id,
            title: product.title.clone(),
            tags: product.tags.clone(),
            image: self.images.image_for_product(product),
        }
    }

    pub fn product_detail(&self, product: &Product) -> ProductDetailView {
        ProductDetailView {
            base: self.product_list(product),
            units: product.units.iter().map(|unit| self.unit(unit)).collect(),
        }
    }
}
