use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// A product with its tags and units, in repository order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    /// Tag names in link creation order
    pub tags: Vec<String>,
    pub units: Vec<Unit>,
}

/// A purchasable variant of a product, identified by SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: Uuid,
    pub sku: String,
    /// Price in minor currency units (cents)
    pub price: i64,
    pub properties: Vec<PropertyValue>,
    pub images: Vec<UnitImage>,
}

/// A property value attached to a unit, with the property's name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitImage {
    pub id: Uuid,
    /// Storage-relative path, e.g. `product_images/shirt-red.jpg`
    pub path: String,
    pub is_main: bool,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            tags: Vec::new(),
            units: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }
}

impl Unit {
    pub fn new(sku: impl Into<String>, price: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            sku: sku.into(),
            price,
            properties: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(PropertyValue {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_image(mut self, path: impl Into<String>, is_main: bool) -> Self {
        self.images.push(UnitImage {
            id: Uuid::now_v7(),
            path: path.into(),
            is_main,
        });
        self
    }
}

pub const MAX_PAGE_SIZE: u64 = 100;

fn default_limit() -> u64 {
    50
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Only products carrying this tag name
    pub tag: Option<String>,
    /// Maximum number of results (1-100)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            tag: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ProductFilter {
    /// Clamp the page size into `1..=MAX_PAGE_SIZE` and drop a blank tag.
    pub fn normalized(mut self) -> Self {
        self.limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        self.tag = self
            .tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_from_empty_query() {
        let filter: ProductFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.limit, 50);
        assert_eq!(filter.offset, 0);
        assert!(filter.tag.is_none());
    }

    #[test]
    fn test_filter_normalized() {
        let filter = ProductFilter {
            tag: Some("  ".into()),
            limit: 10_000,
            offset: 3,
        }
        .normalized();
        assert_eq!(filter.limit, MAX_PAGE_SIZE);
        assert!(filter.tag.is_none());

        let filter = ProductFilter {
            tag: Some(" summer ".into()),
            limit: 0,
            offset: 0,
        }
        .normalized();
        assert_eq!(filter.limit, 1);
        assert_eq!(filter.tag.as_deref(), Some("summer"));
    }

    #[test]
    fn test_builders_keep_insertion_order() {
        let unit = Unit::new("SKU-1", 1999)
            .with_property("color", "red")
            .with_property("size", "M")
            .with_image("a.jpg", false)
            .with_image("b.jpg", true);

        assert_eq!(unit.properties[1].name, "size");
        assert_eq!(unit.images[0].path, "a.jpg");
        assert!(unit.images[0].id < unit.images[1].id);
    }
}
