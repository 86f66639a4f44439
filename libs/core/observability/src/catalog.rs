//! Catalog read-path metrics.

use metrics::counter;

pub struct CatalogMetrics;

impl CatalogMetrics {
    /// A product list page was projected. `placeholders` counts products
    /// whose representative image fell back to the placeholder.
    pub fn record_products_listed(count: usize, placeholders: usize) {
        counter!("catalog_products_served_total", "view" => "list").increment(count as u64);
        if placeholders > 0 {
            counter!("catalog_placeholder_images_total", "view" => "list")
                .increment(placeholders as u64);
        }
        tracing::debug!(count, placeholders, "Listed products");
    }

    pub fn record_product_detail(units: usize, placeholder: bool) {
        counter!("catalog_products_served_total", "view" => "detail").increment(1);
        if placeholder {
            counter!("catalog_placeholder_images_total", "view" => "detail").increment(1);
        }
        tracing::debug!(units, placeholder, "Served product detail");
    }
}
