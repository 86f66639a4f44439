//! Observability utilities for the storefront services.
//!
//! - Prometheus recorder and `/metrics` handler
//! - Domain metric recorders for the catalog and account flows
//! - Axum middleware for request metrics
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, CatalogMetrics};
//!
//! init_metrics()?;
//! CatalogMetrics::record_products_listed(12, 4);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod accounts;
pub mod catalog;
pub mod middleware;

pub use accounts::AccountMetrics;
pub use catalog::CatalogMetrics;
pub use middleware::metrics_middleware;

pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder once; later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `/metrics`
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!(
        "catalog_products_served_total",
        "Products projected into API views, by view"
    );
    describe_counter!(
        "catalog_placeholder_images_total",
        "Product or unit projections that fell back to the placeholder image"
    );

    describe_counter!(
        "accounts_created_total",
        "Accounts created, by kind (user or seller)"
    );
    describe_counter!(
        "accounts_rejected_total",
        "Registrations rejected before persistence, by reason"
    );
    describe_counter!(
        "accounts_rollbacks_total",
        "Seller registrations rolled back after a partial write"
    );
}
