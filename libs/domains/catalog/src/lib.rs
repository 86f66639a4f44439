//! Catalog Domain
//!
//! Read side of the storefront: products, their sellable units, unit
//! properties and images, projected into API views.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Paging, projection into views
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Product aggregates (trait + in-memory + PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, Unit, UnitImage, PropertyValue
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_config::media::MediaConfig;
//! use domain_catalog::{handlers, CatalogService, PgCatalogRepository};
//!
//! let service = CatalogService::new(PgCatalogRepository::new(db), MediaConfig::default());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod postgres;
pub mod properties;
pub mod repository;
pub mod service;
pub mod views;

pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use images::ImageResolver;
pub use models::{Product, ProductFilter, PropertyValue, Unit, UnitImage};
pub use postgres::PgCatalogRepository;
pub use properties::properties_for_unit;
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use service::CatalogService;
pub use views::{EntityProjector, ProductDetailView, ProductListView, PropertyView, UnitView};
