//! Products Domain
//!
//! Product catalog on top of the generic [`resource`] core.
//!
//! - [`models`]: the validated [`Product`], its DTOs and [`ProductView`]
//! - [`entity`]: the `products` table
//! - [`postgres`]: [`PgProductStore`]
//! - [`handlers`]: Axum routes and OpenAPI doc
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{ProductsService, handlers};
//! use resource::InMemoryStore;
//!
//! let service = ProductsService::new(InMemoryStore::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;

pub use models::{CreateProduct, PatchProduct, Product, ProductView, UpdateProduct};
pub use postgres::PgProductStore;

/// Product CRUD over any record store
pub type ProductsService<S> = resource::ResourceService<Product, S>;
