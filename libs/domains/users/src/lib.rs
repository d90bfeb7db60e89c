//! Users Domain
//!
//! User accounts on top of the generic [`resource`] core. Passwords are
//! stored as Argon2 hashes and never leave the domain model.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{UsersService, handlers};
//! use resource::InMemoryStore;
//!
//! let service = UsersService::new(InMemoryStore::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;

pub use models::{CreateUser, PatchUser, UpdateUser, User, UserView};
pub use postgres::PgUserStore;

/// User CRUD over any record store
pub type UsersService<S> = resource::ResourceService<User, S>;
