//! # Bloglist Infrastructure
//!
//! Concrete implementations of the ports defined in `bloglist-core`:
//! JWT session tokens, Argon2 password hashing, and the blog/user stores.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` the crate still provides the in-memory store, which is
//! also what the API test suites run against.

pub mod auth;
pub mod database;
pub mod store;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use store::{InMemoryBlogRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresBlogRepository, PostgresUserRepository};
