//! In-memory store - the fallback when no database is configured and the
//! backing store for the API test suites.

mod memory;

pub use memory::{InMemoryBlogRepository, InMemoryUserRepository};
