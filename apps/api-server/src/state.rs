//! Application state - shared across all handlers.

use std::sync::Arc;

use bloglist_core::ports::{BlogRepository, UserRepository};
use bloglist_infra::database::DatabaseConfig;
use bloglist_infra::store::{InMemoryBlogRepository, InMemoryUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state against the configured store.
    #[cfg(feature = "postgres")]
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        use bloglist_infra::database::{self, PostgresBlogRepository, PostgresUserRepository};

        if let Some(config) = db_config {
            match database::connect(config).await {
                Ok(conn) => {
                    tracing::info!("application state initialized (postgres)");
                    return Self {
                        blogs: Arc::new(PostgresBlogRepository::new(conn.clone())),
                        users: Arc::new(PostgresUserRepository::new(conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "failed to connect to database: {e}. Using the in-memory store."
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running on the in-memory store.");
        }

        Self::in_memory()
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new(_db_config: Option<&DatabaseConfig>) -> Self {
        tracing::info!("built without postgres support - using the in-memory store");
        Self::in_memory()
    }

    /// State backed entirely by the in-memory store. Test suites build on this.
    pub fn in_memory() -> Self {
        Self {
            blogs: Arc::new(InMemoryBlogRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }
}
