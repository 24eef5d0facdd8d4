use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogUpdate, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Fetch every stored entity. Full-scan semantics, no pagination.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Save a new entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when
    /// nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their exact username. Usernames are case-sensitive.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, Uuid> {
    /// Apply a partial update to an existing record, returning the post-update
    /// state. `None` when the id is unknown. Unset fields keep their stored
    /// values.
    async fn update_fields(
        &self,
        id: Uuid,
        update: &BlogUpdate,
    ) -> Result<Option<Blog>, RepoError>;
}
