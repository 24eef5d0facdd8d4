//! In-memory repositories over async RwLock-guarded maps.
//!
//! Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bloglist_core::domain::{Blog, BlogUpdate, User};
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BaseRepository, BlogRepository, UserRepository};

/// In-memory user store.
///
/// Enforces the username uniqueness the SQL store declares as a unique index;
/// the check runs under the write lock, so two concurrent registrations of the
/// same username cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|user| user.created_at);
        Ok(all)
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        let duplicate = users
            .values()
            .any(|stored| stored.username == user.username && stored.id != user.id);
        if duplicate {
            return Err(RepoError::Constraint("username must be unique".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        users.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

/// In-memory blog store.
#[derive(Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Blog, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.blogs.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        let blogs = self.blogs.read().await;
        let mut all: Vec<Blog> = blogs.values().cloned().collect();
        all.sort_by_key(|blog| blog.created_at);
        Ok(all)
    }

    async fn save(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut blogs = self.blogs.write().await;
        blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut blogs = self.blogs.write().await;
        blogs.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn update_fields(
        &self,
        id: Uuid,
        update: &BlogUpdate,
    ) -> Result<Option<Blog>, RepoError> {
        let mut blogs = self.blogs.write().await;

        let Some(blog) = blogs.get_mut(&id) else {
            return Ok(None);
        };

        blog.apply(update);
        Ok(Some(blog.clone()))
    }
}
