use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Blog entity - one listed blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// Owner of the record. Records created before ownership tracking have none.
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated creation input. Every field is optional at the wire level;
/// [`Blog::create`] decides what is acceptable.
#[derive(Debug, Clone, Default)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Partial update. `None` means "not supplied, leave unchanged"; the id and
/// the owner are immutable and have no slot here.
#[derive(Debug, Clone, Default)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl Blog {
    /// Validate creation input and build a new record with a generated id.
    ///
    /// `likes` defaults to 0 when absent. A payload missing both `title` and
    /// `url` gets its own message; each field is also individually required
    /// and must be non-empty.
    pub fn create(input: NewBlog, owner: Option<Uuid>) -> Result<Self, DomainError> {
        let title = non_empty(input.title);
        let url = non_empty(input.url);

        let (title, url) = match (title, url) {
            (None, None) => {
                return Err(DomainError::Validation(
                    "title and url are missing".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(DomainError::Validation("title is required".to_string()));
            }
            (Some(_), None) => {
                return Err(DomainError::Validation("url is required".to_string()));
            }
            (Some(title), Some(url)) => (title, url),
        };

        let likes = input.likes.unwrap_or(0);
        if likes < 0 {
            return Err(DomainError::Validation(
                "likes must be non-negative".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            author: input.author,
            url,
            likes,
            user_id: owner,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update in place. Absent fields keep their stored values.
    pub fn apply(&mut self, update: &BlogUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(author) = &update.author {
            self.author = Some(author.clone());
        }
        if let Some(url) = &update.url {
            self.url = url.clone();
        }
        if let Some(likes) = update.likes {
            self.likes = likes;
        }
        self.updated_at = Utc::now();
    }
}

impl BlogUpdate {
    /// Reject updates that would break the record's invariants. Supplying a
    /// field implies supplying a usable value; absence is always fine.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(DomainError::Validation(
                    "title must not be empty".to_string(),
                ));
            }
        }
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err(DomainError::Validation("url must not be empty".to_string()));
            }
        }
        if let Some(likes) = self.likes {
            if likes < 0 {
                return Err(DomainError::Validation(
                    "likes must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
