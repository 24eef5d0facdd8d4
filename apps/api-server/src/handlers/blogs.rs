//! Blog handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use bloglist_core::domain::{Blog, BlogUpdate, NewBlog, User};
use bloglist_shared::dto::{BlogOwner, BlogResponse, CreateBlogRequest, UpdateBlogRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state.blogs.find_all().await?;

    // One scan over the user table resolves every owner.
    let users = state.users.find_all().await?;
    let by_id: HashMap<Uuid, &User> = users.iter().map(|user| (user.id, user)).collect();

    let body: Vec<BlogResponse> = blogs
        .into_iter()
        .map(|blog| {
            let owner = blog.user_id.and_then(|id| by_id.get(&id).copied());
            to_response(blog, owner)
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let blog = Blog::create(
        NewBlog {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        },
        Some(identity.user_id),
    )?;

    let saved = state.blogs.save(blog).await?;
    let owner = state.users.find_by_id(identity.user_id).await?;

    Ok(HttpResponse::Created().json(to_response(saved, owner.as_ref())))
}

/// PUT /api/blogs/{id}
///
/// Requires a token like create and delete do. The service this replaces
/// shipped the endpoint unauthenticated; that was a gap, not a contract.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let update = BlogUpdate {
        title: req.title,
        author: req.author,
        url: req.url,
        likes: req.likes,
    };
    update.validate()?;

    let existing = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog {id} not found")))?;

    check_ownership(&existing, &identity)?;

    let updated = state
        .blogs
        .update_fields(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog {id} not found")))?;

    let owner = match updated.user_id {
        Some(owner_id) => state.users.find_by_id(owner_id).await?,
        None => None,
    };

    Ok(HttpResponse::Ok().json(to_response(updated, owner.as_ref())))
}

/// DELETE /api/blogs/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog {id} not found")))?;

    check_ownership(&blog, &identity)?;

    state.blogs.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// A record with a recorded owner may only be touched by that owner.
/// Legacy records without one are open to any authenticated caller.
fn check_ownership(blog: &Blog, identity: &Identity) -> Result<(), AppError> {
    match blog.user_id {
        Some(owner_id) if owner_id != identity.user_id => Err(AppError::Forbidden),
        _ => Ok(()),
    }
}

fn to_response(blog: Blog, owner: Option<&User>) -> BlogResponse {
    BlogResponse {
        id: blog.id,
        title: blog.title,
        author: blog.author,
        url: blog.url,
        likes: blog.likes,
        user: owner.map(|user| BlogOwner {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }),
    }
}
