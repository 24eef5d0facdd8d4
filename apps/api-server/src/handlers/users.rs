//! User registration and listing handlers.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use bloglist_core::domain::User;
use bloglist_core::ports::PasswordService;
use bloglist_shared::dto::{RegisterUserRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;

    let body: Vec<UserResponse> = users.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/users
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let username = User::validate_username(req.username.as_deref())?;
    let password = User::validate_password(req.password.as_deref())?;

    // The storage-level unique index backstops this check under races.
    if state.users.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("username must be unique".to_string()));
    }

    let password_hash = password_service
        .hash(password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(username.to_string(), req.name.clone(), password_hash);
    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Created().json(to_response(saved)))
}

fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
    }
}
