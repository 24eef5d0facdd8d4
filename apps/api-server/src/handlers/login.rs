//! Login handler - credential check and token minting.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use bloglist_core::ports::{PasswordService, TokenService};
use bloglist_shared::dto::{LoginRequest, LoginResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/login
///
/// Unknown usernames and wrong passwords produce the same response so the two
/// cases cannot be told apart from the outside.
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state.users.find_by_username(&req.username).await?;

    let valid = match &user {
        Some(user) => password_service
            .verify(&req.password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?,
        None => false,
    };

    let Some(user) = user.filter(|_| valid) else {
        return Err(AppError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    };

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
