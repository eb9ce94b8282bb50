use axum::Json;
use serde::Deserialize;

use crate::api::dto::{AccountView, LoginView};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::account_service;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register - create a new account
///
/// Expected input:
/// ```json
/// { "email": "a@example.com", "name": "Alice", "password": "..." }
/// ```
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<AccountView> {
    let account =
        account_service::register(&payload.email, &payload.name, &payload.password).await?;
    Ok(ApiResponse::success(AccountView::from(&account)))
}

/// POST /auth/login - verify credentials and receive a JWT
///
/// Expected output:
/// ```json
/// { "success": true, "data": { "token": "...", "account": { ... }, "expires_in": 14400 } }
/// ```
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<LoginView> {
    Ok(ApiResponse::success(
        account_service::login(&payload.email, &payload.password).await?,
    ))
}
