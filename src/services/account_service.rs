use uuid::Uuid;

use crate::api::dto::{AccountView, LoginView};
use crate::auth::{self, Claims};
use crate::config;
use crate::database::models::account::ROLE_USER;
use crate::database::models::Account;
use crate::database::repos::{AccountRepository, FollowRepository};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Create a new account. Unique-email violations surface as 409.
pub async fn register(email: &str, name: &str, password: &str) -> Result<Account, ApiError> {
    if !config::config().security.allow_registration {
        return Err(ApiError::forbidden("Registration is disabled"));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    if password.len() < 8 {
        return Err(ApiError::bad_request("Password must be at least 8 characters"));
    }
    let name = if name.trim().is_empty() { email } else { name };

    let repo = AccountRepository::new(DatabaseManager::pool().await?);
    let hash = auth::hash_password(password);
    let account = repo.insert(email, name, &hash, ROLE_USER).await?;

    tracing::info!(account_id = %account.id, "account registered");
    Ok(account)
}

/// Verify credentials and mint a JWT.
pub async fn login(email: &str, password: &str) -> Result<LoginView, ApiError> {
    let repo = AccountRepository::new(DatabaseManager::pool().await?);

    let account = repo
        .find_by_email(email)
        .await?
        .filter(|a| auth::verify_password(password, &a.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let claims = Claims::new(
        account.id,
        account.email.clone(),
        account.name.clone(),
        account.role.clone(),
    );
    let token = auth::generate_jwt(claims)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    Ok(LoginView {
        token,
        account: AccountView::from(&account),
        expires_in: config::config().security.jwt_expiry_hours * 3600,
    })
}

/// Toggle following another account. Returns the followee's follower count.
pub async fn toggle_follow(requester: &AuthUser, followee_id: Uuid) -> Result<i64, ApiError> {
    if requester.account_id == followee_id {
        return Err(ApiError::bad_request("Cannot follow yourself"));
    }

    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());
    let follows = FollowRepository::new(pool);

    if !accounts.exists(followee_id).await? {
        return Err(ApiError::not_found("Account not found"));
    }

    if follows.exists(requester.account_id, followee_id).await? {
        follows.delete(requester.account_id, followee_id).await?;
    } else {
        follows.insert(requester.account_id, followee_id).await?;
    }

    Ok(follows.follower_count(followee_id).await?)
}
