use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::{User, UserRole};

/// JWT claims: caller identity plus role, with issued-at and expiry as
/// seconds since the epoch. `exp` is enforced by jsonwebtoken's default
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Returned by register and login: the user plus a freshly issued token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub status: &'static str,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user_id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}
