//! Role gating on top of [`AuthUser`].
//!
//! Handlers restricted to one role take a `RequireInstructor` or
//! `RequireStudent` parameter; the extractor authenticates first (401) and
//! then checks the role claim (403). [`check_role`] is the shared predicate
//! for manual checks inside handler logic.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    if auth_user.role() != required_role {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required role: {}",
            required_role
        )));
    }

    Ok(())
}

/// Extractor for instructor-only routes.
#[derive(Debug, Clone)]
pub struct RequireInstructor(pub AuthUser);

impl FromRequestParts<AppState> for RequireInstructor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, UserRole::Instructor)?;

        Ok(RequireInstructor(auth_user))
    }
}

/// Extractor for student-only routes.
#[derive(Debug, Clone)]
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, UserRole::Student)?;

        Ok(RequireStudent(auth_user))
    }
}
