use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = dto.email.trim().to_lowercase();
        let full_name = dto.full_name.trim().to_string();

        let hashed_password = hash_password(&dto.password)?;

        // The unique constraint on email is the real guarantee against
        // duplicate accounts; no pre-check needed.
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password, full_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, email, full_name, role, created_at",
        )
        .bind(&email)
        .bind(&hashed_password)
        .bind(&full_name)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.email = %email, "Attempted to register an existing email");
                return AppError::conflict(anyhow::anyhow!("Email already registered"));
            }
            error!(error = %e, "Database error creating user");
            AppError::from(e)
        })?;

        let token = create_token(user.id, user.role, jwt_config)?;

        info!(user.id = %user.id, user.role = %user.role, "User registered");

        Ok(AuthResponse {
            status: "success",
            message: "User registered successfully",
            user,
            token,
        })
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            #[sqlx(flatten)]
            user: User,
            password: String,
        }

        let email = dto.email.trim().to_lowercase();

        // Unknown email and wrong password produce the same 401 so the
        // endpoint cannot be used to probe for accounts.
        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, full_name, role, created_at, password
             FROM users WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &row.password) {
            warn!(user.email = %email, "Failed login attempt");
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let token = create_token(row.user.id, row.user.role, jwt_config)?;

        info!(user.id = %row.user.id, "User logged in");

        Ok(AuthResponse {
            status: "success",
            message: "Login successful",
            user: row.user,
            token,
        })
    }

    #[instrument(skip(db))]
    pub async fn current_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, role, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
