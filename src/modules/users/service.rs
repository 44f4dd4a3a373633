use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use realty_config::EmailConfig;
use realty_core::{AppError, hash_password};
use realty_models::{RegisterRequest, UpdateUserRequest, User, UserSummary};

use crate::metrics::track_user_registered;
use crate::utils::email::EmailService;
use crate::validator::validate_dto;

const USER_COLUMNS: &str = "id, fullname, email, phone, is_subscribed, created_at, updated_at";

fn user_exists() -> AppError {
    AppError::bad_request(anyhow!("User already exists"))
}

/// A unique index on email or phone rejected the write.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto, email_config))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequest,
        email_config: &EmailConfig,
    ) -> Result<UserSummary, AppError> {
        let new_user = dto
            .into_new_user()
            .ok_or_else(|| AppError::bad_request(anyhow!("All fields are required")))?;
        validate_dto(&new_user)?;

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1 OR phone = $2)",
        )
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .fetch_one(db)
        .await?;

        if taken {
            return Err(user_exists());
        }

        let hashed_password = hash_password(&new_user.password)?;

        let sql = format!(
            "INSERT INTO users (fullname, email, phone, password)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.fullname)
            .bind(&new_user.email)
            .bind(&new_user.phone)
            .bind(&hashed_password)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    user_exists()
                } else {
                    AppError::internal(anyhow::Error::new(e).context("Failed to insert user"))
                }
            })?;

        track_user_registered();
        info!(user_id = %user.id, "User registered");

        let email_service = EmailService::new(email_config.clone());
        if let Err(e) = email_service
            .send_welcome_email(&user.email, &user.fullname)
            .await
        {
            warn!(user_id = %user.id, error = %e.error, "Failed to send welcome email");
        }

        Ok(UserSummary::from(user))
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user")?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Applies the fields present in `dto`. A new password is re-hashed.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserRequest,
    ) -> Result<User, AppError> {
        let fullname = dto.fullname.map(|v| v.trim().to_string());
        let email = dto.email.map(|v| v.trim().to_lowercase());
        let phone = dto.phone.map(|v| v.trim().to_string());
        let password = dto.password.as_deref().map(hash_password).transpose()?;

        if email.is_some() || phone.is_some() {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(
                    SELECT 1 FROM users
                    WHERE id <> $1 AND (LOWER(email) = $2 OR phone = $3)
                )",
            )
            .bind(id)
            .bind(&email)
            .bind(&phone)
            .fetch_one(db)
            .await?;

            if taken {
                return Err(AppError::bad_request(anyhow!(
                    "Email or phone is already in use"
                )));
            }
        }

        let sql = format!(
            "UPDATE users SET
                fullname = COALESCE($1, fullname),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                password = COALESCE($4, password),
                is_subscribed = COALESCE($5, is_subscribed),
                updated_at = NOW()
             WHERE id = $6
             RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(fullname)
            .bind(email)
            .bind(phone)
            .bind(password)
            .bind(dto.is_subscribed)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::bad_request(anyhow!("Email or phone is already in use"))
                } else {
                    AppError::internal(anyhow::Error::new(e).context("Failed to update user"))
                }
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Deletes the account. Its listings stay up without an owner and its
    /// bookings are removed.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user")?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
