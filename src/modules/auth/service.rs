use anyhow::anyhow;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use realty_auth::{Claims, create_access_token, generate_reset_token, hash_reset_token};
use realty_config::{EmailConfig, JwtConfig};
use realty_core::{AppError, hash_password, verify_password};
use realty_models::{ForgotPasswordRequest, LoginRequest, LoginResponse, ResetPasswordRequest};

use crate::metrics::{
    track_jwt_issued, track_jwt_revoked, track_user_login_failure, track_user_login_success,
};
use crate::utils::email::EmailService;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            fullname: String,
            email: String,
            phone: String,
            password: String,
        }

        let (phone, password) = dto
            .credentials()
            .ok_or_else(|| AppError::bad_request(anyhow!("Phone and password are required")))?;

        let Some(user) = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, fullname, email, phone, password FROM users WHERE phone = $1",
        )
        .bind(phone)
        .fetch_optional(db)
        .await?
        else {
            track_user_login_failure("unknown_phone");
            return Err(AppError::bad_request(anyhow!("Invalid credentials")));
        };

        if !verify_password(password, &user.password)? {
            track_user_login_failure("wrong_password");
            return Err(AppError::bad_request(anyhow!("Invalid credentials")));
        }

        let token = create_access_token(user.id, jwt_config)?;
        track_jwt_issued();
        track_user_login_success();
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            success: true,
            message: "User logged in successfully".to_string(),
            token,
            user: realty_models::UserSummary {
                id: user.id,
                fullname: user.fullname,
                email: user.email,
                phone: user.phone,
            },
        })
    }

    /// Adds the token to the revocation list and drops entries that have
    /// expired anyway.
    #[instrument(skip(db, claims), fields(user_id = %claims.sub))]
    pub async fn logout(db: &PgPool, claims: &Claims) -> Result<(), AppError> {
        let jti = claims.token_id()?;
        let user_id = claims.user_id()?;

        sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(db)
            .await?;

        sqlx::query(
            "INSERT INTO revoked_tokens (jti, user_id, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(user_id)
        .bind(claims.expires_at())
        .execute(db)
        .await?;

        track_jwt_revoked();
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn is_token_revoked(db: &PgPool, jti: Uuid) -> Result<bool, AppError> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(db)
        .await?;

        Ok(revoked)
    }

    /// Issues a reset token when the account exists. The caller always gets
    /// the same answer, so failures past the lookup are only logged.
    #[instrument(skip(db, dto, jwt_config, email_config))]
    pub async fn forgot_password(
        db: &PgPool,
        dto: ForgotPasswordRequest,
        jwt_config: &JwtConfig,
        email_config: &EmailConfig,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct ResetTarget {
            id: Uuid,
            fullname: String,
            email: String,
        }

        let Some(user) = sqlx::query_as::<_, ResetTarget>(
            "SELECT id, fullname, email FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(dto.email.trim())
        .fetch_optional(db)
        .await?
        else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::seconds(jwt_config.reset_token_expiry);

        let mut tx = db.begin().await?;

        sqlx::query(
            "UPDATE password_reset_tokens SET used_at = NOW()
             WHERE user_id = $1 AND used_at IS NULL",
        )
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(user.id)
        .bind(hash_reset_token(&token))
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let email_service = EmailService::new(email_config.clone());
        if let Err(e) = email_service
            .send_password_reset_email(
                &user.email,
                &user.fullname,
                &token,
                jwt_config.reset_token_expiry / 60,
            )
            .await
        {
            error!(user_id = %user.id, error = %e.error, "Failed to send password reset email");
        }

        Ok(())
    }

    #[instrument(skip(db, dto, email_config))]
    pub async fn reset_password(
        db: &PgPool,
        dto: ResetPasswordRequest,
        email_config: &EmailConfig,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct ResetUser {
            fullname: String,
            email: String,
        }

        let token_hash = hash_reset_token(dto.token.trim());
        let mut tx = db.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM password_reset_tokens
             WHERE token_hash = $1 AND used_at IS NULL AND expires_at > NOW()
             FOR UPDATE",
        )
        .bind(&token_hash)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::bad_request(anyhow!("Invalid or expired reset token")))?;

        let hashed_password = hash_password(&dto.new_password)?;

        let user = sqlx::query_as::<_, ResetUser>(
            "UPDATE users SET password = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING fullname, email",
        )
        .bind(&hashed_password)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE password_reset_tokens SET used_at = NOW() WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(user_id = %user_id, "Password reset");

        let email_service = EmailService::new(email_config.clone());
        if let Err(e) = email_service
            .send_password_reset_confirmation(&user.email, &user.fullname)
            .await
        {
            error!(user_id = %user_id, error = %e.error, "Failed to send password reset confirmation");
        }

        Ok(())
    }
}
