use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use realty_auth::{Claims, verify_token};
use realty_core::AppError;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Extractor that validates the access token and rejects revoked tokens.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0.user_id()
    }

    /// Rejects the request unless the token belongs to `user_id`.
    pub fn ensure_self(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.user_id()? != user_id {
            return Err(AppError::forbidden(
                "You can only modify your own account".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reads the token from the `Authorization` header. The `Bearer ` prefix is
/// optional. Returns `None` when the header is absent or blank.
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

async fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = verify_token(token, &state.jwt_config)?;
    let jti = claims.token_id()?;
    claims.user_id()?;

    if AuthService::is_token_revoked(&state.db, jti).await? {
        return Err(AppError::unauthorized("Token has been revoked".to_string()));
    }

    Ok(AuthUser(claims))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or_else(|| {
            AppError::unauthorized("No token, authorization denied".to_string())
        })?;

        authenticate(token, state).await
    }
}

/// Like [`AuthUser`], but lets anonymous requests through.
///
/// A request without a token yields `None`. A token that is present but
/// invalid or revoked is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Result<Option<Uuid>, AppError> {
        self.0.as_ref().map(AuthUser::user_id).transpose()
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match extract_token(&parts.headers) {
            Some(token) => Ok(OptionalAuthUser(Some(authenticate(token, state).await?))),
            None => Ok(OptionalAuthUser(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(extract_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_token(&headers("abc.def")), Some("abc.def"));
    }

    #[test]
    fn blank_or_missing_header_has_no_token() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers("Bearer ")), None);
        assert_eq!(extract_token(&headers("   ")), None);
    }

    #[test]
    fn ensure_self_rejects_other_users() {
        let user_id = Uuid::new_v4();
        let auth = AuthUser(Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: 9999999999,
            iat: 1234567890,
        });

        assert!(auth.ensure_self(user_id).is_ok());
        let err = auth.ensure_self(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }
}
