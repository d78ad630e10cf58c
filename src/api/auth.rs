use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    Json,
};
use sha2::{Digest, Sha256};

use crate::api::handlers::{AppState, ErrorResponse};
use crate::store::Storage;

/// Axum extractor that admits only requests carrying the admin bearer token.
///
/// Put it first in a handler's argument list so unauthorized requests are
/// rejected before the body is read or validated. With no secret configured
/// every request is rejected.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[async_trait]
impl<S: Storage> FromRequestParts<AppState<S>> for AdminGuard {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers);

        if is_authorized(state.admin_secret.as_deref(), token) {
            Ok(AdminGuard)
        } else {
            log::warn!("Rejected unauthorized {} {}", parts.method, parts.uri.path());
            Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Unauthorized")),
            ))
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Fail-closed check of a presented token against the configured secret
pub fn is_authorized(secret: Option<&str>, token: Option<&str>) -> bool {
    match (secret, token) {
        (Some(secret), Some(token)) if !secret.is_empty() => {
            constant_time_eq(secret.as_bytes(), token.as_bytes())
        }
        _ => false,
    }
}

/// Compare two byte strings without short-circuiting.
///
/// Both sides are hashed first so the comparison always covers 32 bytes
/// and leaks neither the position of the first mismatch nor the secret's length.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let a = Sha256::digest(a);
    let b = Sha256::digest(b);
    a.iter().zip(b.iter()).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert_eq!(extract_bearer_token(&headers), Some("s3cret"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic czNjcmV0"));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_matching_token_is_authorized() {
        assert!(is_authorized(Some("s3cret"), Some("s3cret")));
        assert!(!is_authorized(Some("s3cret"), Some("s3cre")));
        assert!(!is_authorized(Some("s3cret"), Some("s3cret ")));
        assert!(!is_authorized(Some("s3cret"), None));
    }

    #[test]
    fn test_unset_secret_fails_closed() {
        assert!(!is_authorized(None, Some("anything")));
        assert!(!is_authorized(None, Some("")));
        assert!(!is_authorized(None, None));
        assert!(!is_authorized(Some(""), Some("")));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
