use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::services::Claims;

/// Verifies the `Authorization: Bearer <jwt>` header and makes the token's
/// [`Claims`] available to handlers as a request extension.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer(&headers) else {
        return Err(ApiError::unauthorized("Missing bearer token"));
    };

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        ApiError::unauthorized("Invalid or expired token")
    })?;

    tracing::Span::current().record("user_id", claims.sub.as_str());
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Must run inside [`auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let is_admin = request
        .extensions()
        .get::<Claims>()
        .is_some_and(Claims::is_admin);

    if !is_admin {
        return Err(ApiError::forbidden("Admin role required"));
    }

    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert("Authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_bearer(&headers).as_deref(), Some("abc.def"));

        headers.insert("Authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);
    }
}
