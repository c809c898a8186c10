use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use storage::{Database, error::StorageError, models::User, services::accounts};

use crate::error::WebError;

/// Caller identity resolved from the bearer session token, if any
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn require(&self) -> Result<&User, WebError> {
        self.0.as_ref().ok_or(WebError::Unauthorized)
    }

    pub fn optional(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

/// Resolve `Authorization: Bearer <token>` into a [`CurrentUser`] extension.
///
/// Requests without a token continue anonymously; an unknown token is
/// rejected with 401.
pub async fn resolve_user(
    State(db): State<Database>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = match bearer_token(request.headers()) {
        Some(token) => match accounts::resolve_session(db.pool(), token).await {
            Ok(user) => Some(user),
            Err(StorageError::InvalidCredentials) => {
                tracing::warn!("Invalid session token");
                return Err(WebError::Unauthorized);
            }
            Err(e) => return Err(e.into()),
        },
        None => None,
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn ignores_other_schemes_and_empty_tokens() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);
    }
}
