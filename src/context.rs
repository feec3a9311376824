use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the caller identity resolved by the upstream auth layer.
pub const USER_HEADER: &str = "x-user-id";

/// Per-request caller context, passed explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: String,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(RequestContext::new(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<RequestContext, AppError> {
        let (mut parts, _) = request.into_parts();
        RequestContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_user_header() {
        let request = Request::builder()
            .header(USER_HEADER, " alice ")
            .body(())
            .unwrap();
        let ctx = tokio_test::assert_ok!(extract(request).await);
        assert_eq!(ctx.user_id, "alice");
    }

    #[tokio::test]
    async fn missing_or_blank_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        assert!(matches!(extract(request).await, Err(AppError::Unauthorized)));

        let request = Request::builder().header(USER_HEADER, "  ").body(()).unwrap();
        assert!(matches!(extract(request).await, Err(AppError::Unauthorized)));
    }
}
