/// Request extractors that report failures as [`ApiError`]
///
/// axum's stock `Json` and `Path` reject with their own plain-text bodies.
/// These wrappers keep the `{"error", "message"}` shape for every failure:
///
/// - [`ApiJson`] parses the body as JSON whatever the `Content-Type`, and
///   answers 400 for malformed JSON, missing keys or wrong value types.
/// - [`ApiPath`] answers 404 when a path segment does not parse, the same as
///   an unknown ID.

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// JSON body extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| {
                let message = match e.classify() {
                    Category::Data => format!("Invalid request body: {}", e),
                    Category::Syntax | Category::Eof | Category::Io => {
                        format!("Malformed JSON body: {}", e)
                    }
                };
                tracing::debug!(error = %e, "Rejected request body");
                ApiError::BadRequest(message)
            })
    }
}

/// Path parameter extractor
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => {
                tracing::debug!(uri = %parts.uri, reason = %rejection.body_text(), "Unmatched path parameter");
                Err(ApiError::NotFound(format!("No resource at {}", parts.uri.path())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
        age: i32,
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_parses_without_content_type() {
        let ApiJson(payload) = ApiJson::<Payload>::from_request(request(r#"{"name":"a","age":3}"#), &())
            .await
            .unwrap();

        assert_eq!(payload.name, "a");
        assert_eq!(payload.age, 3);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = ApiJson::<Payload>::from_request(request(r#"{"name":"a"}"#), &())
            .await
            .unwrap_err();

        match err {
            ApiError::BadRequest(msg) => assert!(msg.contains("missing field `age`"), "{}", msg),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = ApiJson::<Payload>::from_request(request("{not json"), &())
            .await
            .unwrap_err();

        match err {
            ApiError::BadRequest(msg) => assert!(msg.starts_with("Malformed JSON body"), "{}", msg),
            other => panic!("expected bad request, got {:?}", other),
        }
    }
}
