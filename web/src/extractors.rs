//! Custom Axum extractors.
//!
//! - [`TicketJson`]: JSON body extractor whose rejections render as
//!   [`AppError`] (`422` with a `detail` message) instead of Axum's plain-text
//!   rejection.
//! - [`TicketQuery`]: query string extractor; rejections render as `400` with
//!   a `detail` message.
//!
//! # Examples
//!
//! ```ignore
//! async fn create(TicketJson(input): TicketJson<NewTicket>) -> Result<Json<Ticket>, AppError> {
//!     // Missing `title` never reaches this point.
//! }
//! ```

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for TicketJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected request body");
    AppError::validation(rejection.body_text())
}

/// Query string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for TicketQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection_to_error(&rejection)),
        }
    }
}

fn query_rejection_to_error(rejection: &QueryRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "Rejected query string");
    AppError::bad_request(rejection.body_text())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let TicketJson(payload) =
            TicketJson::<Payload>::from_request(json_request(r#"{"title":"x"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.title, "x");
    }

    #[tokio::test]
    async fn missing_field_is_422() {
        let err = TicketJson::<Payload>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        day: Option<chrono::NaiveDate>,
    }

    async fn query_of(uri: &str) -> Result<TicketQuery<Params>, AppError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        TicketQuery::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_valid_query() {
        let TicketQuery(params) = query_of("/?day=2025-01-01").await.unwrap();
        assert!(params.day.is_some());
    }

    #[tokio::test]
    async fn malformed_query_is_400() {
        let err = query_of("/?day=yesterday").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn missing_content_type_is_422() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"title":"x"}"#))
            .unwrap();

        let err = TicketJson::<Payload>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
