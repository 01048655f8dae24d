use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nl_core::{Error, ErrorKind};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, warn};

/// Core error carried out of a handler as a JSON `{"error": {kind, message}}` body.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NoContent => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorKind::Config | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = status_for(kind);
        let message = self.0.to_string();

        match kind {
            ErrorKind::InvalidInput | ErrorKind::NoContent => debug!("Request rejected: {}", message),
            ErrorKind::UpstreamUnavailable => warn!("Upstream failure: {}", message),
            ErrorKind::Config | ErrorKind::Internal => error!("Internal error: {}", message),
        }

        let body = json!({
            "error": {
                "kind": kind.as_str(),
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// `Query` whose rejection is reported as an `invalid_input` JSON error.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> ApiResult<Self> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError(Error::InvalidInput(rejection.body_text()))),
        }
    }
}
