use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Method, Response, StatusCode};
use http_body_util::Full;
use maud::html;
use tracing::{debug, error};
use volunteer_manager_config::ConfigError;
use volunteer_manager_database::error::DatabaseError;
use volunteer_manager_reconciler::ReconcileError;
use volunteer_manager_telemetry::TelemetryError;

use crate::components::main::main;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    File(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http error: {0}")]
    Http(#[from] http::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("inconsistent event data: {0}")]
    Reconcile(#[from] ReconcileError),
    #[error("no page at {0}")]
    NotFound(String),
    #[error("no event called {0}")]
    EventNotFound(String),
    #[error("method {0} is not allowed")]
    MethodNotAllowed(Method),
}

impl From<diesel_async::pooled_connection::deadpool::PoolError> for AppError {
    fn from(value: diesel_async::pooled_connection::deadpool::PoolError) -> Self {
        Self::Database(value.into())
    }
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::File(_)
            | Self::Json(_)
            | Self::Http(_)
            | Self::Config(_)
            | Self::Telemetry(_)
            | Self::Database(_)
            | Self::Reconcile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error page. Internal details only go to the log.
    #[must_use]
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Something went wrong while processing this request.".to_owned()
        } else {
            debug!(error = %self, "request rejected");
            self.to_string()
        };
        let title = status.canonical_reason().unwrap_or("Error");
        let body = main(title, None, html! { p { (message) } });

        let mut response = Response::new(Full::new(Bytes::from(body.into_string())));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt as _;

    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::NotFound("/nope".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::EventNotFound("gone".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed(Method::POST).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Reconcile(ReconcileError::InvalidColour("#zz".to_owned())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn method_not_allowed_page() {
        let response = AppError::MethodNotAllowed(Method::DELETE).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("<title>Method Not Allowed</title>"));
        assert!(body.contains("method DELETE is not allowed"));
    }

    #[tokio::test]
    async fn internal_errors_are_not_leaked() {
        let response =
            AppError::Reconcile(ReconcileError::InvalidColour("<secret>".to_owned()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("secret"));
    }
}
