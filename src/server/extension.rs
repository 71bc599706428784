//! Registration of a [`LibreTranslate`] client on an axum application
//!
//! The client lives in the router's request extensions, so it is created once
//! at startup and dropped together with the application. Handlers reach it
//! through the [`Translate`] extractor or the functions in
//! [`crate::server::facade`].

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, Extensions, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json, Router,
};
use serde::Serialize;
use std::ops::Deref;
use tracing::info;

use crate::core::client::LibreTranslate;
use crate::core::errors::{LibreTranslateError, Result};

/// Attach a LibreTranslate client to an application
pub trait LibreTranslateExt {
    /// Register `client` for every route added so far
    fn libretranslate(self, client: LibreTranslate) -> Self;
}

impl<S> LibreTranslateExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn libretranslate(self, client: LibreTranslate) -> Self {
        info!(
            "Registered LibreTranslate extension for {}",
            client.config().base_url()
        );
        self.layer(Extension(client))
    }
}

/// Look up the client registered on the application serving this request
pub fn lookup(extensions: &Extensions) -> Result<&LibreTranslate> {
    extensions.get::<LibreTranslate>().ok_or_else(|| {
        LibreTranslateError::config("LibreTranslate is not registered on this application")
    })
}

/// Extractor for the registered client
#[derive(Debug, Clone)]
pub struct Translate(pub LibreTranslate);

impl Deref for Translate {
    type Target = LibreTranslate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Translate
where
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let client = lookup(&parts.extensions)?;
        Ok(Translate(client.clone()))
    }
}

/// Error body, same shape as the one LibreTranslate itself returns
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// A [`LibreTranslateError`] rendered as an HTTP response
#[derive(Debug)]
pub struct ApiFailure(pub LibreTranslateError);

impl From<LibreTranslateError> for ApiFailure {
    fn from(err: LibreTranslateError) -> Self {
        ApiFailure(err)
    }
}

impl ApiFailure {
    /// Status code the failure is reported with
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LibreTranslateError::ApiError { code, .. } => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            LibreTranslateError::InvalidRequestError { .. } => StatusCode::BAD_REQUEST,
            LibreTranslateError::TransportError(e) if e.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            LibreTranslateError::TransportError(_)
            | LibreTranslateError::InvalidResponseError { .. } => StatusCode::BAD_GATEWAY,
            LibreTranslateError::ConfigError { .. } | LibreTranslateError::IoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self.0 {
            LibreTranslateError::ApiError { message, .. } => message,
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LibreTranslateConfig;

    #[test]
    fn test_lookup_without_registration() {
        let extensions = Extensions::new();
        let err = lookup(&extensions).unwrap_err();
        assert!(matches!(err, LibreTranslateError::ConfigError { .. }));
    }

    #[test]
    fn test_lookup_after_registration() {
        let config = LibreTranslateConfig::new("http://localhost:5000", None, None).unwrap();
        let mut extensions = Extensions::new();
        extensions.insert(LibreTranslate::new(config).unwrap());

        let client = lookup(&extensions).unwrap();
        assert_eq!(client.config().base_url(), "http://localhost:5000/");
    }

    #[test]
    fn test_failure_status_codes() {
        let api = ApiFailure(LibreTranslateError::ApiError {
            message: "Invalid API key".to_string(),
            code: 403,
        });
        assert_eq!(api.status(), StatusCode::FORBIDDEN);

        let bogus = ApiFailure(LibreTranslateError::ApiError {
            message: "?".to_string(),
            code: 42,
        });
        assert_eq!(bogus.status(), StatusCode::BAD_GATEWAY);

        let invalid = ApiFailure(LibreTranslateError::invalid_request("'q' must not be empty"));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let config = ApiFailure(LibreTranslateError::config("missing"));
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
