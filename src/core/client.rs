//! Async LibreTranslate client
//!
//! Every operation performs exactly one HTTP request. Nothing is retried:
//! non-200 answers become [`LibreTranslateError::ApiError`] and transport
//! failures are returned unchanged as [`LibreTranslateError::TransportError`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::config::LibreTranslateConfig;
use crate::core::errors::{LibreTranslateError, Result};
use crate::core::models::{
    Detection, Endpoint, ErrorBody, Language, TranslatedFile, TranslationRequest,
    TranslationResult,
};

/// Form or query fields of one request
type Params = Vec<(&'static str, String)>;

/// Client for a LibreTranslate server
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    client: reqwest::Client,
    config: Arc<LibreTranslateConfig>,
}

impl LibreTranslate {
    /// Create a new client
    pub fn new(config: LibreTranslateConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from `LIBRETRANSLATE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LibreTranslateConfig::from_env()?)
    }

    /// Connection settings
    pub fn config(&self) -> &LibreTranslateConfig {
        &self.config
    }

    /// Detect the language of a single text.
    ///
    /// Candidates come back in the order chosen by the server, most likely first.
    pub async fn detect(&self, q: &str) -> Result<Vec<Detection>> {
        require_non_empty("q", q)?;

        let url = self.config.endpoint_url(Endpoint::Detect);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .form(&self.with_api_key(vec![("q", q.to_string())]))
            .send()
            .await?;

        parse_response(Endpoint::Detect, response).await
    }

    /// Retrieve the languages supported by the server
    pub async fn languages(&self) -> Result<Vec<Language>> {
        let url = self.config.endpoint_url(Endpoint::Languages);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        let params = self.with_api_key(Vec::new());
        if !params.is_empty() {
            request = request.query(&params);
        }

        let response = request.send().await?;
        parse_response(Endpoint::Languages, response).await
    }

    /// Translate a text, returning the full result with alternatives
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        require_non_empty("q", &request.q)?;
        require_non_empty("source", &request.source)?;
        require_non_empty("target", &request.target)?;

        let url = self.config.endpoint_url(Endpoint::Translate);
        debug!(
            "POST {} ({} -> {}, {} chars)",
            url,
            request.source,
            request.target,
            request.q.chars().count()
        );

        let params = self.with_api_key(vec![
            ("q", request.q.clone()),
            ("source", request.source.clone()),
            ("target", request.target.clone()),
            ("format", request.format.to_string()),
            ("alternates", request.alternates.to_string()),
        ]);

        let response = self.client.post(&url).form(&params).send().await?;
        parse_response(Endpoint::Translate, response).await
    }

    /// Translate a text and return only the translated string
    pub async fn translate_text(&self, q: &str, source: &str, target: &str) -> Result<String> {
        let request = TranslationRequest::new(q)
            .with_source(source)
            .with_target(target);

        Ok(self.translate(&request).await?.translated_text)
    }

    /// Upload a file for translation.
    ///
    /// The server keeps the translated document and answers with a download URL.
    pub async fn translate_file(
        &self,
        path: impl AsRef<Path>,
        source: &str,
        target: &str,
    ) -> Result<TranslatedFile> {
        require_non_empty("source", source)?;
        require_non_empty("target", target)?;

        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("source", source.to_string())
            .text("target", target.to_string());
        if let Some(key) = self.config.api_key() {
            form = form.text("api_key", key.to_string());
        }

        let url = self.config.endpoint_url(Endpoint::TranslateFile);
        debug!("POST {} ({})", url, path.display());

        let response = self.client.post(&url).multipart(form).send().await?;
        parse_response(Endpoint::TranslateFile, response).await
    }

    /// Append the API key, when configured
    fn with_api_key(&self, mut params: Params) -> Params {
        if let Some(key) = self.config.api_key() {
            params.push(("api_key", key.to_string()));
        }
        params
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LibreTranslateError::invalid_request(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}

/// Map a response to its parsed body or an API error
async fn parse_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::OK {
        return serde_json::from_str(&body).map_err(|e| {
            LibreTranslateError::InvalidResponseError {
                message: format!("{}: {}", endpoint, e),
            }
        });
    }

    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) => err.error,
        Err(_) if !body.trim().is_empty() => body,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    warn!("{} failed with status {}: {}", endpoint, status.as_u16(), message);

    Err(LibreTranslateError::ApiError {
        message,
        code: status.as_u16(),
    })
}
