//! Free functions over the client registered on the current application
//!
//! Each function looks the client up in the request's extensions and forwards
//! the call unchanged. They fail with a configuration error when the
//! application never registered a client.

use axum::http::Extensions;

use crate::core::errors::Result;
use crate::core::models::{Detection, Language, TranslationRequest, TranslationResult};
use crate::server::extension::lookup;

/// Detect the language of a single text
pub async fn detect(extensions: &Extensions, q: &str) -> Result<Vec<Detection>> {
    lookup(extensions)?.detect(q).await
}

/// Retrieve the list of supported languages
pub async fn languages(extensions: &Extensions) -> Result<Vec<Language>> {
    lookup(extensions)?.languages().await
}

/// Translate a text, returning the full result
pub async fn translate(
    extensions: &Extensions,
    request: &TranslationRequest,
) -> Result<TranslationResult> {
    lookup(extensions)?.translate(request).await
}

/// Translate a text and return only the translated string
pub async fn translate_text(
    extensions: &Extensions,
    q: &str,
    source: &str,
    target: &str,
) -> Result<String> {
    lookup(extensions)?.translate_text(q, source, target).await
}
