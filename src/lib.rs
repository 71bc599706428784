//! axum-libretranslate - LibreTranslate client extension for axum
//!
//! This library wraps the LibreTranslate HTTP API (language detection,
//! supported languages, text and file translation) and registers the client
//! on an axum application so handlers can reach it from the request context.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod server;
pub mod cli;

// Re-export key types for convenience
pub use self::core::{
    client::LibreTranslate,
    config::LibreTranslateConfig,
    models::{Detection, Language, TextFormat, TranslatedFile, TranslationRequest, TranslationResult},
    errors::{LibreTranslateError, Result},
};

pub use server::extension::{LibreTranslateExt, Translate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
