//! Core data models for the LibreTranslate API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default source language for translations
pub const DEFAULT_SOURCE: &str = "en";

/// Default target language for translations
pub const DEFAULT_TARGET: &str = "es";

/// Default number of alternative translations requested
pub const DEFAULT_ALTERNATES: u32 = 3;

/// Remote endpoints, relative to the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `detect`
    Detect,
    /// `languages`
    Languages,
    /// `translate`
    Translate,
    /// `translate_file`
    TranslateFile,
}

impl Endpoint {
    /// Path suffix appended to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Detect => "detect",
            Endpoint::Languages => "languages",
            Endpoint::Translate => "translate",
            Endpoint::TranslateFile => "translate_file",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Text format of the input to translate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// Plain text
    #[default]
    Text,
    /// HTML markup, tags are preserved by the service
    Html,
}

impl TextFormat {
    /// Wire value of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::Text => "text",
            TextFormat::Html => "html",
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(TextFormat::Text),
            "html" => Ok(TextFormat::Html),
            other => Err(format!("unknown format '{}', expected 'text' or 'html'", other)),
        }
    }
}

/// One language detection candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Language code
    pub language: String,
    /// Confidence reported by the server
    pub confidence: f64,
}

/// A language supported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language code, e.g. `en`
    pub code: String,
    /// Display name, e.g. `English`
    pub name: String,
    /// Codes this language can be translated into; older servers omit it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub q: String,
    /// Source language code, or `auto`
    #[serde(default = "default_source")]
    pub source: String,
    /// Target language code
    #[serde(default = "default_target")]
    pub target: String,
    /// Format of `q`
    #[serde(default)]
    pub format: TextFormat,
    /// Number of alternative translations to ask for
    #[serde(default = "default_alternates")]
    pub alternates: u32,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_alternates() -> u32 {
    DEFAULT_ALTERNATES
}

impl TranslationRequest {
    /// Request translating `q` from English to Spanish
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            source: default_source(),
            target: default_target(),
            format: TextFormat::default(),
            alternates: DEFAULT_ALTERNATES,
        }
    }

    /// Set the source language
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the target language
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the input format
    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the number of alternatives
    pub fn with_alternates(mut self, alternates: u32) -> Self {
        self.alternates = alternates;
        self
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Best translation
    pub translated_text: String,
    /// Other candidate translations
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Only present when the source was `auto`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<Detection>,
}

/// Result of a file translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedFile {
    /// Where the translated file can be downloaded
    pub translated_file_url: String,
}

/// Error body returned by the service on non-200 responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
