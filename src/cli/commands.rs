//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::core::client::LibreTranslate;
use crate::core::config::LibreTranslateConfig;
use crate::core::models::{TextFormat, TranslationRequest, DEFAULT_ALTERNATES};

/// Commands for the LibreTranslate CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect the language of a text
    Detect {
        /// Text to detect
        text: String,
    },

    /// List the languages supported by the server
    Languages,

    /// Translate a text
    Translate {
        /// Text to translate
        text: String,

        /// Source language code, or "auto"
        #[arg(short, long, default_value = "en")]
        source: String,

        /// Target language code
        #[arg(short, long, default_value = "es")]
        target: String,

        /// Input format: text or html
        #[arg(long, default_value = "text")]
        format: TextFormat,

        /// Number of alternative translations to request
        #[arg(long, default_value_t = DEFAULT_ALTERNATES)]
        alternates: u32,
    },

    /// Translate a document and print the download URL
    TranslateFile {
        /// File to upload
        file: PathBuf,

        /// Source language code
        #[arg(short, long, default_value = "en")]
        source: String,

        /// Target language code
        #[arg(short, long, default_value = "es")]
        target: String,
    },

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Spinner shown while a request is in flight
fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Handle detect command
pub async fn handle_detect(config: LibreTranslateConfig, text: String) -> anyhow::Result<()> {
    let client = LibreTranslate::new(config)?;

    let pb = spinner("Detecting language...");
    let result = client.detect(&text).await;
    pb.finish_and_clear();

    let detections = result?;
    if detections.is_empty() {
        println!("No language detected");
        return Ok(());
    }

    for detection in detections {
        println!("{}\t{:.2}", detection.language, detection.confidence);
    }

    Ok(())
}

/// Handle languages command
pub async fn handle_languages(config: LibreTranslateConfig) -> anyhow::Result<()> {
    let client = LibreTranslate::new(config)?;

    let pb = spinner("Fetching languages...");
    let result = client.languages().await;
    pb.finish_and_clear();

    let languages = result?;
    info!("Server supports {} languages", languages.len());

    for language in languages {
        println!("{}\t{}", language.code, language.name);
    }

    Ok(())
}

/// Handle translate command
pub async fn handle_translate(
    config: LibreTranslateConfig,
    request: TranslationRequest,
) -> anyhow::Result<()> {
    let client = LibreTranslate::new(config)?;

    let pb = spinner(&format!("Translating {} -> {}...", request.source, request.target));
    let result = client.translate(&request).await;
    pb.finish_and_clear();

    let result = result?;
    println!("{}", result.translated_text);

    if let Some(detected) = &result.detected_language {
        println!("\nDetected: {} ({:.2})", detected.language, detected.confidence);
    }

    if !result.alternatives.is_empty() {
        println!("\nAlternatives:");
        for alternative in &result.alternatives {
            println!("  - {}", alternative);
        }
    }

    Ok(())
}

/// Handle translate-file command
pub async fn handle_translate_file(
    config: LibreTranslateConfig,
    file: PathBuf,
    source: String,
    target: String,
) -> anyhow::Result<()> {
    if !file.is_file() {
        anyhow::bail!("{} is not a file", file.display());
    }

    let client = LibreTranslate::new(config)?;

    let pb = spinner(&format!("Uploading {}...", file.display()));
    let result = client.translate_file(&file, &source, &target).await;
    pb.finish_and_clear();

    let translated = result?;
    println!("✅ Translated file: {}", translated.translated_file_url);

    Ok(())
}

/// Handle server command
pub async fn handle_server(
    config: LibreTranslateConfig,
    host: String,
    port: u16,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("🌐 Proxying to {}", config.base_url());

    run_server(config, host, port).await?;

    Ok(())
}
