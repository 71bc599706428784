//! Main entry point for the LibreTranslate CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use axum_libretranslate::cli::commands::{self, Commands};
use axum_libretranslate::core::config::{LibreTranslateConfig, Overrides};
use axum_libretranslate::TranslationRequest;

/// LibreTranslate client and proxy server
#[derive(Parser, Debug)]
#[command(name = "libretranslate", version, about, long_about = None)]
struct Args {
    /// LibreTranslate base URL (defaults to LIBRETRANSLATE_URL env var)
    #[arg(long)]
    url: Option<String>,

    /// API key (defaults to LIBRETRANSLATE_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Request timeout in seconds (defaults to LIBRETRANSLATE_TIMEOUT env var)
    #[arg(long)]
    timeout: Option<f64>,

    /// Configuration file (JSON, TOML or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!(
        "{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = args.command else {
        println!("Please specify a command. Use --help for more information.");
        return Ok(());
    };

    // CLI flags win over the config file and environment
    let overrides = Overrides {
        url: args.url,
        api_key: args.api_key,
        timeout: args.timeout,
    };
    let config = LibreTranslateConfig::load_with_overrides(args.config.as_deref(), overrides)?;

    match command {
        Commands::Detect { text } => {
            commands::handle_detect(config, text).await?;
        }
        Commands::Languages => {
            commands::handle_languages(config).await?;
        }
        Commands::Translate {
            text,
            source,
            target,
            format,
            alternates,
        } => {
            let request = TranslationRequest::new(text)
                .with_source(source)
                .with_target(target)
                .with_format(format)
                .with_alternates(alternates);
            commands::handle_translate(config, request).await?;
        }
        Commands::TranslateFile {
            file,
            source,
            target,
        } => {
            commands::handle_translate_file(config, file, source, target).await?;
        }
        Commands::Server { host, port } => {
            commands::handle_server(config, host, port).await?;
        }
    }

    Ok(())
}
