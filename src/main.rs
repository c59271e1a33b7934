//! pagesnap - capture a rendered page as a per-device design document.

mod cli;
mod cmd_config;
mod cmd_meta;
mod cmd_render;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagesnap_config::{ConfigLoader, LoggingConfig};

use crate::cli::{Cli, Commands};

/// Console logging on stderr, plus a daily-rotated file when configured.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Stdout carries rendered documents.
    let console = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let file = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("pagesnap")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Flushes on drop; must outlive every log call.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Render {
            url,
            devices,
            out,
            pretty,
        } => cmd_render::handle_render(&config, &url, &devices, out, pretty).await,
        Commands::Meta { file, pretty } => cmd_meta::handle_meta(&file, pretty),
        Commands::Config { check } => cmd_config::handle_config(&config, check),
    }
}
