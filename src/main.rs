//! RipApi - modular API client framework
//!
//! Main entry point for the RipApi CLI.

mod bootstrap;
mod cli;
mod commands;

use std::sync::OnceLock;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ripapi_config::{ConfigLoader, LoggingConfig};
use ripapi_core::Kernel;

use crate::cli::{Cli, Commands};
use crate::commands::SendArgs;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if logging.file {
        let log_dir = ConfigLoader::data_dir().join("logs");
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("ripapi")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let _ = LOG_GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        // stdout is reserved for command output
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(ConfigLoader::default_config_path);
    let mut config = ConfigLoader::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    ConfigLoader::apply_env_overrides(&mut config);

    init_tracing(&config.logging)?;

    let command = match cli.command {
        Commands::CheckConfig => return commands::check_config(&config_path, &config),
        other => other,
    };

    info!("Starting RipApi v{}", env!("CARGO_PKG_VERSION"));
    let kernel = bootstrap::boot(&config).await?;

    let interrupt = kernel.shutdown_signal().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, shutting down");
            interrupt.trigger();
        }
    });

    let result = kernel
        .run_until_shutdown(run_command(&kernel, command))
        .await
        .unwrap_or_else(|| Err(anyhow::anyhow!("Interrupted")));

    let report = kernel.stop().await?;
    for (id, err) in &report.failed {
        error!("Module \"{}\" did not shut down cleanly: {}", id, err);
    }

    result
}

async fn run_command(kernel: &Kernel, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Modules { json } => commands::modules(kernel, json),
        Commands::Send {
            protocol,
            url,
            method,
            headers,
            body,
            bearer,
        } => {
            let args = SendArgs {
                protocol,
                url,
                method,
                headers,
                body,
                bearer,
            };
            commands::send(kernel, args).await.map(|_| ())
        }
        Commands::Login { username, password } => commands::login(kernel, username, password).await,
        Commands::CheckConfig => Ok(()),
    }
}
