//! CLI module for sandgate-server.
//!
//! This module provides the command-line interface that can be used either
//! as a standalone binary or as a subcommand of the main sandgate CLI.

use std::io;
use std::path::PathBuf;
#[cfg(unix)]
use std::path::Path;
#[cfg(unix)]
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sandgate_config::{CliOverrides, LoggingConfig, apply_overrides, load_config, validate_config};
use sandgate_core::defaults;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(unix)]
use crate::policy::{AuthPolicy, ReloadablePolicy};
use crate::server::{bind, serve};
use crate::state::AppState;
use crate::CancellationToken;

/// Sandgate server CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sandgate-server",
    version,
    about = "Trusted-header authentication for a web file manager"
)]
pub struct ServerArgs {
    /// Config file path (json/jsonc/yaml/toml)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Run the sandgate server with the given arguments.
///
/// This is the main entry point for the server CLI, used by both the
/// standalone binary and the unified sandgate CLI.
pub async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);
    info!(
        version = sandgate_core::VERSION,
        config = %args.config.display(),
        root = %config.server.root,
        "starting {}",
        sandgate_core::PROJECT_NAME
    );

    // Set up graceful shutdown on SIGTERM/SIGINT
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal_handler().await;
        info!("shutdown signal received");
        shutdown_signal.cancel();
    });

    let state = AppState::from_config(&config).await?;

    // Set up SIGHUP handler for config reload
    #[cfg(unix)]
    {
        let config_path = args.config.clone();
        let overrides = args.overrides.clone();
        let policy = state.policy.clone();
        tokio::spawn(async move {
            reload_signal_handler(config_path, overrides, policy).await;
        });
    }

    let listener = bind(&config.server.listen).await?;
    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    serve(listener, state, timeout, shutdown).await?;
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            // Fall back to waiting forever
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Handle SIGHUP for config reload (Unix only).
#[cfg(unix)]
async fn reload_signal_handler(
    config_path: PathBuf,
    overrides: CliOverrides,
    policy: Arc<ReloadablePolicy>,
) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(sig) => sig,
        Err(e) => {
            warn!(
                "failed to install SIGHUP handler: {}, config reload disabled",
                e
            );
            return;
        }
    };

    loop {
        sighup.recv().await;
        info!("SIGHUP received, reloading configuration");

        match reload_policy(&config_path, &overrides, &policy) {
            Ok(()) => info!("configuration reloaded successfully"),
            Err(e) => warn!("failed to reload configuration: {}", e),
        }
    }
}

/// Reload user defaults and trusted fields from the config file.
///
/// Listen address, identity header and store settings need a restart.
#[cfg(unix)]
fn reload_policy(
    config_path: &Path,
    overrides: &CliOverrides,
    policy: &ReloadablePolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;

    let next = AuthPolicy::from_config(&config);
    info!(
        root = %next.server.root,
        static_fields = next.static_fields.len(),
        header_fields = next.field_header_prefix.is_some(),
        "auth policy reloaded"
    );
    policy.reload(next);
    Ok(())
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
fn init_tracing(config: &LoggingConfig) {
    let filter = build_filter(config);

    let format = config
        .format
        .as_deref()
        .unwrap_or(defaults::DEFAULT_LOG_FORMAT);
    let output = config
        .output
        .as_deref()
        .unwrap_or(defaults::DEFAULT_LOG_OUTPUT);

    match (format, output) {
        ("json", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stdout))
                .init();
        }
        ("json", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        ("compact", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stdout))
                .init();
        }
        ("compact", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
        (_, "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stdout))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
}

/// Build the env filter from base level and per-module filters.
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(filter_directives(config))
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_LEVEL))
}

fn filter_directives(config: &LoggingConfig) -> String {
    let base_level = config
        .level
        .as_deref()
        .unwrap_or(defaults::DEFAULT_LOG_LEVEL);
    let mut filter_str = base_level.to_string();

    let mut modules: Vec<_> = config.filters.iter().collect();
    modules.sort();
    for (module, level) in modules {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }
    filter_str
}
