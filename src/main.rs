use bill_search::{
    cli::{self, Cli},
    config::{Config, ObservabilityConfig},
    AppError,
};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load_with(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => {
            let err = AppError::from(e);
            eprintln!("{}", err);
            return ExitCode::from(&err);
        }
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    init_tracing(&config.observability);
    tracing::debug!("Starting bill-search v{}", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli::run(&cli, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(
                error_code = err.error_code(),
                exit_code = err.exit_code(),
                message = %err,
                "Search failed"
            );
            eprintln!("{}", err.user_message());
            ExitCode::from(&err)
        }
    }
}

/// Logs go to stderr so stdout carries only the report
fn init_tracing(observability: &ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bill_search={}", observability.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if observability.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
