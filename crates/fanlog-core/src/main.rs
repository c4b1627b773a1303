//! fanlog demo binary.
//!
//! Builds a logger from flags, an optional config file and the environment,
//! then walks through redaction, child loggers, context loggers and a runtime
//! level change.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use fanlog_core::{fields, Field, Level, LogConfig, LogError, Logger, Preset};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status when setup or delivery fails.
const EXIT_FAILURE: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "fanlog-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logging config file (.toml or .json)
    #[arg(long, env = "FANLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Root logger threshold
    #[arg(long, value_enum)]
    level: Option<Level>,

    /// Console sink threshold
    #[arg(long, value_enum)]
    console_level: Option<Level>,

    /// Append JSON lines to this file at the root threshold
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Human-readable console output instead of JSON lines
    #[arg(long)]
    development: bool,

    /// Log one fatal record and exit instead of running the scenario
    #[arg(long)]
    fatal: bool,

    /// Verbosity of fanlog's own diagnostics on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_diagnostics(cli.verbose);

    if let Err(err) = run(&cli) {
        tracing::error!(code = err.code(), category = %err.category(), "demo failed");
        eprintln!("fanlog-demo: {}", err);
        std::process::exit(EXIT_FAILURE);
    }
}

fn init_diagnostics(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "fanlog_core=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn build_config(cli: &Cli) -> Result<LogConfig, LogError> {
    let base = match &cli.config {
        Some(path) => LogConfig::load(path)?,
        None => LogConfig::new("app")
            .with_console_level(Some(Level::Debug))
            .with_development(true)
            .with_preset(Preset::CreditCard)
            .with_preset(Preset::Email),
    };
    let mut config = LogConfig::from_env(base);

    if let Some(level) = cli.level {
        config = config.with_level(level);
    }
    if let Some(level) = cli.console_level {
        config = config.with_console_level(Some(level));
    }
    if cli.development {
        config = config.with_development(true);
    }
    if let Some(path) = &cli.log_file {
        let level = config.level;
        config = config.with_file(path, level);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), LogError> {
    let config = build_config(cli)?;
    let logger = Logger::from_config(&config)?;

    if cli.fatal {
        logger.fatal(
            "Unrecoverable startup failure",
            fields! { "component" => "demo", "reason" => "requested" },
        );
    }

    logger.debug("This is a debug message", [])?;
    logger.info("This is an info message", [])?;
    logger.info(
        "User information",
        fields! { "user_id" => 12345, "action" => "login" },
    )?;

    logger.warn("User payment failed with card 4111-1111-1111-1111", [])?;
    logger.error(
        "Failed to send email to user@example.com",
        fields! { "error_code" => 500 },
    )?;

    let auth = logger.child("auth");
    auth.info("Authentication service started", [])?;
    let cause = std::io::Error::new(std::io::ErrorKind::Other, "error message");
    auth.error(
        "Token validation failed",
        vec![Field::error("error_message", &cause)],
    )?;

    let request = logger.with_context(fields! {
        "request_id" => "req-123456",
        "client_ip" => "192.168.1.1",
    });
    request.info("Request received", [])?;
    request.info(
        "Request processed",
        fields! { "duration_ms" => 235, "status" => 200 },
    )?;

    let user = auth.with_context(fields! { "user_id" => "user-789" });
    user.debug("User profile accessed", [])?;

    logger.set_level(Level::Warn);
    logger.info("This won't be logged because level is now WARN", [])?;
    logger.warn("But this warning will be logged", [])?;

    logger.flush()
}
