//! sockrpc: JSON remote procedure call server over a Unix domain socket.
//!
//! Loads the configuration, sets up logging and serves clients one at a
//! time until SIGINT or SIGTERM.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use sockrpc::config;
use sockrpc::rpc::{MethodRegistry, RpcServer};

/// JSON remote procedure call server over a Unix domain socket.
///
/// Reads `server_address` from the configuration file and answers
/// `{"method", "params", "param_types", "id"}` requests on that socket.
#[derive(Parser, Debug)]
#[command(name = "sockrpc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn license_notice() -> String {
    format!(
        "sockrpc {}  Copyright (C) 2026  The Embedded Society\n\
         This program comes with ABSOLUTELY NO WARRANTY.\n\
         This is free software, licensed under GPL-3.0-or-later.\n\
         Source: {}\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY"),
    )
}

/// Entry point for the sockrpc server.
fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                eprintln!("\nExpected ./{} or", config::LOCAL_CONFIG_FILE);
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("         {}", default_path.display());
                }
                eprintln!("Create one based on config/example-config.json");
            }
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    // Display GPL license notice (required by GPLv3 Section 5d)
    eprintln!("{}", license_notice());


    info!(
        version = env!("CARGO_PKG_VERSION"),
        socket = %cfg.server_address.display(),
        buffer_size = cfg.buffer_size,
        "Starting sockrpc server"
    );
    info!(
        methods = ?MethodRegistry::new().names().collect::<Vec<_>>(),
        "Registered methods"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        let server = RpcServer::bind(&cfg)?;
        server.run().await
    });

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(1, false, "error"), Level::INFO);
        assert_eq!(get_log_level(2, false, "error"), Level::DEBUG);
        assert_eq!(get_log_level(5, false, "error"), Level::TRACE);
    }

    #[test]
    fn log_level_from_config() {
        assert_eq!(get_log_level(0, false, "DEBUG"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "nonsense"), Level::WARN);
    }

    #[test]
    fn license_notice_names_version_and_source() {
        let notice = license_notice();
        assert!(notice.starts_with(&format!("sockrpc {}", env!("CARGO_PKG_VERSION"))));
        assert!(notice.contains("ABSOLUTELY NO WARRANTY"));
        assert!(notice.contains("GPL-3.0-or-later"));
        assert!(notice.ends_with(&format!("Source: {}\n", env!("CARGO_PKG_REPOSITORY"))));
    }
}
