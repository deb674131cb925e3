//! CLI smoke entry point.
//!
//! # Responsibility
//! - Resolve core configuration from the environment.
//! - Open (and migrate) the configured database.
//! - Print deterministic status lines for quick local sanity checks.

use log::info;
use market_core::db::migrations::current_user_version;
use market_core::{core_version, open_db, ping, CoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("market_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::from_env()?;
    let logging_enabled = config.init_logging()?;

    println!("market_core ping={}", ping());
    println!("market_core version={}", core_version());
    println!("market_core logging={}", if logging_enabled { "on" } else { "off" });

    let conn = open_db(&config.db_path).map_err(|err| {
        format!("failed to open `{}`: {err}", config.db_path.display())
    })?;
    let schema_version = current_user_version(&conn).map_err(|err| err.to_string())?;

    info!(
        "event=cli_probe module=cli status=ok schema_version={}",
        schema_version
    );
    println!("market_core db_path={}", config.db_path.display());
    println!("market_core schema_version={schema_version}");
    Ok(())
}
