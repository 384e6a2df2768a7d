//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `hrbook_core` linkage and the configured database end to end.
//! - Keep output as stable `key=value` lines for quick local checks.

use hrbook_core::db::{ensure_schema, open_db};
use hrbook_core::{
    init_logging_from_config, CoreConfig, ReviewRepository, SqliteEmployeeRepository,
    SqliteReviewRepository,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("hrbook_core ping={}", hrbook_core::ping());
    println!("hrbook_core version={}", hrbook_core::core_version());

    let config = CoreConfig::from_env()?;
    let file_logging = init_logging_from_config(&config)?;
    println!("file_logging={file_logging}");

    let conn = open_db(&config.db_path)?;
    ensure_schema(&conn)?;

    let mut reviews = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let count = reviews.get_all()?.len();
    info!("event=cli_smoke module=cli status=ok review_count={count}");

    println!("db_path={}", config.db_path.display());
    println!("review_count={count}");
    Ok(())
}
