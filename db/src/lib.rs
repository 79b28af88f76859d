pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr, SqlErr};
use std::path::Path;
use util::config;

/// Opens the configured database.
///
/// `DATABASE_PATH` may be a full DSN or a plain SQLite file path; for a file path the
/// parent directory is created and the file is opened in read-write-create mode.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = sqlite_url(&config::database_path())?;

    tracing::debug!(%url, "connecting to database");
    Database::connect(&url).await
}

fn sqlite_url(path_or_url: &str) -> Result<String, DbErr> {
    if path_or_url.starts_with("sqlite:") {
        return Ok(path_or_url.to_owned());
    }

    // SQLite won't create intermediate dirs
    if let Some(parent) = Path::new(path_or_url).parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            DbErr::Custom(format!(
                "failed to create database directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    Ok(format!("sqlite://{path_or_url}?mode=rwc"))
}

/// True when `err` was raised by a UNIQUE index or constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
