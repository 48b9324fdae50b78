use std::sync::Arc;

use energyfolio_core::db::{self, DbPool};

/// Creates a migrated SQLite pool in a temp directory.
///
/// The TempDir must be kept alive for the duration of the test.
pub fn create_test_pool(dir: &tempfile::TempDir) -> Arc<DbPool> {
    let db_path = dir
        .path()
        .join("test.db")
        .to_str()
        .expect("temp path is not valid UTF-8")
        .to_string();

    let db_path = db::init(&db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path, 2).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    pool
}
