//! Database connection management.
//!
//! Opens the SQLite database in the platform application data directory and
//! brings the schema up to date before handing out the connection. Every
//! repository module (`sessions`, `sets`, `plans`) goes through [`Db::new`],
//! so schema migrations run exactly once per process on first access.

use crate::db::migrations::MigrationManager;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

/// Database file name within the application data directory.
pub const DB_FILE_NAME: &str = "ironlog.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the application database and applies any pending migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let mut conn = Connection::open(db_file_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        MigrationManager::new().run_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
