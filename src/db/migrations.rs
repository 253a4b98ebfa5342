//! Database schema migration management.
//!
//! Tracks the schema version in a `migrations` table and applies pending
//! migrations in order inside a single transaction. Migrations are
//! forward-only: each one makes a small additive change and records itself
//! on success, so re-running on an up-to-date database is a no-op.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema migration.
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub up: fn(&Transaction) -> Result<()>,
}

/// Registry and runner for all schema migrations.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = MigrationManager { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: base tables and indices.
        self.add_migration(1, "create_tables_and_indices", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS exercises (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE,
                    target_muscle TEXT NOT NULL,
                    category TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS workout_plans (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    description TEXT,
                    is_active INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS plan_days (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    plan_id INTEGER NOT NULL,
                    day_name TEXT NOT NULL,
                    day_order INTEGER NOT NULL,
                    notes TEXT,
                    FOREIGN KEY (plan_id) REFERENCES workout_plans(id) ON DELETE CASCADE
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS plan_exercises (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    day_id INTEGER NOT NULL,
                    exercise_id INTEGER NOT NULL,
                    exercise_order INTEGER NOT NULL,
                    target_sets INTEGER NOT NULL DEFAULT 3,
                    target_reps TEXT NOT NULL DEFAULT '8-12',
                    notes TEXT,
                    FOREIGN KEY (day_id) REFERENCES plan_days(id) ON DELETE CASCADE,
                    FOREIGN KEY (exercise_id) REFERENCES exercises(id)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS workout_sessions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    plan_id INTEGER,
                    day_id INTEGER,
                    check_in_time TIMESTAMP NOT NULL,
                    check_out_time TIMESTAMP,
                    total_duration INTEGER,
                    session_date DATE NOT NULL,
                    notes TEXT,
                    is_completed INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY (plan_id) REFERENCES workout_plans(id),
                    FOREIGN KEY (day_id) REFERENCES plan_days(id)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS exercise_performance (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    session_id INTEGER NOT NULL,
                    exercise_id INTEGER NOT NULL,
                    exercise_name TEXT NOT NULL,
                    set_number INTEGER NOT NULL,
                    reps INTEGER NOT NULL,
                    weight REAL,
                    set_duration INTEGER,
                    rest_duration INTEGER,
                    completed_at TIMESTAMP,
                    notes TEXT,
                    FOREIGN KEY (session_id) REFERENCES workout_sessions(id) ON DELETE CASCADE,
                    FOREIGN KEY (exercise_id) REFERENCES exercises(id)
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_sessions_date ON workout_sessions(session_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_performance_session ON exercise_performance(session_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_plan_exercises_day ON plan_exercises(day_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_plan_days_plan ON plan_days(plan_id)", [])?;

            Ok(())
        });

        // Version 2: live timer-state columns on workout_sessions.
        // The JSON blob carries paused accumulators and running-timer start
        // timestamps; the duration columns hold the last reconciled totals.
        self.add_migration(2, "add_session_timer_state", |tx| {
            tx.execute("ALTER TABLE workout_sessions ADD COLUMN active_timer_state TEXT", [])?;
            tx.execute("ALTER TABLE workout_sessions ADD COLUMN current_exercise_id INTEGER", [])?;
            tx.execute("ALTER TABLE workout_sessions ADD COLUMN total_set_duration INTEGER NOT NULL DEFAULT 0", [])?;
            tx.execute("ALTER TABLE workout_sessions ADD COLUMN total_rest_duration INTEGER NOT NULL DEFAULT 0", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies all migrations newer than the recorded schema version.
    ///
    /// All pending migrations run in one transaction: either the database
    /// reaches the latest version or it stays where it was.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}
