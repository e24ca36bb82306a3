//! Persistence of the commission goal.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, goal::CommissionGoal};

/// The setting key the commission goal is stored under.
pub const GOAL_KEY: &str = "commissionGoal";

/// Loads and saves the commission goal.
pub trait GoalStore: Send + Sync + std::fmt::Debug {
    /// Get the saved goal, or `None` if no goal has been saved.
    fn load(&self) -> Result<Option<CommissionGoal>, Error>;

    /// Save `goal`, or remove the saved goal if `goal` is `None`.
    fn save(&self, goal: Option<CommissionGoal>) -> Result<(), Error>;
}

/// Create the key/value setting table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_setting_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS setting (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Saves the commission goal as a string in the SQLite setting table.
#[derive(Debug, Clone)]
pub struct SQLiteGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGoalStore {
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl GoalStore for SQLiteGoalStore {
    /// A stored value that cannot be parsed is logged and treated as no goal.
    fn load(&self) -> Result<Option<CommissionGoal>, Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let stored: Option<String> = connection
            .query_row(
                "SELECT value FROM setting WHERE key = ?1",
                [GOAL_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(stored) = stored else {
            return Ok(None);
        };

        match stored.parse() {
            Ok(goal) => Ok(Some(goal)),
            Err(error) => {
                tracing::warn!("ignoring stored commission goal {stored:?}: {error}");
                Ok(None)
            }
        }
    }

    fn save(&self, goal: Option<CommissionGoal>) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        match goal {
            Some(goal) => connection.execute(
                "INSERT INTO setting (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                (GOAL_KEY, goal.to_string()),
            )?,
            None => connection.execute("DELETE FROM setting WHERE key = ?1", [GOAL_KEY])?,
        };

        Ok(())
    }
}
