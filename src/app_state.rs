//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    goal::{GoalTracker, SQLiteGoalStore},
    motivation::AlertGenerator,
    sale::SaleRepository,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,

    /// The sales and the feed of snapshots.
    pub sales: SaleRepository,

    /// The commission goal.
    pub goal_tracker: GoalTracker,

    /// Writes the motivational alerts.
    pub alert_generator: Arc<dyn AlertGenerator>,

    /// The name used to address the sales representative in alerts.
    pub representative_name: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database, load the sales into the
    /// repository and load the saved commission goal.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// A failure to load the sales is logged and leaves the dashboard empty.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the goal cannot be read.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        representative_name: &str,
        alert_generator: Arc<dyn AlertGenerator>,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        let sales = SaleRepository::new(connection.clone());
        if let Err(error) = sales.refresh() {
            tracing::error!("could not load sales: {error}");
        }

        let goal_tracker = GoalTracker::load(Arc::new(SQLiteGoalStore::new(connection)))?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            sales,
            goal_tracker,
            alert_generator,
            representative_name: representative_name.to_owned(),
        })
    }
}
