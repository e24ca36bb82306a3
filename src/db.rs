//! Database schema setup.

use rusqlite::Connection;

use crate::{goal::create_setting_table, sale::create_sale_table};

/// Create all the tables used by the app if they do not already exist.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = connection.unchecked_transaction()?;

    create_sale_table(&transaction)?;
    create_setting_table(&transaction)?;

    transaction.commit()
}
