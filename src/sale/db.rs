//! Database operations for sales.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    sale::{NewSale, SaleDocument, SaleEntry, SaleId},
};

/// Create the sale table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_sale_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS sale (
            id TEXT PRIMARY KEY NOT NULL,
            date TEXT NOT NULL,
            client_name TEXT NOT NULL,
            product_type TEXT NOT NULL,
            sale_value REAL NOT NULL,
            commission_rate REAL NOT NULL,
            commission_value REAL NOT NULL,
            printer_model TEXT,
            service_performed TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_sale_date ON sale(date);",
    )?;

    Ok(())
}

/// Save a new sale to the database. The database assigns the sale's ID.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an unexpected SQL error.
pub fn insert_sale(sale: NewSale, connection: &Connection) -> Result<SaleEntry, Error> {
    let id: String = connection
        .prepare(
            "INSERT INTO sale (id, date, client_name, product_type, sale_value, \
            commission_rate, commission_value, printer_model, service_performed)
            VALUES (lower(hex(randomblob(16))), ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id",
        )?
        .query_row(
            (
                sale.date(),
                sale.client_name(),
                sale.product().product_type().as_str(),
                sale.sale_value(),
                sale.commission_rate(),
                sale.commission_value(),
                sale.product().printer_model(),
                sale.product().service_performed(),
            ),
            |row| row.get(0),
        )?;

    Ok(sale.with_id(SaleId::new(id)))
}

/// Replace every field of the sale with `sale.id`.
///
/// # Errors
/// Returns an [Error::UpdateMissingSale] if no sale has the ID, or an
/// [Error::SqlError] if there is an unexpected SQL error.
pub fn update_sale(sale: &SaleEntry, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE sale SET
            date = ?1,
            client_name = ?2,
            product_type = ?3,
            sale_value = ?4,
            commission_rate = ?5,
            commission_value = ?6,
            printer_model = ?7,
            service_performed = ?8
        WHERE id = ?9",
        (
            sale.date,
            &sale.client_name,
            sale.product_type().as_str(),
            sale.sale_value,
            sale.commission_rate,
            sale.commission_value,
            sale.product.printer_model(),
            sale.product.service_performed(),
            sale.id.as_str(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingSale);
    }

    Ok(())
}

/// Delete the sale with `id`.
///
/// # Errors
/// Returns an [Error::DeleteMissingSale] if no sale has the ID, or an
/// [Error::SqlError] if there is an unexpected SQL error.
pub fn delete_sale(id: &SaleId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM sale WHERE id = ?1", [id.as_str()])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingSale);
    }

    Ok(())
}

/// Get every sale document, newest first.
///
/// Documents are returned as stored, so dates and product types have not
/// been validated yet.
pub fn get_all_sale_documents(connection: &Connection) -> Result<Vec<SaleDocument>, Error> {
    connection
        .prepare(
            "SELECT id, date, client_name, product_type, sale_value, commission_rate, \
            commission_value, printer_model, service_performed
            FROM sale
            ORDER BY date DESC, client_name ASC, id ASC",
        )?
        .query_map([], map_sale_document_row)?
        .map(|maybe_document| maybe_document.map_err(Error::from))
        .collect()
}

fn map_sale_document_row(row: &Row) -> Result<SaleDocument, rusqlite::Error> {
    Ok(SaleDocument {
        id: row.get(0)?,
        date: row.get(1)?,
        client_name: row.get(2)?,
        product_type: row.get(3)?,
        sale_value: row.get(4)?,
        commission_rate: row.get(5)?,
        commission_value: row.get(6)?,
        printer_model: row.get(7)?,
        service_performed: row.get(8)?,
    })
}
