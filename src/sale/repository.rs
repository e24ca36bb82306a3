//! The sale repository: writes go to the database and every change publishes a
//! fresh snapshot of all sales to subscribers.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;
use time::Date;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::{
    Error,
    sale::{
        NewSale, SaleEntry, SaleId,
        db::{delete_sale, get_all_sale_documents, insert_sale, update_sale},
        query::{distinct_years, month_from_index, sales_in_month, sales_in_range},
    },
};

/// The complete, ordered set of sales at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Every sale, newest first.
    pub sales: Arc<[SaleEntry]>,
    /// Whether the first load from the database is still pending.
    pub is_loading: bool,
}

impl Snapshot {
    fn loading() -> Self {
        Self {
            sales: Arc::from([]),
            is_loading: true,
        }
    }

    fn loaded(sales: Vec<SaleEntry>) -> Self {
        Self {
            sales: sales.into(),
            is_loading: false,
        }
    }
}

/// A live view of the sales in a [SaleRepository].
///
/// Dropping the subscription, or calling [Subscription::unsubscribe], stops
/// delivery. Snapshots published faster than they are read are coalesced, so
/// a slow reader only sees the latest one.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<Snapshot>,
}

impl Subscription {
    /// The latest snapshot. Marks it as seen.
    pub fn current(&mut self) -> Snapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the repository has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.receiver.changed().await.ok()?;

        Some(self.current())
    }

    /// End the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Turn the subscription into a stream that yields the current snapshot
    /// followed by every subsequent change.
    pub fn into_stream(self) -> WatchStream<Snapshot> {
        WatchStream::new(self.receiver)
    }
}

/// Owns the sale table and a cached copy of its contents.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db_connection: Arc<Mutex<Connection>>,
    feed: Arc<watch::Sender<Snapshot>>,
}

impl SaleRepository {
    /// Create a repository over `db_connection`.
    ///
    /// The cache starts out empty and loading, call [SaleRepository::refresh]
    /// to fill it.
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        let (feed, _) = watch::channel(Snapshot::loading());

        Self {
            db_connection,
            feed: Arc::new(feed),
        }
    }

    /// Subscribe to snapshots of all sales.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.feed.subscribe(),
        }
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.feed.borrow().clone()
    }

    /// Reload every sale from the database and publish the result.
    ///
    /// Sales with a date or product type that cannot be read are logged and
    /// left out. If the database cannot be read at all, an empty snapshot is
    /// published and the error is returned. There is no retry.
    pub fn refresh(&self) -> Result<(), Error> {
        match self.load_sales() {
            Ok(sales) => {
                tracing::debug!("publishing snapshot with {} sales", sales.len());
                self.feed.send_replace(Snapshot::loaded(sales));
                Ok(())
            }
            Err(error) => {
                tracing::error!("could not load sales: {error}");
                self.feed.send_replace(Snapshot::loaded(Vec::new()));
                Err(error)
            }
        }
    }

    fn load_sales(&self) -> Result<Vec<SaleEntry>, Error> {
        let documents = {
            let connection = self
                .db_connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;

            get_all_sale_documents(&connection)?
        };

        let sales = documents
            .into_iter()
            .filter_map(|document| {
                let id = document.id.clone();

                SaleEntry::try_from(document)
                    .inspect_err(|error| tracing::warn!("skipping sale {id}: {error}"))
                    .ok()
            })
            .collect();

        Ok(sales)
    }

    /// Save a new sale and publish the updated snapshot.
    pub fn create(&self, sale: NewSale) -> Result<SaleEntry, Error> {
        let sale = self.with_connection(|connection| insert_sale(sale, connection))?;
        self.refresh_after_write();

        Ok(sale)
    }

    /// Replace every field of an existing sale and publish the updated snapshot.
    pub fn update(&self, sale: &SaleEntry) -> Result<(), Error> {
        self.with_connection(|connection| update_sale(sale, connection))?;
        self.refresh_after_write();

        Ok(())
    }

    /// Delete a sale and publish the updated snapshot.
    pub fn delete(&self, id: &SaleId) -> Result<(), Error> {
        self.with_connection(|connection| delete_sale(id, connection))?;
        self.refresh_after_write();

        Ok(())
    }

    /// The cached sale with `id`.
    pub fn get(&self, id: &SaleId) -> Option<SaleEntry> {
        self.feed
            .borrow()
            .sales
            .iter()
            .find(|sale| &sale.id == id)
            .cloned()
    }

    /// The cached sales in a month of a year, where `month_index` is zero-based
    /// (0 = January).
    ///
    /// A month index above 11 logs a warning and returns no sales.
    pub fn query_by_month(&self, year: i32, month_index: u8) -> Vec<SaleEntry> {
        match month_from_index(month_index) {
            Ok(month) => sales_in_month(&self.feed.borrow().sales, year, month),
            Err(error) => {
                tracing::warn!("{error}");
                Vec::new()
            }
        }
    }

    /// The cached sales dated within `range` (inclusive).
    pub fn query_by_range(&self, range: RangeInclusive<Date>) -> Vec<SaleEntry> {
        sales_in_range(&self.feed.borrow().sales, range)
    }

    /// The years that have at least one cached sale, newest first.
    pub fn distinct_years(&self) -> Vec<i32> {
        distinct_years(&self.feed.borrow().sales)
    }

    fn with_connection<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        operation(&connection)
    }

    // The write has already succeeded at this point, so a failed reload is
    // only logged. `refresh` publishes an empty snapshot in that case.
    fn refresh_after_write(&self) {
        let _ = self.refresh();
    }
}
