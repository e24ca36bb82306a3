use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    motivation::{AlertGenerator, MotivationalAlertInput, MotivationalAlertOutput},
    sale::{NewSale, Product, SaleEntry},
};

/// An [AlertGenerator] that answers with a canned reply and counts its calls.
#[derive(Debug, Default)]
pub(crate) struct FakeAlertGenerator {
    reply: Option<(String, bool)>,
    calls: AtomicUsize,
}

impl FakeAlertGenerator {
    pub(crate) fn replying(message: &str, is_relevant: bool) -> Self {
        Self {
            reply: Some((message.to_owned(), is_relevant)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertGenerator for FakeAlertGenerator {
    async fn generate(
        &self,
        input: &MotivationalAlertInput,
    ) -> Result<MotivationalAlertOutput, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        input.validate()?;

        match &self.reply {
            Some((message, is_relevant)) => Ok(MotivationalAlertOutput {
                alert_message: message.clone(),
                is_relevant: *is_relevant,
            }),
            None => Err(Error::GenerationFailed("fake generator failure".to_owned())),
        }
    }
}

/// An [AppState] over an in-memory database that uses `generator` for alerts.
#[track_caller]
pub(crate) fn get_test_app_state_with(generator: Arc<dyn AlertGenerator>) -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, "Etc/UTC", "Ana", generator).expect("Could not create app state")
}

#[track_caller]
pub(crate) fn get_test_app_state() -> AppState {
    get_test_app_state_with(Arc::new(FakeAlertGenerator::failing()))
}

#[track_caller]
pub(crate) fn create_test_sale(
    state: &AppState,
    date: Date,
    client_name: &str,
    product: Product,
    sale_value: f64,
    commission_rate: f64,
) -> SaleEntry {
    let sale = NewSale::new(date, client_name, product, sale_value, commission_rate)
        .expect("Could not create sale");

    state.sales.create(sale).expect("Could not save sale")
}

pub(crate) fn printer(model: &str, service: &str) -> Product {
    Product::PrinterSale {
        printer_model: model.to_owned(),
        service_performed: service.to_owned(),
    }
}
