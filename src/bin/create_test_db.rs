use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use commissioner::{NewSale, Product, SaleRepository, initialize_db};

/// A utility for creating a test database for the commission dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of sales to create, counting back from today.
    #[arg(long, default_value_t = 400)]
    days: i64,
}

const CLIENTS: [&str; 8] = [
    "João Silva",
    "Maria Souza",
    "Papelaria Central",
    "Escritório Lima & Filhos",
    "Clínica Bem Estar",
    "Ana Pereira",
    "Colégio São José",
    "Pedro Almeida",
];

const PRINTERS: [(&str, &str); 5] = [
    ("HP LaserJet M404dn", "Venda"),
    ("Brother HL-L2350DW", "Venda e instalação"),
    ("Epson EcoTank L3250", "Venda"),
    ("Samsung M2020", "Troca de cilindro"),
    ("HP DeskJet 2774", "Manutenção preventiva"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let sales = SaleRepository::new(Arc::new(Mutex::new(conn)));
    let today = OffsetDateTime::now_utc().date();

    println!("Creating test sales...");
    let mut count = 0;
    for day in 0..args.days.max(0) {
        let date = today - Duration::days(day);

        for sale in sales_for_day(date, day as usize) {
            sales.create(sale)?;
            count += 1;
        }
    }

    println!("Created {count} sales. Success!");

    Ok(())
}

/// Every third day has a toner refill and every fifth day has a printer sale,
/// with the client and amounts cycling through fixed lists.
fn sales_for_day(date: Date, day: usize) -> Vec<NewSale> {
    let client = CLIENTS[day % CLIENTS.len()];
    let mut sales = Vec::new();

    if day % 3 == 0 {
        let value = 60.0 + (day % 7) as f64 * 15.0;

        if let Ok(sale) = NewSale::new(date, client, Product::TonerRefill, value, 10.0) {
            sales.push(sale);
        }
    }

    if day % 5 == 0 {
        let (printer_model, service_performed) = PRINTERS[day % PRINTERS.len()];
        let value = 450.0 + (day % 11) as f64 * 85.0;
        let product = Product::PrinterSale {
            printer_model: printer_model.to_owned(),
            service_performed: service_performed.to_owned(),
        };

        if let Ok(sale) = NewSale::new(date, client, product, value, 5.0) {
            sales.push(sale);
        }
    }

    sales
}
