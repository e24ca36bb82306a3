use std::error::Error;
use std::path::PathBuf;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use commissioner::{
    Period, PeriodQuery, ProductFilter, Report, SaleRepository, initialize_db, local_today,
    report_filename, write_report,
};

/// Export the commission report for a month as a PDF file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The year of the report. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// The zero-based month of the report (0 = January). Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..12))]
    month: Option<u8>,

    /// Which sales to include: "all", "impressora" or "toner".
    #[arg(long, default_value = "all", value_parser = parse_product_filter)]
    product: ProductFilter,

    /// Where to write the PDF. Defaults to the report's standard file name.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// The canonical timezone used to decide the current month.
    #[arg(long, default_value = "America/Sao_Paulo")]
    timezone: String,
}

fn parse_product_filter(text: &str) -> Result<ProductFilter, String> {
    ProductFilter::ALL
        .into_iter()
        .find(|filter| filter.as_str() == text)
        .ok_or_else(|| format!("expected one of \"all\", \"impressora\" or \"toner\", got \"{text}\""))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path)?;
    initialize_db(&connection)?;

    let sales = SaleRepository::new(Arc::new(Mutex::new(connection)));
    sales.refresh()?;

    let today = local_today(&args.timezone)?;
    let period = Period::resolve(
        PeriodQuery {
            year: args.year,
            month: args.month,
            product: args.product,
        },
        today,
    );

    let report = match Report::build(&period.sales(&sales), &period) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(report_filename(&period)));
    write_report(&report, &output)?;

    println!("Saved {} to {output:#?}", report.title);

    Ok(())
}
