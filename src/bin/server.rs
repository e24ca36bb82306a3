use std::{
    env,
    error::Error,
    fs::OpenOptions,
    net::SocketAddr,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use axum::middleware;
#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use commissioner::{
    AppState, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_REPRESENTATIVE_NAME,
    GeminiAlertGenerator, build_router, get_local_offset, graceful_shutdown,
};

#[cfg(debug_assertions)]
use commissioner::logging_middleware;

/// The environment variable that holds the Gemini API key.
const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// The web server for the commission dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone used to decide the current month, e.g. "America/Sao_Paulo".
    #[arg(long, default_value = "America/Sao_Paulo")]
    timezone: String,

    /// The name used to address the sales representative in motivational alerts.
    #[arg(long, default_value = DEFAULT_REPRESENTATIVE_NAME)]
    representative_name: String,

    /// The Gemini model that writes motivational alerts.
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// The base URL of the Gemini API.
    #[arg(long, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    if get_local_offset(&args.timezone).is_none() {
        return Err(format!("invalid timezone \"{}\"", args.timezone).into());
    }

    let api_key = env::var(GEMINI_API_KEY_VAR).ok();
    if api_key.is_none() {
        tracing::warn!(
            "The environment variable '{GEMINI_API_KEY_VAR}' is not set, motivational alerts will fail."
        );
    }
    let alert_generator =
        GeminiAlertGenerator::new(&args.gemini_base_url, &args.gemini_model, api_key);

    let connection = Connection::open(&args.db_path)?;
    let state = AppState::new(
        connection,
        &args.timezone,
        &args.representative_name,
        Arc::new(alert_generator),
    )?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router
        .layer(middleware::from_fn(logging_middleware))
        .layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on http://{}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .try_init()?;

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are handled.
        .on_failure(());

    router.layer(tracing_layer)
}
