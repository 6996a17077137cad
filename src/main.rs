use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use storefront::application::catalog::Catalog;
use storefront::application::storefront::Storefront;
use storefront::config::Config;
use storefront::domain::ports::{PostalServiceBox, StoreBackendBox};
use storefront::infrastructure::http::{HttpBackend, VIACEP_URL, ViaCepClient};
use storefront::infrastructure::in_memory::{
    InMemoryBackend, InMemoryPostalService, seed_variations,
};
use storefront::interfaces::csv::action_reader::ActionReader;
use storefront::interfaces::csv::cart_writer::CartWriter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storefront=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = Config::parse();
    let timeout = config.timeout();

    let (backend, catalog): (StoreBackendBox, Catalog) = if let Some(api_url) = &config.api_url {
        (
            Box::new(HttpBackend::new(api_url, timeout).into_diagnostic()?),
            Catalog::new(),
        )
    } else {
        warn!("No --api-url given. Falling back to the in-memory demo backend.");
        (
            Box::new(InMemoryBackend::seeded()),
            Catalog::with_items(Vec::new(), seed_variations()),
        )
    };

    let postal_url = config
        .postal_url
        .as_deref()
        .or(config.api_url.as_ref().map(|_| VIACEP_URL));
    let postal: PostalServiceBox = match postal_url {
        Some(url) => Box::new(ViaCepClient::new(url, timeout).into_diagnostic()?),
        None => Box::new(InMemoryPostalService::seeded()),
    };

    let mut store = Storefront::new(backend, postal)
        .with_catalog(catalog)
        .with_notice_ttl(config.notice_ttl());
    store.load_catalog().await.into_diagnostic()?;

    // Replay the script; a failed row or action never stops the run.
    let file = File::open(&config.script).into_diagnostic()?;
    for action in ActionReader::new(file).actions() {
        match action {
            Ok(action) => {
                // The session already logs and notifies the failure.
                let _ = action.apply(&mut store).await;
            }
            Err(e) => {
                warn!("Error reading action: {e}");
            }
        }
    }

    info!(lines = store.cart().len(), "script finished");
    let stdout = io::stdout();
    let mut writer = CartWriter::new(stdout.lock());
    writer
        .write_summary(store.cart().lines(), &store.totals())
        .into_diagnostic()?;

    Ok(())
}
