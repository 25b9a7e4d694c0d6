//! Products Grid Demo
//!
//! Wires the full data layer against a json-server-style backend: settings,
//! a REST provider, table state, an initial warm-up fetch, a page change,
//! and neighbor-page prefetching.
//!
//! Point it at a backend with `GRIDSOURCE_API_URL` (default
//! `http://localhost:3000`), e.g. `npx json-server db.json`.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use gridsource::config::Settings;
use gridsource::provider::{DataProvider, RestProvider};
use gridsource::runtime;
use gridsource::state::TableState;

#[derive(Clone, Debug, Deserialize)]
struct Product {
    id: u32,
    name: String,
    price: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = Path::new("gridsource.toml");
    let mut settings = Settings::load(config_path)?;
    if settings.endpoint.is_empty() {
        settings.endpoint = "products".into();
        settings.global_filter_field = Some("q".into());
        settings.save(config_path)?;
        tracing::info!(path = %config_path.display(), "wrote default settings");
    }

    let provider: RestProvider<Product> = RestProvider::new(&settings);
    let mut table: TableState<Product> = TableState::from_settings(&settings);

    // Warm the first page before the grid would mount.
    let query = table.begin_fetch();
    match runtime::block_on(provider.prefetch_initial_data(query.clone())) {
        Ok(response) => {
            table.apply(
                &query,
                provider.rows(&response),
                provider.row_count(&response),
                provider.page_count(&response),
            );
            println!(
                "page {}/{} | {} products total",
                table.page_index() + 1,
                table.page_count(),
                table.row_count()
            );
            for product in table.rows() {
                println!("  #{:<4} {:<30} {:>8.2}", product.id, product.name, product.price);
            }
            provider.prefetch_adjacent_pages(&query);
        }
        Err(error) => {
            table.set_error(error.to_string());
            eprintln!("initial fetch failed: {error}");
            return Ok(());
        }
    }

    // Page forward; the prefetcher has usually warmed this one already.
    table.next_page();
    let query = table.begin_fetch();
    match runtime::block_on(provider.fetch_data(&query)) {
        Ok(response) => {
            table.apply(
                &query,
                provider.rows(&response),
                provider.row_count(&response),
                provider.page_count(&response),
            );
            println!(
                "page {}/{} | {} rows on this page",
                table.page_index() + 1,
                table.page_count(),
                table.rows().len()
            );
            provider.prefetch_adjacent_pages(&query);
        }
        Err(error) => {
            table.set_error(error.to_string());
            eprintln!("page fetch failed: {error}");
        }
    }

    // Let the detached prefetch tasks land, then show what got warmed.
    std::thread::sleep(std::time::Duration::from_millis(300));
    println!("{} queries cached", provider.cache().len());

    Ok(())
}
