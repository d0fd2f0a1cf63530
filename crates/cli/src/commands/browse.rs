use shoply_catalog::{CatalogLoader, HttpCatalogSource, LoadReport};
use shoply_core::config::{AppConfig, LoadOptions};
use shoply_core::CatalogStore;

use crate::commands::CommandResult;
use crate::session::render_product;

/// One-shot catalog fetch and listing, for poking at the feed without
/// opening a session.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "browse",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "browse",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let source = match HttpCatalogSource::from_config(&config.catalog) {
        Ok(source) => source,
        Err(error) => {
            return CommandResult::failure(
                "browse",
                "catalog_client",
                format!("failed to build catalog client: {error}"),
                4,
            );
        }
    };

    let loader = CatalogLoader::new(Box::new(source));
    let mut store = CatalogStore::new();

    match runtime.block_on(loader.load(&mut store)) {
        Ok(LoadReport::Applied { count }) => {
            let mut lines = vec![format!("{count} products from {}", config.catalog.endpoint)];
            lines.extend(store.products().iter().map(render_product));
            CommandResult::ok(lines.join("\n"))
        }
        // A one-shot load has no competing request to lose against; treat it
        // the same as an applied result with whatever the store holds.
        Ok(LoadReport::StaleDiscarded) => {
            CommandResult::ok(format!("{} products", store.products().len()))
        }
        Err(error) => CommandResult::failure(
            "browse",
            "catalog_fetch",
            format!("catalog fetch failed: {error}"),
            5,
        ),
    }
}
