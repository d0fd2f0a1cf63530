use shoply_core::catalog::{ApplyOutcome, CatalogStore};
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::CatalogSource;
use crate::errors::CatalogError;

/// Orchestrates one catalog load: issue a token, fetch, apply under the
/// latest-wins guard. Replaces the catalog wholesale on success; on failure
/// the store keeps its prior products and surfaces a failed status.
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadReport {
    Applied { count: usize },
    /// The fetch completed but a newer load had been started meanwhile.
    StaleDiscarded,
}

impl CatalogLoader {
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self { source }
    }

    pub fn origin(&self) -> String {
        self.source.origin()
    }

    pub async fn load(&self, store: &mut CatalogStore) -> Result<LoadReport, CatalogError> {
        let correlation_id = Uuid::new_v4().to_string();
        let token = store.begin_load();

        info!(
            event_name = "catalog.load.started",
            correlation_id = %correlation_id,
            origin = %self.source.origin(),
            "requesting product catalog"
        );

        match self.source.fetch_products().await {
            Ok(products) => {
                let count = products.len();
                match store.apply_products(token, products) {
                    ApplyOutcome::Applied => {
                        info!(
                            event_name = "catalog.load.applied",
                            correlation_id = %correlation_id,
                            product_count = count,
                            "catalog replaced"
                        );
                        Ok(LoadReport::Applied { count })
                    }
                    ApplyOutcome::StaleDiscarded => {
                        warn!(
                            event_name = "catalog.load.stale_discarded",
                            correlation_id = %correlation_id,
                            product_count = count,
                            "discarding result of a superseded load"
                        );
                        Ok(LoadReport::StaleDiscarded)
                    }
                }
            }
            Err(error) => {
                let stale = store.apply_failure(token, error.to_string())
                    == ApplyOutcome::StaleDiscarded;
                warn!(
                    event_name = "catalog.load.failed",
                    correlation_id = %correlation_id,
                    stale,
                    error = %error,
                    "catalog load failed"
                );
                Err(error)
            }
        }
    }
}
