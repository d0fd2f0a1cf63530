use chrono::{DateTime, Utc};

use crate::domain::product::{Product, ProductId};

/// Monotonically increasing ticket for one catalog load attempt. Only the
/// most recently issued token may mutate the store, so a request started
/// first but completing last can never clobber a newer result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogStatus {
    /// No load has been attempted yet.
    Empty,
    /// A load is in flight. Previously loaded products stay visible.
    Loading,
    Ready { count: usize, loaded_at: DateTime<Utc> },
    /// The most recent load failed. The prior product list is retained.
    Failed { message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The result belonged to a superseded load and was dropped unseen.
    StaleDiscarded,
}

/// Owns the in-memory catalog. Loads replace the product list wholesale;
/// there is no diffing and no incremental update.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    status: Option<CatalogStatus>,
    issued: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the token for a new load attempt, superseding any load still in
    /// flight.
    pub fn begin_load(&mut self) -> LoadToken {
        self.issued += 1;
        self.status = Some(CatalogStatus::Loading);
        LoadToken(self.issued)
    }

    /// Replace the catalog with a completed load, unless a newer load has
    /// been started since `token` was issued.
    pub fn apply_products(&mut self, token: LoadToken, products: Vec<Product>) -> ApplyOutcome {
        if !self.is_latest(token) {
            return ApplyOutcome::StaleDiscarded;
        }

        let count = products.len();
        self.products = products;
        self.status = Some(CatalogStatus::Ready { count, loaded_at: Utc::now() });
        ApplyOutcome::Applied
    }

    /// Record a failed load. The prior product list stays in place so the
    /// view keeps whatever was last successfully loaded.
    pub fn apply_failure(&mut self, token: LoadToken, message: impl Into<String>) -> ApplyOutcome {
        if !self.is_latest(token) {
            return ApplyOutcome::StaleDiscarded;
        }

        self.status = Some(CatalogStatus::Failed { message: message.into() });
        ApplyOutcome::Applied
    }

    fn is_latest(&self, token: LoadToken) -> bool {
        token == LoadToken(self.issued)
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn status(&self) -> CatalogStatus {
        self.status.clone().unwrap_or(CatalogStatus::Empty)
    }

    pub fn is_loaded(&self) -> bool {
        !self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};

    use super::{ApplyOutcome, CatalogStatus, CatalogStore};

    fn products(ids: &[u64]) -> Vec<Product> {
        ids.iter()
            .map(|id| Product {
                id: ProductId(*id),
                title: format!("product-{id}"),
                price: Decimal::from(*id),
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn fresh_store_reports_empty_status() {
        let store = CatalogStore::new();
        assert_eq!(store.status(), CatalogStatus::Empty);
        assert!(store.products().is_empty());
    }

    #[test]
    fn successful_load_replaces_catalog_wholesale() {
        let mut store = CatalogStore::new();

        let token = store.begin_load();
        store.apply_products(token, products(&[1, 2, 3]));

        let token = store.begin_load();
        store.apply_products(token, products(&[9]));

        assert_eq!(store.products().len(), 1);
        assert!(store.find(ProductId(9)).is_some());
        assert!(store.find(ProductId(1)).is_none(), "old catalog must not survive a reload");
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut store = CatalogStore::new();

        let first = store.begin_load();
        let second = store.begin_load();

        assert_eq!(store.apply_products(second, products(&[2])), ApplyOutcome::Applied);
        assert_eq!(
            store.apply_products(first, products(&[1])),
            ApplyOutcome::StaleDiscarded,
            "a load started first but finishing last must not win"
        );

        assert!(store.find(ProductId(2)).is_some());
        assert!(store.find(ProductId(1)).is_none());
    }

    #[test]
    fn stale_failure_does_not_disturb_newer_result() {
        let mut store = CatalogStore::new();

        let first = store.begin_load();
        let second = store.begin_load();
        store.apply_products(second, products(&[5]));

        assert_eq!(store.apply_failure(first, "timed out"), ApplyOutcome::StaleDiscarded);
        assert!(
            matches!(store.status(), CatalogStatus::Ready { count: 1, .. }),
            "stale failure must not overwrite a newer success"
        );
    }

    #[test]
    fn failed_load_surfaces_error_but_keeps_prior_products() {
        let mut store = CatalogStore::new();

        let token = store.begin_load();
        store.apply_products(token, products(&[1, 2]));

        let token = store.begin_load();
        store.apply_failure(token, "connection refused");

        assert_eq!(
            store.status(),
            CatalogStatus::Failed { message: "connection refused".to_string() }
        );
        assert_eq!(store.products().len(), 2, "a failed reload keeps the last good catalog");
    }
}
