use shoply_core::errors::ApplicationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog endpoint returned status {status}")]
    Status { status: u16 },
    #[error("catalog response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("catalog record {id} is invalid: {reason}")]
    InvalidRecord { id: u64, reason: String },
}

impl From<CatalogError> for ApplicationError {
    fn from(value: CatalogError) -> Self {
        ApplicationError::Catalog(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use shoply_core::errors::ApplicationError;

    use super::CatalogError;

    #[test]
    fn catalog_errors_map_into_the_application_taxonomy() {
        let error = CatalogError::Status { status: 503 };
        let mapped = ApplicationError::from(error);

        assert!(matches!(
            mapped,
            ApplicationError::Catalog(ref message) if message.contains("503")
        ));
    }
}
