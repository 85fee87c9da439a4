//! Error types for reference dataset loading.

use std::io;

use thiserror::Error;

/// Errors that can occur while loading a reference dataset.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The dataset resource could not be opened.
    #[error("Failed to open {dataset}: {source}")]
    Open {
        dataset: &'static str,
        #[source]
        source: io::Error,
    },

    /// The aircraft type catalog is not valid JSON of the expected shape.
    #[error("Failed to parse aircraft type catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    /// The airline registry could not be read as CSV.
    #[error("Failed to read airline registry: {0}")]
    Registry(#[from] csv::Error),
}

impl ReferenceError {
    pub(crate) fn open(dataset: &'static str, source: io::Error) -> Self {
        ReferenceError::Open { dataset, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_display() {
        let err = ReferenceError::open(
            "airlines.csv",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "Failed to open airlines.csv: no such file");
    }

    #[test]
    fn test_catalog_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: ReferenceError = json_err.into();
        assert!(matches!(err, ReferenceError::Catalog(_)));
        assert!(err.to_string().starts_with("Failed to parse aircraft type catalog"));
    }
}
