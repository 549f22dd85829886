use thiserror::Error;

use crate::catalog::{gcvs_reader::ParseGcvsError, krakow_reader::ParseKrakowError};

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("No '{0}' parameter defined in query string")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' is not a number: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown search mode: {0}")]
    InvalidSearchMode(String),

    #[error("Unknown catalog kind: {0}")]
    InvalidCatalogKind(String),

    #[error("Invalid search parameter: {0}")]
    InvalidSearchParameter(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed catalog file: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("Error during the GCVS line parsing: {0}")]
    GcvsParse(#[from] ParseGcvsError),

    #[error("Error during the Krakow line parsing: {0}")]
    KrakowParse(#[from] ParseKrakowError),
}

impl PartialEq for PredictorError {
    fn eq(&self, other: &Self) -> bool {
        use PredictorError::*;
        match (self, other) {
            (MissingParameter(a), MissingParameter(b)) => a == b,
            (
                InvalidNumber {
                    name: na,
                    value: va,
                },
                InvalidNumber {
                    name: nb,
                    value: vb,
                },
            ) => na == nb && va == vb,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidSearchMode(a), InvalidSearchMode(b)) => a == b,
            (InvalidCatalogKind(a), InvalidCatalogKind(b)) => a == b,
            (InvalidSearchParameter(a), InvalidSearchParameter(b)) => a == b,
            (GcvsParse(a), GcvsParse(b)) => a == b,
            (KrakowParse(a), KrakowParse(b)) => a == b,

            // not comparable, same variant is enough
            (IoError(_), IoError(_)) => true,
            (CatalogFormat(_), CatalogFormat(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod predictor_errors_test {
    use super::*;

    #[test]
    fn test_line_errors_convert() {
        let err: PredictorError = ParseGcvsError::TooShortLine.into();
        assert_eq!(err, PredictorError::GcvsParse(ParseGcvsError::TooShortLine));
        assert_eq!(
            err.to_string(),
            "Error during the GCVS line parsing: The line is too short"
        );

        let err: PredictorError = ParseKrakowError::InvalidName("per 12".into()).into();
        assert_eq!(
            err.to_string(),
            "Error during the Krakow line parsing: Cannot match \"per 12\" to a star name"
        );
    }

    #[test]
    fn test_io_errors_compare_by_variant() {
        let a = PredictorError::from(std::io::Error::other("a"));
        let b = PredictorError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "b"));
        assert_eq!(a, b);
        assert_ne!(a, PredictorError::MissingParameter("longitude"));
        assert_eq!(
            PredictorError::MissingParameter("longitude").to_string(),
            "No 'longitude' parameter defined in query string"
        );
    }
}
