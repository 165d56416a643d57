//! Error type for the I/O edges of the crate (CSV tables, code parsing)
//!
//! The numeric engines never fail; only loading configuration does.

use thiserror::Error;

/// Errors raised while loading tax tables or scenario batches
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown account type: {0}")]
    UnknownAccountType(String),

    #[error("unknown contribution frequency: {0}")]
    UnknownFrequency(String),

    #[error("tax rule table contains no years")]
    EmptyTaxTable,

    #[error("invalid tax rule for {year}: {reason}")]
    InvalidTaxRule { year: i32, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
