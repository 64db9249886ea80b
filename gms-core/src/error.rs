//! Core error types for GMS domain logic
//!
//! `CoreError` covers failures a caller has to handle (malformed records,
//! duplicate SKUs, I/O on caller-supplied streams). `DateError` and
//! `ProductError` are validation outcomes: their `Display` text is what ends
//! up in a record's `ErrorState`.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Product '{0}' not found")]
    ProductNotFound(String),

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Create a parse error with a message
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error with source
    pub fn parse_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::io("Stream operation failed", err)
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Why a date was rejected.
///
/// Variants are checked in declaration order, so a date with both a bad year
/// and a bad month reports the year.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid Date Entry")]
    StreamFailure,

    #[error("Invalid Year in Date Entry")]
    YearOutOfRange,

    #[error("Invalid Month in Date Entry")]
    MonthOutOfRange,

    #[error("Invalid Day in Date Entry")]
    DayOutOfRange,
}

impl DateError {
    /// Numeric error code; `0` is reserved for "no error".
    pub fn code(self) -> u8 {
        match self {
            Self::StreamFailure => 1,
            Self::YearOutOfRange => 2,
            Self::MonthOutOfRange => 3,
            Self::DayOutOfRange => 4,
        }
    }
}

/// Field-level rejection raised while reading a product interactively.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductError {
    #[error("Only (Y)es or (N)o are acceptable")]
    TaxedCharInvalid,

    #[error("Invalid Price Entry")]
    PriceInvalid,

    #[error("Invalid Quantity Entry")]
    QuantityInvalid,

    #[error("Invalid Quantity Needed Entry")]
    QuantityNeededInvalid,

    #[error("Sku, Name and Unit may not contain ','")]
    FieldSeparator,

    #[error("Quantity on hand out of range")]
    QuantityOverflow,

    #[error(transparent)]
    DateInvalid(#[from] DateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_codes() {
        assert_eq!(DateError::StreamFailure.code(), 1);
        assert_eq!(DateError::YearOutOfRange.code(), 2);
        assert_eq!(DateError::MonthOutOfRange.code(), 3);
        assert_eq!(DateError::DayOutOfRange.code(), 4);
    }

    #[test]
    fn test_product_error_wraps_date_message() {
        let err = ProductError::from(DateError::MonthOutOfRange);
        assert_eq!(err.to_string(), "Invalid Month in Date Entry");
        assert_eq!(
            ProductError::TaxedCharInvalid.to_string(),
            "Only (Y)es or (N)o are acceptable"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = CoreError::validation("sku", "already exists");
        assert_eq!(err.to_string(), "Validation error: sku - already exists");
    }
}
