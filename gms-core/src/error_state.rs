//! Stored validation message attached to a record

use std::fmt;

use serde::{Deserialize, Serialize};

/// Holds the last validation message; an empty message means "clear"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    message: String,
}

impl ErrorState {
    /// Create a clear error state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error state seeded with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Replace the stored message; an empty message clears the state
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Drop any stored message
    pub fn clear(&mut self) {
        self.message.clear();
    }

    pub fn is_clear(&self) -> bool {
        self.message.is_empty()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
