//! Wire-format error body.

use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Body served for requests that match no route.
    pub fn unknown_endpoint() -> Self {
        Self::new("unknown endpoint")
    }

    /// Generic body for unexpected failures; the detail stays in the logs.
    pub fn internal_error() -> Self {
        Self::new("internal server error")
    }
}
