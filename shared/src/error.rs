//! Error body shared by server and client
//!
//! Every non-2xx response of the ticket API carries this shape:
//!
//! ```json
//! { "error": "Not found" }
//! ```

use serde::{Deserialize, Serialize};

/// API error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
