use serde::{Deserialize, Serialize};

/// Success body of `PUT /tables/{table}/rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// Number of rows the update was applied to
    pub updated: u64,
}
