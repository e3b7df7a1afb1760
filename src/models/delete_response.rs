use serde::{Deserialize, Serialize};

/// Success body of `DELETE /tables/{table}/rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Number of rows removed
    pub deleted: u64,
}
