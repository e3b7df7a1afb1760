use serde::{Deserialize, Serialize};

use super::data_type::DataType;

/// One field of a table schema.
///
/// # Example (JSON representation)
///
/// ```json
/// { "name": "active", "dataType": "bool" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name, unique within its table (enforced by the server)
    pub name: String,

    /// Declared type
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}
