use serde::{Deserialize, Serialize};

/// Declared type of a table column.
///
/// Serialized in lowercase, the form the server validates against.
///
/// ```json
/// "string" | "int" | "bool" | "float" | "timestamp"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 string
    String,
    /// Whole number
    Int,
    /// Boolean
    Bool,
    /// Floating point number (integers are accepted too)
    Float,
    /// Point in time
    Timestamp,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Int => "int",
            DataType::Bool => "bool",
            DataType::Float => "float",
            DataType::Timestamp => "timestamp",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
