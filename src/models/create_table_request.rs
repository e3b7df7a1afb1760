use serde::Serialize;

use super::column::Column;

/// Body of `POST /tables`.
///
/// ```json
/// { "name": "users", "columns": [{ "name": "id", "dataType": "int" }] }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CreateTableRequest<'a> {
    pub name: &'a str,
    pub columns: &'a [Column],
}
