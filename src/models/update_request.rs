use serde::Serialize;

use super::condition_set::ConditionSet;
use super::row::Row;

/// Body of `PUT /tables/{table}/rows`.
///
/// `updates` is applied to every row matching `where`.
///
/// ```json
/// { "where": { "name": "John Doe" }, "updates": { "active": false } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest<'a> {
    #[serde(rename = "where")]
    pub conditions: &'a ConditionSet,
    pub updates: &'a Row,
}
