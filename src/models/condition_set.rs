use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::row::Row;
use super::value::Value;

/// Equality conditions used to filter (select, delete) or target (update) rows.
///
/// By the server's convention the conditions are AND-ed together, and an
/// empty set matches every row. Serialized as a flat JSON object; for reads
/// it travels URL-encoded in the `where` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSet(BTreeMap<String, Value>);

impl ConditionSet {
    /// The empty set, matching all rows.
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `column` to equal `value`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Evaluate the conditions against a row locally.
    ///
    /// A row missing a constrained column does not match. The server stays
    /// the authority for what a request actually touches.
    pub fn matches(&self, row: &Row) -> bool {
        self.0
            .iter()
            .all(|(column, expected)| row.get(column) == Some(expected))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for ConditionSet {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
