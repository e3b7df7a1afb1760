/// Successful result of [`crate::TableClient::create_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTableOutcome {
    /// The server created the table in response to this call
    Created,

    /// The table was already there, either seen by the probe or reported by
    /// the server when it rejected the creation request
    AlreadyExists,
}

impl CreateTableOutcome {
    pub fn created(&self) -> bool {
        matches!(self, CreateTableOutcome::Created)
    }
}
