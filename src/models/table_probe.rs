use crate::error::Failure;

/// Result of asking the server whether a table exists.
///
/// The probe is a `select` with no conditions. Transport failures are kept
/// apart from "not there" so an unreachable server is never mistaken for a
/// missing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableProbe {
    /// The server answered with a row list (possibly empty)
    Found,

    /// The server answered, but not with a row list: a non-2xx status or a
    /// malformed body
    Missing(Failure),

    /// No response was received
    Unreachable(String),
}

impl TableProbe {
    pub(crate) fn from_select_failure(failure: Failure) -> Self {
        match failure {
            Failure::Transport(msg) => TableProbe::Unreachable(msg),
            other => TableProbe::Missing(other),
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, TableProbe::Found)
    }
}
