//! Action selection.

use std::fmt;

/// The operation the stage performs against the repository.
///
/// Resolved once from the configured action string. Unknown values are
/// kept as [`Action::Unrecognized`] instead of failing setup: they are
/// answered with an error response at dispatch time, without touching
/// the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add the statements of an RDF/XML input document.
    Add,
    /// Remove the statements of the configured contexts (or all
    /// statements when none are configured).
    Clear,
    /// Evaluate the input document's text content as a SPARQL graph
    /// query.
    GraphQuery,
    /// Anything else, kept verbatim for the error message.
    Unrecognized(String),
}

impl Action {
    pub const ADD: &'static str = "add";
    pub const CLEAR: &'static str = "clear";
    pub const GRAPH_QUERY: &'static str = "graph-query";

    /// Maps an action string onto the closed set of actions. Matching
    /// is exact; anything else becomes [`Action::Unrecognized`].
    pub fn parse(value: &str) -> Self {
        match value {
            Self::ADD => Action::Add,
            Self::CLEAR => Action::Clear,
            Self::GRAPH_QUERY => Action::GraphQuery,
            other => Action::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => f.write_str(Self::ADD),
            Action::Clear => f.write_str(Self::CLEAR),
            Action::GraphQuery => f.write_str(Self::GRAPH_QUERY),
            Action::Unrecognized(value) => f.write_str(value),
        }
    }
}
