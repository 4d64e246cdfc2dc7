//! Error types for the transformer stage.

use thiserror::Error;

/// Fatal failure while assembling the stage.
///
/// These happen before any response channel exists, so they propagate
/// to the hosting pipeline instead of being converted to an `<error>`
/// document.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A parameter without a usable default was not supplied.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The configured server URL does not parse.
    #[error("invalid server URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server could not be reached during setup.
    #[error("failed to reach the store server: {0}")]
    Connect(#[from] reqwest::Error),

    /// The server answered the protocol check with a non-success
    /// status.
    #[error("unexpected answer from the store protocol endpoint: {0}")]
    Protocol(String),
}

/// Failure while talking to the repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// HTTP transport failure (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store rejected the request (status {status}): {message}")]
    Store { status: u16, message: String },

    /// A configured context token is not a valid IRI. Context tokens
    /// are kept raw until the store call is encoded, so this surfaces
    /// here rather than at configuration time.
    #[error("invalid context IRI: {0}")]
    InvalidContext(#[from] oxiri::IriParseError),

    /// Escape hatch for alternative [`Repository`](crate::Repository)
    /// implementations.
    #[error("{0}")]
    Other(String),
}

/// Anything an action handler can fail with.
///
/// All variants are caught at the dispatch boundary and mapped to an
/// `<error>` response document; they never leave
/// [`SesameTransformer::transform`](crate::SesameTransformer::transform).
#[derive(Debug, Error)]
pub enum TransformerError {
    /// The configured action string matched none of the known actions.
    /// The repository connection is never touched in this case.
    #[error("Invalid action parameter supplied: {0}")]
    InvalidAction(String),

    /// The input document or a query result was not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
