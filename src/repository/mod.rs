//! The triple-store collaborator.
//!
//! The stage talks to the store through the [`Repository`] trait: one
//! session against one named repository. The production implementation
//! is [`http::HttpRepository`]; tests substitute recording stubs.

pub mod http;

use crate::context::ContextSet;
use crate::error::RepositoryError;

/// Serialization formats understood by the store.
///
/// The stage itself always speaks RDF/XML, matching the XML pipeline
/// it sits in; the other variants exist for repository implementations
/// negotiating with stores that prefer a different default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    RdfXml,
    Turtle,
    NTriples,
}

impl RdfFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "application/rdf+xml",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NTriples => "application/n-triples",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "rdf",
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
        }
    }
}

/// A live session against one repository.
///
/// All operations are synchronous: each call is one blocking round
/// trip to the store. Sessions are not synchronized; use one per
/// in-flight pipeline request.
pub trait Repository {
    /// Adds the statements serialized in `data` to the given contexts.
    /// [`ContextSet::Unspecified`] omits the context argument
    /// entirely, an explicit empty set passes zero context arguments.
    fn add(
        &mut self,
        data: &[u8],
        base_uri: Option<&str>,
        format: RdfFormat,
        contexts: &ContextSet,
    ) -> Result<(), RepositoryError>;

    /// Removes the statements of the given contexts. An unspecified or
    /// empty set removes every statement in the repository.
    fn clear(&mut self, contexts: &ContextSet) -> Result<(), RepositoryError>;

    /// Evaluates a SPARQL graph query and returns the result graph as
    /// RDF/XML bytes.
    fn graph_query(
        &mut self,
        query: &str,
        base_uri: Option<&str>,
    ) -> Result<Vec<u8>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types() {
        assert_eq!(RdfFormat::RdfXml.media_type(), "application/rdf+xml");
        assert_eq!(RdfFormat::Turtle.media_type(), "text/turtle");
        assert_eq!(RdfFormat::NTriples.media_type(), "application/n-triples");
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(RdfFormat::RdfXml.file_extension(), "rdf");
        assert_eq!(RdfFormat::Turtle.file_extension(), "ttl");
        assert_eq!(RdfFormat::NTriples.file_extension(), "nt");
    }
}
