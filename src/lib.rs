//! Pipeline transformer stage for Sesame/RDF4J-compatible triple stores.
//!
//! The stage receives one XML document per invocation, performs a
//! configured action against a remote repository reachable over HTTP,
//! and always answers with exactly one XML document:
//!
//! - `add` — the input document is RDF/XML; its statements are added to
//!   the configured contexts. Answers `<response><success/></response>`.
//! - `clear` — removes the statements in the configured contexts, or
//!   every statement in the repository when no contexts are configured.
//!   Answers `<response><success/></response>`.
//! - `graph-query` — the input document's text content is a SPARQL
//!   graph query; the RDF/XML result document is returned as-is.
//!
//! Failures during an action never propagate out of
//! [`SesameTransformer::transform`]: they are logged and answered as
//! `<response><error>message</error></response>`, so a hosting pipeline
//! always gets a document back. Only setup problems (missing
//! repository, unreachable server) are hard errors.

pub mod action;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod repository;
pub mod transformer;

pub use action::Action;
pub use config::{ResolvedConfig, StageConfig, StageParams};
pub use context::{Context, ContextSet};
pub use document::XmlDocument;
pub use error::{RepositoryError, SetupError, TransformerError};
pub use repository::http::HttpRepository;
pub use repository::{RdfFormat, Repository};
pub use transformer::SesameTransformer;
