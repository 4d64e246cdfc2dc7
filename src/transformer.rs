//! The pipeline stage: action dispatch and the error-to-XML boundary.

use tracing::{debug, error};

use crate::action::Action;
use crate::config::{ResolvedConfig, StageConfig, StageParams};
use crate::context::ContextSet;
use crate::document::{error_response, success_response, XmlDocument};
use crate::error::{SetupError, TransformerError};
use crate::repository::http::HttpRepository;
use crate::repository::{RdfFormat, Repository};

/// A pipeline stage holding one repository session.
///
/// One instance serves one in-flight request at a time: the session
/// and its context set carry no synchronization. Hosting environments
/// that run requests concurrently must provision one stage per
/// request.
pub struct SesameTransformer<R> {
    action: Action,
    base_uri: Option<String>,
    contexts: ContextSet,
    repository: R,
}

impl SesameTransformer<HttpRepository> {
    /// Builds the stage from configuration and setup parameters and
    /// opens the HTTP session. Problems here are fatal; everything
    /// after setup answers with an error document instead of failing.
    pub fn setup(config: &StageConfig, params: &StageParams) -> Result<Self, SetupError> {
        let resolved = config.resolve(params)?;
        let repository = HttpRepository::connect(&resolved)?;
        Ok(Self::with_repository(&resolved, repository))
    }
}

impl<R: Repository> SesameTransformer<R> {
    /// Assembles a stage over an already-open repository session.
    pub fn with_repository(config: &ResolvedConfig, repository: R) -> Self {
        Self {
            action: config.action.clone(),
            base_uri: config.base_uri.clone(),
            contexts: config.contexts.clone(),
            repository,
        }
    }

    /// Runs the configured action for one input document.
    ///
    /// Never fails: every handler error is caught here, logged, and
    /// converted to a `<response><error>..</error></response>`
    /// document, so the caller always receives a response.
    pub fn transform(&mut self, request: &XmlDocument) -> XmlDocument {
        match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => {
                error!(action = %self.action, error = %err, "action failed");
                error_response(&err.to_string())
            }
        }
    }

    fn dispatch(&mut self, request: &XmlDocument) -> Result<XmlDocument, TransformerError> {
        match &self.action {
            Action::Add => self.add(request),
            Action::Clear => self.clear(),
            Action::GraphQuery => self.graph_query(request),
            Action::Unrecognized(value) => Err(TransformerError::InvalidAction(value.clone())),
        }
    }

    /// Forwards the input document, which is expected to already be
    /// RDF/XML, to the store.
    fn add(&mut self, request: &XmlDocument) -> Result<XmlDocument, TransformerError> {
        self.repository.add(
            request.as_bytes(),
            self.base_uri.as_deref(),
            RdfFormat::RdfXml,
            &self.contexts,
        )?;
        Ok(success_response())
    }

    /// Removes the statements of the configured contexts. With no
    /// contexts configured this clears the whole repository, exactly
    /// as the store's bare clear does.
    fn clear(&mut self) -> Result<XmlDocument, TransformerError> {
        self.repository.clear(&self.contexts)?;
        Ok(success_response())
    }

    /// Evaluates the document's text content as a SPARQL graph query.
    /// The result document replaces the `<response>` wrapper entirely.
    fn graph_query(&mut self, request: &XmlDocument) -> Result<XmlDocument, TransformerError> {
        let query = request.root_text()?;
        debug!(query_len = query.len(), "extracted graph query text");
        let result = self
            .repository
            .graph_query(&query, self.base_uri.as_deref())?;
        Ok(XmlDocument::parse(result)?)
    }
}
