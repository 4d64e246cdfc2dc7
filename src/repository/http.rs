//! Sesame/RDF4J REST protocol client.
//!
//! Speaks the store's HTTP API directly: statements live under
//! `repositories/{id}/statements`, queries are POSTed to
//! `repositories/{id}`. Context arguments travel as repeated `context`
//! query parameters in N-Triples encoding: `<iri>` for a named
//! context, the literal `null` for the store's no-value context.
//! Omitting the parameter altogether addresses the whole repository,
//! which is a different thing from naming the null context.

use oxiri::Iri;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info, warn};
use url::Url;

use super::{RdfFormat, Repository};
use crate::config::ResolvedConfig;
use crate::context::{Context, ContextSet};
use crate::error::{RepositoryError, SetupError};

/// One HTTP session against one named repository.
pub struct HttpRepository {
    client: Client,
    /// `{server}/repositories/{id}` — query endpoint.
    repository_url: Url,
    /// `{server}/repositories/{id}/statements` — statement endpoint.
    statements_url: Url,
}

impl HttpRepository {
    /// Opens the session: builds the client and checks the server
    /// answers its protocol endpoint. Any failure here is fatal to
    /// stage setup.
    pub fn connect(config: &ResolvedConfig) -> Result<Self, SetupError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let join = |segment: String| {
            config
                .server_url
                .join(&segment)
                .map_err(|source| SetupError::InvalidUrl {
                    url: config.server_url.to_string(),
                    source,
                })
        };
        let protocol_url = join("protocol".to_string())?;
        let repository_url = join(format!("repositories/{}", config.repository))?;
        let statements_url = join(format!("repositories/{}/statements", config.repository))?;

        let response = client.get(protocol_url).send()?;
        if !response.status().is_success() {
            return Err(SetupError::Protocol(format!(
                "status {}",
                response.status()
            )));
        }
        let version = response.text()?;
        debug!(protocol = %version.trim(), "store protocol check passed");
        info!(repository = %repository_url, "opened repository session");

        Ok(Self {
            client,
            repository_url,
            statements_url,
        })
    }

    /// Query parameters for a context set. Unspecified and empty sets
    /// both produce no parameter; the distinction between them lives
    /// at the [`Repository`] API, the wire cannot carry it.
    fn context_params(contexts: &ContextSet) -> Result<Vec<(&'static str, String)>, RepositoryError> {
        let mut params = Vec::new();
        if let Some(entries) = contexts.entries() {
            for entry in entries {
                params.push(("context", encode_context(entry)?));
            }
        }
        Ok(params)
    }

    fn check_status(response: Response) -> Result<Response, RepositoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.to_string()
        } else {
            body.trim().to_string()
        };
        Err(RepositoryError::Store {
            status: status.as_u16(),
            message,
        })
    }
}

/// N-Triples encoding of one context argument. IRI validity was
/// deliberately not checked at resolution time, so this is where a
/// malformed token fails.
fn encode_context(context: &Context) -> Result<String, RepositoryError> {
    match context {
        Context::NoValue => Ok("null".to_string()),
        Context::Iri(iri) => {
            Iri::parse(iri.as_str())?;
            Ok(format!("<{iri}>"))
        }
    }
}

impl Repository for HttpRepository {
    fn add(
        &mut self,
        data: &[u8],
        base_uri: Option<&str>,
        format: RdfFormat,
        contexts: &ContextSet,
    ) -> Result<(), RepositoryError> {
        let mut params = Self::context_params(contexts)?;
        if let Some(base) = base_uri {
            params.push(("baseURI", base.to_string()));
        }
        debug!(bytes = data.len(), contexts = params.len(), "adding statements");
        let response = self
            .client
            .post(self.statements_url.clone())
            .query(&params)
            .header(CONTENT_TYPE, format.media_type())
            .body(data.to_vec())
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    fn clear(&mut self, contexts: &ContextSet) -> Result<(), RepositoryError> {
        let params = Self::context_params(contexts)?;
        if params.is_empty() {
            // Inherited behavior: no context argument wipes the whole
            // repository.
            warn!("clearing every statement in the repository");
        }
        let response = self
            .client
            .delete(self.statements_url.clone())
            .query(&params)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    fn graph_query(
        &mut self,
        query: &str,
        base_uri: Option<&str>,
    ) -> Result<Vec<u8>, RepositoryError> {
        let mut form = vec![("query", query.to_string()), ("queryLn", "sparql".to_string())];
        if let Some(base) = base_uri {
            form.push(("baseURI", base.to_string()));
        }
        debug!(query_len = query.len(), "evaluating graph query");
        let response = self
            .client
            .post(self.repository_url.clone())
            .header(ACCEPT, RdfFormat::RdfXml.media_type())
            .form(&form)
            .send()?;
        let response = Self::check_status(response)?;
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_named_context() {
        let encoded = encode_context(&Context::Iri("http://example.org/ctxA".to_string()));
        assert_eq!(encoded.unwrap(), "<http://example.org/ctxA>");
    }

    #[test]
    fn test_encode_no_value_context() {
        assert_eq!(encode_context(&Context::NoValue).unwrap(), "null");
    }

    #[test]
    fn test_encode_rejects_malformed_iri() {
        let result = encode_context(&Context::Iri("not an iri".to_string()));
        assert!(matches!(result, Err(RepositoryError::InvalidContext(_))));
    }

    #[test]
    fn test_context_params_omitted_for_unspecified_and_empty() {
        assert!(HttpRepository::context_params(&ContextSet::Unspecified)
            .unwrap()
            .is_empty());
        assert!(
            HttpRepository::context_params(&ContextSet::Contexts(Vec::new()))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_context_params_keep_order() {
        let contexts = ContextSet::Contexts(vec![
            Context::Iri("http://example.org/a".to_string()),
            Context::NoValue,
            Context::Iri("http://example.org/b".to_string()),
        ]);
        let params = HttpRepository::context_params(&contexts).unwrap();
        let values: Vec<&str> = params.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(
            values,
            vec!["<http://example.org/a>", "null", "<http://example.org/b>"]
        );
    }
}
