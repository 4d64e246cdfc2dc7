//! Stage configuration.
//!
//! Two layers, mirroring how a hosting pipeline assembles the stage:
//! [`StageConfig`] carries configuration-time defaults, [`StageParams`]
//! carries per-setup overrides. [`StageConfig::resolve`] merges them
//! into a validated [`ResolvedConfig`], parsing the action and the
//! context specification exactly once.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::action::Action;
use crate::context::ContextSet;
use crate::error::SetupError;

/// Default store endpoint.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9999/sesame/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration-time defaults for the stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Endpoint of the store's HTTP service.
    pub server_url: String,
    /// Named repository on that server. Required by setup, but has no
    /// configuration-time default.
    pub repository: Option<String>,
    /// Base URI for relative-IRI resolution in `add` and
    /// `graph-query`.
    pub base_uri: Option<String>,
    /// Space-separated context specification; the literal token `null`
    /// names the store's no-value context.
    pub contexts: Option<String>,
    /// One of `add`, `clear`, `graph-query`. Required by setup.
    pub action: Option<String>,
    /// HTTP client timeout.
    pub timeout_secs: u64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            repository: None,
            base_uri: None,
            contexts: None,
            action: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Per-setup overrides of the configuration defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageParams {
    pub server_url: Option<String>,
    pub repository: Option<String>,
    pub base_uri: Option<String>,
    pub contexts: Option<String>,
    pub action: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully validated stage configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Server endpoint, normalized to end with a slash so repository
    /// paths join below it.
    pub server_url: Url,
    pub repository: String,
    pub base_uri: Option<String>,
    pub contexts: ContextSet,
    pub action: Action,
    pub timeout: Duration,
}

impl StageConfig {
    /// Merges `params` over the configured defaults and validates the
    /// result.
    ///
    /// Missing repository or action and an unparseable server URL are
    /// fatal. An action string that matches no known action is not: it
    /// resolves to [`Action::Unrecognized`] and is answered with an
    /// error document at dispatch time.
    pub fn resolve(&self, params: &StageParams) -> Result<ResolvedConfig, SetupError> {
        let raw_url = params.server_url.as_deref().unwrap_or(&self.server_url);
        let mut server_url = Url::parse(raw_url).map_err(|source| SetupError::InvalidUrl {
            url: raw_url.to_string(),
            source,
        })?;
        if !server_url.path().ends_with('/') {
            let path = format!("{}/", server_url.path());
            server_url.set_path(&path);
        }

        let repository = params
            .repository
            .clone()
            .or_else(|| self.repository.clone())
            .ok_or(SetupError::MissingParameter("repository"))?;
        let action_value = params
            .action
            .clone()
            .or_else(|| self.action.clone())
            .ok_or(SetupError::MissingParameter("action"))?;
        let action = Action::parse(&action_value);

        let contexts_spec = params.contexts.clone().or_else(|| self.contexts.clone());
        let contexts = ContextSet::resolve(contexts_spec.as_deref());
        debug!(%action, ?contexts, %repository, "resolved stage configuration");

        Ok(ResolvedConfig {
            server_url,
            repository,
            base_uri: params.base_uri.clone().or_else(|| self.base_uri.clone()),
            contexts,
            action,
            timeout: Duration::from_secs(params.timeout_secs.unwrap_or(self.timeout_secs)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn minimal_params() -> StageParams {
        StageParams {
            repository: Some("test".to_string()),
            action: Some("add".to_string()),
            ..StageParams::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = StageConfig::default();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.repository.is_none());
        assert!(config.action.is_none());
    }

    #[test]
    fn test_resolve_minimal() {
        let resolved = StageConfig::default().resolve(&minimal_params()).unwrap();
        assert_eq!(resolved.server_url.as_str(), DEFAULT_SERVER_URL);
        assert_eq!(resolved.repository, "test");
        assert_eq!(resolved.action, Action::Add);
        assert_eq!(resolved.contexts, ContextSet::Unspecified);
        assert!(resolved.base_uri.is_none());
    }

    #[test]
    fn test_params_override_configuration() {
        let config = StageConfig {
            contexts: Some("http://e/from-config".to_string()),
            base_uri: Some("http://e/base".to_string()),
            ..StageConfig::default()
        };
        let params = StageParams {
            server_url: Some("http://store.example.org/rdf4j-server".to_string()),
            contexts: Some("null".to_string()),
            timeout_secs: Some(5),
            ..minimal_params()
        };
        let resolved = config.resolve(&params).unwrap();
        assert_eq!(
            resolved.server_url.as_str(),
            "http://store.example.org/rdf4j-server/"
        );
        assert_eq!(
            resolved.contexts,
            ContextSet::Contexts(vec![Context::NoValue])
        );
        assert_eq!(resolved.base_uri.as_deref(), Some("http://e/base"));
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_repository_is_fatal() {
        let params = StageParams {
            action: Some("clear".to_string()),
            ..StageParams::default()
        };
        let err = StageConfig::default().resolve(&params).unwrap_err();
        assert!(matches!(err, SetupError::MissingParameter("repository")));
    }

    #[test]
    fn test_missing_action_is_fatal() {
        let params = StageParams {
            repository: Some("test".to_string()),
            ..StageParams::default()
        };
        let err = StageConfig::default().resolve(&params).unwrap_err();
        assert!(matches!(err, SetupError::MissingParameter("action")));
    }

    #[test]
    fn test_unrecognized_action_is_not_fatal() {
        let params = StageParams {
            action: Some("remove".to_string()),
            ..minimal_params()
        };
        let resolved = StageConfig::default().resolve(&params).unwrap();
        assert_eq!(resolved.action, Action::Unrecognized("remove".to_string()));
    }

    #[test]
    fn test_invalid_server_url_is_fatal() {
        let params = StageParams {
            server_url: Some("not a url".to_string()),
            ..minimal_params()
        };
        let err = StageConfig::default().resolve(&params).unwrap_err();
        assert!(matches!(err, SetupError::InvalidUrl { .. }));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: StageConfig =
            serde_json::from_str(r#"{"repository": "kb", "action": "graph-query"}"#).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.repository.as_deref(), Some("kb"));
        let resolved = config.resolve(&StageParams::default()).unwrap();
        assert_eq!(resolved.action, Action::GraphQuery);
    }
}
