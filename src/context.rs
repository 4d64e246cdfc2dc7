//! Context resolution.
//!
//! The store API distinguishes between passing an explicit null
//! context and not passing a context argument at all. The
//! configuration string keeps that distinction with the literal token
//! `null`; an absent configuration means the context argument is
//! omitted entirely. Both states are modelled explicitly here instead
//! of overloading an optional list.

/// One entry of a context specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// The literal `null` token: the store's explicit no-value context
    /// (the default graph).
    NoValue,
    /// A context IRI, kept as the raw token. Validity is checked only
    /// when the store call is encoded, so a malformed token surfaces
    /// as an action failure rather than a configuration failure.
    Iri(String),
}

/// The resolved context specification: unspecified, explicitly empty,
/// or a list of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSet {
    /// No contexts were configured at all. Store calls omit the
    /// context argument entirely.
    Unspecified,
    /// An explicit, possibly empty list. Order and duplicates are
    /// preserved.
    Contexts(Vec<Context>),
}

impl ContextSet {
    /// Resolves a space-separated context specification.
    ///
    /// `None` maps to [`ContextSet::Unspecified`]; an empty or
    /// whitespace-only string maps to an explicit empty list. Tokens
    /// are split on single spaces, so runs of spaces produce empty
    /// tokens that later fail IRI encoding.
    pub fn resolve(spec: Option<&str>) -> Self {
        let Some(spec) = spec else {
            return ContextSet::Unspecified;
        };
        if spec.trim().is_empty() {
            return ContextSet::Contexts(Vec::new());
        }
        let entries = spec
            .split(' ')
            .map(|token| {
                if token == "null" {
                    Context::NoValue
                } else {
                    Context::Iri(token.to_string())
                }
            })
            .collect();
        ContextSet::Contexts(entries)
    }

    /// Entries of an explicit list; `None` when unspecified.
    pub fn entries(&self) -> Option<&[Context]> {
        match self {
            ContextSet::Unspecified => None,
            ContextSet::Contexts(entries) => Some(entries),
        }
    }

    /// True when the set names no context at all, either because none
    /// were configured or because the list is empty. A clear in this
    /// state removes every statement in the repository.
    pub fn is_empty(&self) -> bool {
        match self {
            ContextSet::Unspecified => true,
            ContextSet::Contexts(entries) => entries.is_empty(),
        }
    }
}
