use async_graphql::{Name, Value};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors a row fetcher can produce while resolving a field
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("row '{key}' not found in table '{table}'")]
    NotFound { table: String, key: String },

    #[error("row query failed: {0}")]
    Query(String),
}

/// Request-time inputs available to a row fetcher: the requesting field's
/// arguments and the parent object it is being resolved on.
#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    arguments: IndexMap<Name, Value>,
    parent: Option<Value>,
}

impl FetchContext {
    pub fn new(arguments: IndexMap<Name, Value>, parent: Option<Value>) -> Self {
        Self { arguments, parent }
    }

    /// Look up an attribute by name: field arguments first, then the parent
    /// object's fields.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name).or_else(|| match &self.parent {
            Some(Value::Object(obj)) => obj.get(name),
            _ => None,
        })
    }

    /// Render the named attribute as a row key string. Strings are used
    /// verbatim; numbers use their display form.
    pub fn row_key(&self, attribute: &str) -> Option<String> {
        match self.attribute(attribute)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A capability that fetches one field's value from the store.
///
/// Fetchers are constructed once during the wiring pass and invoked
/// concurrently by the request layer afterwards; implementations own their
/// thread safety.
#[async_trait]
pub trait RowFetcher: Send + Sync {
    async fn resolve(&self, ctx: &FetchContext) -> std::result::Result<Value, FetchError>;
}

/// Produces a row fetcher for one mapping's query parameters.
///
/// Fails with `RowgraphError::ResolverConstruction` when a fetcher cannot be
/// built for the given table/family/attribute combination; the wiring pass
/// aborts on the first such failure.
pub trait RowFetcherFactory: Send + Sync {
    fn create(
        &self,
        table: &str,
        family: &str,
        qualifiers: &BTreeSet<String>,
        attribute: &str,
    ) -> crate::error::Result<Arc<dyn RowFetcher>>;
}
