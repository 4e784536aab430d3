/// In-memory wide-column store
///
/// A local stand-in for the production row store, used by the serve command
/// and the test suite. Rows are organized as
/// table -> row key -> column family -> qualifier -> cell value, with all
/// cell values stored as strings.

use crate::error::{Result, RowgraphError};
use crate::wiring::{FetchContext, FetchError, RowFetcher, RowFetcherFactory};

use async_graphql::{Name, Value};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::sync::Arc;

type Cells = HashMap<String, String>;
type FamilyMap = HashMap<String, Cells>;
type TableRows = HashMap<String, FamilyMap>;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, TableRows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single cell value
    pub fn insert(&mut self, table: &str, row_key: &str, family: &str, qualifier: &str, value: &str) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .entry(row_key.to_string())
            .or_default()
            .entry(family.to_string())
            .or_default()
            .insert(qualifier.to_string(), value.to_string());
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn row(&self, table: &str, row_key: &str) -> Option<&FamilyMap> {
        self.tables.get(table)?.get(row_key)
    }

    /// Parse a row data document: a JSON object nested as
    /// table -> row key -> family -> qualifier -> value.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: HashMap<String, TableRows> = serde_json::from_str(json)
            .map_err(|e| RowgraphError::Config(format!("invalid row data: {}", e)))?;
        Ok(Self { tables })
    }

    /// Load a row data file from disk
    pub fn load(path: &str) -> Result<Self> {
        tracing::info!("Loading row data file: {}", path);

        let contents = fs::read_to_string(path)
            .map_err(|e| RowgraphError::Config(format!("Failed to read row data file '{}': {}", path, e)))?;
        let store = Self::from_json(&contents)?;

        tracing::info!(
            "loaded {} table(s), {} row(s)",
            store.tables.len(),
            store.tables.values().map(|t| t.len()).sum::<usize>()
        );
        Ok(store)
    }
}

/// Builds row fetchers backed by a shared `MemoryStore`.
///
/// The store is frozen behind an `Arc` before wiring begins; fetchers only
/// ever read from it, so concurrent resolution needs no further locking.
pub struct MemoryFetcherFactory {
    store: Arc<MemoryStore>,
}

impl MemoryFetcherFactory {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl RowFetcherFactory for MemoryFetcherFactory {
    fn create(
        &self,
        table: &str,
        family: &str,
        qualifiers: &BTreeSet<String>,
        attribute: &str,
    ) -> Result<Arc<dyn RowFetcher>> {
        if !self.store.has_table(table) {
            return Err(RowgraphError::ResolverConstruction(format!(
                "unknown table '{}'",
                table
            )));
        }

        Ok(Arc::new(MemoryRowFetcher {
            store: self.store.clone(),
            table: table.to_string(),
            family: family.to_string(),
            qualifiers: qualifiers.clone(),
            attribute: attribute.to_string(),
        }))
    }
}

struct MemoryRowFetcher {
    store: Arc<MemoryStore>,
    table: String,
    family: String,
    qualifiers: BTreeSet<String>,
    attribute: String,
}

#[async_trait]
impl RowFetcher for MemoryRowFetcher {
    async fn resolve(&self, ctx: &FetchContext) -> std::result::Result<Value, FetchError> {
        let key = ctx.row_key(&self.attribute).ok_or_else(|| {
            FetchError::Query(format!(
                "row key attribute '{}' not present in arguments or parent",
                self.attribute
            ))
        })?;

        tracing::debug!("fetching {}/{} row '{}'", self.table, self.family, key);

        let row = self
            .store
            .row(&self.table, &key)
            .ok_or_else(|| FetchError::NotFound {
                table: self.table.clone(),
                key,
            })?;

        let mut object = IndexMap::new();
        if let Some(cells) = row.get(&self.family) {
            for qualifier in &self.qualifiers {
                if let Some(value) = cells.get(qualifier) {
                    object.insert(Name::new(qualifier), Value::String(value.clone()));
                }
            }
        }

        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiring::derive_qualifiers;
    use indexmap::IndexMap as ArgMap;

    fn sample_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("books", "book-1", "cf1", "title", "Moby Dick");
        store.insert("books", "book-1", "cf1", "author", "Melville");
        store.insert("books", "book-1", "cf1", "pageCount", "635");
        store.insert("books", "book-1", "cf2", "shelf", "A3");
        store
    }

    fn args(pairs: &[(&str, &str)]) -> ArgMap<Name, Value> {
        let mut map = ArgMap::new();
        for (k, v) in pairs {
            map.insert(Name::new(k), Value::String(v.to_string()));
        }
        map
    }

    #[test]
    fn test_factory_rejects_unknown_table() {
        let factory = MemoryFetcherFactory::new(Arc::new(sample_store()));
        let result = factory.create("magazines", "cf1", &derive_qualifiers("title"), "id");

        assert!(matches!(
            result,
            Err(RowgraphError::ResolverConstruction(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_filters_to_requested_qualifiers() {
        let factory = MemoryFetcherFactory::new(Arc::new(sample_store()));
        let fetcher = factory
            .create("books", "cf1", &derive_qualifiers("title,author"), "id")
            .unwrap();

        let ctx = FetchContext::new(args(&[("id", "book-1")]), None);
        let value = fetcher.resolve(&ctx).await.unwrap();

        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(object.len(), 2);
        assert_eq!(
            object.get("title"),
            Some(&Value::String("Moby Dick".to_string()))
        );
        assert_eq!(
            object.get("author"),
            Some(&Value::String("Melville".to_string()))
        );
        // pageCount was not requested
        assert!(object.get("pageCount").is_none());
    }

    #[tokio::test]
    async fn test_fetch_reads_only_the_requested_family() {
        let factory = MemoryFetcherFactory::new(Arc::new(sample_store()));
        let fetcher = factory
            .create("books", "cf2", &derive_qualifiers("title,shelf"), "id")
            .unwrap();

        let ctx = FetchContext::new(args(&[("id", "book-1")]), None);
        let value = fetcher.resolve(&ctx).await.unwrap();

        let Value::Object(object) = value else {
            panic!("expected object");
        };
        // "title" lives in cf1, so only "shelf" comes back
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("shelf"), Some(&Value::String("A3".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_missing_row_is_not_found() {
        let factory = MemoryFetcherFactory::new(Arc::new(sample_store()));
        let fetcher = factory
            .create("books", "cf1", &derive_qualifiers("title"), "id")
            .unwrap();

        let ctx = FetchContext::new(args(&[("id", "book-999")]), None);
        let result = fetcher.resolve(&ctx).await;

        assert!(matches!(result, Err(FetchError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_fetch_missing_key_attribute_is_query_error() {
        let factory = MemoryFetcherFactory::new(Arc::new(sample_store()));
        let fetcher = factory
            .create("books", "cf1", &derive_qualifiers("title"), "id")
            .unwrap();

        let result = fetcher.resolve(&FetchContext::default()).await;

        assert!(matches!(result, Err(FetchError::Query(_))));
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = r#"{
            "books": {
                "book-1": {
                    "cf1": { "title": "Moby Dick", "author": "Melville" }
                }
            }
        }"#;

        let store = MemoryStore::from_json(json).unwrap();
        assert!(store.has_table("books"));
        let row = store.row("books", "book-1").unwrap();
        assert_eq!(row["cf1"]["title"], "Moby Dick");
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let result = MemoryStore::from_json(r#"{"books": "not-a-table"}"#);
        assert!(matches!(result, Err(RowgraphError::Config(_))));
    }
}
