use crate::config::WiringMetadata;
use crate::error::Result;
use crate::wiring::fetcher::{RowFetcher, RowFetcherFactory};
use crate::wiring::qualifiers::derive_qualifiers;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Composite key for the field-resolution table: the GraphQL type owning the
/// field, and the field itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldCoordinate {
    type_name: String,
    field_name: String,
}

impl FieldCoordinate {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl fmt::Display for FieldCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// Mutable accumulation of field registrations during the wiring pass.
///
/// Registering under an occupied coordinate overwrites the earlier entry, so
/// the last registration in input order wins. `finish` consumes the builder;
/// callers never observe a partially-built wiring.
#[derive(Default)]
pub struct WiringBuilder {
    fetchers: BTreeMap<FieldCoordinate, Arc<dyn RowFetcher>>,
}

impl WiringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fetcher under a coordinate, returning any fetcher it
    /// replaced.
    pub fn register(
        &mut self,
        coordinate: FieldCoordinate,
        fetcher: Arc<dyn RowFetcher>,
    ) -> Option<Arc<dyn RowFetcher>> {
        self.fetchers.insert(coordinate, fetcher)
    }

    /// Finalize the accumulated registrations into an immutable wiring.
    pub fn finish(self) -> RuntimeWiring {
        RuntimeWiring {
            fetchers: self.fetchers,
        }
    }
}

/// The finalized field-resolution table, immutable once built.
pub struct RuntimeWiring {
    fetchers: BTreeMap<FieldCoordinate, Arc<dyn RowFetcher>>,
}

impl RuntimeWiring {
    pub fn get(&self, type_name: &str, field_name: &str) -> Option<Arc<dyn RowFetcher>> {
        self.fetchers
            .get(&FieldCoordinate::new(type_name, field_name))
            .cloned()
    }

    pub fn contains(&self, type_name: &str, field_name: &str) -> bool {
        self.fetchers
            .contains_key(&FieldCoordinate::new(type_name, field_name))
    }

    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldCoordinate, &Arc<dyn RowFetcher>)> {
        self.fetchers.iter()
    }
}

/// Wire every mapping into the builder, strictly in input order, and return
/// the finalized wiring.
///
/// For each mapping: derive its qualifier set, ask the factory for a fetcher,
/// and register it under (type, field), overwriting any earlier registration.
/// A factory failure aborts the whole pass; mappings after the failing one
/// are never passed to the factory, and no wiring is returned.
pub fn wire(
    mut builder: WiringBuilder,
    mappings: &[WiringMetadata],
    factory: &dyn RowFetcherFactory,
) -> Result<RuntimeWiring> {
    for mapping in mappings {
        tracing::info!("wiring: {:?}", mapping);

        let qualifiers = derive_qualifiers(&mapping.qualifies_csv);
        let fetcher = factory.create(
            &mapping.table,
            &mapping.family,
            &qualifiers,
            &mapping.gql_attr,
        )?;

        let coordinate = FieldCoordinate::new(&mapping.type_name, &mapping.field_name);
        if builder.register(coordinate, fetcher).is_some() {
            tracing::warn!(
                "replaced earlier wiring for {}; the last entry wins",
                mapping.coordinate()
            );
        }
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowgraphError;
    use crate::wiring::fetcher::{FetchContext, FetchError};
    use async_graphql::Value;
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    /// Fetcher that reports the table it was built for
    struct TaggedFetcher {
        table: String,
    }

    #[async_trait]
    impl RowFetcher for TaggedFetcher {
        async fn resolve(&self, _ctx: &FetchContext) -> std::result::Result<Value, FetchError> {
            Ok(Value::String(self.table.clone()))
        }
    }

    struct TaggingFactory {
        calls: Mutex<Vec<String>>,
        fail_on_table: Option<String>,
    }

    impl TaggingFactory {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_table: None,
            }
        }

        fn failing_on(table: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_table: Some(table.to_string()),
            }
        }
    }

    impl RowFetcherFactory for TaggingFactory {
        fn create(
            &self,
            table: &str,
            _family: &str,
            _qualifiers: &BTreeSet<String>,
            _attribute: &str,
        ) -> Result<Arc<dyn RowFetcher>> {
            self.calls.lock().unwrap().push(table.to_string());
            if self.fail_on_table.as_deref() == Some(table) {
                return Err(RowgraphError::ResolverConstruction(format!(
                    "unknown table '{}'",
                    table
                )));
            }
            Ok(Arc::new(TaggedFetcher {
                table: table.to_string(),
            }))
        }
    }

    fn mapping(type_name: &str, field_name: &str, table: &str) -> WiringMetadata {
        WiringMetadata {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
            table: table.to_string(),
            family: "cf1".to_string(),
            qualifies_csv: "title,author".to_string(),
            gql_attr: "id".to_string(),
            gql_type: None,
        }
    }

    #[test]
    fn test_coordinate_display() {
        let coordinate = FieldCoordinate::new("Query", "bookById");
        assert_eq!(coordinate.to_string(), "Query.bookById");
    }

    #[test]
    fn test_wire_registers_one_fetcher_per_mapping() {
        let factory = TaggingFactory::new();
        let mappings = vec![
            mapping("Query", "bookById", "books"),
            mapping("Book", "author", "authors"),
        ];

        let wiring = wire(WiringBuilder::new(), &mappings, &factory).unwrap();

        assert_eq!(wiring.len(), 2);
        assert!(wiring.contains("Query", "bookById"));
        assert!(wiring.contains("Book", "author"));
        assert_eq!(
            *factory.calls.lock().unwrap(),
            vec!["books".to_string(), "authors".to_string()]
        );
    }

    #[tokio::test]
    async fn test_wire_last_duplicate_wins() {
        let factory = TaggingFactory::new();
        let mappings = vec![
            mapping("Query", "bookById", "books_v1"),
            mapping("Query", "bookById", "books_v2"),
        ];

        let wiring = wire(WiringBuilder::new(), &mappings, &factory).unwrap();

        assert_eq!(wiring.len(), 1);
        let fetcher = wiring.get("Query", "bookById").unwrap();
        let value = fetcher.resolve(&FetchContext::default()).await.unwrap();
        assert_eq!(value, Value::String("books_v2".to_string()));
    }

    #[test]
    fn test_wire_fails_fast_on_factory_error() {
        let factory = TaggingFactory::failing_on("authors");
        let mappings = vec![
            mapping("Query", "bookById", "books"),
            mapping("Book", "author", "authors"),
            mapping("Query", "magazineById", "magazines"),
        ];

        let result = wire(WiringBuilder::new(), &mappings, &factory);

        assert!(matches!(
            result,
            Err(RowgraphError::ResolverConstruction(_))
        ));
        // The mapping after the failing one was never offered to the factory
        assert_eq!(
            *factory.calls.lock().unwrap(),
            vec!["books".to_string(), "authors".to_string()]
        );
    }

    #[test]
    fn test_builder_register_returns_replaced_entry() {
        let mut builder = WiringBuilder::new();
        let coordinate = FieldCoordinate::new("Query", "bookById");

        let first = builder.register(
            coordinate.clone(),
            Arc::new(TaggedFetcher {
                table: "books_v1".to_string(),
            }),
        );
        assert!(first.is_none());

        let replaced = builder.register(
            coordinate,
            Arc::new(TaggedFetcher {
                table: "books_v2".to_string(),
            }),
        );
        assert!(replaced.is_some());

        let wiring = builder.finish();
        assert_eq!(wiring.len(), 1);
    }

    #[test]
    fn test_empty_mapping_list_yields_empty_wiring() {
        let factory = TaggingFactory::new();
        let wiring = wire(WiringBuilder::new(), &[], &factory).unwrap();
        assert!(wiring.is_empty());
    }
}
