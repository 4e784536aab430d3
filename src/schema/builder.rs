use crate::config::WiringMetadata;
use crate::error::{Result, RowgraphError};
use crate::schema::scalars::row_scalar;
use crate::wiring::{derive_qualifiers, FetchContext, FetchError, RowFetcher, RuntimeWiring};

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, Schema, TypeRef,
};
use async_graphql::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

const QUERY_TYPE: &str = "Query";
const ROW_TYPE: &str = "Row";

/// Build an executable GraphQL schema from the parsed wirings and the
/// finalized field-resolution table.
///
/// Every type with wired fields becomes an object type; types named by a
/// mapping's `gqlType` additionally expose one nullable String field per
/// qualifier fetched into them, read out of the parent row object. Duplicate
/// (type, field) pairs collapse to the last occurrence, matching resolver
/// registration.
pub fn build_schema(mappings: &[WiringMetadata], wiring: &RuntimeWiring) -> Result<Schema> {
    if mappings.is_empty() {
        return Err(RowgraphError::SchemaGeneration(
            "no wirings provided".to_string(),
        ));
    }

    // Last occurrence of a coordinate wins
    let mut wired: BTreeMap<(String, String), &WiringMetadata> = BTreeMap::new();
    for mapping in mappings {
        wired.insert(
            (mapping.type_name.clone(), mapping.field_name.clone()),
            mapping,
        );
    }

    // Qualifier-backed cell fields contributed to each declared output type
    let mut cell_fields: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    // Wired fields grouped by the type that owns them
    let mut wired_by_type: BTreeMap<String, Vec<&WiringMetadata>> = BTreeMap::new();

    for mapping in wired.values().copied() {
        wired_by_type
            .entry(mapping.type_name.clone())
            .or_default()
            .push(mapping);

        if let Some(type_name) = &mapping.gql_type {
            cell_fields
                .entry(type_name.clone())
                .or_default()
                .extend(derive_qualifiers(&mapping.qualifies_csv));
        }
    }

    if !wired_by_type.contains_key(QUERY_TYPE) {
        return Err(RowgraphError::SchemaGeneration(
            "no fields wired onto the Query type".to_string(),
        ));
    }

    let type_names: BTreeSet<&String> = wired_by_type.keys().chain(cell_fields.keys()).collect();

    let mut schema_builder = Schema::build(QUERY_TYPE, None, None).register(row_scalar());

    for type_name in type_names {
        tracing::info!("building object type: {}", type_name);

        let mut object = Object::new(type_name.as_str());

        let wired_here = wired_by_type
            .get(type_name.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let wired_field_names: BTreeSet<&str> = wired_here
            .iter()
            .map(|mapping| mapping.field_name.as_str())
            .collect();

        if let Some(qualifiers) = cell_fields.get(type_name.as_str()) {
            for qualifier in qualifiers {
                // A wired resolver takes precedence over a plain cell field
                if wired_field_names.contains(qualifier.as_str()) {
                    continue;
                }
                object = object.field(cell_field(qualifier));
            }
        }

        for mapping in wired_here {
            let fetcher = wiring
                .get(&mapping.type_name, &mapping.field_name)
                .ok_or_else(|| {
                    RowgraphError::SchemaGeneration(format!(
                        "no resolver wired for {}",
                        mapping.coordinate()
                    ))
                })?;
            object = object.field(wired_field(mapping, fetcher));
        }

        schema_builder = schema_builder.register(object);
    }

    schema_builder
        .finish()
        .map_err(|e| RowgraphError::SchemaGeneration(format!("failed to build schema: {}", e)))
}

/// Field resolved by a row fetcher from the wiring.
fn wired_field(mapping: &WiringMetadata, fetcher: Arc<dyn RowFetcher>) -> Field {
    let type_ref = match &mapping.gql_type {
        Some(type_name) => TypeRef::named(type_name.as_str()),
        None => TypeRef::named(ROW_TYPE),
    };
    // Object results become the parent value for child field extraction;
    // Row results are returned as a scalar leaf.
    let as_parent = mapping.gql_type.is_some();
    let coordinate = mapping.coordinate();

    let mut field = Field::new(
        mapping.field_name.clone(),
        type_ref,
        move |ctx: ResolverContext| {
            let fetcher = fetcher.clone();
            let coordinate = coordinate.clone();

            FieldFuture::new(async move {
                let arguments = ctx.args.as_index_map().clone();
                let parent = ctx.parent_value.try_downcast_ref::<Value>().ok().cloned();
                let fetch_ctx = FetchContext::new(arguments, parent);

                tracing::debug!("resolving {}", coordinate);

                match fetcher.resolve(&fetch_ctx).await {
                    Ok(row) if as_parent => Ok(Some(FieldValue::owned_any(row))),
                    Ok(row) => Ok(Some(FieldValue::value(row))),
                    Err(FetchError::NotFound { .. }) => Ok(None),
                    Err(e) => Err(e.to_string().into()),
                }
            })
        },
    );

    // Root query fields take the row key as an argument; entity fields read
    // it from the parent row instead.
    if mapping.type_name == QUERY_TYPE {
        field = field.argument(InputValue::new(
            mapping.gql_attr.clone(),
            TypeRef::named(TypeRef::ID),
        ));
    }

    field
}

/// Nullable String field extracted from the parent row object.
fn cell_field(qualifier: &str) -> Field {
    let name = qualifier.to_string();
    let name_for_closure = name.clone();

    Field::new(name, TypeRef::named(TypeRef::STRING), move |ctx| {
        let qualifier = name_for_closure.clone();
        FieldFuture::new(async move {
            let parent = ctx.parent_value.try_downcast_ref::<Value>()?;

            if let Value::Object(row) = parent {
                if let Some(value) = row.get(qualifier.as_str()) {
                    return Ok(Some(FieldValue::value(value.clone())));
                }
            }

            Ok(Some(FieldValue::NULL))
        })
    })
}
