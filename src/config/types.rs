use serde::{Deserialize, Serialize};

/// One field-to-row mapping from the wirings file.
///
/// Each entry tells the binding engine to resolve one GraphQL field by
/// fetching a row from the wide-column store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiringMetadata {
    /// GraphQL type owning the field, e.g. "Query", "Book"
    pub type_name: String,

    /// Field on that type to resolve, e.g. "bookById", "author"
    pub field_name: String,

    /// The store table holding the rows
    pub table: String,

    /// The column family to read from
    pub family: String,

    /// Comma-delimited cell qualifiers to fetch, taken exactly as written
    pub qualifies_csv: String,

    /// The argument (on query fields) or parent attribute (on entity fields)
    /// that supplies the row key, e.g. "id", "authorId"
    pub gql_attr: String,

    /// GraphQL object type produced by the field. When absent the field is
    /// exposed as an opaque Row value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gql_type: Option<String>,
}

impl WiringMetadata {
    /// Coordinate of the field this mapping resolves, as "Type.field".
    pub fn coordinate(&self) -> String {
        format!("{}.{}", self.type_name, self.field_name)
    }
}
