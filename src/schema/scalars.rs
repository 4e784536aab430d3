use async_graphql::dynamic::Scalar;

/// Opaque row scalar used for wired fields that declare no object type.
///
/// Serializes as a JSON object of qualifier to cell value; no validation is
/// applied because the shape depends entirely on the wiring's qualifier set.
pub fn row_scalar() -> Scalar {
    Scalar::new("Row").description("A fetched row as a JSON object of qualifier to cell value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_scalar_name() {
        let scalar = row_scalar();
        assert_eq!(scalar.type_name(), "Row");
    }
}
