use rowgraph::error::Result;
use rowgraph::wiring::derive_qualifiers;
use std::collections::BTreeSet;

/// Run the check command: parse a wirings file and report what would be wired
pub async fn run(wirings_path: String) -> Result<()> {
    let mappings = rowgraph::config::load_wirings(&wirings_path)?;

    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    for mapping in &mappings {
        let qualifiers = derive_qualifiers(&mapping.qualifies_csv);
        tracing::info!(
            "   • {} -> {}/{} {:?} (key attribute: {})",
            mapping.coordinate(),
            mapping.table,
            mapping.family,
            qualifiers,
            mapping.gql_attr
        );

        let coordinate = (mapping.type_name.clone(), mapping.field_name.clone());
        if !seen.insert(coordinate) {
            tracing::warn!(
                "duplicate wiring for {}; the last entry wins",
                mapping.coordinate()
            );
        }
    }

    tracing::info!("✅ {} wiring(s) parsed from {}", mappings.len(), wirings_path);

    Ok(())
}
