use rowgraph::config::WiringMetadata;
use rowgraph::error::{Result, RowgraphError};
use serde_json::json;
use std::path::Path;

/// Run the example command: write a books/authors wirings file and a matching
/// row data set into the given directory.
pub async fn run(dir: String) -> Result<()> {
    tracing::info!("🎨 Generating example wirings and row data...");

    let wirings_path = Path::new(&dir).join("wirings.json");
    let data_path = Path::new(&dir).join("data.json");

    let mappings = example_wirings();
    rowgraph::config::save_wirings(&mappings, path_str(&wirings_path)?)?;
    tracing::info!("📝 Wrote {} wiring(s) to {}", mappings.len(), wirings_path.display());

    for mapping in &mappings {
        tracing::info!("   • {} -> {}/{}", mapping.coordinate(), mapping.table, mapping.family);
    }

    let data = serde_json::to_string_pretty(&example_rows())
        .map_err(|e| RowgraphError::Serialization(format!("JSON serialization error: {}", e)))?;
    std::fs::write(&data_path, data)
        .map_err(|e| RowgraphError::Config(format!("Failed to write row data file '{}': {}", data_path.display(), e)))?;
    tracing::info!("📝 Wrote row data to {}", data_path.display());

    tracing::info!("");
    tracing::info!("💡 Next steps:");
    tracing::info!("   1. Inspect the wirings: cargo run -- check --wirings {}", wirings_path.display());
    tracing::info!("   2. Start the server:   cargo run -- serve --wirings {} --data {}", wirings_path.display(), data_path.display());
    tracing::info!("   3. Try a query:        {{ bookById(id: \"book-1\") {{ name pageCount author {{ firstName lastName }} }} }}");

    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| RowgraphError::Config(format!("non-UTF8 path: {}", path.display())))
}

/// The example wirings: a root book lookup plus a nested author resolved from
/// the parent row's authorId cell.
pub fn example_wirings() -> Vec<WiringMetadata> {
    vec![
        WiringMetadata {
            type_name: "Query".to_string(),
            field_name: "bookById".to_string(),
            table: "books".to_string(),
            family: "cf1".to_string(),
            qualifies_csv: "name,pageCount,authorId".to_string(),
            gql_attr: "id".to_string(),
            gql_type: Some("Book".to_string()),
        },
        WiringMetadata {
            type_name: "Book".to_string(),
            field_name: "author".to_string(),
            table: "authors".to_string(),
            family: "cf1".to_string(),
            qualifies_csv: "firstName,lastName".to_string(),
            gql_attr: "authorId".to_string(),
            gql_type: Some("Author".to_string()),
        },
    ]
}

/// Example row data matching the wirings above
pub fn example_rows() -> serde_json::Value {
    json!({
        "books": {
            "book-1": {
                "cf1": {
                    "name": "Harry Potter and the Philosopher's Stone",
                    "pageCount": "223",
                    "authorId": "author-1"
                }
            },
            "book-2": {
                "cf1": {
                    "name": "Moby Dick",
                    "pageCount": "635",
                    "authorId": "author-2"
                }
            },
            "book-3": {
                "cf1": {
                    "name": "Interview with the vampire",
                    "pageCount": "371",
                    "authorId": "author-3"
                }
            }
        },
        "authors": {
            "author-1": {
                "cf1": { "firstName": "Joanne", "lastName": "Rowling" }
            },
            "author-2": {
                "cf1": { "firstName": "Herman", "lastName": "Melville" }
            },
            "author-3": {
                "cf1": { "firstName": "Anne", "lastName": "Rice" }
            }
        }
    })
}
