mod types;

pub use types::WiringMetadata;

use crate::error::{Result, RowgraphError};
use std::fs;
use std::io::ErrorKind;

/// Load field wirings from a JSON file.
///
/// The file must contain a JSON array of mapping records; input ordering is
/// preserved because later entries overwrite earlier ones during wiring.
pub fn load_wirings(path: &str) -> Result<Vec<WiringMetadata>> {
    tracing::info!("Loading wirings file: {}", path);

    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RowgraphError::ResourceNotFound(path.to_string()),
        _ => RowgraphError::Io(e),
    })?;

    let mappings: Vec<WiringMetadata> = serde_json::from_str(&contents)?;

    for mapping in &mappings {
        tracing::info!("parsed wiring: {:?}", mapping);
    }

    Ok(mappings)
}

/// Save field wirings to a JSON file
pub fn save_wirings(mappings: &[WiringMetadata], path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(mappings)
        .map_err(|e| RowgraphError::Serialization(format!("JSON serialization error: {}", e)))?;

    fs::write(path, json)
        .map_err(|e| RowgraphError::Config(format!("Failed to write wirings file '{}': {}", path, e)))?;

    Ok(())
}
