use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowgraphError {
    #[error("wirings resource not found: {0}")]
    ResourceNotFound(String),

    #[error("malformed wirings config: {0}")]
    MalformedConfig(String),

    #[error("failed to construct row fetcher: {0}")]
    ResolverConstruction(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for RowgraphError {
    fn from(err: serde_json::Error) -> Self {
        RowgraphError::MalformedConfig(format!("JSON parse error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, RowgraphError>;
