pub mod config;
pub mod error;
pub mod schema;
pub mod store;
pub mod wiring;

// Re-export commonly used types
pub use config::{load_wirings, WiringMetadata};
pub use error::{Result, RowgraphError};
pub use store::{MemoryFetcherFactory, MemoryStore};
pub use wiring::{wire, FieldCoordinate, RuntimeWiring, WiringBuilder};
