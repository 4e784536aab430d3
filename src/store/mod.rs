mod memory;

pub use memory::{MemoryFetcherFactory, MemoryStore};
