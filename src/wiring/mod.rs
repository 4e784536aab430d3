/// Field wiring: binding mapping descriptors to row fetchers
///
/// This module derives per-field query parameters from the parsed wirings and
/// registers one row fetcher per (type, field) coordinate into an immutable
/// resolution table consumed by the schema layer.

mod binder;
mod fetcher;
mod qualifiers;

pub use binder::{wire, FieldCoordinate, RuntimeWiring, WiringBuilder};
pub use fetcher::{FetchContext, FetchError, RowFetcher, RowFetcherFactory};
pub use qualifiers::derive_qualifiers;
