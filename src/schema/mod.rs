/// GraphQL schema assembly from a finalized wiring
///
/// Turns the field-resolution table produced by the wiring pass into an
/// executable async-graphql dynamic schema.

mod builder;
mod scalars;

pub use builder::build_schema;
pub use scalars::row_scalar;
