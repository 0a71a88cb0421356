//! Naming strategies
//!
//! Every entity in the model carries a [`ScopedName`]: the raw name from the
//! configuration plus the names it takes on the SQL side and the model side.
//! Which transform produces each side is chosen per scope (column, id, key,
//! table, schema, database) by a string key looked up in a [`NamerRegistry`].

mod namer;
mod registry;
mod scoped;

pub use namer::{CustomNamer, Namer};
pub use registry::NamerRegistry;
pub use scoped::{DatabaseNamers, Namers, ScopedName};
