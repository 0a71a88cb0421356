//! Model configuration: the declarative schema description a model is built from

mod loader;
mod types;

pub use loader::{load_config, parse_config};
pub use types::*;
