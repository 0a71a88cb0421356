//! Model graph building

mod builder;
mod export;
mod graph;
mod namespaces;
mod resolve;

pub use builder::{build_model, build_model_with};
pub use graph::*;
pub use namespaces::NamespaceSet;
pub use resolve::resolve_fk_path;
