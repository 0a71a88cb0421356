//! Type mapping: how a target language spells each column type
//!
//! A [`TypeMapper`] is the collaborator the model builder asks for the
//! namespace and type name each column needs. It can also add namespaces that
//! every generated file must import, and choose the order they appear in.

mod csharp;
mod rust;

use thiserror::Error;

pub use csharp::CSharpTypeMapper;
pub use rust::RustTypeMapper;

use crate::error::{ModelGenError, Result};
use crate::model::Model;
use crate::types::SqlType;

/// A type as a target language spells it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelType {
    /// Namespace (module, package, ...) that must be imported; empty if none
    pub namespace: String,
    pub name: String,
}

impl ModelType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// A type that needs no import
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::new("", name)
    }
}

/// A type mapper could not express a column type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MappingError {
    pub message: String,
}

impl MappingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps column types into one target language.
///
/// Implementations must be stateless: the same input always maps to the same
/// output, and one mapper may be shared across threads.
pub trait TypeMapper: Send + Sync {
    /// Short name used to select the target, e.g. `csharp`
    fn name(&self) -> &str;

    fn map_type(&self, ty: &SqlType) -> std::result::Result<ModelType, MappingError>;

    /// Namespaces that must be present regardless of column types. Called once
    /// the model's keys and foreign keys are resolved.
    fn mandatory_namespaces(&self, _model: &Model) -> Vec<String> {
        Vec::new()
    }

    /// Final ordering of the namespaces. Receives them deduplicated and
    /// sorted; the default keeps that order.
    fn organize_namespaces(&self, namespaces: Vec<String>) -> Vec<String> {
        namespaces
    }
}

/// Names accepted by [`target_by_name`]
pub const TARGET_NAMES: &[&str] = &["csharp", "rust"];

/// Look up one of the built-in targets
pub fn target_by_name(name: &str) -> Result<Box<dyn TypeMapper>> {
    match name.to_ascii_lowercase().as_str() {
        "csharp" | "cs" | "c#" => Ok(Box::new(CSharpTypeMapper)),
        "rust" | "rs" => Ok(Box::new(RustTypeMapper)),
        _ => Err(ModelGenError::UnknownTarget {
            name: name.to_string(),
            expected: TARGET_NAMES.join(", "),
        }),
    }
}
