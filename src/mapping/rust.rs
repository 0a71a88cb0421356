//! Rust type mapping

use super::{MappingError, ModelType, TypeMapper};
use crate::model::Model;
use crate::types::SqlType;

/// Maps column types to Rust types, using chrono, uuid, rust_decimal and
/// serde_json for the kinds std has no type for.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn name(&self) -> &str {
        "rust"
    }

    fn map_type(&self, ty: &SqlType) -> Result<ModelType, MappingError> {
        let mapped = match ty {
            SqlType::Bool => ModelType::builtin("bool"),
            SqlType::Int { bits } => match bits {
                0..=8 => ModelType::builtin("i8"),
                9..=16 => ModelType::builtin("i16"),
                17..=32 => ModelType::builtin("i32"),
                33..=64 => ModelType::builtin("i64"),
                _ => ModelType::builtin("i128"),
            },
            SqlType::Float { mantissa } => match mantissa {
                0..=24 => ModelType::builtin("f32"),
                25..=53 => ModelType::builtin("f64"),
                _ => {
                    return Err(MappingError::new(format!(
                        "float with {} mantissa bits not supported",
                        mantissa
                    )))
                }
            },
            SqlType::Decimal { .. } => ModelType::new("rust_decimal::Decimal", "Decimal"),
            SqlType::String { .. } => ModelType::builtin("String"),
            SqlType::Bytes { .. } => ModelType::builtin("Vec<u8>"),
            SqlType::Date => ModelType::new("chrono::NaiveDate", "NaiveDate"),
            SqlType::Time => ModelType::new("chrono::NaiveTime", "NaiveTime"),
            SqlType::Timestamp => ModelType::new("chrono::NaiveDateTime", "NaiveDateTime"),
            SqlType::Uuid => ModelType::new("uuid::Uuid", "Uuid"),
            SqlType::Json => ModelType::new("serde_json::Value", "Value"),
            SqlType::Other(text) => {
                return Err(MappingError::new(format!("no Rust type for {:?}", text)))
            }
            SqlType::Nullable(inner) => {
                let inner = self.map_type(inner)?;
                ModelType::new(inner.namespace, format!("Option<{}>", inner.name))
            }
        };
        Ok(mapped)
    }

    /// Every generated struct derives serde's traits
    fn mandatory_namespaces(&self, model: &Model) -> Vec<String> {
        if model.tables().next().is_none() {
            return Vec::new();
        }
        vec!["serde::Deserialize".into(), "serde::Serialize".into()]
    }

    /// `std` paths first, then crates
    fn organize_namespaces(&self, namespaces: Vec<String>) -> Vec<String> {
        let (mut std_paths, crates): (Vec<_>, Vec<_>) = namespaces
            .into_iter()
            .partition(|ns| ns.starts_with("std::"));
        std_paths.extend(crates);
        std_paths
    }
}
