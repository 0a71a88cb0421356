//! C# type mapping

use super::{MappingError, ModelType, TypeMapper};
use crate::types::SqlType;

/// Maps column types to C# types
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpTypeMapper;

impl TypeMapper for CSharpTypeMapper {
    fn name(&self) -> &str {
        "csharp"
    }

    fn map_type(&self, ty: &SqlType) -> Result<ModelType, MappingError> {
        let mapped = match ty {
            SqlType::Bool => ModelType::builtin("bool"),
            SqlType::Int { bits } => match bits {
                0..=8 => ModelType::builtin("byte"),
                9..=16 => ModelType::builtin("short"),
                17..=32 => ModelType::builtin("int"),
                33..=64 => ModelType::builtin("long"),
                _ => {
                    return Err(MappingError::new(format!(
                        "int with {} bits not supported",
                        bits
                    )))
                }
            },
            SqlType::Float { mantissa } => match mantissa {
                0..=24 => ModelType::builtin("float"),
                25..=53 => ModelType::builtin("double"),
                _ => {
                    return Err(MappingError::new(format!(
                        "float with {} mantissa bits not supported",
                        mantissa
                    )))
                }
            },
            SqlType::Decimal { .. } => ModelType::builtin("decimal"),
            SqlType::String { .. } => ModelType::builtin("string"),
            SqlType::Bytes { .. } => ModelType::builtin("byte[]"),
            SqlType::Date | SqlType::Time | SqlType::Timestamp => {
                ModelType::new("System", "DateTime")
            }
            SqlType::Uuid => ModelType::new("System", "Guid"),
            SqlType::Json => ModelType::new("System.Text.Json", "JsonElement"),
            SqlType::Other(_) => ModelType::builtin("object"),
            SqlType::Nullable(inner) => {
                let inner = self.map_type(inner)?;
                ModelType::new(inner.namespace, format!("{}?", inner.name))
            }
        };
        Ok(mapped)
    }

    /// `System` and its children first, then everything else
    fn organize_namespaces(&self, namespaces: Vec<String>) -> Vec<String> {
        let (mut system, rest): (Vec<_>, Vec<_>) = namespaces
            .into_iter()
            .partition(|ns| ns == "System" || ns.starts_with("System."));
        system.extend(rest);
        system
    }
}
