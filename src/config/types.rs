//! Raw configuration types, as deserialized from JSON.
//!
//! Maps are [`IndexMap`]s so that databases, schemas, tables and columns keep
//! the order they were written in; the model builder walks them in that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of a configuration; may span several databases
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub databases: IndexMap<String, DatabaseConfig>,
    /// Namers for database names themselves
    #[serde(default, skip_serializing_if = "NamersConfig::is_empty")]
    pub database_namers: NamersConfig,
}

/// A pair of namer keys. Missing keys mean "identity".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl NamersConfig {
    pub fn is_empty(&self) -> bool {
        self.sql.is_none() && self.model.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseNamersConfig {
    #[serde(default, skip_serializing_if = "NamersConfig::is_empty")]
    pub table: NamersConfig,
    #[serde(default, skip_serializing_if = "NamersConfig::is_empty")]
    pub id: NamersConfig,
    #[serde(default, skip_serializing_if = "NamersConfig::is_empty")]
    pub key: NamersConfig,
    #[serde(default, skip_serializing_if = "NamersConfig::is_empty")]
    pub column: NamersConfig,
    #[serde(default, skip_serializing_if = "NamersConfig::is_empty")]
    pub schema: NamersConfig,
}

impl DatabaseNamersConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaConfig>,
    #[serde(default, skip_serializing_if = "DatabaseNamersConfig::is_empty")]
    pub namers: DatabaseNamersConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub tables: IndexMap<String, TableConfig>,
    /// Views share the table shape
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub views: IndexMap<String, TableConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub columns: IndexMap<String, ColumnConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// True if the column is the primary key, or one component of it when
    /// several columns of the same table set it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub pk: bool,
    /// Dotted path to the referenced key column: `column`, `table.column`,
    /// `schema.table.column` or `database.schema.table.column`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk: Option<String>,
    /// SQL type descriptor, e.g. `varchar(50) null`. May be omitted on
    /// FK columns, which then take the type of their target.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ModelConfig {
    /// Total entity counts, used to size the model's arenas up front
    pub fn counts(&self) -> EntityCounts {
        let mut counts = EntityCounts {
            databases: self.databases.len(),
            ..Default::default()
        };
        for db in self.databases.values() {
            counts.schemas += db.schemas.len();
            for schema in db.schemas.values() {
                for table in schema.tables.values().chain(schema.views.values()) {
                    counts.tables += 1;
                    counts.columns += table.columns.len();
                    let pks = table.columns.values().filter(|c| c.pk).count();
                    counts.ids += pks;
                    if pks > 1 {
                        counts.keys += 1;
                    }
                }
            }
        }
        counts
    }
}

/// Number of entities of each kind a configuration describes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub databases: usize,
    pub schemas: usize,
    /// Tables and views
    pub tables: usize,
    pub columns: usize,
    pub ids: usize,
    pub keys: usize,
}
