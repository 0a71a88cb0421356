//! Scoped names and the per-scope namer pairs that produce them

use super::{Namer, NamerRegistry};
use crate::config::{DatabaseNamersConfig, NamersConfig};
use crate::error::Result;

/// A name as written in the configuration, plus its SQL and model forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedName {
    pub raw: String,
    pub sql: String,
    pub model: String,
}

impl ScopedName {
    pub fn new(raw: &str, namers: &Namers) -> Self {
        Self {
            raw: raw.to_string(),
            sql: namers.sql.apply(raw),
            model: namers.model.apply(raw),
        }
    }
}

/// The SQL-facing and model-facing namers of one scope
#[derive(Debug, Clone, Default)]
pub struct Namers {
    pub sql: Namer,
    pub model: Namer,
}

impl Namers {
    pub fn from_config(
        config: &NamersConfig,
        registry: &NamerRegistry,
        scope: &str,
    ) -> Result<Self> {
        Ok(Self {
            sql: registry.resolve(config.sql.as_deref(), || format!("{} sql", scope))?,
            model: registry.resolve(config.model.as_deref(), || format!("{} model", scope))?,
        })
    }

    pub fn to_config(&self) -> NamersConfig {
        let key = |namer: &Namer| (!namer.is_identity()).then(|| namer.key().to_string());
        NamersConfig {
            sql: key(&self.sql),
            model: key(&self.model),
        }
    }
}

/// Namers for every scope below a database
#[derive(Debug, Clone, Default)]
pub struct DatabaseNamers {
    pub column: Namers,
    pub id: Namers,
    pub key: Namers,
    pub table: Namers,
    pub schema: Namers,
}

impl DatabaseNamers {
    /// `database` is the raw database name, used to qualify unknown-key errors
    pub fn from_config(
        config: &DatabaseNamersConfig,
        registry: &NamerRegistry,
        database: &str,
    ) -> Result<Self> {
        let scope = |what: &str| format!("database {:?} {}", database, what);
        Ok(Self {
            column: Namers::from_config(&config.column, registry, &scope("column"))?,
            id: Namers::from_config(&config.id, registry, &scope("id"))?,
            key: Namers::from_config(&config.key, registry, &scope("key"))?,
            table: Namers::from_config(&config.table, registry, &scope("table"))?,
            schema: Namers::from_config(&config.schema, registry, &scope("schema"))?,
        })
    }

    pub fn to_config(&self) -> DatabaseNamersConfig {
        DatabaseNamersConfig {
            column: self.column.to_config(),
            id: self.id.to_config(),
            key: self.key.to_config(),
            table: self.table.to_config(),
            schema: self.schema.to_config(),
        }
    }
}
