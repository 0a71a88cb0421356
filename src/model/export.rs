//! Convert a model back into configuration form

use super::graph::{ColumnRef, Model, TableRef};
use super::resolve;
use crate::config::{ColumnConfig, DatabaseConfig, ModelConfig, SchemaConfig, TableConfig};
use crate::mapping::{MappingError, ModelType, TypeMapper};

impl Model {
    /// Shortest FK path from `column` to its target, as it would be written
    /// in configuration. `None` when the column has no foreign key.
    pub fn fk_path(&self, column: ColumnRef) -> Option<String> {
        resolve::fk_path(self, column)
    }

    /// Rebuild a configuration equivalent to the one this model was built
    /// from. Types inherited through foreign keys are written out explicitly
    /// and type descriptors are normalized.
    pub fn to_config(&self) -> ModelConfig {
        let mut config = ModelConfig {
            namespace: self.namespace.clone(),
            database_namers: self.database_namers.to_config(),
            ..Default::default()
        };
        for &db in self.databases() {
            let database = &self[db];
            let mut db_config = DatabaseConfig {
                namers: database.namers.to_config(),
                ..Default::default()
            };
            for &schema in &database.schemas {
                let schema = &self[schema];
                let schema_config = SchemaConfig {
                    tables: schema
                        .tables
                        .iter()
                        .map(|&t| (self[t].name.raw.clone(), self.table_config(t)))
                        .collect(),
                    views: schema
                        .views
                        .iter()
                        .map(|&t| (self[t].name.raw.clone(), self.table_config(t)))
                        .collect(),
                };
                db_config
                    .schemas
                    .insert(schema.name.raw.clone(), schema_config);
            }
            config
                .databases
                .insert(database.name.raw.clone(), db_config);
        }
        config
    }

    fn table_config(&self, table: TableRef) -> TableConfig {
        TableConfig {
            columns: self[table]
                .columns
                .iter()
                .map(|&c| {
                    let column = &self[c];
                    let config = ColumnConfig {
                        pk: column.pk,
                        fk: self.fk_path(c),
                        type_: column.ty.as_ref().map(|ty| ty.to_string()),
                    };
                    (column.name.raw.clone(), config)
                })
                .collect(),
        }
    }

    /// Map every typed column through `mapper`. Safe to call from several
    /// threads at once with different mappers.
    pub fn model_types(
        &self,
        mapper: &dyn TypeMapper,
    ) -> Result<Vec<(ColumnRef, ModelType)>, (ColumnRef, MappingError)> {
        self.column_refs()
            .filter_map(|c| self[c].ty.as_ref().map(|ty| (c, ty)))
            .map(|(c, ty)| mapper.map_type(ty).map(|m| (c, m)).map_err(|e| (c, e)))
            .collect()
    }
}
