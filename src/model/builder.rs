//! Build the model graph from a configuration
//!
//! The build runs in four passes over the configuration:
//!
//! 1. Construct databases, schemas, tables, views and columns in configuration
//!    order, parse column types, collect their namespaces and assign each
//!    table's primary or composite key.
//! 2. Resolve foreign key paths. This is a second full traversal because a
//!    path may name a table declared after the referencing column.
//! 3. Classify each table's data columns.
//! 4. Finalize the namespace list through the type mapper.
//!
//! The first error aborts the build; no partial model is returned.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::graph::{
    Column, ColumnRef, Database, DatabaseRef, Model, Schema, SchemaRef, Table, TableId, TableKey,
    TableKind, TableRef,
};
use super::namespaces::NamespaceSet;
use super::resolve::resolve_fk_path;
use crate::config::{ColumnConfig, DatabaseConfig, ModelConfig, TableConfig};
use crate::error::{ModelGenError, Result};
use crate::mapping::TypeMapper;
use crate::naming::{DatabaseNamers, NamerRegistry, Namers, ScopedName};
use crate::types::SqlType;

/// Build a model using the built-in namers
pub fn build_model(config: &ModelConfig, mapper: &dyn TypeMapper) -> Result<Model> {
    build_model_with(config, mapper, NamerRegistry::builtin())
}

/// Build a model, resolving namer keys through `registry`
pub fn build_model_with(
    config: &ModelConfig,
    mapper: &dyn TypeMapper,
    registry: &NamerRegistry,
) -> Result<Model> {
    let mut builder = ModelBuilder::new(config, mapper, registry)?;
    builder.construct(config)?;
    builder.resolve_foreign_keys(config)?;
    builder.classify_data_columns();
    Ok(builder.finish())
}

/// Per-build state
struct ModelBuilder<'a> {
    mapper: &'a dyn TypeMapper,
    registry: &'a NamerRegistry,
    model: Model,
    namespaces: NamespaceSet,
    /// PK-flagged columns of the table under construction
    pending_ids: Vec<ColumnRef>,
}

impl<'a> ModelBuilder<'a> {
    fn new(
        config: &ModelConfig,
        mapper: &'a dyn TypeMapper,
        registry: &'a NamerRegistry,
    ) -> Result<Self> {
        let mut model = Model::with_capacity(config.counts());
        model.namespace = config.namespace.clone();
        model.database_namers =
            Namers::from_config(&config.database_namers, registry, "database")?;
        Ok(Self {
            mapper,
            registry,
            model,
            namespaces: NamespaceSet::new(),
            pending_ids: Vec::with_capacity(16),
        })
    }

    // ------------------------------------------------------------------
    // Pass 1: construction
    // ------------------------------------------------------------------

    fn construct(&mut self, config: &ModelConfig) -> Result<()> {
        for (db_name, db_config) in &config.databases {
            let db = self.add_database(db_name, db_config)?;
            for (schema_name, schema_config) in &db_config.schemas {
                let schema = self.add_schema(db, schema_name);
                for (table_name, table_config) in &schema_config.tables {
                    self.add_table(schema, TableKind::Table, table_name, table_config)?;
                }
                for (view_name, view_config) in &schema_config.views {
                    self.add_table(schema, TableKind::View, view_name, view_config)?;
                }
            }
        }
        Ok(())
    }

    fn add_database(
        &mut self,
        name: &str,
        config: &DatabaseConfig,
    ) -> Result<DatabaseRef> {
        let namers = DatabaseNamers::from_config(&config.namers, self.registry, name)?;
        Ok(self.model.push_database(Database {
            name: ScopedName::new(name, &self.model.database_namers),
            namers,
            schemas: Vec::with_capacity(config.schemas.len()),
            schemas_by_name: HashMap::with_capacity(config.schemas.len()),
        }))
    }

    fn add_schema(&mut self, db: DatabaseRef, name: &str) -> SchemaRef {
        let name = ScopedName::new(name, &self.model[db].namers.schema);
        self.model.push_schema(Schema {
            database: db,
            name,
            tables: Vec::new(),
            tables_by_name: HashMap::new(),
            views: Vec::new(),
            views_by_name: HashMap::new(),
        })
    }

    fn add_table(
        &mut self,
        schema: SchemaRef,
        kind: TableKind,
        name: &str,
        config: &TableConfig,
    ) -> Result<TableRef> {
        let db = self.model[schema].database;
        let name = ScopedName::new(name, &self.model[db].namers.table);
        let table = self.model.push_table(Table {
            schema,
            kind,
            name,
            columns: Vec::with_capacity(config.columns.len()),
            columns_by_name: HashMap::with_capacity(config.columns.len()),
            pk: None,
            key: None,
            data_columns: Vec::new(),
        });

        for (column_name, column_config) in &config.columns {
            let column = self.add_column(table, column_name, column_config)?;
            if column_config.pk {
                self.pending_ids.push(column);
            }
        }
        self.assign_key(table);
        Ok(table)
    }

    fn add_column(
        &mut self,
        table: TableRef,
        name: &str,
        config: &ColumnConfig,
    ) -> Result<ColumnRef> {
        let name = ScopedName::new(name, &self.model.namers_of(table).column);
        let column = self.model.push_column(Column {
            table,
            name,
            ty: None,
            pk: config.pk,
            fk: None,
        });

        let descriptor = config.type_.as_deref().map(str::trim).unwrap_or("");
        if !descriptor.is_empty() {
            let ty = SqlType::parse(descriptor).map_err(|e| ModelGenError::InvalidType {
                column: self.model.column_path(column),
                descriptor: descriptor.to_string(),
                message: e.to_string(),
            })?;
            self.collect_namespace(column, &ty)?;
            self.model.column_mut(column).ty = Some(ty);
        }
        Ok(column)
    }

    fn collect_namespace(&mut self, column: ColumnRef, ty: &SqlType) -> Result<()> {
        let mapped = self
            .mapper
            .map_type(ty)
            .map_err(|e| ModelGenError::TypeMapping {
                column: self.model.column_path(column),
                source: e,
            })?;
        self.namespaces.insert(&mapped.namespace);
        Ok(())
    }

    /// Turn the buffered PK columns into the table's key: one column becomes
    /// its PK, several become a composite key in declaration order.
    fn assign_key(&mut self, table: TableRef) {
        if self.pending_ids.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_ids);
        let ids: Vec<_> = pending
            .iter()
            .map(|&column| {
                let name = ScopedName::new(
                    &self.model[column].name.raw,
                    &self.model.namers_of(table).id,
                );
                self.model.push_id(TableId { column, name })
            })
            .collect();

        if ids.len() == 1 {
            self.model.table_mut(table).pk = Some(ids[0]);
        } else {
            let raw = format!("{}Key", self.model[table].name.raw);
            let name = ScopedName::new(&raw, &self.model.namers_of(table).key);
            debug!(
                table = %self.model.table_path(table),
                components = ids.len(),
                "composite key"
            );
            let key = self.model.push_key(TableKey { table, name, ids });
            self.model.table_mut(table).key = Some(key);
        }

        self.pending_ids = pending;
        self.pending_ids.clear();
    }

    // ------------------------------------------------------------------
    // Pass 2: foreign keys
    // ------------------------------------------------------------------

    fn resolve_foreign_keys(&mut self, config: &ModelConfig) -> Result<()> {
        for (column, column_config) in self.columns_in_config_order(config) {
            let Some(path) = column_config.fk.as_deref().map(str::trim) else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            self.resolve_foreign_key(column, path)?;
        }
        self.inherit_chained_types()
    }

    fn resolve_foreign_key(&mut self, column: ColumnRef, path: &str) -> Result<()> {
        let table = self.model[column].table;
        let target =
            resolve_fk_path(&self.model, table, path).map_err(|e| ModelGenError::ForeignKey {
                column: self.model.column_path(column),
                source: Box::new(e),
            })?;

        let id = self
            .model
            .key_id_of(target)
            .ok_or_else(|| ModelGenError::FkTargetNotKey {
                column: self.model.column_path(column),
                target: self.model[target].name.raw.clone(),
                table: self.model[self.model[target].table].name.raw.clone(),
            })?;

        debug!(
            column = %self.model.column_path(column),
            target = %self.model.column_path(target),
            "foreign key"
        );
        self.model.column_mut(column).fk = Some(id);
        if self.model[column].ty.is_none() {
            if let Some(ty) = self.model[target].ty.clone() {
                self.collect_namespace(column, &ty)?;
                self.model.column_mut(column).ty = Some(ty);
            }
        }
        Ok(())
    }

    /// An untyped FK column whose target is itself an untyped FK column
    /// takes the type found at the end of the chain. Each chain is walked
    /// once; cycles of untyped columns stay untyped.
    fn inherit_chained_types(&mut self) -> Result<()> {
        let mut settled = HashSet::new();
        for start in self.model.column_refs().collect::<Vec<_>>() {
            let mut chain = Vec::new();
            let mut current = start;
            let ty = loop {
                if let Some(ty) = &self.model[current].ty {
                    break Some(ty.clone());
                }
                if !settled.insert(current) {
                    break None;
                }
                chain.push(current);
                match self.model.fk_target(current) {
                    Some(target) => current = target,
                    None => break None,
                }
            };
            let Some(ty) = ty else {
                continue;
            };
            for column in chain {
                self.collect_namespace(column, &ty)?;
                self.model.column_mut(column).ty = Some(ty.clone());
            }
        }
        Ok(())
    }

    /// Walk the configuration again, pairing each column config with the
    /// column built from it in pass 1. Both sides are in configuration order.
    fn columns_in_config_order<'c>(
        &self,
        config: &'c ModelConfig,
    ) -> Vec<(ColumnRef, &'c ColumnConfig)> {
        let mut out = Vec::new();
        let model = &self.model;
        for (db_config, &db) in config.databases.values().zip(model.databases()) {
            for (schema_config, &schema) in db_config.schemas.values().zip(&model[db].schemas) {
                let schema = &model[schema];
                let tables = schema_config.tables.values().zip(&schema.tables);
                let views = schema_config.views.values().zip(&schema.views);
                for (table_config, &table) in tables.chain(views) {
                    for (column_config, &column) in
                        table_config.columns.values().zip(&model[table].columns)
                    {
                        out.push((column, column_config));
                    }
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Pass 3: data columns
    // ------------------------------------------------------------------

    fn classify_data_columns(&mut self) {
        for table in self.model.table_refs().collect::<Vec<_>>() {
            let data_columns: Vec<_> = self.model[table]
                .columns
                .iter()
                .copied()
                .filter(|&c| !self.model.is_key_column(c) && self.model[c].fk.is_none())
                .collect();
            self.model.table_mut(table).data_columns = data_columns;
        }
    }

    // ------------------------------------------------------------------
    // Pass 4: namespaces
    // ------------------------------------------------------------------

    fn finish(mut self) -> Model {
        let mandatory = self.mapper.mandatory_namespaces(&self.model);
        self.namespaces.extend(mandatory);
        self.model.namespaces = self.namespaces.finish(self.mapper);
        debug!(namespaces = ?self.model.namespaces, "namespaces");
        self.model
    }
}
