//! The resolved model graph
//!
//! Entities live in per-kind arenas owned by [`Model`] and refer to each other
//! through typed indices (`TableRef`, `ColumnRef`, ...). Ownership runs
//! downward through the ordered child lists; every entity also stores the
//! index of its owner, so the graph can be walked both ways without cyclic
//! pointers. A finished model hands out shared references only.

use std::collections::HashMap;
use std::ops::Index;

use crate::naming::{DatabaseNamers, Namers, ScopedName};
use crate::types::SqlType;

macro_rules! entity_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position of the entity in its arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

entity_ref!(
    /// Index of a [`Database`]
    DatabaseRef
);
entity_ref!(
    /// Index of a [`Schema`]
    SchemaRef
);
entity_ref!(
    /// Index of a [`Table`] (tables and views share one arena)
    TableRef
);
entity_ref!(
    /// Index of a [`Column`]
    ColumnRef
);
entity_ref!(
    /// Index of a [`TableId`]
    IdRef
);
entity_ref!(
    /// Index of a [`TableKey`]
    KeyRef
);

#[derive(Debug, Clone)]
pub struct Database {
    pub name: ScopedName,
    pub namers: DatabaseNamers,
    pub schemas: Vec<SchemaRef>,
    pub schemas_by_name: HashMap<String, SchemaRef>,
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub database: DatabaseRef,
    pub name: ScopedName,
    pub tables: Vec<TableRef>,
    pub tables_by_name: HashMap<String, TableRef>,
    pub views: Vec<TableRef>,
    pub views_by_name: HashMap<String, TableRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Table,
    View,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub schema: SchemaRef,
    pub kind: TableKind,
    pub name: ScopedName,
    pub columns: Vec<ColumnRef>,
    pub columns_by_name: HashMap<String, ColumnRef>,
    /// Set when the table has a single-column primary key. Never set
    /// together with `key`.
    pub pk: Option<IdRef>,
    /// Set when the table has a composite primary key. Never set together
    /// with `pk`.
    pub key: Option<KeyRef>,
    /// Columns that are neither key components nor foreign keys, in
    /// declaration order
    pub data_columns: Vec<ColumnRef>,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub table: TableRef,
    pub name: ScopedName,
    /// Declared type, or the type inherited from the FK target
    pub ty: Option<SqlType>,
    pub pk: bool,
    pub fk: Option<IdRef>,
}

/// A key-bearing column, the unit that primary and foreign keys refer to
#[derive(Debug, Clone)]
pub struct TableId {
    pub column: ColumnRef,
    pub name: ScopedName,
}

/// A composite primary key
#[derive(Debug, Clone)]
pub struct TableKey {
    pub table: TableRef,
    pub name: ScopedName,
    /// Components in declaration order
    pub ids: Vec<IdRef>,
}

/// The root of a resolved model; may span several databases.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub namespace: String,
    /// Namespaces the generated code must import, in output order
    pub namespaces: Vec<String>,
    pub database_namers: Namers,
    databases: Vec<DatabaseRef>,
    databases_by_name: HashMap<String, DatabaseRef>,
    arena: Arena,
}

#[derive(Debug, Clone, Default)]
struct Arena {
    databases: Vec<Database>,
    schemas: Vec<Schema>,
    tables: Vec<Table>,
    columns: Vec<Column>,
    ids: Vec<TableId>,
    keys: Vec<TableKey>,
}

impl Model {
    pub fn databases(&self) -> &[DatabaseRef] {
        &self.databases
    }

    pub fn database_by_name(&self, name: &str) -> Option<DatabaseRef> {
        self.databases_by_name.get(name).copied()
    }

    /// Every table and view, in configuration order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.arena.tables.iter()
    }

    pub fn table_refs(&self) -> impl Iterator<Item = TableRef> {
        (0..self.arena.tables.len()).map(TableRef::new)
    }

    pub fn column_refs(&self) -> impl Iterator<Item = ColumnRef> {
        (0..self.arena.columns.len()).map(ColumnRef::new)
    }

    pub fn schema_by_name(&self, database: DatabaseRef, name: &str) -> Option<SchemaRef> {
        self[database].schemas_by_name.get(name).copied()
    }

    pub fn table_by_name(&self, schema: SchemaRef, name: &str) -> Option<TableRef> {
        self[schema].tables_by_name.get(name).copied()
    }

    pub fn view_by_name(&self, schema: SchemaRef, name: &str) -> Option<TableRef> {
        self[schema].views_by_name.get(name).copied()
    }

    pub fn column_by_name(&self, table: TableRef, name: &str) -> Option<ColumnRef> {
        self[table].columns_by_name.get(name).copied()
    }

    /// Look up a table by `database.schema.table`
    pub fn find_table(&self, path: &str) -> Option<TableRef> {
        let mut parts = path.split('.');
        let (db, schema, table) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let db = self.database_by_name(db)?;
        let schema = self.schema_by_name(db, schema)?;
        self.table_by_name(schema, table)
            .or_else(|| self.view_by_name(schema, table))
    }

    /// Look up a column by `database.schema.table.column`
    pub fn find_column(&self, path: &str) -> Option<ColumnRef> {
        let (table, column) = path.rsplit_once('.')?;
        self.column_by_name(self.find_table(table)?, column)
    }

    pub fn database_of(&self, table: TableRef) -> DatabaseRef {
        self[self[table].schema].database
    }

    /// Namers of the database that owns `table`
    pub fn namers_of(&self, table: TableRef) -> &DatabaseNamers {
        &self[self.database_of(table)].namers
    }

    /// `database.schema` using raw names
    pub fn schema_path(&self, schema: SchemaRef) -> String {
        let schema = &self[schema];
        format!("{}.{}", self[schema.database].name.raw, schema.name.raw)
    }

    /// `database.schema.table` using raw names
    pub fn table_path(&self, table: TableRef) -> String {
        let t = &self[table];
        format!("{}.{}", self.schema_path(t.schema), t.name.raw)
    }

    /// `database.schema.table.column` using raw names
    pub fn column_path(&self, column: ColumnRef) -> String {
        let c = &self[column];
        format!("{}.{}", self.table_path(c.table), c.name.raw)
    }

    /// The TableId of `table`'s primary key or composite key that wraps
    /// `column`, if any
    pub fn key_id_of(&self, column: ColumnRef) -> Option<IdRef> {
        let table = &self[self[column].table];
        if let Some(pk) = table.pk {
            if self[pk].column == column {
                return Some(pk);
            }
        }
        table
            .key
            .and_then(|key| self[key].ids.iter().copied().find(|&id| self[id].column == column))
    }

    pub fn is_key_column(&self, column: ColumnRef) -> bool {
        self.key_id_of(column).is_some()
    }

    /// The column a foreign key points at
    pub fn fk_target(&self, column: ColumnRef) -> Option<ColumnRef> {
        self[column].fk.map(|id| self[id].column)
    }

    /// Key components of `table`: its PK, or its composite key's members
    pub fn key_ids(&self, table: TableRef) -> Vec<IdRef> {
        let table = &self[table];
        match (table.pk, table.key) {
            (Some(pk), _) => vec![pk],
            (None, Some(key)) => self[key].ids.clone(),
            (None, None) => Vec::new(),
        }
    }

    // Construction. Only the builder grows the graph.

    pub(crate) fn with_capacity(counts: crate::config::EntityCounts) -> Self {
        Self {
            databases: Vec::with_capacity(counts.databases),
            databases_by_name: HashMap::with_capacity(counts.databases),
            arena: Arena {
                databases: Vec::with_capacity(counts.databases),
                schemas: Vec::with_capacity(counts.schemas),
                tables: Vec::with_capacity(counts.tables),
                columns: Vec::with_capacity(counts.columns),
                ids: Vec::with_capacity(counts.ids),
                keys: Vec::with_capacity(counts.keys),
            },
            ..Default::default()
        }
    }

    pub(crate) fn push_database(&mut self, database: Database) -> DatabaseRef {
        let r = DatabaseRef::new(self.arena.databases.len());
        self.databases.push(r);
        self.databases_by_name.insert(database.name.raw.clone(), r);
        self.arena.databases.push(database);
        r
    }

    pub(crate) fn push_schema(&mut self, schema: Schema) -> SchemaRef {
        let r = SchemaRef::new(self.arena.schemas.len());
        let db = &mut self.arena.databases[schema.database.index()];
        db.schemas.push(r);
        db.schemas_by_name.insert(schema.name.raw.clone(), r);
        self.arena.schemas.push(schema);
        r
    }

    pub(crate) fn push_table(&mut self, table: Table) -> TableRef {
        let r = TableRef::new(self.arena.tables.len());
        let schema = &mut self.arena.schemas[table.schema.index()];
        let (list, by_name) = match table.kind {
            TableKind::Table => (&mut schema.tables, &mut schema.tables_by_name),
            TableKind::View => (&mut schema.views, &mut schema.views_by_name),
        };
        list.push(r);
        by_name.insert(table.name.raw.clone(), r);
        self.arena.tables.push(table);
        r
    }

    pub(crate) fn push_column(&mut self, column: Column) -> ColumnRef {
        let r = ColumnRef::new(self.arena.columns.len());
        let table = &mut self.arena.tables[column.table.index()];
        table.columns.push(r);
        table.columns_by_name.insert(column.name.raw.clone(), r);
        self.arena.columns.push(column);
        r
    }

    pub(crate) fn push_id(&mut self, id: TableId) -> IdRef {
        let r = IdRef::new(self.arena.ids.len());
        self.arena.ids.push(id);
        r
    }

    pub(crate) fn push_key(&mut self, key: TableKey) -> KeyRef {
        let r = KeyRef::new(self.arena.keys.len());
        self.arena.keys.push(key);
        r
    }

    pub(crate) fn table_mut(&mut self, table: TableRef) -> &mut Table {
        &mut self.arena.tables[table.index()]
    }

    pub(crate) fn column_mut(&mut self, column: ColumnRef) -> &mut Column {
        &mut self.arena.columns[column.index()]
    }
}

macro_rules! arena_index {
    ($r:ty => $t:ty, $field:ident) => {
        impl Index<$r> for Model {
            type Output = $t;

            fn index(&self, r: $r) -> &$t {
                &self.arena.$field[r.index()]
            }
        }
    };
}

arena_index!(DatabaseRef => Database, databases);
arena_index!(SchemaRef => Schema, schemas);
arena_index!(TableRef => Table, tables);
arena_index!(ColumnRef => Column, columns);
arena_index!(IdRef => TableId, ids);
arena_index!(KeyRef => TableKey, keys);
