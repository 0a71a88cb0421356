//! Foreign key path resolution
//!
//! An FK path names its target column with just enough qualification to
//! reach it from the referencing table:
//!
//! | path                         | search starts at         |
//! |------------------------------|--------------------------|
//! | `column`                     | the referencing table    |
//! | `table.column`               | the table's schema       |
//! | `schema.table.column`        | the schema's database    |
//! | `database.schema.table.column` | the model root         |
//!
//! From the start, each segment is an exact by-name lookup one level down.

use super::graph::{ColumnRef, DatabaseRef, Model, SchemaRef, TableRef};
use crate::error::{ModelGenError, Result};

/// Position reached while walking a path downward
#[derive(Debug, Clone, Copy)]
enum Node {
    Root,
    Database(DatabaseRef),
    Schema(SchemaRef),
    Table(TableRef),
    Column(ColumnRef),
}

/// Resolve `path` relative to the table `from`, returning the column it names
pub fn resolve_fk_path(model: &Model, from: TableRef, path: &str) -> Result<ColumnRef> {
    let hops = path.matches('.').count();
    let start = match hops {
        0 => Node::Table(from),
        1 => Node::Schema(model[from].schema),
        2 => Node::Database(model.database_of(from)),
        3 => Node::Root,
        _ => {
            return Err(ModelGenError::MalformedFkPath {
                path: path.to_string(),
            })
        }
    };

    let mut node = start;
    for segment in path.split('.') {
        let next = match node {
            Node::Root => model.database_by_name(segment).map(Node::Database),
            Node::Database(db) => model.schema_by_name(db, segment).map(Node::Schema),
            Node::Schema(schema) => model.table_by_name(schema, segment).map(Node::Table),
            Node::Table(table) => model.column_by_name(table, segment).map(Node::Column),
            Node::Column(_) => None,
        };
        node = next.ok_or_else(|| ModelGenError::UnresolvedSegment {
            segment: segment.to_string(),
            searched: describe(model, node),
        })?;
    }

    match node {
        Node::Column(column) => Ok(column),
        // The hop count always leaves exactly enough segments to reach a column
        other => Err(ModelGenError::UnresolvedSegment {
            segment: path.to_string(),
            searched: describe(model, other),
        }),
    }
}

fn describe(model: &Model, node: Node) -> String {
    match node {
        Node::Root => "the model root".to_string(),
        Node::Database(db) => format!("database {:?}", model[db].name.raw),
        Node::Schema(schema) => format!("schema {:?}", model.schema_path(schema)),
        Node::Table(table) => format!("table {:?}", model.table_path(table)),
        Node::Column(column) => format!("column {:?}", model.column_path(column)),
    }
}

/// The shortest FK path from `column` to its foreign key target: prefixes
/// shared with the referencing column are left off.
pub fn fk_path(model: &Model, column: ColumnRef) -> Option<String> {
    let target = model.fk_target(column)?;
    let target_column = &model[target];
    let target_table = &model[target_column.table];
    let target_schema = &model[target_table.schema];
    let target_db = &model[target_schema.database];

    let own_table = model[column].table;
    let own_schema = model[own_table].schema;
    let own_db = model[own_schema].database;

    let mut parts = vec![target_column.name.raw.as_str()];
    if target_column.table != own_table {
        parts.push(&target_table.name.raw);
        if target_table.schema != own_schema {
            parts.push(&target_schema.name.raw);
            if target_schema.database != own_db {
                parts.push(&target_db.name.raw);
            }
        }
    }
    parts.reverse();
    Some(parts.join("."))
}
