//! Unit tests for the model builder
//!
//! These tests verify the transformation from configuration to the resolved
//! model graph.

use serde_json::{json, Value};

use sql_modelgen::config::ModelConfig;
use sql_modelgen::mapping::CSharpTypeMapper;
use sql_modelgen::model::{ColumnRef, Model, TableRef};
use sql_modelgen::ModelGenError;

mod export_tests;

/// Helper to deserialize a configuration from a JSON value
pub fn config(json: Value) -> ModelConfig {
    serde_json::from_value(json).expect("test configuration should deserialize")
}

/// Helper to build a model with the C# type mapper
pub fn build(json: Value) -> Model {
    sql_modelgen::build_model(&config(json), &CSharpTypeMapper).unwrap()
}

/// Helper to build a model that is expected to fail
pub fn build_err(json: Value) -> ModelGenError {
    sql_modelgen::build_model(&config(json), &CSharpTypeMapper).unwrap_err()
}

/// Wrap a tables object in database "db", schema "public"
pub fn single_schema(tables: Value) -> Value {
    json!({
        "namespace": "App.Models",
        "databases": {
            "db": { "schemas": { "public": { "tables": tables } } }
        }
    })
}

pub fn table(model: &Model, path: &str) -> TableRef {
    model
        .find_table(path)
        .unwrap_or_else(|| panic!("table {} should exist", path))
}

pub fn column(model: &Model, path: &str) -> ColumnRef {
    model
        .find_column(path)
        .unwrap_or_else(|| panic!("column {} should exist", path))
}

/// Raw names of a list of columns
pub fn names(model: &Model, columns: &[ColumnRef]) -> Vec<String> {
    columns.iter().map(|&c| model[c].name.raw.clone()).collect()
}
