//! Error types for sql-modelgen

use std::path::PathBuf;
use thiserror::Error;

use crate::mapping::MappingError;

/// Errors that can occur while loading a configuration or building a model
#[derive(Error, Debug)]
pub enum ModelGenError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown namer {key:?} requested for {scope} names")]
    UnknownNamer { key: String, scope: String },

    #[error("Column {column} has an invalid type {descriptor:?}: {message}")]
    InvalidType {
        column: String,
        descriptor: String,
        message: String,
    },

    #[error("Failed to determine model type of column {column}: {source}")]
    TypeMapping {
        column: String,
        #[source]
        source: MappingError,
    },

    #[error("{path:?} is not a foreign key path (expected at most 3 dots)")]
    MalformedFkPath { path: String },

    #[error("Failed to get {segment:?} from {searched}")]
    UnresolvedSegment { segment: String, searched: String },

    #[error("Failed to initialize column {column} FK: {source}")]
    ForeignKey {
        column: String,
        #[source]
        source: Box<ModelGenError>,
    },

    #[error("Column {column} FK target {target:?} is not a key within its table {table:?}")]
    FkTargetNotKey {
        column: String,
        target: String,
        table: String,
    },

    #[error("Unknown target {name:?} (expected one of: {expected})")]
    UnknownTarget { name: String, expected: String },
}

pub type Result<T> = std::result::Result<T, ModelGenError>;
