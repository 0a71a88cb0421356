//! sql-modelgen: resolve declarative SQL schema descriptions into a model graph
//!
//! A configuration describes databases, schemas, tables and columns, with
//! primary keys flagged per column and foreign keys written as dotted paths.
//! This library turns it into a cross-linked [`model::Model`] with every
//! name run through its scope's naming convention, every key grouped and
//! every foreign key resolved, ready for a code generator to walk.

pub mod config;
pub mod error;
pub mod mapping;
pub mod model;
pub mod naming;
pub mod types;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::info;

pub use error::ModelGenError;
pub use mapping::{target_by_name, ModelType, TypeMapper};
pub use model::{build_model, build_model_with, Model};

use model::TableKind;

/// Options for checking a configuration
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Path to the JSON configuration
    pub config_path: PathBuf,
    /// Targets to check the configuration against (e.g., "csharp")
    pub targets: Vec<String>,
}

/// Outcome of building a configuration for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub target: String,
    pub databases: usize,
    pub schemas: usize,
    pub tables: usize,
    pub views: usize,
    pub columns: usize,
    pub foreign_keys: usize,
    pub namespaces: Vec<String>,
}

impl CheckReport {
    fn new(target: &str, model: &Model) -> Self {
        let mut report = Self {
            target: target.to_string(),
            databases: model.databases().len(),
            schemas: 0,
            tables: 0,
            views: 0,
            columns: 0,
            foreign_keys: 0,
            namespaces: model.namespaces.clone(),
        };
        for &db in model.databases() {
            report.schemas += model[db].schemas.len();
        }
        for table in model.tables() {
            match table.kind {
                TableKind::Table => report.tables += 1,
                TableKind::View => report.views += 1,
            }
        }
        for column in model.column_refs() {
            report.columns += 1;
            if model[column].fk.is_some() {
                report.foreign_keys += 1;
            }
        }
        report
    }
}

/// Build the configuration once per target, in parallel
pub fn check_model(options: &CheckOptions) -> Result<Vec<CheckReport>> {
    info!(config = %options.config_path.display(), "checking configuration");
    let config = config::load_config(&options.config_path)?;

    let reports = options
        .targets
        .par_iter()
        .map(|target| -> Result<CheckReport> {
            let mapper = target_by_name(target)?;
            let model = build_model(&config, mapper.as_ref())
                .with_context(|| format!("failed to build model for target {}", target))?;
            let report = CheckReport::new(mapper.name(), &model);
            info!(
                target = %report.target,
                tables = report.tables,
                columns = report.columns,
                "model built"
            );
            Ok(report)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(reports)
}

/// Options for dumping a normalized configuration
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Path to the JSON configuration
    pub config_path: PathBuf,
    /// Target whose type mapper validates column types
    pub target: String,
    /// Where to also write the normalized configuration
    pub output_path: Option<PathBuf>,
}

/// Build the model and write it back out as configuration, with FK paths
/// shortened, inherited types made explicit and type descriptors normalized
pub fn dump_config(options: &DumpOptions) -> Result<String> {
    let config = config::load_config(&options.config_path)?;
    let mapper = target_by_name(&options.target)?;
    let model = build_model(&config, mapper.as_ref())?;

    let json = serde_json::to_string_pretty(&model.to_config())
        .context("failed to serialize configuration")?;

    if let Some(path) = &options.output_path {
        fs::write(path, &json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(output = %path.display(), "configuration written");
    }
    Ok(json)
}
