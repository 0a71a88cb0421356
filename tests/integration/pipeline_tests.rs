//! Pipeline Integration Tests
//!
//! Tests loading configuration files from disk and running them through
//! the check and dump entry points.

use std::fs;

use pretty_assertions::assert_eq;

use sql_modelgen::config::{load_config, ModelConfig};
use sql_modelgen::ModelGenError;

use crate::common::TestContext;

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_shop_fixture() {
    let ctx = TestContext::with_fixture("shop");
    let reports = ctx.check_successfully(&["csharp"]);

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.target, "csharp");
    assert_eq!(report.databases, 1);
    assert_eq!(report.schemas, 1);
    assert_eq!(report.tables, 2);
    assert_eq!(report.views, 1);
    assert_eq!(report.columns, 10);
    assert_eq!(report.foreign_keys, 1);
    assert_eq!(report.namespaces, vec!["System"]);
}

#[test]
fn test_check_multiple_targets_keeps_target_order() {
    let ctx = TestContext::with_fixture("multi_db");
    let reports = ctx.check_successfully(&["rust", "csharp"]);

    let targets: Vec<_> = reports.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["rust", "csharp"]);

    assert_eq!(
        reports[0].namespaces,
        vec![
            "chrono::NaiveDate",
            "serde::Deserialize",
            "serde::Serialize",
            "serde_json::Value",
            "uuid::Uuid",
        ]
    );
    assert_eq!(reports[1].namespaces, vec!["System", "System.Text.Json"]);

    for report in &reports {
        assert_eq!(report.databases, 2);
        assert_eq!(report.schemas, 3);
        assert_eq!(report.tables, 3);
        assert_eq!(report.foreign_keys, 2);
    }
}

#[test]
fn test_check_target_aliases() {
    let ctx = TestContext::with_fixture("shop");
    let reports = ctx.check_successfully(&["C#", "rs"]);

    assert_eq!(reports[0].target, "csharp");
    assert_eq!(reports[1].target, "rust");
}

#[test]
fn test_check_unknown_target_fails() {
    let ctx = TestContext::with_fixture("shop");
    let err = ctx.check(&["cobol"]).unwrap_err();

    assert!(format!("{:#}", err).contains("cobol"), "got: {:#}", err);
}

#[test]
fn test_check_unresolved_fk_reports_column_and_segment() {
    let ctx = TestContext::with_fixture("broken_fk");
    let err = ctx.check(&["csharp"]).unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("db.schema1.tableA.b_id"), "got: {}", message);
    assert!(message.contains("\"schema2\""), "got: {}", message);

    let cause = err
        .chain()
        .find_map(|e| e.downcast_ref::<ModelGenError>())
        .expect("a model error should be in the chain");
    assert!(matches!(cause, ModelGenError::ForeignKey { .. }), "got {:?}", cause);
}

#[test]
fn test_check_invalid_json_reports_path() {
    let ctx = TestContext::with_fixture("invalid_json");
    let err = ctx.check(&["csharp"]).unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("model.json"), "got: {}", message);
    assert!(
        matches!(
            err.downcast_ref::<ModelGenError>(),
            Some(ModelGenError::ConfigParse { .. })
        ),
        "got: {}",
        message
    );
}

#[test]
fn test_check_missing_file_fails() {
    let ctx = TestContext::with_fixture("shop");
    fs::remove_file(ctx.config_path()).unwrap();

    let err = ctx.check(&["csharp"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ModelGenError>(),
        Some(ModelGenError::ConfigRead { .. })
    ));
}

// ============================================================================
// Dump
// ============================================================================

#[test]
fn test_dump_writes_output_file() {
    let ctx = TestContext::with_fixture("shop");
    let output = ctx.project_dir.join("normalized.json");

    let json = ctx.dump("csharp", Some(output.clone())).unwrap();

    assert!(output.exists(), "output file should be written");
    assert_eq!(fs::read_to_string(&output).unwrap(), json);
}

#[test]
fn test_dump_makes_inherited_types_explicit() {
    let ctx = TestContext::with_fixture("shop");
    let json = ctx.dump("csharp", None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let order_id = &value["databases"]["shop"]["schemas"]["public"]["tables"]["line_items"]
        ["columns"]["order_id"];
    assert_eq!(order_id["type"], "int");
    assert_eq!(order_id["fk"], "orders.id");
    assert_eq!(order_id["pk"], true);
}

#[test]
fn test_dump_keeps_declaration_order() {
    let ctx = TestContext::with_fixture("shop");
    let json = ctx.dump("csharp", None).unwrap();

    let orders = json.find("\"orders\"").unwrap();
    let line_items = json.find("\"line_items\"").unwrap();
    let views = json.find("\"views\"").unwrap();
    assert!(orders < line_items && line_items < views);
}

#[test]
fn test_dump_is_stable() {
    let ctx = TestContext::with_fixture("multi_db");
    let first = ctx.dump("csharp", None).unwrap();

    // Feed the dump back in; a second dump is identical
    fs::write(ctx.config_path(), &first).unwrap();
    let second = ctx.dump("csharp", None).unwrap();

    assert_eq!(first, second);
    let reparsed: ModelConfig = serde_json::from_str(&second).unwrap();
    assert_eq!(load_config(&ctx.config_path()).unwrap(), reparsed);
}

#[test]
fn test_dump_with_rejecting_target_fails() {
    let ctx = TestContext::with_fixture("shop");
    let original = fs::read_to_string(ctx.config_path()).unwrap();
    fs::write(
        ctx.config_path(),
        original.replace("\"type\": \"text null\"", "\"type\": \"geography\""),
    )
    .unwrap();

    assert!(ctx.dump("csharp", None).is_ok());
    let err = ctx.dump("rust", None).unwrap_err();
    assert!(format!("{:#}", err).contains("shop.public.orders.note"), "got: {:#}", err);
}
