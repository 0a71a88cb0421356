//! Export Tests
//!
//! Tests for writing a model back out as configuration: shortest FK paths,
//! explicit inherited types and normalized type descriptors.

use pretty_assertions::assert_eq;
use serde_json::json;

use sql_modelgen::config::ColumnConfig;

use super::{build, column, config, single_schema};

#[test]
fn test_fk_path_is_shortest_qualification() {
    let model = build(json!({
        "databases": {
            "sales": { "schemas": {
                "public": { "tables": {
                    "orders": { "columns": {
                        "id": { "pk": true, "type": "int" },
                        "parent_id": { "fk": "id" },
                        "customer_id": { "fk": "crm.public.customers.id" }
                    } },
                    "line_items": { "columns": {
                        "order_id": { "fk": "sales.public.orders.id" }
                    } }
                } },
                "archive": { "tables": {
                    "old_orders": { "columns": { "id": { "fk": "public.orders.id" } } }
                } }
            } },
            "crm": { "schemas": { "public": { "tables": {
                "customers": { "columns": { "id": { "pk": true, "type": "uuid" } } }
            } } } }
        }
    }));

    let path = |p: &str| model.fk_path(column(&model, p));
    assert_eq!(path("sales.public.orders.parent_id").as_deref(), Some("id"));
    assert_eq!(
        path("sales.public.orders.customer_id").as_deref(),
        Some("crm.public.customers.id")
    );
    // Over-qualified in the configuration, shortened on the way out
    assert_eq!(path("sales.public.line_items.order_id").as_deref(), Some("orders.id"));
    assert_eq!(
        path("sales.archive.old_orders.id").as_deref(),
        Some("public.orders.id")
    );
    assert_eq!(path("sales.public.orders.id"), None);
}

#[test]
fn test_to_config_makes_inherited_types_explicit() {
    let model = build(single_schema(json!({
        "orders": { "columns": { "id": { "pk": true, "type": "INT" } } },
        "line_items": { "columns": {
            "order_id": { "fk": "orders.id" },
            "price": { "type": "NUMERIC(10, 2) NULL" }
        } }
    })));

    let exported = model.to_config();
    let items = &exported.databases["db"].schemas["public"].tables["line_items"];
    assert_eq!(
        items.columns["order_id"],
        ColumnConfig {
            pk: false,
            fk: Some("orders.id".into()),
            type_: Some("int".into()),
        }
    );
    assert_eq!(
        items.columns["price"].type_.as_deref(),
        Some("decimal(10,2) null")
    );
}

#[test]
fn test_to_config_serializes_compactly() {
    let model = build(single_schema(json!({
        "orders": { "columns": {
            "id": { "pk": true, "type": "int" },
            "note": { "type": "text" }
        } }
    })));

    let value = serde_json::to_value(model.to_config()).unwrap();
    assert_eq!(
        value,
        json!({
            "namespace": "App.Models",
            "databases": { "db": { "schemas": { "public": { "tables": {
                "orders": { "columns": {
                    "id": { "pk": true, "type": "int" },
                    "note": { "type": "text" }
                } }
            } } } } }
        })
    );
}

#[test]
fn test_to_config_keeps_namers_and_views() {
    let source = json!({
        "namespace": "Acme",
        "database_namers": { "model": "pascal" },
        "databases": { "db": {
            "namers": { "table": { "sql": "snake" }, "column": { "model": "camel" } },
            "schemas": { "reporting": {
                "tables": {},
                "views": { "totals": { "columns": { "total": { "type": "bigint" } } } }
            } }
        } }
    });
    let model = build(source.clone());

    assert_eq!(model.to_config(), config(source));
}

#[test]
fn test_exported_config_rebuilds_the_same_model() {
    let model = build(json!({
        "databases": {
            "sales": { "schemas": { "public": { "tables": {
                "orders": { "columns": {
                    "id": { "pk": true, "type": "int" },
                    "customer_id": { "fk": "crm.public.customers.id" }
                } },
                "line_items": { "columns": {
                    "order_id": { "pk": true, "fk": "orders.id" },
                    "line_no": { "pk": true, "type": "smallint" }
                } }
            } } } },
            "crm": { "schemas": { "public": { "tables": {
                "customers": { "columns": { "id": { "pk": true, "type": "uuid" } } }
            } } } }
        }
    }));

    let exported = model.to_config();
    let rebuilt =
        sql_modelgen::build_model(&exported, &sql_modelgen::mapping::CSharpTypeMapper).unwrap();

    assert_eq!(rebuilt.to_config(), exported);
    assert_eq!(rebuilt.namespaces, model.namespaces);
}
