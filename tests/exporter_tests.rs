// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bolsillo::models::{Frequency, Priority};
use bolsillo::{cli, commands::exporter, db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn seeded_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    store::insert_income_source(
        &conn,
        &store::NewIncomeSource {
            name: "nomina".into(),
            amount: Decimal::from(1_000_000),
            frequency: Frequency::Monthly,
            payment_day: Some(28),
            is_active: true,
            category: "salario".into(),
        },
    )
    .unwrap();
    store::insert_regular_expense(
        &conn,
        &store::NewRegularExpense {
            description: "arriendo".into(),
            amount: Decimal::from(300_000),
            category: "servicios".into(),
            payment_date: 5,
        },
    )
    .unwrap();
    store::insert_sporadic_expense(
        &conn,
        &store::NewSporadicExpense {
            description: "cine".into(),
            amount: Decimal::from(40_000),
            category: "entretenimiento".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
        },
    )
    .unwrap();
    store::insert_wishlist_item(
        &conn,
        &store::NewWishlistItem {
            item: "parlante".into(),
            price: Decimal::from(150_000),
            priority: Priority::Media,
            category: "tecnologia".into(),
        },
    )
    .unwrap();
    store::set_legacy_salary(&conn, Decimal::from(2_000_000), 3, 2025).unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_json_carries_lists_and_summary() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &conn,
        &[
            "bolsillo", "export", "--format", "json", "--out", &out_str,
        ],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();

    // The salary key is the legacy scalar, untouched by configured sources.
    assert_eq!(parsed["salary"], json!("2000000"));
    assert_eq!(parsed["regular_expenses"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["regular_expenses"][0]["description"], json!("arriendo"));
    assert_eq!(parsed["sporadic_expenses"][0]["amount"], json!("40000"));
    assert_eq!(parsed["pending_loans"].as_array().unwrap().len(), 0);
    assert_eq!(parsed["wishlist"][0]["item"], json!("parlante"));

    let summary = &parsed["summary"];
    assert_eq!(summary["total_expenses"], json!("340000"));
    assert_eq!(summary["base_balance"], json!("660000"));
    // No loans seeded, so the potential balance equals the base.
    assert_eq!(summary["potential_balance"], json!("660000"));
    assert!(summary["export_date"].as_str().unwrap().contains('T'));
}

#[test]
fn export_csv_combines_regular_and_sporadic_rows() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &conn,
        &["bolsillo", "export", "--format", "csv", "--out", &out_str],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "kind,description,amount,category,date,paid");
    assert!(lines[1].starts_with("regular,arriendo,300000,servicios,day 5,no"));
    assert!(lines[2].starts_with("sporadic,cine,40000,entretenimiento,2025-03-08,"));
}

#[test]
fn export_rejects_unknown_format() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(
        &conn,
        &["bolsillo", "export", "--format", "xml", "--out", &out_str],
    );
    assert!(err.is_err());
    assert!(!out_path.exists());
}
