// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::balance::compute_balances;
use crate::store;
use anyhow::{Result, bail};
use chrono::Local;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();
    match fmt.as_str() {
        "json" => export_json(conn, out)?,
        "csv" => export_csv(conn, out)?,
        _ => bail!("Unknown format: {} (use json|csv)", fmt),
    }
    println!("Exported data to {}", out);
    Ok(())
}

/// The snapshot dump: raw lists plus the computed summary.
fn export_json(conn: &Connection, out: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let snapshot = store::load_snapshot(conn)?;
    let balances = compute_balances(&snapshot, today);
    // The salary key carries the legacy scalar, not the normalized income.
    let doc = json!({
        "salary": snapshot.legacy_salary.unwrap_or(Decimal::ZERO),
        "regular_expenses": snapshot.regular_expenses,
        "sporadic_expenses": snapshot.sporadic_expenses,
        "pending_loans": snapshot.pending_loans,
        "wishlist": snapshot.wishlist,
        "summary": {
            "total_expenses": balances.total_expenses,
            "base_balance": balances.base_balance,
            "potential_balance": balances.potential_balance,
            "export_date": Local::now().to_rfc3339(),
        },
    });
    std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

/// Flat expense rows, regular and sporadic combined.
fn export_csv(conn: &Connection, out: &str) -> Result<()> {
    let snapshot = store::load_snapshot(conn)?;
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["kind", "description", "amount", "category", "date", "paid"])?;
    for e in &snapshot.regular_expenses {
        wtr.write_record([
            "regular",
            &e.description,
            &e.amount.to_string(),
            &e.category,
            &format!("day {}", e.payment_date),
            if e.paid { "yes" } else { "no" },
        ])?;
    }
    for e in &snapshot.sporadic_expenses {
        wtr.write_record([
            "sporadic",
            &e.description,
            &e.amount.to_string(),
            &e.category,
            &e.date.to_string(),
            "",
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
