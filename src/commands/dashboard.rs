// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{Snapshot, derive_view_model};
use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let snapshot = store::load_snapshot(conn)?;
    let vm = derive_view_model(&snapshot, today);

    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &vm)? {
        return Ok(());
    }

    let ccy = get_display_currency(conn)?;
    let b = &vm.balances;
    println!(
        "{}",
        pretty_table(
            &["", "Amount"],
            vec![
                vec!["Monthly income".into(), fmt_money(&b.monthly_income, &ccy)],
                vec![
                    "Received this month".into(),
                    fmt_money(&b.actual_income_this_month, &ccy),
                ],
                vec![
                    "Regular expenses (unpaid)".into(),
                    fmt_money(&b.total_regular_expenses, &ccy),
                ],
                vec![
                    "Sporadic expenses".into(),
                    fmt_money(&b.total_sporadic_expenses, &ccy),
                ],
                vec![
                    "Credit payments".into(),
                    fmt_money(&b.total_monthly_credit_payments, &ccy),
                ],
                vec!["Total expenses".into(), fmt_money(&b.total_expenses, &ccy)],
                vec!["Base balance".into(), fmt_money(&b.base_balance, &ccy)],
                vec![
                    "Expected loan recovery".into(),
                    fmt_money(&b.expected_loans, &ccy),
                ],
                vec![
                    "Potential balance".into(),
                    fmt_money(&b.potential_balance, &ccy),
                ],
            ],
        )
    );

    if !vm.upcoming_payments.is_empty() {
        println!("\nDue in the next 7 days:");
        let rows = vm
            .upcoming_payments
            .iter()
            .map(|e| {
                vec![
                    e.description.clone(),
                    fmt_money(&e.amount, &ccy),
                    format!("day {}", e.payment_date),
                    if e.paid { "paid" } else { "unpaid" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Expense", "Amount", "Due", "State"], rows)
        );
    }

    if !vm.upcoming_incomes.is_empty() {
        println!("\nIncome expected in the next 7 days:");
        let rows = vm
            .upcoming_incomes
            .iter()
            .map(|u| {
                vec![
                    u.source.name.clone(),
                    fmt_money(&u.source.amount, &ccy),
                    u.date.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Source", "Amount", "Date"], rows));
    }

    if !vm.upcoming_installments.is_empty() {
        println!("\nInstallments due in the next 7 days:");
        let rows = vm
            .upcoming_installments
            .iter()
            .map(|i| {
                vec![
                    format!("credit #{}", i.credit_id),
                    i.installment_number.to_string(),
                    fmt_money(&i.amount, &ccy),
                    i.due_date.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Credit", "Nr", "Amount", "Due"], rows));
    }

    if !vm.wishlist.is_empty() {
        println!("\nWishlist:");
        let rows = vm
            .wishlist
            .iter()
            .map(|a| {
                vec![
                    a.item.item.clone(),
                    fmt_money(&a.item.price, &ccy),
                    a.item.priority.as_str().to_string(),
                    if a.affordable { "yes" } else { "no" }.to_string(),
                    format!("{}%", a.progress.round_dp(0)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Item", "Price", "Priority", "Affordable", "Progress"], rows)
        );
    }

    let by_category = sporadic_by_category(&snapshot);
    if !by_category.is_empty() {
        println!("\nSporadic spending by category:");
        let rows = by_category
            .into_iter()
            .map(|(cat, total)| vec![cat, fmt_money(&total, &ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }

    Ok(())
}

fn sporadic_by_category(snapshot: &Snapshot) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in &snapshot.sporadic_expenses {
        *totals.entry(e.category.clone()).or_default() += e.amount;
    }
    totals
}
