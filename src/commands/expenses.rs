// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, parse_decimal, pretty_table};
use crate::validate;
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

pub fn handle_regular(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_regular(conn, sub)?,
        Some(("list", sub)) => list_regular(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("rm", sub)) => rm_regular(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn handle_sporadic(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_sporadic(conn, sub)?,
        Some(("list", sub)) => list_sporadic(conn, sub)?,
        Some(("rm", sub)) => rm_sporadic(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add_regular(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description =
        validate::require_text(sub.get_one::<String>("description").unwrap(), "description")?;
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let payment_date = validate::payment_day(*sub.get_one::<u32>("day").unwrap())?;
    let category = validate::require_text(sub.get_one::<String>("category").unwrap(), "category")?;
    let expense = store::insert_regular_expense(
        conn,
        &store::NewRegularExpense {
            description,
            amount,
            category,
            payment_date,
        },
    )?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Added regular expense #{} '{}' ({}, due day {})",
        expense.id,
        expense.description,
        fmt_money(&expense.amount, &ccy),
        expense.payment_date
    );
    Ok(())
}

fn list_regular(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = store::list_regular_expenses(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = expenses
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.description.clone(),
                fmt_money(&e.amount, &ccy),
                e.category.clone(),
                e.payment_date.to_string(),
                if e.paid { "yes" } else { "no" }.to_string(),
                e.paid_date.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Description", "Amount", "Category", "Day", "Paid", "Paid on"],
            rows
        )
    );
    Ok(())
}

fn pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let today = Local::now().date_naive();
    let expense = store::toggle_regular_expense_paid(conn, id, today)?;
    if expense.paid {
        println!(
            "Marked '{}' paid on {}",
            expense.description,
            expense.paid_date.map(|d| d.to_string()).unwrap_or_default()
        );
    } else {
        println!("Marked '{}' unpaid", expense.description);
    }
    Ok(())
}

fn rm_regular(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_regular_expense(conn, id)?;
    println!("Deleted regular expense #{}", id);
    Ok(())
}

fn add_sporadic(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let description =
        validate::require_text(sub.get_one::<String>("description").unwrap(), "description")?;
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => validate::date(s, today)?,
        None => today,
    };
    let category = validate::require_text(sub.get_one::<String>("category").unwrap(), "category")?;
    let expense = store::insert_sporadic_expense(
        conn,
        &store::NewSporadicExpense {
            description,
            amount,
            category,
            date,
        },
    )?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Added sporadic expense #{} '{}' ({} on {})",
        expense.id,
        expense.description,
        fmt_money(&expense.amount, &ccy),
        expense.date
    );
    Ok(())
}

fn list_sporadic(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = store::list_sporadic_expenses(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = expenses
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.to_string(),
                e.description.clone(),
                fmt_money(&e.amount, &ccy),
                e.category.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Description", "Amount", "Category"], rows)
    );
    Ok(())
}

fn rm_sporadic(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_sporadic_expense(conn, id)?;
    println!("Deleted sporadic expense #{}", id);
    Ok(())
}
