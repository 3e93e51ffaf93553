// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::engine::wishlist::annotate;
use crate::models::Priority;
use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, parse_decimal, pretty_table};
use crate::validate;
use anyhow::{Result, anyhow};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("buy", sub)) => buy(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let item = validate::require_text(sub.get_one::<String>("item").unwrap(), "item")?;
    let price = validate::amount(parse_decimal(sub.get_one::<String>("price").unwrap())?)?;
    let priority_s = sub.get_one::<String>("priority").unwrap();
    let priority = Priority::parse(priority_s)
        .ok_or_else(|| anyhow!("Unknown priority '{}', expected alta|media|baja", priority_s))?;
    let category = validate::require_text(sub.get_one::<String>("category").unwrap(), "category")?;
    let wish = store::insert_wishlist_item(
        conn,
        &store::NewWishlistItem {
            item,
            price,
            priority,
            category,
        },
    )?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Added wish #{} '{}' ({}, {})",
        wish.id,
        wish.item,
        fmt_money(&wish.price, &ccy),
        wish.priority.as_str()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let snapshot = store::load_snapshot(conn)?;
    let balances = engine::balance::compute_balances(&snapshot, today);
    let items = annotate(
        &snapshot.wishlist,
        balances.base_balance,
        balances.potential_balance,
    );
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = items
        .iter()
        .map(|a| {
            vec![
                a.item.id.to_string(),
                a.item.item.clone(),
                fmt_money(&a.item.price, &ccy),
                a.item.priority.as_str().to_string(),
                a.item.category.clone(),
                if a.affordable { "yes" } else { "no" }.to_string(),
                if a.affordable_without_loans { "yes" } else { "no" }.to_string(),
                format!("{}%", a.progress.round_dp(0)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Item", "Price", "Priority", "Category", "Affordable", "W/o loans", "Progress"],
            rows
        )
    );
    Ok(())
}

fn buy(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let id = *sub.get_one::<i64>("id").unwrap();
    let actual_price = match sub.get_one::<String>("price") {
        Some(s) => Some(validate::amount(parse_decimal(s)?)?),
        None => None,
    };
    let category = match sub.get_one::<String>("category") {
        Some(s) => Some(validate::require_text(s, "category")?),
        None => None,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => Some(validate::date(s, today)?),
        None => None,
    };
    let mut snapshot = store::load_snapshot(conn)?;
    let (item, expense, _plan) =
        store::purchase_wishlist_item(conn, id, actual_price, category, date, today)?;
    // Patch the snapshot we already hold instead of reloading.
    snapshot.patch_remove_wish(item.id);
    snapshot.patch_insert_sporadic(expense.clone());
    let balances = engine::balance::compute_balances(&snapshot, today);
    let ccy = get_display_currency(conn)?;
    println!(
        "Purchased '{}' for {}, recorded as sporadic expense #{}",
        item.item,
        fmt_money(&expense.amount, &ccy),
        expense.id
    );
    println!("Base balance is now {}", fmt_money(&balances.base_balance, &ccy));
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_wishlist_item(conn, id)?;
    println!("Deleted wish #{}", id);
    Ok(())
}
