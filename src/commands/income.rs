// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::income::next_payment_date;
use crate::models::Frequency;
use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, parse_decimal, pretty_table};
use crate::validate;
use anyhow::{Result, anyhow, bail};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("toggle", sub)) => toggle(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("tx", sub)) => match sub.subcommand() {
            Some(("add", sub)) => tx_add(conn, sub)?,
            Some(("list", sub)) => tx_list(conn, sub)?,
            Some(("rm", sub)) => tx_rm(conn, sub)?,
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let name = validate::require_text(sub.get_one::<String>("name").unwrap(), "name")?;
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let freq_s = sub.get_one::<String>("frequency").unwrap();
    let frequency = Frequency::parse(freq_s)
        .ok_or_else(|| anyhow!("Unknown frequency '{}', expected weekly|biweekly|monthly|occasional", freq_s))?;
    let payment_day = match sub.get_one::<u32>("day") {
        Some(d) => Some(validate::payment_day(*d)?),
        None => None,
    };
    if frequency == Frequency::Monthly && payment_day.is_none() {
        bail!("Monthly sources need --day");
    }
    if frequency == Frequency::Occasional && payment_day.is_some() {
        bail!("Occasional sources have no payment day");
    }
    let category = validate::require_text(sub.get_one::<String>("category").unwrap(), "category")?;

    let source = store::insert_income_source(
        conn,
        &store::NewIncomeSource {
            name,
            amount,
            frequency,
            payment_day,
            is_active: !sub.get_flag("inactive"),
            category,
        },
    )?;
    let ccy = get_display_currency(conn)?;
    match next_payment_date(&source, today) {
        Some(d) => println!(
            "Added income source #{} '{}' ({} {}), next payment {}",
            source.id,
            source.name,
            fmt_money(&source.amount, &ccy),
            source.frequency.as_str(),
            d
        ),
        None => println!(
            "Added income source #{} '{}' ({} {})",
            source.id,
            source.name,
            fmt_money(&source.amount, &ccy),
            source.frequency.as_str()
        ),
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let sources = store::list_income_sources(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &sources)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = sources
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                fmt_money(&s.amount, &ccy),
                s.frequency.as_str().to_string(),
                s.payment_day.map(|d| d.to_string()).unwrap_or_default(),
                if s.is_active { "yes" } else { "no" }.to_string(),
                next_payment_date(s, today)
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Name", "Amount", "Frequency", "Day", "Active", "Next"],
            rows
        )
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => Some(validate::amount(parse_decimal(s)?)?),
        None => None,
    };
    let day = match sub.get_one::<u32>("day") {
        Some(d) => Some(validate::payment_day(*d)?),
        None => None,
    };
    if amount.is_none() && day.is_none() {
        bail!("Nothing to update; pass --amount and/or --day");
    }
    let source = store::update_income_source(conn, id, amount, day, None)?;
    println!("Updated income source #{} '{}'", source.id, source.name);
    Ok(())
}

fn toggle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let source = store::toggle_income_source(conn, id)?;
    println!(
        "Income source #{} '{}' is now {}",
        source.id,
        source.name,
        if source.is_active { "active" } else { "inactive" }
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_income_source(conn, id)?;
    println!("Deleted income source #{}", id);
    Ok(())
}

fn tx_add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let received_date = match sub.get_one::<String>("date") {
        Some(s) => validate::date(s, today)?,
        None => today,
    };
    let income_source_id = sub.get_one::<i64>("source").copied();
    if let Some(sid) = income_source_id {
        // Fails early when the source does not exist.
        store::get_income_source(conn, sid)?;
    }
    let tx = store::insert_income_transaction(
        conn,
        &store::NewIncomeTransaction {
            income_source_id,
            amount,
            received_date,
            description: sub.get_one::<String>("note").map(|s| validate::sanitize_text(s)),
        },
    )?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Recorded income #{} of {} on {}",
        tx.id,
        fmt_money(&tx.amount, &ccy),
        tx.received_date
    );
    Ok(())
}

fn tx_list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store::list_income_transactions(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = txs
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.received_date.to_string(),
                fmt_money(&t.amount, &ccy),
                t.income_source_id
                    .map(|s| format!("#{}", s))
                    .unwrap_or_else(|| "ad-hoc".to_string()),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Amount", "Source", "Note"], rows)
    );
    Ok(())
}

fn tx_rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_income_transaction(conn, id)?;
    println!("Deleted income transaction #{}", id);
    Ok(())
}
