// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::loans::loan_views;
use crate::models::LoanStatus;
use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, parse_decimal, pretty_table};
use crate::validate;
use anyhow::{Result, anyhow, bail};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("extend", sub)) => extend(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let description =
        validate::require_text(sub.get_one::<String>("description").unwrap(), "description")?;
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let probability = validate::percentage(*sub.get_one::<u32>("probability").unwrap())?;
    let expected_date = match sub.get_one::<String>("expected") {
        Some(s) => Some(validate::date(s, today)?),
        None => None,
    };
    let loan = store::insert_pending_loan(
        conn,
        &store::NewPendingLoan {
            description,
            amount,
            probability,
            expected_date,
        },
    )?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Added loan #{} '{}' ({}, {}% recovery)",
        loan.id,
        loan.description,
        fmt_money(&loan.amount, &ccy),
        loan.probability
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let views = loan_views(&store::list_pending_loans(conn)?, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &views)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = views
        .iter()
        .map(|v| {
            vec![
                v.loan.id.to_string(),
                v.loan.description.clone(),
                fmt_money(&v.loan.amount, &ccy),
                fmt_money(&v.remaining, &ccy),
                format!("{}%", v.loan.probability),
                v.loan
                    .expected_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                v.derived_status.as_str().to_string(),
                format!("{}%", v.progress.round_dp(0)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Description", "Amount", "Remaining", "Prob", "Expected", "Status", "Progress"],
            rows
        )
    );
    Ok(())
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let payment_date = match sub.get_one::<String>("date") {
        Some(s) => validate::date(s, today)?,
        None => today,
    };
    let note = sub.get_one::<String>("note").map(|s| validate::sanitize_text(s));
    let payment = store::add_loan_payment(conn, id, amount, payment_date, note)?;

    // Payments move the loan's derived status; show it from a fresh read.
    let loan = store::get_pending_loan(conn, id)?;
    let views = loan_views(std::slice::from_ref(&loan), today);
    let ccy = get_display_currency(conn)?;
    println!(
        "Recorded payment #{} of {} on loan '{}', {} remaining (status {})",
        payment.id,
        fmt_money(&payment.amount, &ccy),
        loan.description,
        fmt_money(&views[0].remaining, &ccy),
        views[0].derived_status.as_str()
    );
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let status_s = sub.get_one::<String>("status").unwrap();
    let status = LoanStatus::parse(status_s)
        .ok_or_else(|| anyhow!("Unknown status '{}', expected pending|overdue|partial|completed|lost", status_s))?;
    let loan = store::update_loan_status(conn, id, status)?;
    println!("Loan '{}' marked {}", loan.description, loan.status.as_str());
    Ok(())
}

fn extend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let id = *sub.get_one::<i64>("id").unwrap();
    let new_date = validate::date(sub.get_one::<String>("date").unwrap(), today)?;
    if new_date < today {
        bail!("New expected date must be today or later");
    }
    let loan = store::extend_loan_date(conn, id, new_date)?;
    println!(
        "Loan '{}' now expected on {}",
        loan.description,
        loan.expected_date.map(|d| d.to_string()).unwrap_or_default()
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_pending_loan(conn, id)?;
    println!("Deleted loan #{}", id);
    Ok(())
}
