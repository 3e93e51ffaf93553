// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::upcoming::upcoming_credit_installments;
use crate::models::{CreditStatus, Priority};
use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, parse_decimal, pretty_table};
use crate::validate;
use anyhow::{Result, anyhow};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("installment", sub)) => match sub.subcommand() {
            Some(("add", sub)) => installment_add(conn, sub)?,
            Some(("pay", sub)) => installment_pay(conn, sub)?,
            _ => {}
        },
        Some(("installments", sub)) => installments(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let name = validate::require_text(sub.get_one::<String>("name").unwrap(), "name")?;
    let total_amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let monthly_payment =
        validate::amount(parse_decimal(sub.get_one::<String>("monthly").unwrap())?)?;
    let interest_rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => validate::date(s, today)?,
        None => today,
    };
    let payment_day = validate::payment_day(*sub.get_one::<u32>("day").unwrap())?;
    let end_date = match sub.get_one::<String>("end") {
        Some(s) => Some(validate::date(s, today)?),
        None => None,
    };
    let category = validate::require_text(sub.get_one::<String>("category").unwrap(), "category")?;
    let priority_s = sub.get_one::<String>("priority").unwrap();
    let priority = Priority::parse(priority_s)
        .ok_or_else(|| anyhow!("Unknown priority '{}', expected alta|media|baja", priority_s))?;

    let credit = store::insert_personal_credit(
        conn,
        &store::NewPersonalCredit {
            name,
            total_amount,
            monthly_payment,
            interest_rate,
            start_date,
            payment_day,
            end_date,
            category,
            priority,
        },
    )?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Added credit #{} '{}' ({} total, {} monthly, day {})",
        credit.id,
        credit.name,
        fmt_money(&credit.total_amount, &ccy),
        fmt_money(&credit.monthly_payment, &ccy),
        credit.payment_day
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let credits = store::list_personal_credits(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &credits)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = credits
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                fmt_money(&c.total_amount, &ccy),
                fmt_money(&c.remaining_amount, &ccy),
                fmt_money(&c.monthly_payment, &ccy),
                c.payment_day.to_string(),
                c.status.as_str().to_string(),
                c.priority.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Name", "Total", "Remaining", "Monthly", "Day", "Status", "Priority"],
            rows
        )
    );
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let status_s = sub.get_one::<String>("status").unwrap();
    let status = CreditStatus::parse(status_s)
        .ok_or_else(|| anyhow!("Unknown status '{}', expected active|paid|overdue|paused", status_s))?;
    let credit = store::update_credit_status(conn, id, status)?;
    println!("Credit '{}' marked {}", credit.name, credit.status.as_str());
    Ok(())
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let principal = match sub.get_one::<String>("principal") {
        Some(s) => validate::amount(parse_decimal(s)?)?,
        None => amount,
    };
    let interest = validate::amount(parse_decimal(sub.get_one::<String>("interest").unwrap())?)?;
    let fees = validate::amount(parse_decimal(sub.get_one::<String>("fees").unwrap())?)?;
    let payment_date = match sub.get_one::<String>("date") {
        Some(s) => validate::date(s, today)?,
        None => today,
    };
    let due_date = match sub.get_one::<String>("due") {
        Some(s) => validate::date(s, today)?,
        None => payment_date,
    };
    let payment = store::add_credit_payment(
        conn,
        &store::NewCreditPayment {
            credit_id: id,
            amount,
            payment_date,
            due_date,
            principal_amount: principal,
            interest_amount: interest,
            fees_amount: fees,
        },
    )?;
    // The remaining amount moved; read the credit fresh.
    let credit = store::get_personal_credit(conn, id)?;
    let ccy = get_display_currency(conn)?;
    println!(
        "Recorded payment #{} of {} on credit '{}', {} remaining ({})",
        payment.id,
        fmt_money(&payment.amount, &ccy),
        credit.name,
        fmt_money(&credit.remaining_amount, &ccy),
        credit.status.as_str()
    );
    Ok(())
}

fn installment_add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let credit_id = *sub.get_one::<i64>("credit").unwrap();
    let number = *sub.get_one::<u32>("number").unwrap();
    let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let due_date = validate::date(sub.get_one::<String>("due").unwrap(), today)?;
    // Fails early when the credit does not exist.
    store::get_personal_credit(conn, credit_id)?;
    let inst = store::insert_credit_installment(conn, credit_id, number, due_date, amount)?;
    println!(
        "Added installment #{} ({} of credit #{}) due {}",
        inst.id, inst.installment_number, inst.credit_id, inst.due_date
    );
    Ok(())
}

fn installment_pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let inst = store::mark_installment_paid(conn, id)?;
    println!(
        "Installment #{} of credit #{} marked paid",
        inst.id, inst.credit_id
    );
    Ok(())
}

fn installments(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let days = *sub.get_one::<i64>("days").unwrap();
    let due = upcoming_credit_installments(&store::list_credit_installments(conn)?, days, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &due)? {
        return Ok(());
    }
    let ccy = get_display_currency(conn)?;
    let rows = due
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                format!("#{}", i.credit_id),
                i.installment_number.to_string(),
                i.due_date.to_string(),
                fmt_money(&i.amount, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Credit", "Nr", "Due", "Amount"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_personal_credit(conn, id)?;
    println!("Deleted credit #{}", id);
    Ok(())
}
