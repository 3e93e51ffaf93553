// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, get_display_currency, parse_decimal, set_display_currency};
use crate::validate;
use anyhow::Result;
use chrono::{Datelike, Local};
use rusqlite::Connection;

/// Legacy scalar salary, used for balances only while no income sources exist.
pub fn handle_salary(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let today = Local::now().date_naive();
        let amount = validate::amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
        store::set_legacy_salary(conn, amount, today.month(), today.year())?;
        let ccy = get_display_currency(conn)?;
        println!(
            "Salary for {}-{:02} set to {}",
            today.year(),
            today.month(),
            fmt_money(&amount, &ccy)
        );
    }
    Ok(())
}

pub fn handle_currency(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            set_display_currency(conn, &ccy)?;
            println!("Display currency set to {}", ccy);
        }
        Some(("show", _)) => {
            println!("{}", get_display_currency(conn)?);
        }
        _ => {}
    }
    Ok(())
}
