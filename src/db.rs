// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.bolsillo", "Bolsillo", "bolsillo"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("bolsillo.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS income_sources(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL CHECK(frequency IN ('weekly','biweekly','monthly','occasional')),
        payment_day INTEGER,
        is_active INTEGER NOT NULL DEFAULT 1,
        category TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS income_transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        income_source_id INTEGER,
        amount TEXT NOT NULL,
        received_date TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(income_source_id) REFERENCES income_sources(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_income_transactions_date ON income_transactions(received_date);

    CREATE TABLE IF NOT EXISTS regular_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        payment_date INTEGER NOT NULL CHECK(payment_date BETWEEN 1 AND 31),
        paid INTEGER NOT NULL DEFAULT 0,
        paid_date TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS sporadic_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_sporadic_expenses_date ON sporadic_expenses(date);

    CREATE TABLE IF NOT EXISTS pending_loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        amount_paid TEXT NOT NULL DEFAULT '0',
        probability INTEGER NOT NULL CHECK(probability BETWEEN 0 AND 100),
        expected_date TEXT,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK(status IN ('pending','overdue','partial','completed','lost')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS loan_payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        loan_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        payment_date TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(loan_id) REFERENCES pending_loans(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS personal_credits(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        total_amount TEXT NOT NULL,
        remaining_amount TEXT NOT NULL,
        monthly_payment TEXT NOT NULL,
        interest_rate TEXT NOT NULL DEFAULT '0',
        start_date TEXT NOT NULL,
        payment_day INTEGER NOT NULL CHECK(payment_day BETWEEN 1 AND 31),
        end_date TEXT,
        status TEXT NOT NULL DEFAULT 'active'
            CHECK(status IN ('active','paid','overdue','paused')),
        category TEXT NOT NULL,
        priority TEXT NOT NULL DEFAULT 'media' CHECK(priority IN ('alta','media','baja')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS credit_payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        credit_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        payment_date TEXT NOT NULL,
        due_date TEXT NOT NULL,
        principal_amount TEXT NOT NULL,
        interest_amount TEXT NOT NULL DEFAULT '0',
        fees_amount TEXT NOT NULL DEFAULT '0',
        status TEXT NOT NULL DEFAULT 'paid',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(credit_id) REFERENCES personal_credits(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS credit_installments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        credit_id INTEGER NOT NULL,
        installment_number INTEGER NOT NULL,
        due_date TEXT NOT NULL,
        amount TEXT NOT NULL,
        is_paid INTEGER NOT NULL DEFAULT 0,
        UNIQUE(credit_id, installment_number),
        FOREIGN KEY(credit_id) REFERENCES personal_credits(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_credit_installments_due ON credit_installments(due_date);

    CREATE TABLE IF NOT EXISTS wishlist_items(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item TEXT NOT NULL,
        price TEXT NOT NULL,
        priority TEXT NOT NULL DEFAULT 'media' CHECK(priority IN ('alta','media','baja')),
        category TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Legacy scalar salary, one row per month/year; superseded by income_sources.
    CREATE TABLE IF NOT EXISTS monthly_salaries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        month INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
        year INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(month, year)
    );
    "#,
    )?;
    Ok(())
}
