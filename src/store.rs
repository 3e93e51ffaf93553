// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The store: every read and write against the SQLite database, one set of
//! list/insert/update/delete functions per entity. Reads return full rows;
//! inserts re-fetch the created row so server-assigned fields (id, creation
//! instant) come back to the caller.
//!
//! Reconciliation contract: plain inserts, field updates and deletes are
//! local-patchable via `Snapshot`'s patch methods. `add_loan_payment` and
//! `add_credit_payment` change derived columns on their parent rows, so
//! callers reload the snapshot after them.

use crate::engine::Snapshot;
use crate::engine::wishlist::{PurchasePlan, purchase_plan};
use crate::error::StoreError;
use crate::models::{
    CreditInstallment, CreditPayment, CreditStatus, Frequency, IncomeSource, IncomeTransaction,
    LoanPayment, LoanStatus, PendingLoan, PersonalCredit, Priority, RegularExpense,
    SporadicExpense, WishlistItem,
};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

fn load_err(entity: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
    move |source| StoreError::Load { entity, source }
}

fn write_err(entity: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
    move |source| StoreError::Write { entity, source }
}

fn get_dec(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = row.get(idx)?;
    s.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn bad_value(idx: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        format!("unexpected value '{}'", value).into(),
    )
}

// ===== income sources =====

#[derive(Debug, Clone)]
pub struct NewIncomeSource {
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub payment_day: Option<u32>,
    pub is_active: bool,
    pub category: String,
}

fn row_to_source(row: &Row) -> rusqlite::Result<IncomeSource> {
    let freq: String = row.get(3)?;
    Ok(IncomeSource {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: get_dec(row, 2)?,
        frequency: Frequency::parse(&freq).ok_or_else(|| bad_value(3, &freq))?,
        payment_day: row.get(4)?,
        is_active: row.get(5)?,
        category: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const SOURCE_COLS: &str = "id, name, amount, frequency, payment_day, is_active, category, created_at";

pub fn list_income_sources(conn: &Connection) -> Result<Vec<IncomeSource>, StoreError> {
    let sql = format!("SELECT {} FROM income_sources ORDER BY id", SOURCE_COLS);
    let mut stmt = conn.prepare(&sql).map_err(load_err("income_source"))?;
    let rows = stmt
        .query_map([], row_to_source)
        .map_err(load_err("income_source"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("income_source"))
}

pub fn get_income_source(conn: &Connection, id: i64) -> Result<IncomeSource, StoreError> {
    let sql = format!("SELECT {} FROM income_sources WHERE id=?1", SOURCE_COLS);
    conn.query_row(&sql, params![id], row_to_source)
        .optional()
        .map_err(load_err("income_source"))?
        .ok_or(StoreError::NotFound {
            entity: "income_source",
            id,
        })
}

pub fn insert_income_source(
    conn: &Connection,
    source: &NewIncomeSource,
) -> Result<IncomeSource, StoreError> {
    conn.execute(
        "INSERT INTO income_sources(name, amount, frequency, payment_day, is_active, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            source.name,
            source.amount.to_string(),
            source.frequency.as_str(),
            source.payment_day,
            source.is_active,
            source.category
        ],
    )
    .map_err(write_err("income_source"))?;
    get_income_source(conn, conn.last_insert_rowid())
}

pub fn update_income_source(
    conn: &Connection,
    id: i64,
    amount: Option<Decimal>,
    payment_day: Option<u32>,
    is_active: Option<bool>,
) -> Result<IncomeSource, StoreError> {
    let n = conn
        .execute(
            "UPDATE income_sources SET
                amount = COALESCE(?2, amount),
                payment_day = COALESCE(?3, payment_day),
                is_active = COALESCE(?4, is_active)
             WHERE id=?1",
            params![id, amount.map(|a| a.to_string()), payment_day, is_active],
        )
        .map_err(write_err("income_source"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "income_source",
            id,
        });
    }
    get_income_source(conn, id)
}

pub fn delete_income_source(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM income_sources WHERE id=?1", params![id])
        .map_err(write_err("income_source"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "income_source",
            id,
        });
    }
    Ok(())
}

pub fn toggle_income_source(conn: &Connection, id: i64) -> Result<IncomeSource, StoreError> {
    let current = get_income_source(conn, id)?;
    update_income_source(conn, id, None, None, Some(!current.is_active))
}

// ===== income transactions =====

#[derive(Debug, Clone)]
pub struct NewIncomeTransaction {
    pub income_source_id: Option<i64>,
    pub amount: Decimal,
    pub received_date: NaiveDate,
    pub description: Option<String>,
}

fn row_to_income_tx(row: &Row) -> rusqlite::Result<IncomeTransaction> {
    Ok(IncomeTransaction {
        id: row.get(0)?,
        income_source_id: row.get(1)?,
        amount: get_dec(row, 2)?,
        received_date: row.get(3)?,
        description: row.get(4)?,
    })
}

pub fn list_income_transactions(conn: &Connection) -> Result<Vec<IncomeTransaction>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, income_source_id, amount, received_date, description
             FROM income_transactions ORDER BY received_date DESC, id DESC",
        )
        .map_err(load_err("income_transaction"))?;
    let rows = stmt
        .query_map([], row_to_income_tx)
        .map_err(load_err("income_transaction"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("income_transaction"))
}

pub fn insert_income_transaction(
    conn: &Connection,
    tx: &NewIncomeTransaction,
) -> Result<IncomeTransaction, StoreError> {
    conn.execute(
        "INSERT INTO income_transactions(income_source_id, amount, received_date, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            tx.income_source_id,
            tx.amount.to_string(),
            tx.received_date.to_string(),
            tx.description
        ],
    )
    .map_err(write_err("income_transaction"))?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT id, income_source_id, amount, received_date, description
         FROM income_transactions WHERE id=?1",
        params![id],
        row_to_income_tx,
    )
    .map_err(load_err("income_transaction"))
}

pub fn delete_income_transaction(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM income_transactions WHERE id=?1", params![id])
        .map_err(write_err("income_transaction"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "income_transaction",
            id,
        });
    }
    Ok(())
}

// ===== regular expenses =====

#[derive(Debug, Clone)]
pub struct NewRegularExpense {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub payment_date: u32,
}

fn row_to_regular(row: &Row) -> rusqlite::Result<RegularExpense> {
    Ok(RegularExpense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: get_dec(row, 2)?,
        category: row.get(3)?,
        payment_date: row.get(4)?,
        paid: row.get(5)?,
        paid_date: row.get(6)?,
    })
}

const REGULAR_COLS: &str = "id, description, amount, category, payment_date, paid, paid_date";

pub fn list_regular_expenses(conn: &Connection) -> Result<Vec<RegularExpense>, StoreError> {
    let sql = format!(
        "SELECT {} FROM regular_expenses ORDER BY payment_date, id",
        REGULAR_COLS
    );
    let mut stmt = conn.prepare(&sql).map_err(load_err("regular_expense"))?;
    let rows = stmt
        .query_map([], row_to_regular)
        .map_err(load_err("regular_expense"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("regular_expense"))
}

pub fn get_regular_expense(conn: &Connection, id: i64) -> Result<RegularExpense, StoreError> {
    let sql = format!("SELECT {} FROM regular_expenses WHERE id=?1", REGULAR_COLS);
    conn.query_row(&sql, params![id], row_to_regular)
        .optional()
        .map_err(load_err("regular_expense"))?
        .ok_or(StoreError::NotFound {
            entity: "regular_expense",
            id,
        })
}

pub fn insert_regular_expense(
    conn: &Connection,
    expense: &NewRegularExpense,
) -> Result<RegularExpense, StoreError> {
    conn.execute(
        "INSERT INTO regular_expenses(description, amount, category, payment_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            expense.description,
            expense.amount.to_string(),
            expense.category,
            expense.payment_date
        ],
    )
    .map_err(write_err("regular_expense"))?;
    get_regular_expense(conn, conn.last_insert_rowid())
}

pub fn delete_regular_expense(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM regular_expenses WHERE id=?1", params![id])
        .map_err(write_err("regular_expense"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "regular_expense",
            id,
        });
    }
    Ok(())
}

/// Flip the per-cycle paid flag. Marking paid stamps today as the paid date;
/// marking unpaid clears it.
pub fn toggle_regular_expense_paid(
    conn: &Connection,
    id: i64,
    today: NaiveDate,
) -> Result<RegularExpense, StoreError> {
    let current = get_regular_expense(conn, id)?;
    let now_paid = !current.paid;
    let paid_date = now_paid.then(|| today.to_string());
    conn.execute(
        "UPDATE regular_expenses SET paid=?2, paid_date=?3 WHERE id=?1",
        params![id, now_paid, paid_date],
    )
    .map_err(write_err("regular_expense"))?;
    get_regular_expense(conn, id)
}

// ===== sporadic expenses =====

#[derive(Debug, Clone)]
pub struct NewSporadicExpense {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

fn row_to_sporadic(row: &Row) -> rusqlite::Result<SporadicExpense> {
    Ok(SporadicExpense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: get_dec(row, 2)?,
        category: row.get(3)?,
        date: row.get(4)?,
    })
}

pub fn list_sporadic_expenses(conn: &Connection) -> Result<Vec<SporadicExpense>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, description, amount, category, date
             FROM sporadic_expenses ORDER BY date DESC, id DESC",
        )
        .map_err(load_err("sporadic_expense"))?;
    let rows = stmt
        .query_map([], row_to_sporadic)
        .map_err(load_err("sporadic_expense"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("sporadic_expense"))
}

pub fn insert_sporadic_expense(
    conn: &Connection,
    expense: &NewSporadicExpense,
) -> Result<SporadicExpense, StoreError> {
    conn.execute(
        "INSERT INTO sporadic_expenses(description, amount, category, date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            expense.description,
            expense.amount.to_string(),
            expense.category,
            expense.date.to_string()
        ],
    )
    .map_err(write_err("sporadic_expense"))?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT id, description, amount, category, date FROM sporadic_expenses WHERE id=?1",
        params![id],
        row_to_sporadic,
    )
    .map_err(load_err("sporadic_expense"))
}

pub fn delete_sporadic_expense(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM sporadic_expenses WHERE id=?1", params![id])
        .map_err(write_err("sporadic_expense"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "sporadic_expense",
            id,
        });
    }
    Ok(())
}

// ===== pending loans =====

#[derive(Debug, Clone)]
pub struct NewPendingLoan {
    pub description: String,
    pub amount: Decimal,
    pub probability: u32,
    pub expected_date: Option<NaiveDate>,
}

fn row_to_loan(row: &Row) -> rusqlite::Result<PendingLoan> {
    let status: String = row.get(6)?;
    Ok(PendingLoan {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: get_dec(row, 2)?,
        amount_paid: get_dec(row, 3)?,
        probability: row.get(4)?,
        expected_date: row.get(5)?,
        status: LoanStatus::parse(&status).ok_or_else(|| bad_value(6, &status))?,
    })
}

const LOAN_COLS: &str = "id, description, amount, amount_paid, probability, expected_date, status";

pub fn list_pending_loans(conn: &Connection) -> Result<Vec<PendingLoan>, StoreError> {
    let sql = format!("SELECT {} FROM pending_loans ORDER BY id", LOAN_COLS);
    let mut stmt = conn.prepare(&sql).map_err(load_err("pending_loan"))?;
    let rows = stmt
        .query_map([], row_to_loan)
        .map_err(load_err("pending_loan"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("pending_loan"))
}

pub fn get_pending_loan(conn: &Connection, id: i64) -> Result<PendingLoan, StoreError> {
    let sql = format!("SELECT {} FROM pending_loans WHERE id=?1", LOAN_COLS);
    conn.query_row(&sql, params![id], row_to_loan)
        .optional()
        .map_err(load_err("pending_loan"))?
        .ok_or(StoreError::NotFound {
            entity: "pending_loan",
            id,
        })
}

/// New loans always start with nothing repaid and a pending status.
pub fn insert_pending_loan(
    conn: &Connection,
    loan: &NewPendingLoan,
) -> Result<PendingLoan, StoreError> {
    conn.execute(
        "INSERT INTO pending_loans(description, amount, amount_paid, probability, expected_date, status)
         VALUES (?1, ?2, '0', ?3, ?4, 'pending')",
        params![
            loan.description,
            loan.amount.to_string(),
            loan.probability,
            loan.expected_date.map(|d| d.to_string())
        ],
    )
    .map_err(write_err("pending_loan"))?;
    get_pending_loan(conn, conn.last_insert_rowid())
}

pub fn delete_pending_loan(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM pending_loans WHERE id=?1", params![id])
        .map_err(write_err("pending_loan"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "pending_loan",
            id,
        });
    }
    Ok(())
}

/// Record a partial repayment and bump the loan's running total in one
/// transaction. Callers reload the snapshot afterwards; the derived loan
/// status depends on the updated total.
pub fn add_loan_payment(
    conn: &mut Connection,
    loan_id: i64,
    amount: Decimal,
    payment_date: NaiveDate,
    description: Option<String>,
) -> Result<LoanPayment, StoreError> {
    let loan = get_pending_loan(conn, loan_id)?;
    let tx = conn.transaction().map_err(write_err("loan_payment"))?;
    tx.execute(
        "INSERT INTO loan_payments(loan_id, amount, payment_date, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            loan_id,
            amount.to_string(),
            payment_date.to_string(),
            description
        ],
    )
    .map_err(write_err("loan_payment"))?;
    let payment_id = tx.last_insert_rowid();
    let new_paid = loan.amount_paid + amount;
    tx.execute(
        "UPDATE pending_loans SET amount_paid=?2 WHERE id=?1",
        params![loan_id, new_paid.to_string()],
    )
    .map_err(write_err("pending_loan"))?;
    tx.commit().map_err(write_err("loan_payment"))?;
    conn.query_row(
        "SELECT id, loan_id, amount, payment_date, description FROM loan_payments WHERE id=?1",
        params![payment_id],
        row_to_loan_payment,
    )
    .map_err(load_err("loan_payment"))
}

fn row_to_loan_payment(row: &Row) -> rusqlite::Result<LoanPayment> {
    Ok(LoanPayment {
        id: row.get(0)?,
        loan_id: row.get(1)?,
        amount: get_dec(row, 2)?,
        payment_date: row.get(3)?,
        description: row.get(4)?,
    })
}

pub fn list_loan_payments(conn: &Connection) -> Result<Vec<LoanPayment>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, loan_id, amount, payment_date, description
             FROM loan_payments ORDER BY payment_date DESC, id DESC",
        )
        .map_err(load_err("loan_payment"))?;
    let rows = stmt
        .query_map([], row_to_loan_payment)
        .map_err(load_err("loan_payment"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("loan_payment"))
}

/// Explicit status override, primarily for marking a loan lost or closing
/// it out by hand.
pub fn update_loan_status(
    conn: &Connection,
    id: i64,
    status: LoanStatus,
) -> Result<PendingLoan, StoreError> {
    let n = conn
        .execute(
            "UPDATE pending_loans SET status=?2 WHERE id=?1",
            params![id, status.as_str()],
        )
        .map_err(write_err("pending_loan"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "pending_loan",
            id,
        });
    }
    get_pending_loan(conn, id)
}

pub fn extend_loan_date(
    conn: &Connection,
    id: i64,
    new_date: NaiveDate,
) -> Result<PendingLoan, StoreError> {
    let n = conn
        .execute(
            "UPDATE pending_loans SET expected_date=?2 WHERE id=?1",
            params![id, new_date.to_string()],
        )
        .map_err(write_err("pending_loan"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "pending_loan",
            id,
        });
    }
    get_pending_loan(conn, id)
}

// ===== personal credits =====

#[derive(Debug, Clone)]
pub struct NewPersonalCredit {
    pub name: String,
    pub total_amount: Decimal,
    pub monthly_payment: Decimal,
    pub interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub payment_day: u32,
    pub end_date: Option<NaiveDate>,
    pub category: String,
    pub priority: Priority,
}

fn row_to_credit(row: &Row) -> rusqlite::Result<PersonalCredit> {
    let status: String = row.get(9)?;
    let priority: String = row.get(11)?;
    Ok(PersonalCredit {
        id: row.get(0)?,
        name: row.get(1)?,
        total_amount: get_dec(row, 2)?,
        remaining_amount: get_dec(row, 3)?,
        monthly_payment: get_dec(row, 4)?,
        interest_rate: get_dec(row, 5)?,
        start_date: row.get(6)?,
        payment_day: row.get(7)?,
        end_date: row.get(8)?,
        status: CreditStatus::parse(&status).ok_or_else(|| bad_value(9, &status))?,
        category: row.get(10)?,
        priority: Priority::parse(&priority).ok_or_else(|| bad_value(11, &priority))?,
    })
}

const CREDIT_COLS: &str = "id, name, total_amount, remaining_amount, monthly_payment, \
     interest_rate, start_date, payment_day, end_date, status, category, priority";

pub fn list_personal_credits(conn: &Connection) -> Result<Vec<PersonalCredit>, StoreError> {
    let sql = format!("SELECT {} FROM personal_credits ORDER BY id", CREDIT_COLS);
    let mut stmt = conn.prepare(&sql).map_err(load_err("personal_credit"))?;
    let rows = stmt
        .query_map([], row_to_credit)
        .map_err(load_err("personal_credit"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("personal_credit"))
}

pub fn get_personal_credit(conn: &Connection, id: i64) -> Result<PersonalCredit, StoreError> {
    let sql = format!("SELECT {} FROM personal_credits WHERE id=?1", CREDIT_COLS);
    conn.query_row(&sql, params![id], row_to_credit)
        .optional()
        .map_err(load_err("personal_credit"))?
        .ok_or(StoreError::NotFound {
            entity: "personal_credit",
            id,
        })
}

/// A new credit starts with the full amount remaining and an active status.
pub fn insert_personal_credit(
    conn: &Connection,
    credit: &NewPersonalCredit,
) -> Result<PersonalCredit, StoreError> {
    conn.execute(
        "INSERT INTO personal_credits(name, total_amount, remaining_amount, monthly_payment,
            interest_rate, start_date, payment_day, end_date, status, category, priority)
         VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, 'active', ?8, ?9)",
        params![
            credit.name,
            credit.total_amount.to_string(),
            credit.monthly_payment.to_string(),
            credit.interest_rate.to_string(),
            credit.start_date.to_string(),
            credit.payment_day,
            credit.end_date.map(|d| d.to_string()),
            credit.category,
            credit.priority.as_str()
        ],
    )
    .map_err(write_err("personal_credit"))?;
    get_personal_credit(conn, conn.last_insert_rowid())
}

pub fn update_credit_status(
    conn: &Connection,
    id: i64,
    status: CreditStatus,
) -> Result<PersonalCredit, StoreError> {
    let n = conn
        .execute(
            "UPDATE personal_credits SET status=?2 WHERE id=?1",
            params![id, status.as_str()],
        )
        .map_err(write_err("personal_credit"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "personal_credit",
            id,
        });
    }
    get_personal_credit(conn, id)
}

pub fn delete_personal_credit(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM personal_credits WHERE id=?1", params![id])
        .map_err(write_err("personal_credit"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "personal_credit",
            id,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewCreditPayment {
    pub credit_id: i64,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub principal_amount: Decimal,
    pub interest_amount: Decimal,
    pub fees_amount: Decimal,
}

fn row_to_credit_payment(row: &Row) -> rusqlite::Result<CreditPayment> {
    Ok(CreditPayment {
        id: row.get(0)?,
        credit_id: row.get(1)?,
        amount: get_dec(row, 2)?,
        payment_date: row.get(3)?,
        due_date: row.get(4)?,
        principal_amount: get_dec(row, 5)?,
        interest_amount: get_dec(row, 6)?,
        fees_amount: get_dec(row, 7)?,
        status: row.get(8)?,
    })
}

pub fn list_credit_payments(conn: &Connection) -> Result<Vec<CreditPayment>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, credit_id, amount, payment_date, due_date, principal_amount,
                interest_amount, fees_amount, status
             FROM credit_payments ORDER BY payment_date DESC, id DESC",
        )
        .map_err(load_err("credit_payment"))?;
    let rows = stmt
        .query_map([], row_to_credit_payment)
        .map_err(load_err("credit_payment"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("credit_payment"))
}

/// Record a credit payment and reduce the credit's remaining amount by the
/// principal portion, clamped at zero, in one transaction. A credit whose
/// remaining amount reaches zero flips to paid. Callers reload afterwards.
pub fn add_credit_payment(
    conn: &mut Connection,
    payment: &NewCreditPayment,
) -> Result<CreditPayment, StoreError> {
    let credit = get_personal_credit(conn, payment.credit_id)?;
    let tx = conn.transaction().map_err(write_err("credit_payment"))?;
    tx.execute(
        "INSERT INTO credit_payments(credit_id, amount, payment_date, due_date,
            principal_amount, interest_amount, fees_amount, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'paid')",
        params![
            payment.credit_id,
            payment.amount.to_string(),
            payment.payment_date.to_string(),
            payment.due_date.to_string(),
            payment.principal_amount.to_string(),
            payment.interest_amount.to_string(),
            payment.fees_amount.to_string()
        ],
    )
    .map_err(write_err("credit_payment"))?;
    let payment_id = tx.last_insert_rowid();
    let remaining = (credit.remaining_amount - payment.principal_amount).max(Decimal::ZERO);
    let status = if remaining.is_zero() { "paid" } else { credit.status.as_str() };
    tx.execute(
        "UPDATE personal_credits SET remaining_amount=?2, status=?3 WHERE id=?1",
        params![payment.credit_id, remaining.to_string(), status],
    )
    .map_err(write_err("personal_credit"))?;
    tx.commit().map_err(write_err("credit_payment"))?;
    conn.query_row(
        "SELECT id, credit_id, amount, payment_date, due_date, principal_amount,
            interest_amount, fees_amount, status
         FROM credit_payments WHERE id=?1",
        params![payment_id],
        row_to_credit_payment,
    )
    .map_err(load_err("credit_payment"))
}

// ===== credit installments =====

fn row_to_installment(row: &Row) -> rusqlite::Result<CreditInstallment> {
    Ok(CreditInstallment {
        id: row.get(0)?,
        credit_id: row.get(1)?,
        installment_number: row.get(2)?,
        due_date: row.get(3)?,
        amount: get_dec(row, 4)?,
        is_paid: row.get(5)?,
    })
}

pub fn list_credit_installments(conn: &Connection) -> Result<Vec<CreditInstallment>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, credit_id, installment_number, due_date, amount, is_paid
             FROM credit_installments ORDER BY due_date, id",
        )
        .map_err(load_err("credit_installment"))?;
    let rows = stmt
        .query_map([], row_to_installment)
        .map_err(load_err("credit_installment"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("credit_installment"))
}

pub fn insert_credit_installment(
    conn: &Connection,
    credit_id: i64,
    installment_number: u32,
    due_date: NaiveDate,
    amount: Decimal,
) -> Result<CreditInstallment, StoreError> {
    conn.execute(
        "INSERT INTO credit_installments(credit_id, installment_number, due_date, amount)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            credit_id,
            installment_number,
            due_date.to_string(),
            amount.to_string()
        ],
    )
    .map_err(write_err("credit_installment"))?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT id, credit_id, installment_number, due_date, amount, is_paid
         FROM credit_installments WHERE id=?1",
        params![id],
        row_to_installment,
    )
    .map_err(load_err("credit_installment"))
}

pub fn mark_installment_paid(conn: &Connection, id: i64) -> Result<CreditInstallment, StoreError> {
    let n = conn
        .execute(
            "UPDATE credit_installments SET is_paid=1 WHERE id=?1",
            params![id],
        )
        .map_err(write_err("credit_installment"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "credit_installment",
            id,
        });
    }
    conn.query_row(
        "SELECT id, credit_id, installment_number, due_date, amount, is_paid
         FROM credit_installments WHERE id=?1",
        params![id],
        row_to_installment,
    )
    .map_err(load_err("credit_installment"))
}

// ===== wishlist =====

#[derive(Debug, Clone)]
pub struct NewWishlistItem {
    pub item: String,
    pub price: Decimal,
    pub priority: Priority,
    pub category: String,
}

fn row_to_wish(row: &Row) -> rusqlite::Result<WishlistItem> {
    let priority: String = row.get(3)?;
    Ok(WishlistItem {
        id: row.get(0)?,
        item: row.get(1)?,
        price: get_dec(row, 2)?,
        priority: Priority::parse(&priority).ok_or_else(|| bad_value(3, &priority))?,
        category: row.get(4)?,
    })
}

/// Wishes come back in insertion order; the engine's display ranking relies
/// on that for its stable tie-break.
pub fn list_wishlist(conn: &Connection) -> Result<Vec<WishlistItem>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT id, item, price, priority, category FROM wishlist_items ORDER BY id")
        .map_err(load_err("wishlist_item"))?;
    let rows = stmt
        .query_map([], row_to_wish)
        .map_err(load_err("wishlist_item"))?;
    rows.collect::<rusqlite::Result<_>>()
        .map_err(load_err("wishlist_item"))
}

pub fn get_wishlist_item(conn: &Connection, id: i64) -> Result<WishlistItem, StoreError> {
    conn.query_row(
        "SELECT id, item, price, priority, category FROM wishlist_items WHERE id=?1",
        params![id],
        row_to_wish,
    )
    .optional()
    .map_err(load_err("wishlist_item"))?
    .ok_or(StoreError::NotFound {
        entity: "wishlist_item",
        id,
    })
}

pub fn insert_wishlist_item(
    conn: &Connection,
    item: &NewWishlistItem,
) -> Result<WishlistItem, StoreError> {
    conn.execute(
        "INSERT INTO wishlist_items(item, price, priority, category) VALUES (?1, ?2, ?3, ?4)",
        params![
            item.item,
            item.price.to_string(),
            item.priority.as_str(),
            item.category
        ],
    )
    .map_err(write_err("wishlist_item"))?;
    get_wishlist_item(conn, conn.last_insert_rowid())
}

pub fn delete_wishlist_item(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let n = conn
        .execute("DELETE FROM wishlist_items WHERE id=?1", params![id])
        .map_err(write_err("wishlist_item"))?;
    if n == 0 {
        return Err(StoreError::NotFound {
            entity: "wishlist_item",
            id,
        });
    }
    Ok(())
}

/// Convert a wish into a realized sporadic expense, as two steps rather
/// than one transaction. If the expense insert fails the wish stays
/// untouched; if the delete fails after the insert succeeded the expense
/// is kept and the partial failure is surfaced, never rolled back.
pub fn purchase_wishlist_item(
    conn: &Connection,
    item_id: i64,
    actual_price: Option<Decimal>,
    category: Option<String>,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(WishlistItem, SporadicExpense, PurchasePlan), StoreError> {
    let item = get_wishlist_item(conn, item_id)?;
    let plan = purchase_plan(&item, actual_price, category, date, today);
    let expense = insert_sporadic_expense(
        conn,
        &NewSporadicExpense {
            description: plan.description.clone(),
            amount: plan.amount,
            category: plan.category.clone(),
            date: plan.date,
        },
    )?;
    let deleted = conn.execute("DELETE FROM wishlist_items WHERE id=?1", params![item_id]);
    match deleted {
        Ok(_) => Ok((item, expense, plan)),
        Err(source) => Err(StoreError::PartialPurchase {
            expense_id: expense.id,
            item_id,
            source,
        }),
    }
}

// ===== legacy salary =====

/// Latest recorded scalar salary, if the user ever set one. Superseded by
/// income sources the moment any exist.
pub fn get_legacy_salary(conn: &Connection) -> Result<Option<Decimal>, StoreError> {
    let s: Option<String> = conn
        .query_row(
            "SELECT amount FROM monthly_salaries ORDER BY year DESC, month DESC LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()
        .map_err(load_err("monthly_salary"))?;
    match s {
        Some(s) => {
            let d = s.parse::<Decimal>().map_err(|e| StoreError::Load {
                entity: "monthly_salary",
                source: rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)),
            })?;
            Ok(Some(d))
        }
        None => Ok(None),
    }
}

/// Upsert the scalar salary for a given month/year.
pub fn set_legacy_salary(
    conn: &Connection,
    amount: Decimal,
    month: u32,
    year: i32,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO monthly_salaries(amount, month, year) VALUES (?1, ?2, ?3)
         ON CONFLICT(month, year) DO UPDATE SET amount=excluded.amount",
        params![amount.to_string(), month, year],
    )
    .map_err(write_err("monthly_salary"))?;
    Ok(())
}

// ===== snapshot =====

/// Load the user's complete financial state in one pass.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot, StoreError> {
    Ok(Snapshot {
        income_sources: list_income_sources(conn)?,
        income_transactions: list_income_transactions(conn)?,
        regular_expenses: list_regular_expenses(conn)?,
        sporadic_expenses: list_sporadic_expenses(conn)?,
        pending_loans: list_pending_loans(conn)?,
        loan_payments: list_loan_payments(conn)?,
        personal_credits: list_personal_credits(conn)?,
        credit_payments: list_credit_payments(conn)?,
        credit_installments: list_credit_installments(conn)?,
        wishlist: list_wishlist(conn)?,
        legacy_salary: get_legacy_salary(conn)?,
    })
}
