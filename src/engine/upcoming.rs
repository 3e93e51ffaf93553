// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Obligations falling due soon, for the dashboard alert sections.

use crate::models::{CreditInstallment, RegularExpense};
use chrono::{Datelike, Duration, NaiveDate};

/// Regular expenses whose payment day falls within the next 7 days of the
/// current month, soonest first.
///
/// This is a same-month day-of-month comparison and does not roll across a
/// month boundary: checked on the 28th, a day-2 expense of the next month is
/// out of range.
pub fn upcoming_payments(expenses: &[RegularExpense], today: NaiveDate) -> Vec<RegularExpense> {
    let current_day = today.day();
    let mut out: Vec<RegularExpense> = expenses
        .iter()
        .filter(|e| e.payment_date >= current_day && e.payment_date <= current_day + 7)
        .cloned()
        .collect();
    out.sort_by_key(|e| e.payment_date);
    out
}

/// Unpaid installments due within `[today, today + days]`, soonest first.
pub fn upcoming_credit_installments(
    installments: &[CreditInstallment],
    days: i64,
    today: NaiveDate,
) -> Vec<CreditInstallment> {
    let horizon = today + Duration::days(days);
    let mut out: Vec<CreditInstallment> = installments
        .iter()
        .filter(|i| !i.is_paid && i.due_date >= today && i.due_date <= horizon)
        .cloned()
        .collect();
    out.sort_by_key(|i| i.due_date);
    out
}
