// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income normalization and near-term receipt projection.
//!
//! Recurrence math lives here and nowhere else: monthly roll-over with the
//! "due today counts as passed" rule, biweekly anchors on the 1st and 15th,
//! and weekly 7-day cadence anchored to the source's creation instant.

use crate::models::{Frequency, IncomeSource, IncomeTransaction};
use crate::utils::clamped_date;
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;

/// Average weeks per month used to normalize weekly income.
static WEEKS_PER_MONTH: Lazy<Decimal> = Lazy::new(|| Decimal::new(433, 2));
static TWO: Lazy<Decimal> = Lazy::new(|| Decimal::from(2));

/// Normalized monthly income across active sources. Occasional sources
/// contribute nothing; inactive sources are excluded entirely.
pub fn monthly_income(sources: &[IncomeSource]) -> Decimal {
    sources
        .iter()
        .filter(|s| s.is_active)
        .map(|s| match s.frequency {
            Frequency::Weekly => s.amount * *WEEKS_PER_MONTH,
            Frequency::Biweekly => s.amount * *TWO,
            Frequency::Monthly => s.amount,
            Frequency::Occasional => Decimal::ZERO,
        })
        .sum()
}

/// Next expected receipt date for a source, or None for occasional sources.
///
/// A monthly source whose payment day equals today's day-of-month has already
/// "passed" and rolls to next month. Days beyond the target month's length
/// clamp to its last day.
pub fn next_payment_date(source: &IncomeSource, today: NaiveDate) -> Option<NaiveDate> {
    match source.frequency {
        Frequency::Monthly => {
            let day = source.payment_day?;
            if day > today.day() {
                clamped_date(today.year(), today.month(), day)
            } else {
                next_month_date(today, day)
            }
        }
        Frequency::Biweekly => {
            // Fixed anchors on the 1st and the 15th.
            if today.day() < 15 {
                NaiveDate::from_ymd_opt(today.year(), today.month(), 15)
            } else {
                next_month_date(today, 1)
            }
        }
        Frequency::Weekly => {
            let elapsed = today.and_hms_opt(0, 0, 0)? - source.created_at;
            let week = 7 * 86_400;
            let periods = elapsed.num_seconds().div_euclid(week) + 1;
            let next = source.created_at + Duration::seconds(periods * week);
            Some(next.date())
        }
        Frequency::Occasional => None,
    }
}

fn next_month_date(today: NaiveDate, day: u32) -> Option<NaiveDate> {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    clamped_date(year, month, day)
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingIncome {
    pub source: IncomeSource,
    pub date: NaiveDate,
}

/// Active, non-occasional sources expected to pay within
/// `[today, today + window_days]`, soonest first.
pub fn upcoming_incomes(
    sources: &[IncomeSource],
    window_days: i64,
    today: NaiveDate,
) -> Vec<UpcomingIncome> {
    let horizon = today + Duration::days(window_days);
    let mut out: Vec<UpcomingIncome> = sources
        .iter()
        .filter(|s| s.is_active && s.frequency != Frequency::Occasional)
        .filter_map(|s| {
            let date = next_payment_date(s, today)?;
            (date >= today && date <= horizon).then(|| UpcomingIncome {
                source: s.clone(),
                date,
            })
        })
        .collect();
    out.sort_by_key(|u| u.date);
    out
}

/// Transactions received in the current calendar month (not a rolling window).
pub fn transactions_this_month<'a>(
    transactions: &'a [IncomeTransaction],
    today: NaiveDate,
) -> Vec<&'a IncomeTransaction> {
    transactions
        .iter()
        .filter(|t| {
            t.received_date.year() == today.year() && t.received_date.month() == today.month()
        })
        .collect()
}

/// Sum of money actually received this calendar month.
pub fn actual_income_this_month(transactions: &[IncomeTransaction], today: NaiveDate) -> Decimal {
    transactions_this_month(transactions, today)
        .iter()
        .map(|t| t.amount)
        .sum()
}
