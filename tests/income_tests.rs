// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bolsillo::engine::income::{
    actual_income_this_month, monthly_income, next_payment_date, upcoming_incomes,
};
use bolsillo::models::{Frequency, IncomeSource, IncomeTransaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn source(id: i64, amount: i64, frequency: Frequency, payment_day: Option<u32>) -> IncomeSource {
    IncomeSource {
        id,
        name: format!("source-{}", id),
        amount: Decimal::from(amount),
        frequency,
        payment_day,
        is_active: true,
        category: "otros".into(),
        created_at: NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    }
}

#[test]
fn normalizes_each_frequency_into_monthly_terms() {
    let sources = vec![
        source(1, 100, Frequency::Weekly, None),
        source(2, 100, Frequency::Biweekly, None),
        source(3, 100, Frequency::Monthly, Some(5)),
        source(4, 100, Frequency::Occasional, None),
    ];
    // 100*4.33 + 100*2 + 100 + 0
    assert_eq!(monthly_income(&sources), Decimal::from(733));
}

#[test]
fn inactive_sources_are_excluded_and_restored_exactly() {
    let mut sources = vec![
        source(1, 300, Frequency::Monthly, Some(1)),
        source(2, 100, Frequency::Biweekly, None),
    ];
    let full = monthly_income(&sources);
    assert_eq!(full, Decimal::from(500));

    sources[1].is_active = false;
    assert_eq!(monthly_income(&sources), Decimal::from(300));

    sources[1].is_active = true;
    assert_eq!(monthly_income(&sources), full);
}

#[test]
fn monthly_source_due_today_rolls_to_next_month() {
    let s = source(1, 100, Frequency::Monthly, Some(15));
    let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    assert_eq!(
        next_payment_date(&s, today),
        Some(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
    );
}

#[test]
fn monthly_source_later_this_month_stays_this_month() {
    let s = source(1, 100, Frequency::Monthly, Some(20));
    let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    assert_eq!(
        next_payment_date(&s, today),
        Some(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap())
    );
}

#[test]
fn monthly_roll_over_december_lands_in_january() {
    let s = source(1, 100, Frequency::Monthly, Some(10));
    let today = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
    assert_eq!(
        next_payment_date(&s, today),
        Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap())
    );
}

#[test]
fn monthly_day_31_clamps_to_short_months() {
    let s = source(1, 100, Frequency::Monthly, Some(31));
    let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    // Rolls into April, which has 30 days.
    assert_eq!(
        next_payment_date(&s, today),
        Some(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap())
    );
}

#[test]
fn biweekly_anchors_on_the_first_and_fifteenth() {
    let s = source(1, 100, Frequency::Biweekly, None);

    let early = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    assert_eq!(
        next_payment_date(&s, early),
        Some(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
    );

    // On the 15th both anchors count as passed.
    let mid = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    assert_eq!(
        next_payment_date(&s, mid),
        Some(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
    );

    let late = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
    assert_eq!(
        next_payment_date(&s, late),
        Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    );
}

#[test]
fn weekly_projects_on_a_seven_day_cadence_from_creation() {
    // Created Monday 2025-01-06 09:30.
    let s = source(1, 100, Frequency::Weekly, None);

    // Wednesday same week: next boundary is the following Monday.
    let today = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
    assert_eq!(
        next_payment_date(&s, today),
        Some(NaiveDate::from_ymd_opt(2025, 1, 13).unwrap())
    );

    // Exactly on a boundary day, before the creation time-of-day the
    // boundary instant is still ahead and projects onto the same date.
    let boundary = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
    assert_eq!(
        next_payment_date(&s, boundary),
        Some(NaiveDate::from_ymd_opt(2025, 1, 13).unwrap())
    );
}

#[test]
fn occasional_sources_have_no_next_date() {
    let s = source(1, 100, Frequency::Occasional, None);
    let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    assert_eq!(next_payment_date(&s, today), None);
}

#[test]
fn upcoming_incomes_filters_window_and_sorts_ascending() {
    let mut far = source(1, 100, Frequency::Monthly, Some(28));
    far.name = "far".into();
    let mut near = source(2, 100, Frequency::Monthly, Some(12));
    near.name = "near".into();
    let mut inactive = source(3, 100, Frequency::Monthly, Some(13));
    inactive.is_active = false;
    let occasional = source(4, 100, Frequency::Occasional, None);

    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let upcoming = upcoming_incomes(
        &[far, near, inactive, occasional],
        7,
        today,
    );
    let names: Vec<&str> = upcoming.iter().map(|u| u.source.name.as_str()).collect();
    assert_eq!(names, vec!["near"]);
    assert_eq!(
        upcoming[0].date,
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    );
}

#[test]
fn actual_income_counts_calendar_month_not_rolling_window() {
    let tx = |id: i64, y: i32, m: u32, d: u32, amount: i64| IncomeTransaction {
        id,
        income_source_id: None,
        amount: Decimal::from(amount),
        received_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        description: None,
    };
    let txs = vec![
        tx(1, 2025, 3, 1, 100),
        tx(2, 2025, 3, 31, 50),
        tx(3, 2025, 2, 28, 999), // previous month, even though within 30 days
        tx(4, 2024, 3, 10, 999), // same month, wrong year
    ];
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    assert_eq!(actual_income_this_month(&txs, today), Decimal::from(150));
}
