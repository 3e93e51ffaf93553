// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bolsillo::engine::balance::{IncomeConfig, compute_balances, expected_loans};
use bolsillo::engine::{Snapshot, derive_view_model};
use bolsillo::models::{
    CreditStatus, Frequency, IncomeSource, LoanStatus, PendingLoan, PersonalCredit, Priority,
    RegularExpense, SporadicExpense,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn monthly_source(id: i64, amount: i64) -> IncomeSource {
    IncomeSource {
        id,
        name: format!("source-{}", id),
        amount: Decimal::from(amount),
        frequency: Frequency::Monthly,
        payment_day: Some(1),
        is_active: true,
        category: "otros".into(),
        created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

fn regular(id: i64, amount: i64, paid: bool) -> RegularExpense {
    RegularExpense {
        id,
        description: format!("expense-{}", id),
        amount: Decimal::from(amount),
        category: "servicios".into(),
        payment_date: 10,
        paid,
        paid_date: None,
    }
}

fn sporadic(id: i64, amount: i64) -> SporadicExpense {
    SporadicExpense {
        id,
        description: format!("sporadic-{}", id),
        amount: Decimal::from(amount),
        category: "otros".into(),
        date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    }
}

fn credit(id: i64, monthly: i64, status: CreditStatus) -> PersonalCredit {
    PersonalCredit {
        id,
        name: format!("credit-{}", id),
        total_amount: Decimal::from(1_000_000),
        remaining_amount: Decimal::from(800_000),
        monthly_payment: Decimal::from(monthly),
        interest_rate: Decimal::ZERO,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        payment_day: 5,
        end_date: None,
        status,
        category: "otros".into(),
        priority: Priority::Media,
    }
}

fn loan(id: i64, amount: i64, paid: i64, probability: u32) -> PendingLoan {
    PendingLoan {
        id,
        description: format!("loan-{}", id),
        amount: Decimal::from(amount),
        amount_paid: Decimal::from(paid),
        probability,
        expected_date: None,
        status: LoanStatus::Pending,
    }
}

#[test]
fn base_and_potential_balance() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let snapshot = Snapshot {
        income_sources: vec![monthly_source(1, 1_000_000)],
        regular_expenses: vec![
            regular(1, 300_000, false),
            regular(2, 200_000, true), // paid, must not count
        ],
        sporadic_expenses: vec![sporadic(1, 50_000)],
        personal_credits: vec![
            credit(1, 100_000, CreditStatus::Active),
            credit(2, 999_999, CreditStatus::Paused), // inactive, must not count
        ],
        pending_loans: vec![loan(1, 200_000, 50_000, 50)],
        ..Default::default()
    };

    let b = compute_balances(&snapshot, today);
    assert_eq!(b.total_regular_expenses, Decimal::from(300_000));
    assert_eq!(b.total_sporadic_expenses, Decimal::from(50_000));
    assert_eq!(b.total_monthly_credit_payments, Decimal::from(100_000));
    assert_eq!(b.total_expenses, Decimal::from(450_000));
    assert_eq!(b.base_balance, Decimal::from(550_000));
    // (200,000 - 50,000) * 50%
    assert_eq!(b.expected_loans, Decimal::from(75_000));
    assert_eq!(b.potential_balance, Decimal::from(625_000));
}

#[test]
fn expected_loans_never_goes_negative_per_loan() {
    // Overpaid loan contributes zero, not a negative recovery.
    let loans = vec![loan(1, 100, 150, 80), loan(2, 100, 0, 50)];
    assert_eq!(expected_loans(&loans), Decimal::from(50));
}

#[test]
fn legacy_salary_applies_only_without_sources() {
    let mut snapshot = Snapshot {
        legacy_salary: Some(Decimal::from(2_500_000)),
        ..Default::default()
    };
    assert_eq!(
        IncomeConfig::from_snapshot(&snapshot).monthly_total(),
        Decimal::from(2_500_000)
    );

    // A single source supersedes the scalar even when it normalizes to zero.
    let mut zero = monthly_source(1, 0);
    zero.frequency = Frequency::Occasional;
    zero.payment_day = None;
    snapshot.income_sources = vec![zero];
    assert_eq!(
        IncomeConfig::from_snapshot(&snapshot).monthly_total(),
        Decimal::ZERO
    );
}

#[test]
fn no_sources_and_no_salary_means_zero_income() {
    let snapshot = Snapshot::default();
    assert_eq!(
        IncomeConfig::from_snapshot(&snapshot).monthly_total(),
        Decimal::ZERO
    );
}

#[test]
fn derivation_is_deterministic_over_an_unchanged_snapshot() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let snapshot = Snapshot {
        income_sources: vec![monthly_source(1, 900_000)],
        regular_expenses: vec![regular(1, 120_000, false)],
        sporadic_expenses: vec![sporadic(1, 30_000)],
        pending_loans: vec![loan(1, 50_000, 10_000, 75)],
        personal_credits: vec![credit(1, 80_000, CreditStatus::Active)],
        ..Default::default()
    };
    let first = serde_json::to_value(derive_view_model(&snapshot, today)).unwrap();
    let second = serde_json::to_value(derive_view_model(&snapshot, today)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn snapshot_patches_match_a_rebuilt_snapshot() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let mut patched = Snapshot {
        income_sources: vec![monthly_source(1, 900_000)],
        regular_expenses: vec![regular(1, 120_000, false)],
        ..Default::default()
    };

    // Mutations applied in place.
    let mut raise = monthly_source(1, 1_000_000);
    raise.payment_day = Some(5);
    patched.patch_replace_source(raise.clone());
    let mut now_paid = regular(1, 120_000, true);
    now_paid.paid_date = Some(today);
    patched.patch_replace_expense(now_paid.clone());
    patched.patch_insert_sporadic(sporadic(7, 30_000));

    // The same state built from scratch, as a reload would produce it.
    let rebuilt = Snapshot {
        income_sources: vec![raise],
        regular_expenses: vec![now_paid],
        sporadic_expenses: vec![sporadic(7, 30_000)],
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(derive_view_model(&patched, today)).unwrap(),
        serde_json::to_value(derive_view_model(&rebuilt, today)).unwrap()
    );
}
