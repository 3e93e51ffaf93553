// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance aggregation: the guaranteed "base" balance and the optimistic
//! "potential" balance that prices in expected loan recovery.

use crate::engine::income::{actual_income_this_month, monthly_income};
use crate::engine::Snapshot;
use crate::models::{CreditStatus, IncomeSource, PendingLoan, PersonalCredit, RegularExpense, SporadicExpense};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Income configuration with explicit precedence: the legacy scalar salary
/// applies only while no income sources exist at all. Once any source is
/// configured it supersedes the scalar, even if its normalized total is zero.
#[derive(Debug, Clone)]
pub enum IncomeConfig<'a> {
    Legacy(Decimal),
    Sources(&'a [IncomeSource]),
}

impl<'a> IncomeConfig<'a> {
    pub fn from_snapshot(snapshot: &'a Snapshot) -> IncomeConfig<'a> {
        if snapshot.income_sources.is_empty() {
            IncomeConfig::Legacy(snapshot.legacy_salary.unwrap_or(Decimal::ZERO))
        } else {
            IncomeConfig::Sources(&snapshot.income_sources)
        }
    }

    pub fn monthly_total(&self) -> Decimal {
        match self {
            IncomeConfig::Legacy(amount) => *amount,
            IncomeConfig::Sources(sources) => monthly_income(sources),
        }
    }
}

/// Sum of regular expenses still unpaid this cycle. Paid ones already left
/// the budget and contribute nothing.
pub fn total_regular_expenses(expenses: &[RegularExpense]) -> Decimal {
    expenses
        .iter()
        .filter(|e| !e.paid)
        .map(|e| e.amount)
        .sum()
}

/// Sporadic expenses count in full; there is no paid/unpaid distinction.
pub fn total_sporadic_expenses(expenses: &[SporadicExpense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Monthly commitment across active credits only.
pub fn total_monthly_credit_payments(credits: &[PersonalCredit]) -> Decimal {
    credits
        .iter()
        .filter(|c| c.status == CreditStatus::Active)
        .map(|c| c.monthly_payment)
        .sum()
}

/// Probability-weighted expected recovery over the *remaining* principal
/// of each pending loan.
pub fn expected_loans(loans: &[PendingLoan]) -> Decimal {
    let hundred = Decimal::from(100);
    loans
        .iter()
        .map(|l| {
            let remaining = (l.amount - l.amount_paid).max(Decimal::ZERO);
            remaining * Decimal::from(l.probability) / hundred
        })
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct Balances {
    pub monthly_income: Decimal,
    pub actual_income_this_month: Decimal,
    pub total_regular_expenses: Decimal,
    pub total_sporadic_expenses: Decimal,
    pub total_monthly_credit_payments: Decimal,
    pub total_expenses: Decimal,
    pub base_balance: Decimal,
    pub expected_loans: Decimal,
    pub potential_balance: Decimal,
}

pub fn compute_balances(snapshot: &Snapshot, today: NaiveDate) -> Balances {
    let income = IncomeConfig::from_snapshot(snapshot).monthly_total();
    let actual = actual_income_this_month(&snapshot.income_transactions, today);
    let regular = total_regular_expenses(&snapshot.regular_expenses);
    let sporadic = total_sporadic_expenses(&snapshot.sporadic_expenses);
    let credit = total_monthly_credit_payments(&snapshot.personal_credits);
    let total = regular + sporadic + credit;
    let base = income + actual - total;
    let expected = expected_loans(&snapshot.pending_loans);
    Balances {
        monthly_income: income,
        actual_income_this_month: actual,
        total_regular_expenses: regular,
        total_sporadic_expenses: sporadic,
        total_monthly_credit_payments: credit,
        total_expenses: total,
        base_balance: base,
        expected_loans: expected,
        potential_balance: base + expected,
    }
}
