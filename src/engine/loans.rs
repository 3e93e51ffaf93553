// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Loan lifecycle derivation. The stored status field mostly records user
//! intent (`lost` in particular); the displayed status is derived from the
//! amounts and the expected date, first match wins.

use crate::models::{LoanStatus, PendingLoan};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Derive a loan's status from its fields.
///
/// 1. Nothing remaining: completed, no matter what is stored.
/// 2. Anything paid: partial, even when the expected date has passed.
/// 3. Expected date strictly before today: overdue.
/// 4. Stored `lost` override.
/// 5. Otherwise pending.
pub fn derive_status(loan: &PendingLoan, today: NaiveDate) -> LoanStatus {
    let remaining = loan.amount - loan.amount_paid;
    if remaining <= Decimal::ZERO {
        LoanStatus::Completed
    } else if loan.amount_paid > Decimal::ZERO {
        LoanStatus::Partial
    } else if loan.expected_date.is_some_and(|d| d < today) {
        LoanStatus::Overdue
    } else if loan.status == LoanStatus::Lost {
        LoanStatus::Lost
    } else {
        LoanStatus::Pending
    }
}

/// Repayment progress in percent, clamped to [0, 100]. A zero-amount loan
/// has nothing left to recover and reads as fully progressed.
pub fn progress(loan: &PendingLoan) -> Decimal {
    if loan.amount.is_zero() {
        return Decimal::from(100);
    }
    let pct = loan.amount_paid / loan.amount * Decimal::from(100);
    pct.clamp(Decimal::ZERO, Decimal::from(100))
}

#[derive(Debug, Clone, Serialize)]
pub struct LoanView {
    #[serde(flatten)]
    pub loan: PendingLoan,
    pub derived_status: LoanStatus,
    pub remaining: Decimal,
    pub progress: Decimal,
}

pub fn loan_views(loans: &[PendingLoan], today: NaiveDate) -> Vec<LoanView> {
    loans
        .iter()
        .map(|l| LoanView {
            derived_status: derive_status(l, today),
            remaining: (l.amount - l.amount_paid).max(Decimal::ZERO),
            progress: progress(l),
            loan: l.clone(),
        })
        .collect()
}
