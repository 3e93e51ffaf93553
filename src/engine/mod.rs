// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The derivation engine: pure, synchronous computation over an in-memory
//! snapshot of the user's records. The store loads and mutates snapshots;
//! everything here is deterministic arithmetic with no hidden state.

pub mod balance;
pub mod income;
pub mod loans;
pub mod upcoming;
pub mod wishlist;

use crate::models::{
    CreditInstallment, CreditPayment, IncomeSource, IncomeTransaction, LoanPayment, PendingLoan,
    PersonalCredit, RegularExpense, SporadicExpense, WishlistItem,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One user's complete financial state at a point in time. Mutations against
/// the store either patch a snapshot in place (plain inserts and deletes) or
/// warrant a full reload (payments, whose derived fields the store recomputes).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub income_sources: Vec<IncomeSource>,
    pub income_transactions: Vec<IncomeTransaction>,
    pub regular_expenses: Vec<RegularExpense>,
    pub sporadic_expenses: Vec<SporadicExpense>,
    pub pending_loans: Vec<PendingLoan>,
    pub loan_payments: Vec<LoanPayment>,
    pub personal_credits: Vec<PersonalCredit>,
    pub credit_payments: Vec<CreditPayment>,
    pub credit_installments: Vec<CreditInstallment>,
    pub wishlist: Vec<WishlistItem>,
    /// Scalar salary kept for users who never configured income sources.
    pub legacy_salary: Option<Decimal>,
}

impl Snapshot {
    // Local patches for mutations with no cross-entity side effects.

    pub fn patch_insert_sporadic(&mut self, expense: SporadicExpense) {
        self.sporadic_expenses.push(expense);
    }

    pub fn patch_insert_wish(&mut self, item: WishlistItem) {
        self.wishlist.push(item);
    }

    pub fn patch_remove_wish(&mut self, id: i64) {
        self.wishlist.retain(|w| w.id != id);
    }

    pub fn patch_replace_source(&mut self, source: IncomeSource) {
        if let Some(slot) = self.income_sources.iter_mut().find(|s| s.id == source.id) {
            *slot = source;
        }
    }

    pub fn patch_replace_expense(&mut self, expense: RegularExpense) {
        if let Some(slot) = self
            .regular_expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
        {
            *slot = expense;
        }
    }
}

/// Everything the presentation layer renders, derived in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub balances: balance::Balances,
    pub wishlist: Vec<wishlist::AffordableItem>,
    pub loans: Vec<loans::LoanView>,
    pub upcoming_payments: Vec<RegularExpense>,
    pub upcoming_incomes: Vec<income::UpcomingIncome>,
    pub upcoming_installments: Vec<CreditInstallment>,
}

/// Default look-ahead for the upcoming income and installment windows.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

pub fn derive_view_model(snapshot: &Snapshot, today: NaiveDate) -> ViewModel {
    let balances = balance::compute_balances(snapshot, today);
    let wishlist = wishlist::annotate(
        &snapshot.wishlist,
        balances.base_balance,
        balances.potential_balance,
    );
    ViewModel {
        wishlist,
        loans: loans::loan_views(&snapshot.pending_loans, today),
        upcoming_payments: upcoming::upcoming_payments(&snapshot.regular_expenses, today),
        upcoming_incomes: income::upcoming_incomes(
            &snapshot.income_sources,
            DEFAULT_WINDOW_DAYS,
            today,
        ),
        upcoming_installments: upcoming::upcoming_credit_installments(
            &snapshot.credit_installments,
            DEFAULT_WINDOW_DAYS,
            today,
        ),
        balances,
    }
}
