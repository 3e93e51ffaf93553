// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wishlist affordability annotation, display ranking, and the purchase
//! transition plan (wish item -> sporadic expense).

use crate::models::{SporadicExpense, WishlistItem};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AffordableItem {
    #[serde(flatten)]
    pub item: WishlistItem,
    /// Price covered by the potential balance (loans priced in).
    pub affordable: bool,
    /// Price covered by the base balance alone.
    pub affordable_without_loans: bool,
    /// Shortfall against the potential balance; zero or negative when covered.
    pub difference: Decimal,
    /// Saving progress toward the price, percent clamped to [0, 100].
    pub progress: Decimal,
}

/// Progress of `balance` toward `price`. A free item is immediately reached;
/// the clamp guards both a negative balance and overshoot.
pub fn progress_toward(price: Decimal, balance: Decimal) -> Decimal {
    let hundred = Decimal::from(100);
    if price.is_zero() {
        return hundred;
    }
    (balance / price * hundred).clamp(Decimal::ZERO, hundred)
}

/// Annotate every wish with affordability under both balance scenarios and
/// sort for display: priority rank descending, insertion order within a rank
/// (the sort must be stable so new items keep their place).
pub fn annotate(
    wishlist: &[WishlistItem],
    base_balance: Decimal,
    potential_balance: Decimal,
) -> Vec<AffordableItem> {
    let mut out: Vec<AffordableItem> = wishlist
        .iter()
        .map(|w| AffordableItem {
            affordable: w.price <= potential_balance,
            affordable_without_loans: w.price <= base_balance,
            difference: w.price - potential_balance,
            progress: progress_toward(w.price, potential_balance),
            item: w.clone(),
        })
        .collect();
    out.sort_by(|a, b| b.item.priority.rank().cmp(&a.item.priority.rank()));
    out
}

/// The sporadic expense a purchase will create. Building the plan is pure;
/// executing it against the store is the two-step create-then-delete.
#[derive(Debug, Clone, Serialize)]
pub struct PurchasePlan {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

pub fn purchase_plan(
    item: &WishlistItem,
    actual_price: Option<Decimal>,
    category: Option<String>,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> PurchasePlan {
    PurchasePlan {
        description: format!("Wishlist: {}", item.item),
        amount: actual_price.unwrap_or(item.price),
        category: category.unwrap_or_else(|| item.category.clone()),
        date: date.unwrap_or(today),
    }
}

impl PurchasePlan {
    pub fn matches(&self, expense: &SporadicExpense) -> bool {
        expense.description == self.description
            && expense.amount == self.amount
            && expense.category == self.category
            && expense.date == self.date
    }
}
