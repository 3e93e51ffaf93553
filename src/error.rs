// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the store boundary. Reads leave the snapshot
/// untouched, writes leave the local state unmodified, validation rejects
/// before anything reaches the database.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to load {entity}: {source}")]
    Load {
        entity: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to write {entity}: {source}")]
    Write {
        entity: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The wishlist purchase created its expense but could not delete the
    /// wish item. The expense is kept; nothing is rolled back.
    #[error("purchase recorded expense {expense_id} but could not remove wish item {item_id}: {source}")]
    PartialPurchase {
        expense_id: i64,
        item_id: i64,
        #[source]
        source: rusqlite::Error,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("amount must be a non-negative number")]
    NegativeAmount,
    #[error("amount is too large")]
    AmountTooLarge,
    #[error("day of month must be between 1 and 31")]
    DayOutOfRange,
    #[error("probability must be between 0 and 100")]
    PercentageOutOfRange,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("date is outside the accepted range")]
    DateOutOfRange,
    #[error("{0} must not be empty")]
    EmptyText(&'static str),
}
