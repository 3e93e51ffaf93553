// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Occasional,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Frequency> {
        match s {
            "weekly" => Some(Frequency::Weekly),
            "biweekly" => Some(Frequency::Biweekly),
            "monthly" => Some(Frequency::Monthly),
            "occasional" => Some(Frequency::Occasional),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Occasional => "occasional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Overdue,
    Partial,
    Completed,
    Lost,
}

impl LoanStatus {
    pub fn parse(s: &str) -> Option<LoanStatus> {
        match s {
            "pending" => Some(LoanStatus::Pending),
            "overdue" => Some(LoanStatus::Overdue),
            "partial" => Some(LoanStatus::Partial),
            "completed" => Some(LoanStatus::Completed),
            "lost" => Some(LoanStatus::Lost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Overdue => "overdue",
            LoanStatus::Partial => "partial",
            LoanStatus::Completed => "completed",
            LoanStatus::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    Active,
    Paid,
    Overdue,
    Paused,
}

impl CreditStatus {
    pub fn parse(s: &str) -> Option<CreditStatus> {
        match s {
            "active" => Some(CreditStatus::Active),
            "paid" => Some(CreditStatus::Paid),
            "overdue" => Some(CreditStatus::Overdue),
            "paused" => Some(CreditStatus::Paused),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::Active => "active",
            CreditStatus::Paid => "paid",
            CreditStatus::Overdue => "overdue",
            CreditStatus::Paused => "paused",
        }
    }
}

/// Wishlist priority, highest first: alta > media > baja.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Alta,
    Media,
    Baja,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "alta" => Some(Priority::Alta),
            "media" => Some(Priority::Media),
            "baja" => Some(Priority::Baja),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Alta => "alta",
            Priority::Media => "media",
            Priority::Baja => "baja",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Priority::Alta => 3,
            Priority::Media => 2,
            Priority::Baja => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    /// Day of month (1-31); None for occasional sources.
    pub payment_day: Option<u32>,
    pub is_active: bool,
    pub category: String,
    /// Creation instant anchors the weekly projection cadence.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTransaction {
    pub id: i64,
    /// None means an ad-hoc receipt not tied to a configured source.
    pub income_source_id: Option<i64>,
    pub amount: Decimal,
    pub received_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularExpense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    /// Day of month (1-31) the payment is due each cycle.
    pub payment_date: u32,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SporadicExpense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLoan {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub amount_paid: Decimal,
    /// Recovery probability, 0-100.
    pub probability: u32,
    pub expected_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPayment {
    pub id: i64,
    pub loan_id: i64,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalCredit {
    pub id: i64,
    pub name: String,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    pub monthly_payment: Decimal,
    pub interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub payment_day: u32,
    pub end_date: Option<NaiveDate>,
    pub status: CreditStatus,
    pub category: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditPayment {
    pub id: i64,
    pub credit_id: i64,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub principal_amount: Decimal,
    pub interest_amount: Decimal,
    pub fees_amount: Decimal,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditInstallment {
    pub id: i64,
    pub credit_id: i64,
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: i64,
    pub item: String,
    pub price: Decimal,
    pub priority: Priority,
    pub category: String,
}
