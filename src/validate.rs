// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const MAX_TEXT_LEN: usize = 500;

// 999,999,999,999 upper cap on any single amount.
static MAX_AMOUNT: Lazy<Decimal> = Lazy::new(|| Decimal::from(999_999_999_999_i64));

static STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[<>]|javascript:|data:").expect("static pattern")
});

/// Trim, cap length and strip markup/script-url fragments from free text.
pub fn sanitize_text(input: &str) -> String {
    let trimmed: String = input.trim().chars().take(MAX_TEXT_LEN).collect();
    STRIP.replace_all(&trimmed, "").into_owned()
}

pub fn require_text(input: &str, field: &'static str) -> Result<String, ValidationError> {
    let clean = sanitize_text(input);
    if clean.is_empty() {
        return Err(ValidationError::EmptyText(field));
    }
    Ok(clean)
}

/// Non-negative, capped, rounded to 2 decimal places.
pub fn amount(value: Decimal) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::NegativeAmount);
    }
    if value > *MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(value.round_dp(2))
}

pub fn payment_day(day: u32) -> Result<u32, ValidationError> {
    if !(1..=31).contains(&day) {
        return Err(ValidationError::DayOutOfRange);
    }
    Ok(day)
}

pub fn percentage(value: u32) -> Result<u32, ValidationError> {
    if value > 100 {
        return Err(ValidationError::PercentageOutOfRange);
    }
    Ok(value)
}

/// Parse a YYYY-MM-DD date and reject anything more than a century away
/// from `today` in either direction.
pub fn date(s: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))?;
    let century = 100;
    if parsed.year() < today.year() - century || parsed.year() > today.year() + century {
        return Err(ValidationError::DateOutOfRange);
    }
    Ok(parsed)
}
