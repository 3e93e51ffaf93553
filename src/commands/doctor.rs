// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Frequency;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Consistency scan over invariants the schema cannot enforce.
pub fn handle(conn: &Connection) -> Result<()> {
    let snapshot = store::load_snapshot(conn)?;
    let mut rows = Vec::new();

    // 1) Loan repayment totals out of bounds
    for loan in &snapshot.pending_loans {
        if loan.amount_paid < Decimal::ZERO || loan.amount_paid > loan.amount {
            rows.push(vec![
                "loan_paid_out_of_bounds".into(),
                format!("loan #{}: {} paid of {}", loan.id, loan.amount_paid, loan.amount),
            ]);
        }
    }

    // 2) Payment records disagreeing with the loan's running total
    let mut paid_by_loan: HashMap<i64, Decimal> = HashMap::new();
    for p in &snapshot.loan_payments {
        *paid_by_loan.entry(p.loan_id).or_default() += p.amount;
    }
    for loan in &snapshot.pending_loans {
        let recorded = paid_by_loan.get(&loan.id).copied().unwrap_or(Decimal::ZERO);
        if recorded != loan.amount_paid {
            rows.push(vec![
                "loan_payments_mismatch".into(),
                format!(
                    "loan #{}: payments sum {} but amount_paid is {}",
                    loan.id, recorded, loan.amount_paid
                ),
            ]);
        }
    }

    // 3) Credit remaining out of bounds
    for credit in &snapshot.personal_credits {
        if credit.remaining_amount < Decimal::ZERO
            || credit.remaining_amount > credit.total_amount
        {
            rows.push(vec![
                "credit_remaining_out_of_bounds".into(),
                format!(
                    "credit #{}: {} remaining of {}",
                    credit.id, credit.remaining_amount, credit.total_amount
                ),
            ]);
        }
    }

    // 4) Orphaned installments and payments
    let credit_ids: Vec<i64> = snapshot.personal_credits.iter().map(|c| c.id).collect();
    for inst in &snapshot.credit_installments {
        if !credit_ids.contains(&inst.credit_id) {
            rows.push(vec![
                "installment_without_credit".into(),
                format!("installment #{} references credit #{}", inst.id, inst.credit_id),
            ]);
        }
    }

    // 5) Occasional sources carrying a payment day
    for source in &snapshot.income_sources {
        if source.frequency == Frequency::Occasional && source.payment_day.is_some() {
            rows.push(vec![
                "occasional_source_with_day".into(),
                format!("source #{} '{}'", source.id, source.name),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
