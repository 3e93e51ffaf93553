// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bolsillo::models::{CreditStatus, Frequency, Priority};
use bolsillo::{db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn schema_builds_on_a_fresh_connection_and_reinit_is_idempotent() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::init_schema(&mut conn).unwrap();

    let tables: i64 = conn
        .query_row(
            "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='monthly_salaries'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
    store::set_legacy_salary(&conn, Decimal::from(1_000_000), 3, 2025).unwrap();
}

#[test]
fn income_source_crud_round_trip() {
    let conn = setup();
    let created = store::insert_income_source(
        &conn,
        &store::NewIncomeSource {
            name: "nomina".into(),
            amount: Decimal::from(1_200_000),
            frequency: Frequency::Monthly,
            payment_day: Some(28),
            is_active: true,
            category: "salario".into(),
        },
    )
    .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.payment_day, Some(28));

    let updated =
        store::update_income_source(&conn, created.id, Some(Decimal::from(1_300_000)), None, None)
            .unwrap();
    assert_eq!(updated.amount, Decimal::from(1_300_000));
    // Untouched fields survive a partial update.
    assert_eq!(updated.payment_day, Some(28));
    assert!(updated.is_active);

    let toggled = store::toggle_income_source(&conn, created.id).unwrap();
    assert!(!toggled.is_active);
    let toggled_back = store::toggle_income_source(&conn, created.id).unwrap();
    assert!(toggled_back.is_active);

    store::delete_income_source(&conn, created.id).unwrap();
    assert!(store::list_income_sources(&conn).unwrap().is_empty());
    assert!(store::delete_income_source(&conn, created.id).is_err());
}

#[test]
fn regular_expense_paid_toggle_stamps_and_clears_date() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let created = store::insert_regular_expense(
        &conn,
        &store::NewRegularExpense {
            description: "arriendo".into(),
            amount: Decimal::from(800_000),
            category: "servicios".into(),
            payment_date: 5,
        },
    )
    .unwrap();
    assert!(!created.paid);

    let paid = store::toggle_regular_expense_paid(&conn, created.id, today).unwrap();
    assert!(paid.paid);
    assert_eq!(paid.paid_date, Some(today));

    let unpaid = store::toggle_regular_expense_paid(&conn, created.id, today).unwrap();
    assert!(!unpaid.paid);
    assert_eq!(unpaid.paid_date, None);
}

#[test]
fn credit_payment_reduces_remaining_by_principal() {
    let mut conn = setup();
    let credit = store::insert_personal_credit(
        &conn,
        &store::NewPersonalCredit {
            name: "moto".into(),
            total_amount: Decimal::from(5_000_000),
            monthly_payment: Decimal::from(250_000),
            interest_rate: Decimal::new(25, 1),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            payment_day: 15,
            end_date: None,
            category: "transporte".into(),
            priority: Priority::Alta,
        },
    )
    .unwrap();
    assert_eq!(credit.remaining_amount, credit.total_amount);
    assert_eq!(credit.status, CreditStatus::Active);

    let date = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
    store::add_credit_payment(
        &mut conn,
        &store::NewCreditPayment {
            credit_id: credit.id,
            amount: Decimal::from(250_000),
            payment_date: date,
            due_date: date,
            principal_amount: Decimal::from(200_000),
            interest_amount: Decimal::from(50_000),
            fees_amount: Decimal::ZERO,
        },
    )
    .unwrap();

    let reloaded = store::get_personal_credit(&conn, credit.id).unwrap();
    assert_eq!(reloaded.remaining_amount, Decimal::from(4_800_000));
    assert_eq!(reloaded.status, CreditStatus::Active);
}

#[test]
fn credit_flips_to_paid_when_remaining_hits_zero() {
    let mut conn = setup();
    let credit = store::insert_personal_credit(
        &conn,
        &store::NewPersonalCredit {
            name: "ultimo tramo".into(),
            total_amount: Decimal::from(100_000),
            monthly_payment: Decimal::from(100_000),
            interest_rate: Decimal::ZERO,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            payment_day: 1,
            end_date: None,
            category: "otros".into(),
            priority: Priority::Baja,
        },
    )
    .unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    store::add_credit_payment(
        &mut conn,
        &store::NewCreditPayment {
            credit_id: credit.id,
            amount: Decimal::from(120_000),
            payment_date: date,
            due_date: date,
            // Principal above the remaining amount clamps at zero.
            principal_amount: Decimal::from(120_000),
            interest_amount: Decimal::ZERO,
            fees_amount: Decimal::ZERO,
        },
    )
    .unwrap();

    let reloaded = store::get_personal_credit(&conn, credit.id).unwrap();
    assert_eq!(reloaded.remaining_amount, Decimal::ZERO);
    assert_eq!(reloaded.status, CreditStatus::Paid);
}

#[test]
fn installments_round_trip_and_mark_paid() {
    let conn = setup();
    let credit = store::insert_personal_credit(
        &conn,
        &store::NewPersonalCredit {
            name: "nevera".into(),
            total_amount: Decimal::from(1_200_000),
            monthly_payment: Decimal::from(100_000),
            interest_rate: Decimal::ZERO,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            payment_day: 10,
            end_date: None,
            category: "servicios".into(),
            priority: Priority::Media,
        },
    )
    .unwrap();

    let due = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let inst =
        store::insert_credit_installment(&conn, credit.id, 4, due, Decimal::from(100_000)).unwrap();
    assert!(!inst.is_paid);

    let paid = store::mark_installment_paid(&conn, inst.id).unwrap();
    assert!(paid.is_paid);
    assert_eq!(paid.due_date, due);
}

#[test]
fn legacy_salary_upserts_and_returns_latest() {
    let conn = setup();
    assert_eq!(store::get_legacy_salary(&conn).unwrap(), None);

    store::set_legacy_salary(&conn, Decimal::from(2_000_000), 2, 2025).unwrap();
    store::set_legacy_salary(&conn, Decimal::from(2_500_000), 3, 2025).unwrap();
    // Re-set the same month: update, not a second row.
    store::set_legacy_salary(&conn, Decimal::from(2_600_000), 3, 2025).unwrap();

    assert_eq!(
        store::get_legacy_salary(&conn).unwrap(),
        Some(Decimal::from(2_600_000))
    );
}

#[test]
fn snapshot_gathers_every_entity_list() {
    let conn = setup();
    store::insert_income_source(
        &conn,
        &store::NewIncomeSource {
            name: "nomina".into(),
            amount: Decimal::from(900_000),
            frequency: Frequency::Biweekly,
            payment_day: None,
            is_active: true,
            category: "salario".into(),
        },
    )
    .unwrap();
    store::insert_sporadic_expense(
        &conn,
        &store::NewSporadicExpense {
            description: "cine".into(),
            amount: Decimal::from(30_000),
            category: "entretenimiento".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
        },
    )
    .unwrap();
    store::insert_wishlist_item(
        &conn,
        &store::NewWishlistItem {
            item: "parlante".into(),
            price: Decimal::from(150_000),
            priority: Priority::Media,
            category: "tecnologia".into(),
        },
    )
    .unwrap();

    let snapshot = store::load_snapshot(&conn).unwrap();
    assert_eq!(snapshot.income_sources.len(), 1);
    assert_eq!(snapshot.sporadic_expenses.len(), 1);
    assert_eq!(snapshot.wishlist.len(), 1);
    assert!(snapshot.pending_loans.is_empty());
    assert_eq!(snapshot.legacy_salary, None);
}
