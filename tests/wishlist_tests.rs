// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bolsillo::engine::wishlist::{annotate, progress_toward, purchase_plan};
use bolsillo::error::StoreError;
use bolsillo::models::{Priority, WishlistItem};
use bolsillo::{db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn wish(id: i64, item: &str, price: i64, priority: Priority) -> WishlistItem {
    WishlistItem {
        id,
        item: item.into(),
        price: Decimal::from(price),
        priority,
        category: "otros".into(),
    }
}

#[test]
fn affordability_under_both_scenarios() {
    let items = vec![wish(1, "teclado", 120, Priority::Media)];
    let annotated = annotate(&items, Decimal::from(100), Decimal::from(150));
    let a = &annotated[0];
    assert!(a.affordable);
    assert!(!a.affordable_without_loans);
    assert_eq!(a.difference, Decimal::from(-30));
}

#[test]
fn free_item_is_fully_progressed_never_nan() {
    assert_eq!(
        progress_toward(Decimal::ZERO, Decimal::from(-500)),
        Decimal::from(100)
    );
    let annotated = annotate(&[wish(1, "regalo", 0, Priority::Baja)], Decimal::ZERO, Decimal::ZERO);
    assert!(annotated[0].affordable);
    assert_eq!(annotated[0].progress, Decimal::from(100));
}

#[test]
fn progress_clamps_both_ends() {
    assert_eq!(
        progress_toward(Decimal::from(100), Decimal::from(-50)),
        Decimal::ZERO
    );
    assert_eq!(
        progress_toward(Decimal::from(100), Decimal::from(250)),
        Decimal::from(100)
    );
    assert_eq!(
        progress_toward(Decimal::from(200), Decimal::from(50)),
        Decimal::from(25)
    );
}

#[test]
fn ranking_is_priority_descending_with_stable_insertion_ties() {
    let items = vec![
        wish(1, "first-media", 10, Priority::Media),
        wish(2, "baja", 10, Priority::Baja),
        wish(3, "alta", 10, Priority::Alta),
        wish(4, "second-media", 10, Priority::Media),
    ];
    let annotated = annotate(&items, Decimal::from(100), Decimal::from(100));
    let order: Vec<&str> = annotated.iter().map(|a| a.item.item.as_str()).collect();
    assert_eq!(order, vec!["alta", "first-media", "second-media", "baja"]);
}

#[test]
fn purchase_plan_defaults_and_overrides() {
    let item = wish(1, "monitor", 50_000, Priority::Alta);
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

    let plan = purchase_plan(&item, None, None, None, today);
    assert_eq!(plan.description, "Wishlist: monitor");
    assert_eq!(plan.amount, Decimal::from(50_000));
    assert_eq!(plan.category, "otros");
    assert_eq!(plan.date, today);

    let custom = purchase_plan(
        &item,
        Some(Decimal::from(47_500)),
        Some("tecnologia".into()),
        Some(NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()),
        today,
    );
    assert_eq!(custom.amount, Decimal::from(47_500));
    assert_eq!(custom.category, "tecnologia");
    assert_eq!(custom.date, NaiveDate::from_ymd_opt(2025, 3, 18).unwrap());
}

#[test]
fn purchase_creates_expense_then_removes_wish() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let created = store::insert_wishlist_item(
        &conn,
        &store::NewWishlistItem {
            item: "silla".into(),
            price: Decimal::from(50_000),
            priority: Priority::Media,
            category: "otros".into(),
        },
    )
    .unwrap();

    let (item, expense, plan) =
        store::purchase_wishlist_item(&conn, created.id, None, None, None, today).unwrap();
    assert_eq!(item.id, created.id);
    assert!(plan.matches(&expense));
    assert_eq!(expense.amount, Decimal::from(50_000));
    assert_eq!(expense.category, "otros");
    assert_eq!(expense.date, today);

    assert!(store::list_wishlist(&conn).unwrap().is_empty());
    let expenses = store::list_sporadic_expenses(&conn).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "Wishlist: silla");
}

#[test]
fn failed_expense_insert_leaves_the_wish_in_place() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let created = store::insert_wishlist_item(
        &conn,
        &store::NewWishlistItem {
            item: "tele".into(),
            price: Decimal::from(90_000),
            priority: Priority::Alta,
            category: "otros".into(),
        },
    )
    .unwrap();

    // Break the expense table so the first step of the purchase fails.
    conn.execute_batch("DROP TABLE sporadic_expenses").unwrap();

    let err =
        store::purchase_wishlist_item(&conn, created.id, None, None, None, today).unwrap_err();
    assert!(err.to_string().contains("sporadic_expense"));

    let remaining = store::list_wishlist(&conn).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, created.id);
}

#[test]
fn failed_wish_delete_keeps_the_expense_and_reports_partial_purchase() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let created = store::insert_wishlist_item(
        &conn,
        &store::NewWishlistItem {
            item: "bici".into(),
            price: Decimal::from(400_000),
            priority: Priority::Media,
            category: "transporte".into(),
        },
    )
    .unwrap();

    // Block the second step of the purchase so the insert lands but the
    // delete fails.
    conn.execute_batch(
        "CREATE TRIGGER block_wish_delete BEFORE DELETE ON wishlist_items
         BEGIN SELECT RAISE(ABORT, 'wish locked'); END;",
    )
    .unwrap();

    let err =
        store::purchase_wishlist_item(&conn, created.id, None, None, None, today).unwrap_err();
    assert!(matches!(err, StoreError::PartialPurchase { .. }));

    // Nothing is rolled back: the expense persists and the wish remains.
    let expenses = store::list_sporadic_expenses(&conn).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "Wishlist: bici");
    let remaining = store::list_wishlist(&conn).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, created.id);
}

#[test]
fn newly_patched_wish_joins_the_annotated_ranking() {
    let mut snapshot = bolsillo::engine::Snapshot {
        wishlist: vec![wish(1, "silla", 200_000, Priority::Baja)],
        ..Default::default()
    };
    snapshot.patch_insert_wish(wish(2, "parlante", 100_000, Priority::Alta));

    let annotated = annotate(
        &snapshot.wishlist,
        Decimal::from(150_000),
        Decimal::from(150_000),
    );
    assert_eq!(annotated[0].item.item, "parlante");
    assert!(annotated[0].affordable);
    assert!(!annotated[1].affordable);
}
