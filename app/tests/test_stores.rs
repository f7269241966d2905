//! FILENAME: tests/test_stores.rs
//! Integration tests for store management and deposits.

mod common;

use app_lib::api_types::DepositInput;
use app_lib::stores::{create_deposit, create_store, delete_store, list_stores, update_store};
use app_lib::toasts::drain_toasts;
use app_lib::{channels, StoreInput, ToastKind};
use common::TestHarness;
use serde_json::json;

fn store_input(name: &str) -> StoreInput {
    StoreInput {
        name: name.to_string(),
        address: Some(" 12 Market St ".to_string()),
        phone: Some("".to_string()),
    }
}

#[test]
fn test_create_store_sends_clean_input() {
    let harness = TestHarness::new();
    harness.bridge.respond(
        channels::STORES_CREATE,
        json!({ "id": 4, "name": "North", "address": "12 Market St" }),
    );

    let store = create_store(&harness.state, &harness.bridge, store_input(" North ")).unwrap();
    assert_eq!(store.id, "4");
    assert!(store.is_active);
    assert_eq!(
        harness.bridge.last_args(channels::STORES_CREATE),
        Some(json!({ "name": "North", "address": "12 Market St" }))
    );

    let toasts = drain_toasts(&harness.state);
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
}

#[test]
fn test_invalid_store_never_reaches_bridge() {
    let harness = TestHarness::new();
    assert!(create_store(&harness.state, &harness.bridge, store_input("   ")).is_err());
    assert!(update_store(&harness.state, &harness.bridge, "4", store_input("")).is_err());
    assert!(harness.bridge.calls().is_empty());

    let toasts = drain_toasts(&harness.state);
    assert_eq!(toasts.len(), 2);
    assert!(toasts.iter().all(|t| t.kind == ToastKind::Error));
}

#[test]
fn test_update_store_wraps_id_and_data() {
    let harness = TestHarness::new();
    harness.bridge.respond(
        channels::STORES_UPDATE,
        json!({ "id": "4", "name": "North Side", "isActive": false }),
    );

    let store = update_store(&harness.state, &harness.bridge, "4", store_input("North Side")).unwrap();
    assert!(!store.is_active);
    assert_eq!(
        harness.bridge.last_args(channels::STORES_UPDATE),
        Some(json!({ "id": "4", "data": { "name": "North Side", "address": "12 Market St" } }))
    );
}

#[test]
fn test_delete_store_failure_shows_error_toast() {
    let harness = TestHarness::new();
    harness.bridge.fail(channels::STORES_DELETE, "store has open sales");

    let err = delete_store(&harness.state, &harness.bridge, "4").unwrap_err();
    assert!(err.contains("store has open sales"));
    assert_eq!(harness.bridge.last_args(channels::STORES_DELETE), Some(json!({ "id": "4" })));

    let toasts = drain_toasts(&harness.state);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert!(toasts[0].message.contains("store has open sales"));
}

#[test]
fn test_list_stores() {
    let harness = TestHarness::new();
    harness.bridge.respond(
        channels::STORES_GET_ALL,
        json!([{ "id": 1, "name": "Main" }, { "id": 2, "name": "Annex", "isActive": false }]),
    );

    let stores = list_stores(&harness.bridge).unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[1].id, "2");
    assert!(!stores[1].is_active);
}

#[test]
fn test_deposit_validation_and_submission() {
    let harness = TestHarness::new();
    harness.bridge.respond(
        channels::DEPOSITS_CREATE,
        json!({ "id": 11, "amount": 250.0, "method": "cash" }),
    );

    let bad = DepositInput {
        amount: -20.0,
        method: None,
        note: None,
        date: None,
    };
    assert!(create_deposit(&harness.state, &harness.bridge, bad).is_err());
    assert_eq!(harness.bridge.calls_to(channels::DEPOSITS_CREATE), 0);

    let good = DepositInput {
        amount: 250.0,
        method: Some("cash".to_string()),
        note: Some("Friday takings".to_string()),
        date: Some("2024-06-28".to_string()),
    };
    let deposit = create_deposit(&harness.state, &harness.bridge, good).unwrap();
    assert_eq!(deposit.id, "11");
    assert_eq!(deposit.amount, 250.0);

    let kinds: Vec<ToastKind> = drain_toasts(&harness.state).into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![ToastKind::Error, ToastKind::Success]);
}
