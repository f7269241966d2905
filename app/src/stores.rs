//! FILENAME: app/src/stores.rs
//! PURPOSE: Store (branch) management and cash deposits.
//! CONTEXT: Input is validated before anything is sent over the bridge.
//! Every mutation reports its outcome as a toast.

use crate::api_types::{Deposit, DepositInput, Store, StoreInput};
use crate::bridge::{Api, IpcBridge};
use crate::toasts::notify;
use crate::{log_info, AppState};

fn validate_store(input: &StoreInput) -> Result<StoreInput, String> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err("Store name is required".to_string());
    }
    let clean = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    Ok(StoreInput {
        name: name.to_string(),
        address: clean(&input.address),
        phone: clean(&input.phone),
    })
}

fn validate_deposit(input: &DepositInput) -> Result<(), String> {
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return Err(format!("Deposit amount must be greater than zero, got {}", input.amount));
    }
    if let Some(date) = &input.date {
        if crate::api_types::parse_day(date).is_none() {
            return Err(format!("Invalid deposit date: {}", date));
        }
    }
    Ok(())
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn list_stores(bridge: &dyn IpcBridge) -> Result<Vec<Store>, String> {
    Api::new(bridge).stores_get_all().map_err(|e| e.to_string())
}

pub fn create_store(state: &AppState, bridge: &dyn IpcBridge, input: StoreInput) -> Result<Store, String> {
    let result = validate_store(&input).and_then(|input| {
        Api::new(bridge)
            .stores_create(&input)
            .map_err(|e| e.to_string())
    });
    if let Ok(store) = &result {
        log_info!("STORES", "created store {} '{}'", store.id, store.name);
    }
    notify(state, result, "Store created")
}

pub fn update_store(
    state: &AppState,
    bridge: &dyn IpcBridge,
    store_id: &str,
    input: StoreInput,
) -> Result<Store, String> {
    let result = validate_store(&input).and_then(|input| {
        Api::new(bridge)
            .stores_update(store_id, &input)
            .map_err(|e| e.to_string())
    });
    if result.is_ok() {
        log_info!("STORES", "updated store {}", store_id);
    }
    notify(state, result, "Store updated")
}

pub fn delete_store(state: &AppState, bridge: &dyn IpcBridge, store_id: &str) -> Result<(), String> {
    let result = if store_id.trim().is_empty() {
        Err("Store id is required".to_string())
    } else {
        Api::new(bridge)
            .stores_delete(store_id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    };
    if result.is_ok() {
        log_info!("STORES", "deleted store {}", store_id);
    }
    notify(state, result, "Store deleted")
}

pub fn create_deposit(state: &AppState, bridge: &dyn IpcBridge, input: DepositInput) -> Result<Deposit, String> {
    let result = validate_deposit(&input).and_then(|_| {
        Api::new(bridge)
            .deposits_create(&input)
            .map_err(|e| e.to_string())
    });
    if let Ok(deposit) = &result {
        log_info!("STORES", "recorded deposit {} of {:.2}", deposit.id, deposit.amount);
    }
    notify(state, result, "Deposit recorded")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_input_is_trimmed() {
        let input = StoreInput {
            name: "  North  ".to_string(),
            address: Some("   ".to_string()),
            phone: Some(" 555-0100 ".to_string()),
        };
        let clean = validate_store(&input).unwrap();
        assert_eq!(clean.name, "North");
        assert_eq!(clean.address, None);
        assert_eq!(clean.phone.as_deref(), Some("555-0100"));

        assert!(validate_store(&StoreInput::default()).is_err());
    }

    #[test]
    fn test_deposit_validation() {
        let mut input = DepositInput {
            amount: 250.0,
            method: Some("cash".to_string()),
            note: None,
            date: Some("2024-05-02".to_string()),
        };
        assert!(validate_deposit(&input).is_ok());

        input.amount = 0.0;
        assert!(validate_deposit(&input).is_err());

        input.amount = f64::NAN;
        assert!(validate_deposit(&input).is_err());

        input.amount = 10.0;
        input.date = Some("soon".to_string());
        assert!(validate_deposit(&input).is_err());
    }
}
