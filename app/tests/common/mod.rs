//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Bizdesk integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use app_lib::{channels, create_app_state, AppState, BridgeError, IpcBridge};
use chrono::NaiveDate;
use persistence::MemoryStore;
use serde_json::{json, Value};

/// Fixed "today" for every fixture.
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// MOCK BRIDGE
// ============================================================================

/// Scripted bridge: canned replies per channel, and a log of every call.
pub struct MockBridge {
    responses: Mutex<HashMap<String, Result<Value, String>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockBridge {
    pub fn new() -> Self {
        MockBridge {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, channel: &str, reply: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(channel.to_string(), Ok(reply));
    }

    pub fn fail(&self, channel: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(channel.to_string(), Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, channel: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == channel)
            .count()
    }

    pub fn last_args(&self, channel: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(c, _)| c == channel)
            .map(|(_, args)| args.clone())
    }
}

impl IpcBridge for MockBridge {
    fn invoke(&self, channel: &str, args: Value) -> Result<Value, BridgeError> {
        self.calls.lock().unwrap().push((channel.to_string(), args));
        match self.responses.lock().unwrap().get(channel) {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(message)) => Err(BridgeError::Remote {
                channel: channel.to_string(),
                message: message.clone(),
            }),
            None => Err(BridgeError::UnknownChannel(channel.to_string())),
        }
    }
}

// ============================================================================
// HARNESS
// ============================================================================

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
    pub bridge: MockBridge,
}

impl TestHarness {
    /// Empty local storage and a bridge that knows no channels.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Start from pre-populated local storage.
    pub fn with_store(store: MemoryStore) -> Self {
        TestHarness {
            state: create_app_state(Box::new(store)),
            bridge: MockBridge::new(),
        }
    }

    /// A small shop: four products, five sales around `as_of()`, two employees.
    pub fn with_sample_data() -> Self {
        let harness = Self::new();
        harness.bridge.respond(channels::PRODUCTS_GET_ALL, sample_products());
        harness.bridge.respond(channels::SALES_GET_ALL, sample_sales());
        harness.bridge.respond(channels::EMPLOYEES_GET_ALL, sample_employees());
        harness
    }
}

/// Ids come back as numbers, the way the SQLite-backed host sends them.
pub fn sample_products() -> Value {
    json!([
        { "id": 1, "name": "Coffee", "price": 15.0, "cost": 8.0, "stock": 40 },
        { "id": 2, "name": "Bagel", "price": 5.0, "cost": 2.0, "stock": 12 },
        { "id": 3, "name": "Tea", "price": 10.0, "cost": 4.0, "stock": 30 },
        { "id": 4, "name": "Muffin", "price": 6.0, "cost": 3.0, "stock": 0 }
    ])
}

/// Inside the 30 days to `as_of()`: Coffee 5 units, Bagel 10, Tea 1.
/// One older sale (2024-05-20) falls outside that window.
pub fn sample_sales() -> Value {
    json!([
        {
            "id": 1, "createdAt": "2024-06-30T09:15:00Z", "total": 50.0, "paymentMethod": "cash",
            "items": [
                { "productId": 1, "quantity": 2, "price": 15.0 },
                { "productId": 2, "quantity": 4, "price": 5.0 }
            ]
        },
        {
            "id": 2, "createdAt": "2024-06-29 17:40:00", "total": 30.0,
            "items": [{ "productId": 1, "quantity": 2, "price": 15.0 }]
        },
        {
            "id": 3, "createdAt": "2024-06-28", "total": 10.0,
            "items": [{ "productId": 3, "quantity": 1, "price": 10.0 }]
        },
        {
            "id": 4, "createdAt": "2024-06-15T12:00:00Z", "total": 45.0,
            "items": [
                { "productId": 1, "quantity": 1, "price": 15.0 },
                { "productId": 2, "quantity": 6, "price": 5.0 }
            ]
        },
        {
            "id": 5, "createdAt": "2024-05-20T12:00:00Z", "total": 100.0,
            "items": [{ "productId": 2, "quantity": 20, "price": 5.0 }]
        }
    ])
}

pub fn sample_employees() -> Value {
    json!([
        { "id": 1, "name": "Ana", "role": "cashier", "salary": 1200.0 },
        { "id": 2, "name": "Luis", "role": "manager", "salary": 800.0 }
    ])
}
