//! FILENAME: app/src/bridge.rs
//! PURPOSE: Facade over the IPC bridge to the host process.
//! CONTEXT: The host answers request/response calls keyed by channel name
//! (`sales:getAll`, `forecast:revenue`, ...). This module only knows channel
//! names and payload shapes; the transport lives behind `IpcBridge`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::api_types::{
    CashflowProjection, Customer, CustomerQuery, DateRangeParams, Deposit, DepositInput,
    Employee, FinanceRecord, FinanceSearchParams, FinancialHealth, InsightParams,
    InventoryItem, InventorySearchParams, LoginRequest, CatalogProduct, ProductInsight,
    ProductQuery, ReorderAlert, RevenueForecast, Sale, SearchPage, Store, StoreInput, User,
};
use crate::{log_debug, log_error};

/// Channel names understood by the host.
pub mod channels {
    pub const SALES_GET_ALL: &str = "sales:getAll";
    pub const EMPLOYEES_GET_ALL: &str = "employees:getAll";
    pub const CUSTOMERS_GET_ALL: &str = "customers:getAll";
    pub const PRODUCTS_GET_ALL: &str = "products:getAll";
    pub const STORES_GET_ALL: &str = "stores:getAll";
    pub const STORES_CREATE: &str = "stores:create";
    pub const STORES_UPDATE: &str = "stores:update";
    pub const STORES_DELETE: &str = "stores:delete";
    pub const DEPOSITS_CREATE: &str = "deposits:create";
    pub const SEARCH_FINANCE: &str = "search:finance";
    pub const SEARCH_INVENTORY: &str = "search:inventory";
    pub const FORECAST_REVENUE: &str = "forecast:revenue";
    pub const FORECAST_CASHFLOW: &str = "forecast:cashflow";
    pub const INSIGHTS_PRODUCTS: &str = "insights:products";
    pub const HEALTH_FINANCIAL: &str = "health:financial";
    pub const REORDER_GET_ALERTS: &str = "reorder:getAlerts";
    pub const AUTH_LOGIN: &str = "auth:login";
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Channel not available: {0}")]
    UnknownChannel(String),

    #[error("Call to {channel} failed: {message}")]
    Remote { channel: String, message: String },

    #[error("Could not encode request for {channel}: {source}")]
    Encode {
        channel: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not decode response from {channel}: {source}")]
    Decode {
        channel: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The transport to the host process.
pub trait IpcBridge: Send + Sync {
    fn invoke(&self, channel: &str, args: Value) -> Result<Value, BridgeError>;
}

/// Typed access to the bridge, one method per channel.
pub struct Api<'a> {
    bridge: &'a dyn IpcBridge,
}

impl<'a> Api<'a> {
    pub fn new(bridge: &'a dyn IpcBridge) -> Self {
        Api { bridge }
    }

    /// Generic invoke with JSON encode/decode, for channels without a typed method.
    pub fn call<P, R>(&self, channel: &str, params: &P) -> Result<R, BridgeError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let args = serde_json::to_value(params).map_err(|source| BridgeError::Encode {
            channel: channel.to_string(),
            source,
        })?;
        log_debug!("BRIDGE", "invoke {} {}", channel, args);

        let response = self.bridge.invoke(channel, args).map_err(|e| {
            log_error!("BRIDGE", "{} failed: {}", channel, e);
            e
        })?;

        serde_json::from_value(response).map_err(|source| {
            log_error!("BRIDGE", "{} returned an unexpected payload: {}", channel, source);
            BridgeError::Decode {
                channel: channel.to_string(),
                source,
            }
        })
    }

    // ------------------------------------------------------------------------
    // Domain getters
    // ------------------------------------------------------------------------

    pub fn sales_get_all(&self) -> Result<Vec<Sale>, BridgeError> {
        self.call(channels::SALES_GET_ALL, &Value::Null)
    }

    pub fn employees_get_all(&self) -> Result<Vec<Employee>, BridgeError> {
        self.call(channels::EMPLOYEES_GET_ALL, &Value::Null)
    }

    pub fn customers_get_all(&self, params: &CustomerQuery) -> Result<Vec<Customer>, BridgeError> {
        self.call(channels::CUSTOMERS_GET_ALL, params)
    }

    pub fn products_get_all(&self, params: &ProductQuery) -> Result<Vec<CatalogProduct>, BridgeError> {
        self.call(channels::PRODUCTS_GET_ALL, params)
    }

    // ------------------------------------------------------------------------
    // Stores & deposits
    // ------------------------------------------------------------------------

    pub fn stores_get_all(&self) -> Result<Vec<Store>, BridgeError> {
        self.call(channels::STORES_GET_ALL, &Value::Null)
    }

    pub fn stores_create(&self, input: &StoreInput) -> Result<Store, BridgeError> {
        self.call(channels::STORES_CREATE, input)
    }

    pub fn stores_update(&self, id: &str, input: &StoreInput) -> Result<Store, BridgeError> {
        self.call(channels::STORES_UPDATE, &json!({ "id": id, "data": input }))
    }

    pub fn stores_delete(&self, id: &str) -> Result<Value, BridgeError> {
        self.call(channels::STORES_DELETE, &json!({ "id": id }))
    }

    pub fn deposits_create(&self, input: &DepositInput) -> Result<Deposit, BridgeError> {
        self.call(channels::DEPOSITS_CREATE, input)
    }

    // ------------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------------

    pub fn search_finance(&self, params: &FinanceSearchParams) -> Result<SearchPage<FinanceRecord>, BridgeError> {
        self.call(channels::SEARCH_FINANCE, params)
    }

    pub fn search_inventory(&self, params: &InventorySearchParams) -> Result<SearchPage<InventoryItem>, BridgeError> {
        self.call(channels::SEARCH_INVENTORY, params)
    }

    pub fn forecast_revenue(&self, days: u32) -> Result<RevenueForecast, BridgeError> {
        self.call(channels::FORECAST_REVENUE, &json!({ "days": days }))
    }

    pub fn forecast_cashflow(&self, days: u32) -> Result<CashflowProjection, BridgeError> {
        self.call(channels::FORECAST_CASHFLOW, &json!({ "days": days }))
    }

    pub fn insights_products(&self, params: &InsightParams) -> Result<Vec<ProductInsight>, BridgeError> {
        self.call(channels::INSIGHTS_PRODUCTS, params)
    }

    pub fn health_financial(&self, range: &DateRangeParams) -> Result<FinancialHealth, BridgeError> {
        self.call(channels::HEALTH_FINANCIAL, range)
    }

    pub fn reorder_get_alerts(&self) -> Result<Vec<ReorderAlert>, BridgeError> {
        self.call(channels::REORDER_GET_ALERTS, &Value::Null)
    }

    pub fn auth_login(&self, request: &LoginRequest) -> Result<User, BridgeError> {
        self.call(channels::AUTH_LOGIN, request)
    }
}
