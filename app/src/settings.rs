//! FILENAME: app/src/settings.rs
//! PURPOSE: Store settings page: name, tax rate, currency, payment methods.
//! CONTEXT: Each setting is its own string key in local storage. Missing or
//! unreadable values fall back to defaults one key at a time.

use persistence::{KeyValueStore, PersistenceError};
use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::theme::Theme;
use crate::toasts::notify;
use crate::{log_info, log_warn, AppState};

pub const KEY_STORE_NAME: &str = "store_name";
pub const KEY_TAX_RATE: &str = "tax_rate";
pub const KEY_CURRENCY_SYMBOL: &str = "currency_symbol";
pub const KEY_PAYMENT_CASH: &str = "payment_cash";
pub const KEY_PAYMENT_CARD: &str = "payment_card";
pub const KEY_PAYMENT_TRANSFER: &str = "payment_transfer";
pub const KEY_PAYMENT_MOBILE: &str = "payment_mobile";
pub const KEY_THEME: &str = "theme";
pub const KEY_LANGUAGE: &str = "language";

pub const DEFAULT_STORE_NAME: &str = "My Store";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethods {
    pub cash: bool,
    pub card: bool,
    pub transfer: bool,
    pub mobile: bool,
}

impl Default for PaymentMethods {
    fn default() -> Self {
        PaymentMethods {
            cash: true,
            card: true,
            transfer: false,
            mobile: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    /// Default tax rate in percent, used to seed pricing parameters
    pub tax_rate: f64,
    pub currency_symbol: String,
    pub payment_methods: PaymentMethods,
    pub theme: Theme,
    pub language: Language,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: DEFAULT_STORE_NAME.to_string(),
            tax_rate: 0.0,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            payment_methods: PaymentMethods::default(),
            theme: Theme::default(),
            language: Language::default(),
        }
    }
}

/// Tax rates are percentages in 0..=100.
fn is_valid_tax_rate(rate: f64) -> bool {
    rate.is_finite() && (0.0..=100.0).contains(&rate)
}

impl StoreSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.store_name.trim().is_empty() {
            return Err("Store name cannot be empty".to_string());
        }
        if !is_valid_tax_rate(self.tax_rate) {
            return Err(format!("Tax rate must be between 0 and 100, got {}", self.tax_rate));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err("Currency symbol cannot be empty".to_string());
        }
        let pm = &self.payment_methods;
        if !(pm.cash || pm.card || pm.transfer || pm.mobile) {
            return Err("At least one payment method must be enabled".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// LOAD / SAVE
// ============================================================================

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log_warn!("SETTINGS", "could not read {}: {}", key, e);
            None
        }
    }
}

fn read_bool(store: &dyn KeyValueStore, key: &str, default: bool) -> bool {
    match read_key(store, key).as_deref().map(str::trim) {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        Some(other) => {
            log_warn!("SETTINGS", "ignoring unparsable {}={:?}", key, other);
            default
        }
        None => default,
    }
}

/// Read every setting, substituting defaults for missing or bad values.
/// Without a stored language the OS locale decides.
pub fn load_settings(store: &dyn KeyValueStore) -> StoreSettings {
    let defaults = StoreSettings::default();

    let store_name = read_key(store, KEY_STORE_NAME)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(defaults.store_name);

    let tax_rate = match read_key(store, KEY_TAX_RATE) {
        Some(text) => match text.trim().parse::<f64>() {
            Ok(rate) if is_valid_tax_rate(rate) => rate,
            _ => {
                log_warn!("SETTINGS", "ignoring invalid {}={:?}", KEY_TAX_RATE, text);
                defaults.tax_rate
            }
        },
        None => defaults.tax_rate,
    };

    let currency_symbol = read_key(store, KEY_CURRENCY_SYMBOL)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(defaults.currency_symbol);

    let pm = defaults.payment_methods;
    let payment_methods = PaymentMethods {
        cash: read_bool(store, KEY_PAYMENT_CASH, pm.cash),
        card: read_bool(store, KEY_PAYMENT_CARD, pm.card),
        transfer: read_bool(store, KEY_PAYMENT_TRANSFER, pm.transfer),
        mobile: read_bool(store, KEY_PAYMENT_MOBILE, pm.mobile),
    };

    let theme = read_key(store, KEY_THEME)
        .and_then(|t| Theme::parse(&t))
        .unwrap_or(defaults.theme);

    let language = match read_key(store, KEY_LANGUAGE) {
        Some(code) => Language::from_code(&code).unwrap_or(defaults.language),
        None => Language::detect_system(),
    };

    StoreSettings {
        store_name,
        tax_rate,
        currency_symbol,
        payment_methods,
        theme,
        language,
    }
}

/// Write every setting key.
pub fn save_settings(store: &mut dyn KeyValueStore, settings: &StoreSettings) -> Result<(), PersistenceError> {
    let pm = &settings.payment_methods;
    store.set(KEY_STORE_NAME, settings.store_name.trim())?;
    store.set(KEY_TAX_RATE, &settings.tax_rate.to_string())?;
    store.set(KEY_CURRENCY_SYMBOL, settings.currency_symbol.trim())?;
    store.set(KEY_PAYMENT_CASH, &pm.cash.to_string())?;
    store.set(KEY_PAYMENT_CARD, &pm.card.to_string())?;
    store.set(KEY_PAYMENT_TRANSFER, &pm.transfer.to_string())?;
    store.set(KEY_PAYMENT_MOBILE, &pm.mobile.to_string())?;
    store.set(KEY_THEME, settings.theme.as_str())?;
    store.set(KEY_LANGUAGE, settings.language.code())?;
    Ok(())
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn get_settings(state: &AppState) -> Result<StoreSettings, String> {
    let settings = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(settings.clone())
}

fn apply_settings(state: &AppState, settings: StoreSettings) -> Result<StoreSettings, String> {
    settings.validate()?;
    state.with_store(|store| save_settings(store, &settings))?;

    let mut current = state.settings.lock().map_err(|e| e.to_string())?;
    *current = settings.clone();
    log_info!(
        "SETTINGS",
        "saved settings for '{}' (tax {}%)",
        settings.store_name,
        settings.tax_rate
    );
    Ok(settings)
}

/// Validate, persist and apply new settings. Pushes a toast either way.
pub fn update_settings(state: &AppState, settings: StoreSettings) -> Result<StoreSettings, String> {
    let result = apply_settings(state, settings);
    notify(state, result, "Settings saved")
}
