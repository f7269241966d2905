//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the back-office command layer.
// CONTEXT: Commands run synchronously over `AppState` and reach the host
// process through an `IpcBridge`. Local UI state (settings, tour progress,
// goals, session) lives in a `KeyValueStore`.

use std::path::Path;
use std::sync::Mutex;

use analytics::Goal;
use chrono::NaiveDate;
use persistence::{FileStore, KeyValueStore, MemoryStore, PersistenceError};
use tour::Tour;

pub mod api_types;
pub mod auth;
pub mod bridge;
pub mod export;
pub mod goals;
pub mod language;
pub mod logging;
pub mod pricing_commands;
pub mod settings;
pub mod stores;
pub mod theme;
pub mod toasts;
pub mod tour_commands;
pub mod widgets;

pub use api_types::{Role, Sale, Store, StoreInput, User};
pub use auth::Permission;
pub use bridge::{channels, Api, BridgeError, IpcBridge};
pub use language::Language;
pub use logging::{get_log_path, init_console_logger, init_log_file, next_seq, write_log};
pub use pricing_commands::PricingState;
pub use settings::{PaymentMethods, StoreSettings};
pub use theme::Theme;
pub use toasts::{Toast, ToastKind};
pub use widgets::{LoadOutcome, LoadTicket, WidgetKind, WidgetState, Widgets};

/// Name of the local storage file inside the data directory.
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

// ============================================================================
// STATE
// ============================================================================

pub struct AppState {
    /// Local key/value storage (settings, tour progress, goals, session)
    pub storage: Mutex<Box<dyn KeyValueStore>>,
    /// Store settings, including theme and language
    pub settings: Mutex<StoreSettings>,
    /// Logged-in user, if any
    pub session: Mutex<Option<User>>,
    pub tour: Mutex<Tour>,
    pub goals: Mutex<Vec<Goal>>,
    /// Inputs and results of the last pricing run
    pub pricing: Mutex<PricingState>,
    /// Pending notifications for the UI
    pub toasts: Mutex<Vec<Toast>>,
    pub widgets: Widgets,
}

impl AppState {
    /// Run `f` against the local store, mapping failures to command errors.
    pub(crate) fn with_store<T, F>(&self, f: F) -> Result<T, String>
    where
        F: FnOnce(&mut dyn KeyValueStore) -> Result<T, PersistenceError>,
    {
        let mut store = self
            .storage
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        f(&mut **store).map_err(|e| e.to_string())
    }
}

/// Build application state around `store`, restoring everything persisted in it.
pub fn create_app_state(store: Box<dyn KeyValueStore>) -> AppState {
    log_info!("SYS", "Creating AppState");

    let settings = settings::load_settings(store.as_ref());
    let tour = tour_commands::load_tour(store.as_ref());
    let goals = goals::load_goals(store.as_ref());
    let session = auth::load_session(store.as_ref());

    log_info!(
        "SYS",
        "Restored state: {} goal(s), tour {:?}, session {}",
        goals.len(),
        tour.status(),
        session.as_ref().map(|u| u.username.as_str()).unwrap_or("none")
    );

    AppState {
        storage: Mutex::new(store),
        settings: Mutex::new(settings),
        session: Mutex::new(session),
        tour: Mutex::new(tour),
        goals: Mutex::new(goals),
        pricing: Mutex::new(PricingState::default()),
        toasts: Mutex::new(Vec::new()),
        widgets: Widgets::new(),
    }
}

/// Start the application with its log file and local storage under `data_dir`.
pub fn bootstrap(data_dir: &Path) -> AppState {
    init_console_logger();
    match init_log_file(data_dir) {
        Ok(path) => log_info!("SYS", "Logging to {:?}", path),
        Err(e) => log_warn!("SYS", "File logging unavailable, console only: {}", e),
    }

    let storage_path = data_dir.join(STORAGE_FILE_NAME);
    let store: Box<dyn KeyValueStore> = match FileStore::open(&storage_path) {
        Ok(store) => {
            log_info!("SYS", "Opened local storage at {:?}", storage_path);
            Box::new(store)
        }
        Err(e) => {
            log_error!(
                "SYS",
                "Could not open local storage at {:?}, using memory: {}",
                storage_path,
                e
            );
            Box::new(MemoryStore::new())
        }
    };

    create_app_state(store)
}

/// The local calendar day.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
