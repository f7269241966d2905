//! FILENAME: core/persistence/src/lib.rs
//! Bizdesk Persistence Module
//!
//! Local key/value storage for settings and UI state, plus XLSX export of
//! tabular reports.

mod error;
mod report;
mod store;
mod xlsx_writer;

pub use error::PersistenceError;
pub use report::{Report, ReportCell, ReportSheet};
pub use store::{load_json, save_json, FileStore, KeyValueStore, MemoryStore};
pub use xlsx_writer::save_report;
