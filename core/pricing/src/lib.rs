//! FILENAME: core/pricing/src/lib.rs
//! Bizdesk Pricing Module
//!
//! Computes recommended selling prices from unit cost, a sales-weighted share
//! of operating expenses, inflation, desired margin and tax.

pub mod band;
pub mod calculator;
pub mod summary;
pub mod types;

pub use band::MarginBand;
pub use calculator::{calculate_pricing, round2};
pub use summary::{summarize, PricingSummary};
pub use types::{OperatingExpenses, PricingParameters, PricingResult, Product};
