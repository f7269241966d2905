//! FILENAME: core/tour/src/lib.rs
//! Bizdesk Onboarding Tour
//!
//! A linear sequence of named steps with forward/back/skip/complete
//! transitions. Progress is a plain serializable record so the caller can
//! persist it wherever it keeps local state.

mod error;
mod machine;

pub use error::TourError;
pub use machine::{Tour, TourProgress, TourStatus, TourStep, Transition};
