//! FILENAME: core/tour/src/error.rs

use thiserror::Error;

use crate::machine::TourStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    #[error("Tour has no steps")]
    Empty,

    #[error("Tour is not in progress (status: {0:?})")]
    NotActive(TourStatus),

    #[error("Tour is already in progress")]
    AlreadyActive,

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the last step; complete the tour instead")]
    AtLastStep,

    #[error("The tour can only be completed from its last step")]
    NotAtLastStep,
}
