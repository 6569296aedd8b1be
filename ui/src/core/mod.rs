//! Pure, surface-independent report logic: payload model, view-model
//! builders, chart projections, submission state machine, and platform glue.

pub mod charts;
pub mod client;
pub mod format;
pub mod narrative;
pub mod payload;
pub mod platform;
pub mod submission;
pub mod tables;
