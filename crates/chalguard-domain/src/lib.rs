//! Pure rule evaluation (no IO).
//!
//! Input: challenge documents constructed elsewhere.
//! Output: per-document findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod model;
pub mod report;

pub mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{evaluate, evaluate_document};
pub use fingerprint::fingerprint_for_finding;
