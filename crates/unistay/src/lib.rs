//! Core crate for the Unistay university-housing marketplace.
//!
//! The interesting machinery lives in [`marketplace`]: a pure match/relevance
//! scorer, the filter/sort/recommend pipeline, and the declarative browse
//! pipeline, all operating over snapshots supplied by the caller. The
//! [`directory`] module carries the static university reference data those
//! pieces consume.

pub mod config;
pub mod directory;
pub mod error;
pub mod marketplace;
pub mod telemetry;
