//! Local HTTP surface for the analysis engine.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;
