//! Medical query analysis pipeline.
//!
//! A single-pass deterministic pipeline: normalize the query text, match
//! diseases and symptoms against the immutable knowledge registry,
//! classify the caller's intent, derive urgency and confidence, and
//! compose a templated answer with the mandatory disclaimer.
//!
//! Data flow:
//! raw query → `normalize` → (`extract`, `intent`) → `scoring` →
//! `compose` → `engine` assembles the result.

pub mod compose;
pub mod engine;
pub mod extract;
pub mod intent;
pub mod knowledge;
pub mod normalize;
pub mod scoring;
pub mod types;
