//! Multi-channel risk triage: catalog matching → channel scoring → score
//! combination → classification → protocol selection → session tracking.

pub mod catalog;
pub mod classify;
pub mod engine;
pub mod history;
pub mod protocol;
pub mod scoring;
pub mod types;
