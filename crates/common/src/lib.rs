//! Shared helpers for the job directory crates: logging setup and small
//! response types used across the HTTP surface.

pub mod types;
pub mod utils;
