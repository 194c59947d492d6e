//! Service layer for the job directory.
//! - Separates business rules (validation, timestamps, not-found mapping) from data access.
//! - Reuses entity definitions and the tag codec from the `models` crate.
//! - Exposes a repository trait so the HTTP layer can run against Postgres or memory.

pub mod errors;
pub mod jobs;
#[cfg(test)]
pub mod test_support;
