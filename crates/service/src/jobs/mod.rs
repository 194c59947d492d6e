//! Job directory module: three-layer architecture (domain, repository, service).
//!
//! Listing with filters and sort, aggregate counts, and full-replace CRUD.

pub mod domain;
pub mod query;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::JobService;
