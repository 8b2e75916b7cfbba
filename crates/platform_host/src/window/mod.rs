//! Window platform contracts, models, and in-memory adapter.

pub mod memory;
pub mod service;
pub mod types;
