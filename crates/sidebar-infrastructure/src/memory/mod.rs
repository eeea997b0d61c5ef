//! In-memory adapters for development and tests

pub mod store;

pub use store::{MemoryStore, SeedData};
