//! # Sidebar Core
//! 
//! Domain entities, services, and repository traits for the role sidebar service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod ports;
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, LookupError};
