//! # Sidebar Security
//! 
//! Bearer token issue and validation.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService};
