//! # Sidebar API
//! 
//! HTTP handlers, extractors, and the router.

pub mod handlers;
pub mod extract;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
