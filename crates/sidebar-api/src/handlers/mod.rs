//! HTTP handlers

pub mod health;
pub mod sidebar;
pub mod catalog;
pub mod theme;
pub mod boot;
pub mod events;
