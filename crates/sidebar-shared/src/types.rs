//! Common types

use uuid::Uuid;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

/// Role name as stored in the permission tables.
pub type RoleName = String;

/// User identifier (login name or email).
pub type UserId = String;
