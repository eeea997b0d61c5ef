//! Authenticated identity invoking an operation

use serde::{Deserialize, Serialize};
use sidebar_shared::constants::{ADMINISTRATOR_ROLE, AUTOMATIC_ROLES, GUEST_ROLE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user: String,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn new(user: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            user: user.into(),
            roles,
        }
    }

    pub fn guest() -> Self {
        Self::new("Guest", vec![GUEST_ROLE.to_string()])
    }

    pub fn is_administrator(&self) -> bool {
        self.roles.iter().any(|r| r == ADMINISTRATOR_ROLE)
    }

    pub fn is_guest(&self) -> bool {
        self.user == GUEST_ROLE
    }

    /// First assigned role, used when a request names no role.
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }

    /// First role that is not assigned implicitly by the platform.
    pub fn sidebar_role(&self) -> Option<&str> {
        self.roles
            .iter()
            .map(String::as_str)
            .find(|role| !AUTOMATIC_ROLES.contains(role))
    }
}
