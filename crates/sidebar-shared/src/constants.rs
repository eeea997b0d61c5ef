//! Application-wide constants

/// Role that bypasses every permission check and may manage sidebars.
pub const ADMINISTRATOR_ROLE: &str = "Administrator";

/// Pseudo-role whose grants apply to every role.
pub const ALL_ROLE: &str = "All";

pub const GUEST_ROLE: &str = "Guest";

/// Roles assigned implicitly by the platform; never used to pick a sidebar at boot.
pub const AUTOMATIC_ROLES: [&str; 4] = [GUEST_ROLE, ALL_ROLE, "Desk User", ADMINISTRATOR_ROLE];

pub const SIDEBAR_CACHE_PREFIX: &str = "role_sidebar_";
pub const THEME_CACHE_KEY: &str = "theme_settings";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

pub const EVENT_ROLE_SIDEBAR_UPDATED: &str = "role_sidebar_updated";
pub const EVENT_THEME_UPDATED: &str = "theme_updated";

pub const SIDEBAR_HEADER_ICON: &str = "folder";
pub const FALLBACK_URL: &str = "#";

/// Upper bound on workspace sidebars scanned when building default items.
pub const WORKSPACE_SIDEBAR_SCAN_LIMIT: usize = 50;

pub const MAX_LABEL_LENGTH: u64 = 140;
pub const DEFAULT_REALTIME_CAPACITY: usize = 256;
