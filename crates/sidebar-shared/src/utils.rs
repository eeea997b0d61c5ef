//! Utility functions

/// Normalizes an identifier into the slug used in application routes.
///
/// `"Sales Report"` becomes `"sales_report"`, `"Leave-Application"` becomes
/// `"leave_application"`.
pub fn scrub(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Cache key holding the resolved sidebar of a role.
pub fn sidebar_cache_key(role: &str) -> String {
    format!("{}{}", crate::constants::SIDEBAR_CACHE_PREFIX, role)
}
