//! URL resolution for menu links

use sidebar_shared::constants::FALLBACK_URL;
use sidebar_shared::utils::scrub;

use crate::domain::menu_item::non_empty;
use crate::domain::{LinkType, MenuItem};

/// Route derived from the link kind, or `None` when the kind has no desk route.
pub fn build_route(link_type: &LinkType, link_to: &str) -> Option<String> {
    let link_to = link_to.trim();
    if link_to.is_empty() {
        return None;
    }
    let slug = scrub(link_to);
    match link_type {
        LinkType::DocType | LinkType::Page | LinkType::Workspace => Some(format!("/app/{}", slug)),
        LinkType::Report => Some(format!("/app/query-report/{}", slug)),
        LinkType::Dashboard => Some(format!("/app/dashboard/{}", slug)),
        LinkType::Url | LinkType::Other(_) => None,
    }
}

/// Display URL of a Link item: explicit route, then explicit URL, then the
/// derived route, then `#`.
pub fn resolve_url(item: &MenuItem) -> String {
    if let Some(route) = non_empty(item.route.as_deref()) {
        return route.trim().to_string();
    }
    let Some(link) = &item.link else {
        return FALLBACK_URL.to_string();
    };
    if link.link_type == LinkType::Url {
        if let Some(url) = non_empty(link.url.as_deref()) {
            return url.trim().to_string();
        }
    }
    build_route(&link.link_type, &link.link_to).unwrap_or_else(|| FALLBACK_URL.to_string())
}
