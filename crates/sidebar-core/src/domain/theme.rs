// ============================================================================
// Sidebar Core - Theme Settings
// File: crates/sidebar-core/src/domain/theme.rs
// Description: Flat map of named color/style properties
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Base color families that carry generated shades.
pub const VARIANT_BASES: [&str; 3] = ["primary", "secondary", "accent"];

/// Properties that must be written in `rgba(r, g, b, a)` form.
pub const RGBA_PROPERTIES: [&str; 3] = [
    "sidebar_border_color",
    "sidebar_hover_bg",
    "sidebar_active_bg_solid",
];

const DEFAULT_THEME: [(&str, &str); 40] = [
    ("color_primary", "#0066FF"),
    ("color_primary_dark", "#0052CC"),
    ("color_primary_light", "#1A7AFF"),
    ("color_primary_lighter", "#3388FF"),
    ("color_primary_lightest", "#4D99FF"),
    ("color_secondary", "#9D4EDD"),
    ("color_secondary_dark", "#7B2DB8"),
    ("color_secondary_light", "#B366E8"),
    ("color_secondary_lighter", "#C880F0"),
    ("color_secondary_lightest", "#D699F5"),
    ("color_accent", "#FF6B35"),
    ("color_accent_dark", "#E55A2B"),
    ("color_accent_light", "#FF7F4D"),
    ("color_accent_lighter", "#FF9366"),
    ("color_accent_lightest", "#FFA780"),
    ("color_text_primary", "#1a202c"),
    ("color_text_secondary", "#6f737c"),
    ("color_text_tertiary", "#718096"),
    ("color_text_light", "#a0aec0"),
    ("color_text_lighter", "#cbd5e0"),
    ("color_bg_white", "#ffffff"),
    ("color_bg_gray", "#f0f0d0"),
    ("color_bg_gray_light", "#f5f5e0"),
    ("color_bg_gray_lighter", "#fafaf0"),
    ("color_bg_light_blue", "#00D4FF"),
    ("sidebar_bg_solid", "#F0F4FF"),
    ("sidebar_border_color", "rgba(157, 78, 221, 0.2)"),
    ("sidebar_hover_bg", "rgba(157, 78, 221, 0.08)"),
    ("sidebar_active_bg_solid", "rgba(157, 78, 221, 0.15)"),
    ("sidebar_active_color", "#9D4EDD"),
    ("color_border", "#e2e8f0"),
    ("color_border_dark", "#cbd5e0"),
    ("color_border_light", "#edf2f7"),
    ("color_success", "#10b981"),
    ("color_error", "#e53e3e"),
    ("color_warning", "#f59e0b"),
    ("color_info", "#3b82f6"),
    ("avatar_frame_bg", "#ffffff"),
    ("avatar_frame_color", "#374151"),
    ("avatar_frame_border", "#e5e7eb"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeSettings(BTreeMap<String, String>);

impl ThemeSettings {
    pub fn defaults() -> Self {
        Self(
            DEFAULT_THEME
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn is_known_property(name: &str) -> bool {
        DEFAULT_THEME.iter().any(|(k, _)| *k == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Sets a property; an empty value clears it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&name);
        } else {
            self.0.insert(name, value.trim().to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for ThemeSettings {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Shade suffix and mix factor: negative mixes toward black, positive toward white.
pub const VARIANT_SHADES: [(&str, f32); 4] = [
    ("dark", -0.2),
    ("light", 0.1),
    ("lighter", 0.2),
    ("lightest", 0.3),
];

/// Parses `#RGB` or `#RRGGBB`.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Mixes a hex color toward black (`factor < 0`) or white (`factor > 0`).
pub fn shade_hex(color: &str, factor: f32) -> Option<String> {
    let (r, g, b) = parse_hex(color)?;
    let factor = factor.clamp(-1.0, 1.0);
    let mix = |c: u8| -> u8 {
        let c = c as f32;
        let target = if factor < 0.0 { 0.0 } else { 255.0 };
        (c + (target - c) * factor.abs()).round().clamp(0.0, 255.0) as u8
    };
    Some(format!("#{:02X}{:02X}{:02X}", mix(r), mix(g), mix(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_property() {
        let defaults = ThemeSettings::defaults();
        assert_eq!(defaults.len(), DEFAULT_THEME.len());
        assert_eq!(defaults.get("color_primary"), Some("#0066FF"));
        assert!(ThemeSettings::is_known_property("sidebar_hover_bg"));
        assert!(!ThemeSettings::is_known_property("font_family"));
    }

    #[test]
    fn test_set_empty_clears_property() {
        let mut settings = ThemeSettings::defaults();
        settings.set("color_primary", "");
        assert_eq!(settings.get("color_primary"), None);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#0066FF"), Some((0, 0x66, 0xFF)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("0066FF"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn test_shade_hex() {
        assert_eq!(shade_hex("#FFFFFF", -0.5).as_deref(), Some("#808080"));
        assert_eq!(shade_hex("#000000", 0.5).as_deref(), Some("#808080"));
        assert_eq!(shade_hex("#0066FF", 0.0).as_deref(), Some("#0066FF"));
        assert!(shade_hex("red", 0.2).is_none());
    }
}
