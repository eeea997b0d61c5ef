// ============================================================================
// Sidebar Core - Theme Service
// File: crates/sidebar-core/src/services/theme_service.rs
// ============================================================================
//! Theme settings read, update, export and import

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use sidebar_shared::constants::{EVENT_THEME_UPDATED, THEME_CACHE_KEY};
use tracing::{debug, info, warn};

use crate::domain::theme::{shade_hex, RGBA_PROPERTIES, VARIANT_BASES, VARIANT_SHADES};
use crate::domain::{Caller, ThemeSettings};
use crate::error::DomainError;
use crate::ports::cache::{get_json, invalidate, set_json};
use crate::ports::{CacheStore, RealtimeEvent, RealtimePublisher, Recipients};
use crate::repositories::ThemeRepository;

fn rgba_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            match Regex::new(r"^rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*(0|1|0?\.\d+|1\.0+)\s*\)$") {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("rgba pattern failed to compile, falling back to prefix check: {}", e);
                    None
                }
            }
        })
        .as_ref()
}

fn is_rgba(value: &str) -> bool {
    match rgba_pattern() {
        Some(re) => re.is_match(value),
        None => value.starts_with("rgba("),
    }
}

pub struct ThemeService {
    repo: Arc<dyn ThemeRepository>,
    cache: Arc<dyn CacheStore>,
    realtime: Arc<dyn RealtimePublisher>,
    cache_ttl: Duration,
}

impl ThemeService {
    pub fn new(
        repo: Arc<dyn ThemeRepository>,
        cache: Arc<dyn CacheStore>,
        realtime: Arc<dyn RealtimePublisher>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repo,
            cache,
            realtime,
            cache_ttl,
        }
    }

    /// Current settings; defaults until the record has been saved once.
    pub async fn get_settings(&self) -> Result<ThemeSettings, DomainError> {
        if let Some(cached) = get_json::<ThemeSettings>(self.cache.as_ref(), THEME_CACHE_KEY).await {
            debug!("Theme settings cache hit");
            return Ok(cached);
        }

        let settings = self.load_or_defaults().await?;
        set_json(self.cache.as_ref(), THEME_CACHE_KEY, &settings, Some(self.cache_ttl)).await;
        Ok(settings)
    }

    /// Merges `changes` onto the stored settings, validates, persists and
    /// broadcasts. Unknown properties are skipped.
    pub async fn update_settings(
        &self,
        caller: &Caller,
        changes: BTreeMap<String, String>,
        auto_generate_variants: bool,
    ) -> Result<ThemeSettings, DomainError> {
        if !caller.is_administrator() {
            warn!("User {} tried to update theme settings", caller.user);
            return Err(DomainError::PermissionDenied(
                "Only administrators can update theme settings".to_string(),
            ));
        }

        let mut settings = self.load_or_defaults().await?;
        for (name, value) in &changes {
            if !ThemeSettings::is_known_property(name) {
                warn!("Ignoring unknown theme property {}", name);
                continue;
            }
            settings.set(name.as_str(), value.as_str());
        }

        if auto_generate_variants {
            generate_variants(&mut settings);
        }

        validate_rgba(&settings)?;

        self.repo.save(&settings).await?;
        invalidate(self.cache.as_ref(), THEME_CACHE_KEY).await;
        self.realtime.publish(RealtimeEvent::new(
            EVENT_THEME_UPDATED,
            serde_json::to_value(&settings)?,
            Recipients::All,
        ));

        info!("Theme settings updated by {} ({} changes)", caller.user, changes.len());
        Ok(settings)
    }

    pub async fn export_theme(&self) -> Result<String, DomainError> {
        let settings = self.get_settings().await?;
        Ok(serde_json::to_string_pretty(&settings)?)
    }

    /// Applies a previously exported JSON object. Keys that are not theme
    /// properties or whose values are not strings are dropped.
    pub async fn import_theme(&self, caller: &Caller, raw: &str) -> Result<ThemeSettings, DomainError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::ValidationError(format!("Invalid theme JSON: {}", e)))?;
        let serde_json::Value::Object(object) = value else {
            return Err(DomainError::ValidationError(
                "Theme import must be a JSON object".to_string(),
            ));
        };

        let changes: BTreeMap<String, String> = object
            .into_iter()
            .filter(|(name, _)| ThemeSettings::is_known_property(name))
            .filter_map(|(name, value)| value.as_str().map(|v| (name, v.to_string())))
            .collect();

        self.update_settings(caller, changes, false).await
    }

    async fn load_or_defaults(&self) -> Result<ThemeSettings, DomainError> {
        Ok(self.repo.load().await?.unwrap_or_else(ThemeSettings::defaults))
    }
}

/// Fills missing `color_<base>_<shade>` entries from the base color.
/// Shades already present are left alone; clear one to have it derived again.
fn generate_variants(settings: &mut ThemeSettings) {
    for base in VARIANT_BASES {
        let base_key = format!("color_{}", base);
        let Some(base_color) = settings.get(&base_key).map(str::to_string) else {
            continue;
        };

        for (suffix, factor) in VARIANT_SHADES {
            let key = format!("{}_{}", base_key, suffix);
            if settings.get(&key).is_some() {
                continue;
            }
            match shade_hex(&base_color, factor) {
                Some(shade) => settings.set(key, shade),
                None => {
                    warn!("Cannot derive {} from non-hex color {}", key, base_color);
                    break;
                }
            }
        }
    }
}

fn validate_rgba(settings: &ThemeSettings) -> Result<(), DomainError> {
    for field in RGBA_PROPERTIES {
        if let Some(value) = settings.get(field) {
            if !is_rgba(value) {
                return Err(DomainError::ValidationError(format!(
                    "Invalid format for {}. Please use rgba() format, e.g., rgba(157, 78, 221, 0.2)",
                    field
                )));
            }
        }
    }
    Ok(())
}
