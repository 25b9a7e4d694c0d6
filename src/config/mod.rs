//! Grid Data Configuration
//!
//! The settings surface the bootstrap layer hands to providers and table
//! state: API base URL (environment-sourced), resource endpoint, optional
//! free-text filter field, initial page size and sort, and per-feature
//! enable flags. Persisted as TOML against an explicit path.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, ENV_BASE_URL};
use crate::error::Result;
use crate::query::SortRule;

/// Per-feature enable flags for the grid; everything on by default
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub sorting: bool,
    pub pagination: bool,
    pub global_filter: bool,
    pub column_filters: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            sorting: true,
            pagination: true,
            global_filter: true,
            column_filters: true,
        }
    }
}

/// Configuration for one grid data source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API base URL; `GRIDSOURCE_API_URL` overrides whatever is configured
    pub base_url: String,
    /// Resource endpoint name (e.g. "products")
    pub endpoint: String,
    /// Field name the free-text filter is sent under; `None` disables it on
    /// the wire even when the feature flag is on
    pub global_filter_field: Option<String>,
    /// Initial page size
    pub page_size: u32,
    /// Initial sort order
    pub initial_sort: Vec<SortRule>,
    /// Feature enable flags
    pub features: FeatureFlags,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: String::new(),
            global_filter_field: None,
            page_size: DEFAULT_PAGE_SIZE,
            initial_sort: Vec::new(),
            features: FeatureFlags::default(),
        }
    }
}

impl Settings {
    /// Default settings with the environment override applied
    pub fn from_env() -> Self {
        Self::default().with_env_override(std::env::var(ENV_BASE_URL).ok())
    }

    /// Settings for one endpoint, environment override applied
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        let mut settings = Self::from_env();
        settings.endpoint = endpoint.into();
        settings
    }

    /// Apply an environment-sourced base URL when present and non-empty
    pub fn with_env_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|url| !url.is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Load settings from a TOML file. A missing or empty file yields the
    /// defaults; the environment override is applied either way.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let value = std::fs::read_to_string(path)?;
            if value.trim().is_empty() {
                Self::default()
            } else {
                toml::from_str(&value)?
            }
        } else {
            Self::default()
        };
        Ok(settings.with_env_override(std::env::var(ENV_BASE_URL).ok()))
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://localhost:3000");
        assert_eq!(settings.page_size, 10);
        assert!(settings.initial_sort.is_empty());
        assert!(settings.global_filter_field.is_none());
        assert!(settings.features.sorting);
        assert!(settings.features.pagination);
        assert!(settings.features.global_filter);
        assert!(settings.features.column_filters);
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let settings = Settings::default().with_env_override(Some("http://api:4000".into()));
        assert_eq!(settings.base_url, "http://api:4000");
    }

    #[test]
    fn test_env_override_ignores_empty_value() {
        let settings = Settings::default().with_env_override(Some(String::new()));
        assert_eq!(settings.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            endpoint = "products"
            page_size = 25

            [features]
            column_filters = false
            "#,
        )
        .expect("settings should parse");

        assert_eq!(settings.endpoint, "products");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.base_url, "http://localhost:3000");
        assert!(settings.features.sorting);
        assert!(!settings.features.column_filters);
    }

    #[test]
    fn test_initial_sort_round_trips_through_toml() {
        let mut settings = Settings::for_endpoint("products");
        settings.initial_sort = vec![SortRule::desc("price")];

        let content = toml::to_string_pretty(&settings).expect("settings should serialize");
        let parsed: Settings = toml::from_str(&content).expect("settings should parse");
        assert_eq!(parsed, settings);
    }
}
