//! Client settings and configuration structures.

use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Persistence tiers (durable location, expiry horizons)
    pub storage: StorageSettings,

    /// Search-as-you-type settings
    pub search: SearchSettings,

    /// Navigation endpoint settings
    pub navigation: NavigationSettings,

    /// Toast/alert settings
    pub notifications: NotificationSettings,

    /// Page region identifiers
    pub regions: RegionSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Persistence tier configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory for the file-backed durable tier. In-memory when unset.
    pub data_dir: Option<String>,

    /// Short-lived expiry horizon for preferences, in days
    pub preference_ttl_days: i64,

    /// Short-lived expiry horizon for the ledger mirror and last search, in days
    pub mirror_ttl_days: i64,

    /// Largest value the short-lived tier accepts, in bytes
    pub cookie_max_bytes: usize,
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Endpoint key; used to namespace the last-search value
    pub endpoint: String,

    /// Quiet interval before a search runs, in milliseconds
    pub debounce_ms: u64,
}

/// Navigation endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationSettings {
    /// Base URL that relative link targets are resolved against
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// How long a toast stays visible, in milliseconds
    pub toast_delay_ms: u64,
}

/// Region identifiers the client writes into.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionSettings {
    pub content: String,
    pub search_input: String,
    pub search_results: String,
    pub services: String,
    pub appointments_body: String,
    pub form: String,
    pub form_message: String,
    pub toast_container: String,
    pub header: String,
    pub mobile_menu: String,
    pub navbar_collapse: String,
    pub page_alerts: String,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. built-in defaults
    /// 2. config/default.toml
    /// 3. config/{RUN_ENV}.toml
    /// 4. Environment variables prefixed with `APP__` (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if a timing value is zero.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::defaults_builder(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SEARCH__DEBOUNCE_MS=300 -> search.debounce_ms = 300
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .and_then(Self::validate)
    }

    /// Built-in defaults only; no files or environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::defaults_builder("development")?
            .build()?
            .try_deserialize()
            .and_then(Self::validate)
    }

    fn defaults_builder(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("storage.preference_ttl_days", 30)?
            .set_default("storage.mirror_ttl_days", 7)?
            .set_default("storage.cookie_max_bytes", 4096_i64)?
            .set_default("search.endpoint", "/api/search/")?
            .set_default("search.debounce_ms", 300)?
            .set_default("navigation.base_url", "http://localhost:8000")?
            .set_default("navigation.timeout_secs", 10)?
            .set_default("notifications.toast_delay_ms", 3000)?
            .set_default("regions.content", "#page-content")?
            .set_default("regions.search_input", "#search-input")?
            .set_default("regions.search_results", "#search-results")?
            .set_default("regions.services", "#services-container")?
            .set_default("regions.appointments_body", "#appointments-table tbody")?
            .set_default("regions.form", "#appointment-form")?
            .set_default("regions.form_message", "#form-message")?
            .set_default("regions.toast_container", "#toast-container")?
            .set_default("regions.header", "#main-header")?
            .set_default("regions.mobile_menu", "#mobile-menu")?
            .set_default("regions.navbar_collapse", "#navbarSupportedContent")?
            .set_default("regions.page_alerts", "#page-alerts")
    }

    fn validate(settings: Self) -> Result<Self, ConfigError> {
        if settings.search.debounce_ms == 0 {
            return Err(ConfigError::Message(
                "search.debounce_ms must be greater than zero".into(),
            ));
        }
        if settings.navigation.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "navigation.timeout_secs must be greater than zero".into(),
            ));
        }
        if settings.storage.preference_ttl_days <= 0 || settings.storage.mirror_ttl_days <= 0 {
            return Err(ConfigError::Message(format!(
                "storage TTLs must be positive (preference: {}, mirror: {})",
                settings.storage.preference_ttl_days, settings.storage.mirror_ttl_days
            )));
        }
        Ok(settings)
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Persistence key for the last query sent to this endpoint.
    pub fn last_search_key(&self) -> String {
        crate::infrastructure::storage::keys::last_search(&self.endpoint)
    }
}

impl NavigationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl NotificationSettings {
    pub fn toast_delay(&self) -> Duration {
        Duration::from_millis(self.toast_delay_ms)
    }
}

impl StorageSettings {
    pub fn preference_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.preference_ttl_days)
    }

    pub fn mirror_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.mirror_ttl_days)
    }
}
