//! Application Configuration
//!
//! Built once at start-up. Values come from compile-time environment
//! variables (set when running `trunk build`) with sensible defaults.

use std::sync::OnceLock;

use log::LevelFilter;

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_PAGE_SIZE: u32 = 25;
const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Absolute base URL of the REST backend, without trailing slash
    pub api_base: String,
    pub log_level: LevelFilter,
    pub page_size: u32,
    pub search_debounce_ms: u32,
}

impl AppConfig {
    /// Build from raw settings. `origin` is the page origin used to resolve a relative base.
    pub fn from_settings(api_base: Option<&str>, log_level: Option<&str>, origin: Option<&str>) -> Self {
        let base = api_base.filter(|b| !b.trim().is_empty()).unwrap_or(DEFAULT_API_BASE);
        Self {
            api_base: resolve_base(base, origin),
            log_level: parse_level(log_level.unwrap_or("info")),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }

    fn from_build_env() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self::from_settings(
            option_env!("INVENTAR_API_BASE"),
            option_env!("INVENTAR_LOG"),
            origin.as_deref(),
        )
    }
}

/// Join a relative base onto the page origin; absolute URLs pass through
pub fn resolve_base(base: &str, origin: Option<&str>) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        return base.to_string();
    }
    match origin {
        Some(origin) => format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            base.trim_start_matches('/')
        ),
        None => base.to_string(),
    }
}

fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Initialize from the build environment. Later calls keep the first value.
pub fn init() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_build_env)
}

pub fn get() -> &'static AppConfig {
    init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base_resolved_against_origin() {
        assert_eq!(
            resolve_base("/api/", Some("http://localhost:8080/")),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn test_absolute_base_passes_through() {
        assert_eq!(
            resolve_base("https://inventar.example.org/api/", Some("http://localhost:8080")),
            "https://inventar.example.org/api"
        );
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_settings(None, None, Some("http://127.0.0.1:3000"));
        assert_eq!(config.api_base, "http://127.0.0.1:3000/api");
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_log_level_parsing() {
        let config = AppConfig::from_settings(Some("/v1"), Some("debug"), None);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.api_base, "/v1");

        let config = AppConfig::from_settings(None, Some("chatty"), None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
