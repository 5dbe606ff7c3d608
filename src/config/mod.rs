use std::time::Duration;

use serde::Deserialize;

/// Engine tuning supplied by the embedding application. Parsed leniently:
/// any unreadable document falls back to the defaults with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Quiet period before the URL is re-encoded while a control is
    /// being dragged.
    pub url_debounce_ms: u64,
    /// Quiet period before viewport widths are recomputed on resize.
    pub resize_debounce_ms: u64,
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url_debounce_ms: 300,
            resize_debounce_ms: 150,
            history_capacity: crate::history::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn url_debounce(&self) -> Duration {
        Duration::from_millis(self.url_debounce_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

pub fn load_engine_config(raw: Option<&str>) -> EngineConfig {
    let Some(raw) = raw else {
        return EngineConfig::default();
    };
    serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to parse engine config; using defaults");
        EngineConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_yields_defaults() {
        assert_eq!(load_engine_config(None), EngineConfig::default());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config = load_engine_config(Some(r#"{"urlDebounceMs": 500}"#));
        assert_eq!(config.url_debounce(), Duration::from_millis(500));
        assert_eq!(config.resize_debounce(), Duration::from_millis(150));
        assert_eq!(config.history_capacity, 100);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        assert_eq!(load_engine_config(Some("{oops")), EngineConfig::default());
    }
}
