//! Configuration for the local service.

use serde::Deserialize;

/// Page size used when a search does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Settings for [`LocalMetagenomeApi`](crate::LocalMetagenomeApi).
///
/// Missing keys take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Page size when a search does not pass `limit`.
    pub default_limit: i64,
    /// Upper bound applied to any requested `limit`.
    pub max_limit: Option<i64>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

impl LocalConfig {
    /// The effective page size for a requested `limit`.
    pub fn page_limit(&self, requested: Option<i64>) -> i64 {
        let limit = requested.unwrap_or(self.default_limit);
        match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_uses_defaults() {
        let config: LocalConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, LocalConfig::default());
        assert_eq!(config.page_limit(None), 50);
        assert_eq!(config.page_limit(Some(7)), 7);
    }

    #[test]
    fn max_limit_caps_requests() {
        let config: LocalConfig =
            serde_json::from_value(json!({"default_limit": 20, "max_limit": 100})).unwrap();
        assert_eq!(config.page_limit(None), 20);
        assert_eq!(config.page_limit(Some(1000)), 100);
    }
}
