use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("default_page_size ({default}) exceeds max_page_size ({max})")]
    PageSizeRange { default: u32, max: u32 },

    #[error("max_page_size must be at least 1")]
    ZeroMaxPageSize,

    #[error("query parameter key '{0}' is blank")]
    BlankKey(&'static str),
}

///
/// QueryConfig
///
/// Query-string parameter names read by the filter chain, and paging bounds.
/// Every setting is optional in TOML; missing keys fall back to the defaults.
///
/// ```toml
/// search_key = "q"
/// max_page_size = 250
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub search_key: String,
    pub ids_key: String,
    pub sort_key: String,
    pub order_key: String,
    pub page_key: String,
    pub limit_key: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl QueryConfig {
    pub const DEFAULT_PAGE_SIZE: u32 = 25;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [
            ("search_key", &self.search_key),
            ("ids_key", &self.ids_key),
            ("sort_key", &self.sort_key),
            ("order_key", &self.order_key),
            ("page_key", &self.page_key),
            ("limit_key", &self.limit_key),
        ];
        for (name, key) in keys {
            if key.trim().is_empty() {
                return Err(ConfigError::BlankKey(name));
            }
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::ZeroMaxPageSize);
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::PageSizeRange {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }

        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_key: "search".to_string(),
            ids_key: "ids".to_string(),
            sort_key: "sort".to_string(),
            order_key: "order".to_string(),
            page_key: "page".to_string(),
            limit_key: "limit".to_string(),
            default_page_size: Self::DEFAULT_PAGE_SIZE,
            max_page_size: Self::MAX_PAGE_SIZE,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = QueryConfig::from_toml_str("").expect("empty config parses");

        assert_eq!(config, QueryConfig::default());
        assert_eq!(config.search_key, "search");
        assert_eq!(config.default_page_size, 25);
    }

    #[test]
    fn partial_document_overrides_named_keys() {
        let config = QueryConfig::from_toml_str(
            r#"
            search_key = "q"
            max_page_size = 250
            "#,
        )
        .expect("config parses");

        assert_eq!(config.search_key, "q");
        assert_eq!(config.ids_key, "ids");
        assert_eq!(config.max_page_size, 250);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = QueryConfig::from_toml_str("serch_key = \"q\"").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn page_bounds_are_validated() {
        assert!(matches!(
            QueryConfig::from_toml_str("default_page_size = 500"),
            Err(ConfigError::PageSizeRange { default: 500, max: 100 })
        ));
        assert!(matches!(
            QueryConfig::from_toml_str("max_page_size = 0\ndefault_page_size = 0"),
            Err(ConfigError::ZeroMaxPageSize)
        ));
        assert!(matches!(
            QueryConfig::from_toml_str("sort_key = \"  \""),
            Err(ConfigError::BlankKey("sort_key"))
        ));
    }
}
