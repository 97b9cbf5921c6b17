use crate::error::{DataError, Result};
use crate::traits::ForeignDataSource;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Option keys whose values must never reach logs
const SECRET_OPTIONS: &[&str] = &["api_key", "access_token", "password"];

/// Options attached to a foreign table by the host
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Wrapper name the table was declared with (`contentful`, ...)
    pub wrapper: String,
    options: BTreeMap<String, String>,
}

impl TableOptions {
    pub fn new(wrapper: impl Into<String>) -> Self {
        Self {
            wrapper: wrapper.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Get an option value, if set
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Get an option value or fail with `MissingConfiguration`
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DataError::missing_configuration(key)),
        }
    }

    /// Parse an optional option value
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| {
                    DataError::invalid_configuration(format!(
                        "option '{}' has an invalid value: {}",
                        key, raw
                    ))
                })
            })
            .transpose()
    }

    /// Option listing for display purposes (secrets masked)
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .options
            .iter()
            .map(|(key, value)| {
                if SECRET_OPTIONS.contains(&key.as_str()) {
                    format!("{}=***", key)
                } else {
                    format!("{}={}", key, value)
                }
            })
            .collect();

        format!("{}({})", self.wrapper, parts.join(", "))
    }
}

/// Factory trait for creating data sources from table options
pub trait DataSourceFactory: Send + Sync {
    /// Get the wrapper name this factory handles
    fn wrapper_name(&self) -> &'static str;

    /// Create a data source from table options
    fn create_source(&self, options: TableOptions) -> Result<Arc<dyn ForeignDataSource>>;
}

/// Registry mapping wrapper names to the factories that build them
pub struct WrapperRegistry {
    factories: Arc<RwLock<HashMap<String, Arc<dyn DataSourceFactory>>>>,
}

impl WrapperRegistry {
    pub fn new() -> Self {
        Self {
            factories: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a factory for a wrapper name
    pub async fn register_factory(&self, factory: Arc<dyn DataSourceFactory>) -> Result<()> {
        let wrapper = factory.wrapper_name();
        let mut factories = self.factories.write().await;

        if factories.contains_key(wrapper) {
            warn!("Overwriting existing factory for wrapper: {}", wrapper);
        }

        factories.insert(wrapper.to_string(), factory);
        debug!("Registered factory for wrapper: {}", wrapper);
        Ok(())
    }

    /// Create a data source for a foreign table
    pub async fn create_source(&self, options: TableOptions) -> Result<Arc<dyn ForeignDataSource>> {
        let factory = self
            .factories
            .read()
            .await
            .get(&options.wrapper)
            .cloned()
            .ok_or_else(|| {
                DataError::invalid_configuration(format!(
                    "No factory registered for wrapper: {}",
                    options.wrapper
                ))
            })?;

        debug!("Creating source {}", options.describe());

        factory.create_source(options)
    }

    /// List registered wrapper names
    pub async fn list_wrappers(&self) -> Vec<String> {
        let factories = self.factories.read().await;
        let mut names: Vec<String> = factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for WrapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_options_require() {
        let options = TableOptions::new("contentful")
            .with_option("space", "cfexampleapi")
            .with_option("type", "");

        assert_eq!(options.require("space").unwrap(), "cfexampleapi");
        assert!(matches!(
            options.require("api_key"),
            Err(DataError::MissingConfiguration(key)) if key == "api_key"
        ));
        // Empty values count as absent
        assert!(options.require("type").is_err());
    }

    #[test]
    fn test_table_options_get_parsed() {
        let options = TableOptions::new("contentful")
            .with_option("page_size", "250")
            .with_option("timeout_secs", "soon");

        assert_eq!(options.get_parsed::<usize>("page_size").unwrap(), Some(250));
        assert_eq!(options.get_parsed::<usize>("missing").unwrap(), None);
        assert!(matches!(
            options.get_parsed::<u64>("timeout_secs"),
            Err(DataError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_describe_masks_secrets() {
        let options = TableOptions::new("contentful_management")
            .with_option("space", "abc")
            .with_option("api_key", "CFPAT-secret");

        let described = options.describe();
        assert!(described.starts_with("contentful_management("));
        assert!(described.contains("space=abc"));
        assert!(!described.contains("CFPAT-secret"));
    }

    #[tokio::test]
    async fn test_registry_rejects_unknown_wrapper() {
        let registry = WrapperRegistry::new();
        assert!(registry.list_wrappers().await.is_empty());

        let result = registry.create_source(TableOptions::new("nope")).await;
        assert!(matches!(result, Err(DataError::InvalidConfiguration(_))));
    }
}
