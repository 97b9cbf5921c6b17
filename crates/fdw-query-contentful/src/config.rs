use crate::client::{CmaClient, CMA_API_HOST, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE};
use crate::kind::EntityKind;
use fdw_query::{DataError, Result, TableOptions};
use std::time::Duration;

/// Validated options of a Contentful foreign table
#[derive(Clone)]
pub struct ContentfulOptions {
    pub space: String,
    pub api_key: String,
    pub kind: EntityKind,
    /// Content type every Entry scan is pinned to
    pub content_type: Option<String>,
    pub api_host: String,
    pub page_size: u64,
    pub timeout: Duration,
}

impl std::fmt::Debug for ContentfulOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentfulOptions")
            .field("space", &self.space)
            .field("api_key", &"***")
            .field("kind", &self.kind)
            .field("content_type", &self.content_type)
            .field("api_host", &self.api_host)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ContentfulOptions {
    /// Validate options for the management wrapper
    ///
    /// `space`, `api_key` and `type` are required; `content_type` is
    /// required when `type` is `Entry`.
    pub fn from_table_options(options: &TableOptions) -> Result<Self> {
        let kind: EntityKind = options.require("type")?.parse()?;
        Self::build(options, kind, CMA_API_HOST)
    }

    /// Validate options for a wrapper whose entity kind is fixed
    pub fn for_kind(options: &TableOptions, kind: EntityKind, default_host: &str) -> Result<Self> {
        Self::build(options, kind, default_host)
    }

    fn build(options: &TableOptions, kind: EntityKind, default_host: &str) -> Result<Self> {
        let space = options.require("space")?.to_string();
        let api_key = options.require("api_key")?.to_string();

        let content_type = match options.get("content_type").filter(|ct| !ct.is_empty()) {
            Some(ct) => Some(ct.to_string()),
            None if kind == EntityKind::Entry => {
                return Err(DataError::missing_configuration("content_type"))
            }
            None => None,
        };

        let page_size = options
            .get_parsed::<u64>("page_size")?
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(DataError::invalid_configuration(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }

        let timeout_secs = options
            .get_parsed::<u64>("timeout_secs")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            space,
            api_key,
            kind,
            content_type,
            api_host: options.get("api_url").unwrap_or(default_host).to_string(),
            page_size,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build the HTTP client these options describe
    ///
    /// `api_url` may be a bare host or a full `http(s)://` URL.
    pub fn client(&self) -> Result<CmaClient> {
        if self.api_host.starts_with("http://") || self.api_host.starts_with("https://") {
            CmaClient::with_base_url(
                format!("{}/spaces/{}", self.api_host.trim_end_matches('/'), self.space),
                &self.api_key,
                self.timeout,
            )
        } else {
            CmaClient::new(&self.space, &self.api_key, &self.api_host, self.timeout)
        }
    }
}
