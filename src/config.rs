//! Configuration for fetching a paginated resource
//!
//! Loaded from YAML. Every field except `base_url` has a default, and
//! command-line flags may override file values before validation.
//!
//! ```yaml
//! base_url: https://api.artsy.net
//! path: /api/v1/sale/{id}/sale_artworks
//! page_size: 10
//! headers:
//!   X-Xapp-Token: "..."
//! ```

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::types::{PageSize, StringMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Placeholder in `path` replaced by the resource identifier
pub const ID_PLACEHOLDER: &str = "{id}";

/// Resource fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the API
    #[serde(default)]
    pub base_url: Option<String>,

    /// Path template, must contain an `{id}` segment
    #[serde(default = "default_path")]
    pub path: String,

    /// Items requested per page
    #[serde(default)]
    pub page_size: PageSize,

    /// Query parameter carrying the page number
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter carrying the page size
    #[serde(default = "default_size_param")]
    pub size_param: String,

    /// Dot-separated path to the item array in the response body.
    /// Unset means the body itself is the array.
    #[serde(default)]
    pub records_path: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_path() -> String {
    "/api/v1/sale/{id}/sale_artworks".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_size_param() -> String {
    "size".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            path: default_path(),
            page_size: PageSize::default(),
            page_param: default_page_param(),
            size_param: default_size_param(),
            records_path: None,
            timeout_secs: default_timeout_secs(),
            headers: StringMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check that the configuration can drive a fetch
    pub fn validate(&self) -> Result<()> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::missing_field("base_url"))?;
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{base_url}' cannot carry a path"),
            ));
        }

        if !self.path.split('/').any(|segment| segment == ID_PLACEHOLDER) {
            return Err(Error::invalid_value(
                "path",
                format!("must contain an '{ID_PLACEHOLDER}' segment"),
            ));
        }

        if self.page_param.is_empty() {
            return Err(Error::invalid_value("page_param", "must not be empty"));
        }
        if self.size_param.is_empty() {
            return Err(Error::invalid_value("size_param", "must not be empty"));
        }
        if self.page_param == self.size_param {
            return Err(Error::invalid_value(
                "size_param",
                "must differ from page_param",
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client settings derived from this configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder().timeout(self.timeout());
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
