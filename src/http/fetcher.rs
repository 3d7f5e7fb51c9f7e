//! Page fetcher backed by the HTTP client
//!
//! Requests `GET {base_url}{path}?page=N&size=M` with the identifier
//! substituted into the path, and decodes the JSON item array.

use super::client::{HttpClient, RequestConfig};
use crate::config::{Config, ID_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::pagination::{PageFetcher, PageRequest};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Fetches pages of JSON items over HTTP
#[derive(Debug)]
pub struct HttpPageFetcher {
    client: HttpClient,
    path: String,
    page_param: String,
    size_param: String,
    records_path: Option<String>,
}

impl HttpPageFetcher {
    /// Create a fetcher with the default path and query parameter names
    pub fn new(client: HttpClient) -> Self {
        let defaults = Config::default();
        Self {
            client,
            path: defaults.path,
            page_param: defaults.page_param,
            size_param: defaults.size_param,
            records_path: None,
        }
    }

    /// Build a client and fetcher from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(Self {
            client,
            path: config.path.clone(),
            page_param: config.page_param.clone(),
            size_param: config.size_param.clone(),
            records_path: config.records_path.clone(),
        })
    }

    /// Set the path template
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the page and page size query parameter names
    #[must_use]
    pub fn with_params(
        mut self,
        page_param: impl Into<String>,
        size_param: impl Into<String>,
    ) -> Self {
        self.page_param = page_param.into();
        self.size_param = size_param.into();
        self
    }

    /// Set the path to the item array in the response body
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = Some(path.into());
        self
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Build the URL for an identifier.
    ///
    /// The identifier is pushed as a single path segment, so reserved
    /// characters are percent-encoded. `.` and `..` are rejected because URL
    /// path normalization would drop them and address a different resource.
    pub fn resource_url(&self, identifier: &str) -> Result<Url> {
        if identifier == "." || identifier == ".." {
            return Err(Error::invalid_value(
                "identifier",
                format!("'{identifier}' is not a usable path segment"),
            ));
        }

        let base = self
            .client
            .base_url()
            .ok_or_else(|| Error::missing_field("base_url"))?;
        let mut url = Url::parse(base)?;

        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::invalid_value("base_url", format!("'{base}' cannot carry a path"))
            })?;
            segments.pop_if_empty();
            for segment in self.path.split('/').filter(|s| !s.is_empty()) {
                if segment == ID_PLACEHOLDER {
                    segments.push(identifier);
                } else {
                    segments.push(segment);
                }
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    type Item = JsonValue;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<JsonValue>> {
        if self.page_param == self.size_param {
            return Err(Error::invalid_value(
                "size_param",
                "must differ from page_param",
            ));
        }

        let url = self.resource_url(&request.identifier)?;
        let query = RequestConfig::new()
            .query(&self.page_param, request.page.to_string())
            .query(&self.size_param, request.page_size.to_string());

        let body: Value = self.client.get_json(url.as_str(), query).await?;
        extract_records(body, self.records_path.as_deref())
    }
}

/// Pull the item array out of a response body.
///
/// `path` is dot-separated with an optional `$.` prefix. Without a path the
/// body itself must be an array.
pub fn extract_records(body: Value, path: Option<&str>) -> Result<Vec<Value>> {
    let mut current = body;

    if let Some(path) = path {
        let path = path.strip_prefix("$.").unwrap_or(path);
        for part in path.split('.').filter(|p| !p.is_empty()) {
            current = match current {
                Value::Object(mut map) => map.remove(part).ok_or_else(|| {
                    Error::decode(format!("field '{part}' not found in response"))
                })?,
                other => {
                    return Err(Error::decode(format!(
                        "expected object at '{part}', found {}",
                        kind(&other)
                    )))
                }
            };
        }
    }

    match current {
        Value::Array(items) => Ok(items),
        other => Err(Error::decode(format!(
            "expected an array of items, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
