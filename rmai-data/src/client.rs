//! GraphQL client for the upstream locations dataset.

use std::time::Duration;

use rmai_core::{Location, RetryPolicy, retry};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::{DataError, Result};

/// Public Rick and Morty GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

/// One page of locations with their residents.
pub const LOCATIONS_QUERY: &str = r#"
query ($page: Int) {
  locations(page: $page) {
    info { count pages next prev }
    results {
      id
      name
      type
      dimension
      residents {
        id
        name
        status
        species
        image
        gender
        origin { name }
      }
    }
  }
}
"#;

/// Where and how patiently to fetch the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Applied to each page request separately.
    pub retry: RetryPolicy,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::with_attempts(5),
        }
    }
}

impl DatasetConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageInfo {
    pub count: Option<u32>,
    pub pages: Option<u32>,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

/// A page of locations.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPage {
    #[serde(default)]
    pub info: PageInfo,
    #[serde(default)]
    pub results: Vec<Location>,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct LocationsData {
    locations: LocationPage,
}

/// Fetches locations page by page, retrying transient failures.
///
/// Transport errors, non-2xx responses, unparsable bodies and GraphQL
/// `errors` arrays all count as transient.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    config: DatasetConfig,
}

impl DatasetClient {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Fetch a single page (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UpstreamUnavailable`] once the retry budget is spent.
    pub async fn fetch_page(&self, page: u32) -> Result<LocationPage> {
        let body = json!({ "query": LOCATIONS_QUERY, "variables": { "page": page } });
        let data: LocationsData = retry(&self.config.retry, "fetch_locations_page", |_| {
            self.post_once(&body)
        })
        .await
        .map_err(|exhausted| DataError::UpstreamUnavailable {
            attempts: exhausted.attempts,
            message: exhausted.last_error,
        })?;
        debug!(page, results = data.locations.results.len(), "fetched locations page");
        Ok(data.locations)
    }

    /// Fetch every location, following `info.next` from page 1 until it is null.
    pub async fn fetch_all_locations(&self) -> Result<Vec<Location>> {
        let mut locations = Vec::new();
        let mut page = 1;
        loop {
            let current = self.fetch_page(page).await?;
            locations.extend(current.results);
            match current.info.next {
                Some(next) if next > page => page = next,
                Some(next) => {
                    warn!(page, next, "pagination does not advance, stopping");
                    break;
                }
                None => break,
            }
        }
        info!(count = locations.len(), endpoint = %self.config.endpoint, "fetched all locations");
        Ok(locations)
    }

    async fn post_once<T: DeserializeOwned>(&self, body: &Value) -> std::result::Result<T, String> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("endpoint returned {status}"));
        }

        let payload: GraphQlResponse<T> =
            response.json().await.map_err(|e| format!("malformed response: {e}"))?;
        if let Some(errors) = payload.errors.filter(|errors| !errors.is_empty()) {
            return Err(format!("GraphQL errors: {}", Value::Array(errors)));
        }
        payload.data.ok_or_else(|| "response carries no data".to_string())
    }
}
