//! Training catalog backend.
//!
//! Provides the `TrainingCatalog` trait and its HTTP implementation. The
//! scoring models only see the trait, so tests and offline evaluations can
//! swap in a `StaticCatalog`.

use std::collections::HashMap;
use std::time::Duration;

use advisor_model::Training;
use reqwest::Url;
use thiserror::Error;

/// Errors from training catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of trainings for a job group in a departement.
///
/// Failures are returned as is: retrying is up to the caller.
pub trait TrainingCatalog: Send + Sync {
    fn get_trainings(&self, rome_id: &str, departement_id: &str) -> Result<Vec<Training>, CatalogError>;

    /// Get the catalog name for logging.
    fn name(&self) -> &'static str;
}

/// HTTP training catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Training catalog reached over HTTP.
pub struct HttpTrainingCatalog {
    config: CatalogConfig,
    client: reqwest::blocking::Client,
}

impl HttpTrainingCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn build_url(&self, rome_id: &str, departement_id: &str) -> Result<Url, CatalogError> {
        Url::parse_with_params(
            &format!("{}/trainings", self.config.base_url.trim_end_matches('/')),
            &[("romeId", rome_id), ("departementId", departement_id)],
        )
        .map_err(|e| CatalogError::QueryFailed(e.to_string()))
    }

    fn parse_response(&self, response: serde_json::Value) -> Result<Vec<Training>, CatalogError> {
        let trainings = response
            .get("trainings")
            .cloned()
            .ok_or_else(|| CatalogError::ParseError("Missing trainings array".to_string()))?;

        serde_json::from_value(trainings).map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}

impl TrainingCatalog for HttpTrainingCatalog {
    fn get_trainings(&self, rome_id: &str, departement_id: &str) -> Result<Vec<Training>, CatalogError> {
        let url = self.build_url(rome_id, departement_id)?;

        tracing::debug!(url = %url, "Fetching trainings");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(CatalogError::QueryFailed(format!("HTTP {}: {}", status, body)));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Fixed catalog, for tests and offline evaluation.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    by_market: HashMap<(String, String), Vec<Training>>,
    fallback: Vec<Training>,
}

impl StaticCatalog {
    /// A catalog without any training.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A catalog returning the same trainings for every market.
    pub fn everywhere(trainings: Vec<Training>) -> Self {
        Self {
            fallback: trainings,
            ..Default::default()
        }
    }

    pub fn with_trainings(
        mut self,
        rome_id: impl Into<String>,
        departement_id: impl Into<String>,
        trainings: Vec<Training>,
    ) -> Self {
        self.by_market
            .insert((rome_id.into(), departement_id.into()), trainings);
        self
    }
}

impl TrainingCatalog for StaticCatalog {
    fn get_trainings(&self, rome_id: &str, departement_id: &str) -> Result<Vec<Training>, CatalogError> {
        Ok(self
            .by_market
            .get(&(rome_id.to_string(), departement_id.to_string()))
            .unwrap_or(&self.fallback)
            .clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
