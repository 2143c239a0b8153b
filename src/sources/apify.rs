// apify.rs
use crate::config::AppConfig;
use crate::sources::{ExternalSource, SourceError};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("listings_site/", env!("CARGO_PKG_VERSION"));

/// Reads the scraped listings dataset. The token stays on the server.
pub struct ApifyClient {
    client: Client,
    base_url: String,
    dataset_id: String,
    token: Option<String>,
}

impl ApifyClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(cfg.external_timeout_secs))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.apify_base_url.clone(),
            dataset_id: cfg.apify_dataset_id.clone(),
            token: cfg.apify_token.clone(),
        })
    }

    fn items_url(&self) -> String {
        format!("{}/datasets/{}/items", self.base_url, self.dataset_id)
    }
}

impl ExternalSource for ApifyClient {
    fn fetch_raw(&self) -> Result<Vec<Value>, SourceError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| SourceError::Config("API token not configured".into()))?;

        let start = Instant::now();
        let resp = self
            .client
            .get(self.items_url())
            .query(&[("token", token)])
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let records = parse_dataset(&text)?;
        info!(
            count = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetched external listings"
        );
        Ok(records)
    }
}

/// The dataset endpoint returns a bare JSON array of records.
pub fn parse_dataset(body: &str) -> Result<Vec<Value>, SourceError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| SourceError::JsonParse(e.to_string()))?;

    match data {
        Value::Array(items) => Ok(items),
        other => {
            debug!(kind = json_kind(&other), "dataset body was not an array");
            Err(SourceError::UnexpectedShape(format!(
                "expected an array of records, got {}",
                json_kind(&other)
            )))
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
