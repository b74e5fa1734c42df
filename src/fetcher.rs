use crate::model::{FetchError, RawRecord};

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn refresh(&self) -> Result<Vec<RawRecord>, FetchError>;
}

pub struct SnapshotFetcher {
    client: Client,
    data_url: String,
}

impl SnapshotFetcher {
    pub fn new(data_url: String) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) MarketBoard/0.1")
            .build()?;

        Ok(Self { client, data_url })
    }
}

#[async_trait]
impl RecordSource for SnapshotFetcher {
    async fn refresh(&self) -> Result<Vec<RawRecord>, FetchError> {
        let response = self.client.get(&self.data_url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::InvalidResponse(response.status()));
        }

        let payload = response.text().await?;
        Ok(parse_records(&payload)?)
    }
}

/// Parses a snapshot JSON array record by record. A malformed element is
/// skipped with a warning; only a payload that is not an array at all fails.
pub fn parse_records(payload: &str) -> Result<Vec<RawRecord>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(payload)?;

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed record: {}", e),
        }
    }
    Ok(records)
}
