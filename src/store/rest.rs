//! HTTP client for a PostgREST-compatible content backend

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::error::{Result, StoreError};
use super::{ContentStore, SelectQuery};
use crate::model::{Collection, RecordId, Row};

/// Client configuration
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Anonymous or service key, sent as `apikey` and bearer token
    pub api_key: Option<String>,
    /// Request timeout in seconds; unset means requests wait for the server
    pub timeout_secs: Option<u64>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

/// Content store reached over the PostgREST table API
///
/// ```rust,no_run
/// use advocacy_cms::store::{fetch_collection, RestConfig, RestStore};
/// use advocacy_cms::model::StatCard;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = RestStore::new(RestConfig {
///     base_url: "https://example.supabase.co".into(),
///     api_key: Some("anon-key".into()),
///     ..Default::default()
/// })?;
/// let stats = fetch_collection::<StatCard>(&store).await?;
/// # Ok(())
/// # }
/// ```
pub struct RestStore {
    config: RestConfig,
    client: Client,
}

impl RestStore {
    pub fn new(config: RestConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let key = header::HeaderValue::from_str(api_key)
                .map_err(|_| StoreError::InvalidConfig("api key is not a valid header".into()))?;
            let bearer = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| StoreError::InvalidConfig("api key is not a valid header".into()))?;
            headers.insert("apikey", key);
            headers.insert(header::AUTHORIZATION, bearer);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    fn table_url(&self, collection: Collection) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            collection.table()
        )
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status,
                message: body,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl ContentStore for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn select(&self, query: SelectQuery) -> Result<Vec<Row>> {
        let mut url = format!("{}?select=*", self.table_url(query.collection));
        if let Some(ref column) = query.order_by {
            url.push_str(&format!("&order={}.asc", urlencoding::encode(column)));
        }

        tracing::debug!(table = %query.collection, "select");
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn select_single(&self, collection: Collection) -> Result<Option<Row>> {
        // Two rows are enough to tell "one" from "more than one"
        let url = format!("{}?select=*&limit=2", self.table_url(collection));

        let response = self.client.get(&url).send().await?;
        let mut rows: Vec<Row> = self.handle_response(response).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => Err(StoreError::MultipleRows(collection)),
        }
    }

    async fn update(&self, collection: Collection, id: RecordId, patch: Row) -> Result<()> {
        let url = format!("{}?id=eq.{}", self.table_url(collection), id);

        let response = self
            .client
            .patch(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(&Value::Object(patch))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { collection, id });
        }

        let updated: Vec<Row> = self.handle_response(response).await?;
        if updated.is_empty() {
            return Err(StoreError::NotFound { collection, id });
        }
        Ok(())
    }
}
