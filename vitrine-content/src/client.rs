//! HTTP transport for the CMS query API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, info};
use vitrine_model::{
    HeroContent, IntroContent, Product, SiteSettings, TeamMember, WorkItem,
};

use crate::config::ContentConfig;
use crate::error::{ContentError, Result};
use crate::query;

/// Response envelope the query API wraps every result in. A missing or
/// `null` result is part of the wire contract, not a transport failure.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse<T> {
    pub result: Option<T>,
}

impl<T> QueryResponse<T> {
    /// Unwrap a singleton result; `null` means the document does not
    /// exist and is reported as [`ContentError::MissingResult`].
    pub fn into_singleton(self) -> Result<T> {
        self.result.ok_or(ContentError::MissingResult)
    }
}

impl<T> QueryResponse<Vec<T>> {
    /// Unwrap a list result; `null` collapses to the empty list so a
    /// dataset with no documents of a type renders as "nothing", never
    /// as an error.
    pub fn into_list(self) -> Vec<T> {
        self.result.unwrap_or_default()
    }
}

/// Client for the hosted CMS query API.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    endpoint: String,
    config: ContentConfig,
}

impl ContentClient {
    /// Create a client for the configured project and dataset.
    pub fn new(config: ContentConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        let endpoint = config.query_endpoint();

        info!("creating content client for {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The query endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Connection settings this client was built from.
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Issue one GROQ query and decode its envelope.
    async fn fetch<T: DeserializeOwned>(
        &self,
        groq: &str,
    ) -> Result<QueryResponse<T>> {
        debug!("content query against {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", groq)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                Err(ContentError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    /// Portfolio entries, in editorial order.
    pub async fn work_items(&self) -> Result<Vec<WorkItem>> {
        Ok(self.fetch(query::WORK_ITEMS_QUERY).await?.into_list())
    }

    /// Landing hero media.
    pub async fn hero(&self) -> Result<HeroContent> {
        self.fetch(query::HERO_QUERY).await?.into_singleton()
    }

    /// Singleton site settings document.
    pub async fn site_settings(&self) -> Result<SiteSettings> {
        self.fetch(query::SITE_SETTINGS_QUERY)
            .await?
            .into_singleton()
    }

    /// Team members, in editorial order.
    pub async fn team_members(&self) -> Result<Vec<TeamMember>> {
        Ok(self.fetch(query::TEAM_MEMBERS_QUERY).await?.into_list())
    }

    /// Product grid entries, in editorial order.
    pub async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.fetch(query::PRODUCTS_QUERY).await?.into_list())
    }

    /// Intro copy with its four panels.
    pub async fn intro(&self) -> Result<IntroContent> {
        self.fetch(query::INTRO_QUERY).await?.into_singleton()
    }
}
