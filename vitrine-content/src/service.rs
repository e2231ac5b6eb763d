//! Content service trait and implementations
//!
//! Object-safe facade over the six site fetches, so rendering code and
//! tests depend on a capability rather than on the HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use vitrine_model::{
    HeroContent, IntroContent, Product, SiteSettings, TeamMember, WorkItem,
};

use crate::client::ContentClient;
use crate::error::Result;

/// Read-only query facade over the site's content API.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Portfolio entries, in editorial order.
    async fn work_items(&self) -> Result<Vec<WorkItem>>;

    /// Landing hero media.
    async fn hero(&self) -> Result<HeroContent>;

    /// Singleton site settings document.
    async fn site_settings(&self) -> Result<SiteSettings>;

    /// Team members, in editorial order.
    async fn team_members(&self) -> Result<Vec<TeamMember>>;

    /// Product grid entries, in editorial order.
    async fn products(&self) -> Result<Vec<Product>>;

    /// Intro copy with its four panels.
    async fn intro(&self) -> Result<IntroContent>;
}

/// Shared handle to a content service implementation.
pub type DynContentService = Arc<dyn ContentService>;

#[async_trait]
impl ContentService for ContentClient {
    async fn work_items(&self) -> Result<Vec<WorkItem>> {
        ContentClient::work_items(self).await
    }

    async fn hero(&self) -> Result<HeroContent> {
        ContentClient::hero(self).await
    }

    async fn site_settings(&self) -> Result<SiteSettings> {
        ContentClient::site_settings(self).await
    }

    async fn team_members(&self) -> Result<Vec<TeamMember>> {
        ContentClient::team_members(self).await
    }

    async fn products(&self) -> Result<Vec<Product>> {
        ContentClient::products(self).await
    }

    async fn intro(&self) -> Result<IntroContent> {
        ContentClient::intro(self).await
    }
}
