//! In-memory content service for tests and offline development.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use vitrine_model::{
    HeroContent, IntroContent, IntroPanel, Product, SiteSettings, TeamMember,
    TitleLines, WorkItem,
    ids::{ProductId, TeamMemberId, WorkItemId},
};

use crate::error::{ContentError, Result};
use crate::service::ContentService;

/// Content service backed by seeded in-memory records. Singleton fetches
/// report [`ContentError::MissingResult`] until a document is seeded,
/// mirroring the live API's `null` result behavior.
#[derive(Debug, Clone, Default)]
pub struct TestContentService {
    inner: Arc<RwLock<InnerContentState>>,
}

#[derive(Debug, Default)]
struct InnerContentState {
    work_items: Vec<WorkItem>,
    hero: Option<HeroContent>,
    site_settings: Option<SiteSettings>,
    team_members: Vec<TeamMember>,
    products: Vec<Product>,
    intro: Option<IntroContent>,
    fetch_log: Vec<&'static str>,
}

impl TestContentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service seeded with one of everything.
    pub fn with_sample_site() -> Self {
        let service = Self::new();
        service.push_work_item(sample_work_item(1));
        service.push_work_item(sample_work_item(2));
        service.set_hero(sample_hero());
        service.set_site_settings(sample_site_settings());
        service.push_team_member(sample_team_member("t1", "Alex"));
        service.push_product(sample_product("p1", "Poster"));
        service.set_intro(sample_intro());
        service
    }

    pub fn push_work_item(&self, item: WorkItem) {
        if let Ok(mut guard) = self.inner.write() {
            guard.work_items.push(item);
        }
    }

    pub fn set_hero(&self, hero: HeroContent) {
        if let Ok(mut guard) = self.inner.write() {
            guard.hero = Some(hero);
        }
    }

    pub fn set_site_settings(&self, settings: SiteSettings) {
        if let Ok(mut guard) = self.inner.write() {
            guard.site_settings = Some(settings);
        }
    }

    pub fn push_team_member(&self, member: TeamMember) {
        if let Ok(mut guard) = self.inner.write() {
            guard.team_members.push(member);
        }
    }

    pub fn push_product(&self, product: Product) {
        if let Ok(mut guard) = self.inner.write() {
            guard.products.push(product);
        }
    }

    pub fn set_intro(&self, intro: IntroContent) {
        if let Ok(mut guard) = self.inner.write() {
            guard.intro = Some(intro);
        }
    }

    /// Names of the fetches issued so far, in call order.
    pub fn fetch_log(&self) -> Vec<&'static str> {
        self.inner.read().expect("lock poisoned").fetch_log.clone()
    }

    fn record(&self, fetch: &'static str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.fetch_log.push(fetch);
        }
    }
}

#[async_trait]
impl ContentService for TestContentService {
    async fn work_items(&self) -> Result<Vec<WorkItem>> {
        self.record("work_items");
        Ok(self.inner.read().expect("lock poisoned").work_items.clone())
    }

    async fn hero(&self) -> Result<HeroContent> {
        self.record("hero");
        self.inner
            .read()
            .expect("lock poisoned")
            .hero
            .clone()
            .ok_or(ContentError::MissingResult)
    }

    async fn site_settings(&self) -> Result<SiteSettings> {
        self.record("site_settings");
        self.inner
            .read()
            .expect("lock poisoned")
            .site_settings
            .clone()
            .ok_or(ContentError::MissingResult)
    }

    async fn team_members(&self) -> Result<Vec<TeamMember>> {
        self.record("team_members");
        Ok(self
            .inner
            .read()
            .expect("lock poisoned")
            .team_members
            .clone())
    }

    async fn products(&self) -> Result<Vec<Product>> {
        self.record("products");
        Ok(self.inner.read().expect("lock poisoned").products.clone())
    }

    async fn intro(&self) -> Result<IntroContent> {
        self.record("intro");
        self.inner
            .read()
            .expect("lock poisoned")
            .intro
            .clone()
            .ok_or(ContentError::MissingResult)
    }
}

pub fn sample_work_item(n: u32) -> WorkItem {
    WorkItem {
        id: WorkItemId(format!("work-{n}")),
        brand: format!("Brand {n}"),
        name: format!("Film {n}"),
        slide: Some(n),
        image_url: Some(format!("https://cdn.example/work-{n}.jpg")),
        video_url: Some(format!("https://vimeo.com/10000{n}")),
    }
}

pub fn sample_hero() -> HeroContent {
    HeroContent {
        video_url: Some("https://cdn.example/hero.mp4".to_string()),
        poster_url: Some("https://cdn.example/hero.jpg".to_string()),
        aria_label: Some("Studio showreel".to_string()),
    }
}

pub fn sample_site_settings() -> SiteSettings {
    SiteSettings {
        site_title: Some("Atelier".to_string()),
        site_tagline: Some("Films & direction".to_string()),
        seo: None,
        footer_title: Some(TitleLines {
            line1: Some("Let's".to_string()),
            line2: Some("talk".to_string()),
        }),
        contact_info: None,
        social_links: Vec::new(),
    }
}

pub fn sample_team_member(id: &str, name: &str) -> TeamMember {
    TeamMember {
        id: TeamMemberId(id.to_string()),
        name: name.to_string(),
        surname: Some("Doe".to_string()),
        bio: None,
        image_url: None,
    }
}

pub fn sample_product(id: &str, name: &str) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        image_url: Some("https://cdn.example/product.jpg".to_string()),
        hover_image_url: None,
        url: None,
        dark_background: Some(false),
        bg_color: None,
        bg_size: None,
    }
}

pub fn sample_intro() -> IntroContent {
    IntroContent {
        asterisk_url: None,
        panels: vec![
            IntroPanel {
                title: Some(TitleLines {
                    line1: Some("We make".to_string()),
                    line2: Some("films".to_string()),
                }),
                paragraph: Some("Short ones, mostly.".to_string()),
            };
            4
        ],
    }
}
