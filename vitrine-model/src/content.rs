//! Record shapes returned by the headless-CMS query layer.
//!
//! Every struct mirrors one query projection: image and video asset
//! references are resolved to plain URLs inside the projection, so the
//! wire format is flat camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::ids::{ProductId, TeamMemberId, WorkItemId};

/// One portfolio entry shown in the work list and the video modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[serde(rename = "_id")]
    pub id: WorkItemId,
    pub brand: String,
    pub name: String,
    /// Carousel slide this entry links to, when it has one.
    #[serde(default)]
    pub slide: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Source video URL; empty or missing means the entry opens no modal.
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Hero media for the landing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub aria_label: Option<String>,
}

/// Two-line display title used by the footer and intro panels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleLines {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
}

/// Search/social metadata for the site head.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Footer contact block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_after_break: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One footer social link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub url: String,
    #[serde(default)]
    pub aria_label: Option<String>,
    #[serde(default)]
    pub svg_path: Option<String>,
}

/// Singleton site settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub site_title: Option<String>,
    #[serde(default)]
    pub site_tagline: Option<String>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub footer_title: Option<TitleLines>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// One entry of the team section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id")]
    pub id: TeamMemberId,
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One entry of the product grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hover_image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub dark_background: Option<bool>,
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub bg_size: Option<String>,
}

/// One intro panel: a two-line title plus a paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntroPanel {
    #[serde(default)]
    pub title: Option<TitleLines>,
    #[serde(default)]
    pub paragraph: Option<String>,
}

/// Singleton intro document: decorative asterisk plus four panels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroContent {
    #[serde(default)]
    pub asterisk_url: Option<String>,
    #[serde(default)]
    pub panels: Vec<IntroPanel>,
}
