//! Core data model definitions shared across vitrine crates.
#![allow(missing_docs)]

pub mod content;
pub mod error;
pub mod geometry;
pub mod ids;

// Intentionally curated re-exports for downstream consumers.
pub use content::{
    ContactInfo, HeroContent, IntroContent, IntroPanel, Product, Seo,
    SiteSettings, SocialLink, TeamMember, TitleLines, WorkItem,
};
pub use error::{ModelError, Result as ModelResult};
pub use geometry::Rect;
pub use ids::{ProductId, SectionId, TeamMemberId, WorkItemId};
