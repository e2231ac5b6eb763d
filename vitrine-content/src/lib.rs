//! # vitrine-content
//!
//! Query layer for the site's headless CMS. The site renders from six
//! read-only projections (work items, hero media, site settings, team
//! members, products, intro copy); this crate owns the query text, the
//! HTTP transport, and the response envelope handling for all of them.
//!
//! ## Architecture
//!
//! - [`query`]: the GROQ projection text, one constant per fetch
//! - [`client`]: `ContentClient`, the reqwest-backed transport
//! - [`service`]: `ContentService`, the object-safe async facade
//! - [`testing`]: `TestContentService`, an in-memory stub for consumers
//!
//! Record shapes live in `vitrine-model`; asset references are resolved
//! to URLs inside the projections, so every record decodes from flat
//! camelCase JSON.

#![allow(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod service;
pub mod testing;

pub use client::{ContentClient, QueryResponse};
pub use config::ContentConfig;
pub use error::{ContentError, Result};
pub use service::{ContentService, DynContentService};
