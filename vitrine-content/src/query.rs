//! GROQ projection text for every fetch the site performs.
//!
//! Asset references are resolved to plain URLs inside the projection
//! (`…asset->url`), keeping the decoded records flat. Ordered lists sort
//! by the editorial `orderRank` field.

/// Portfolio entries, in editorial order.
pub const WORK_ITEMS_QUERY: &str = r#"*[_type == "workItem"] | order(orderRank asc) {
  _id,
  brand,
  name,
  slide,
  "imageUrl": image.asset->url,
  videoUrl
}"#;

/// Landing hero media singleton.
pub const HERO_QUERY: &str = r#"*[_type == "hero"][0]{
  "videoUrl": video.asset->url,
  "posterUrl": poster.asset->url,
  ariaLabel
}"#;

/// Site settings singleton (titles, SEO, footer, socials).
pub const SITE_SETTINGS_QUERY: &str = r#"*[_id == "siteSettings"][0]{
  siteTitle,
  siteTagline,
  seo{ metaTitle, metaDescription },
  footerTitle{ line1, line2 },
  contactInfo{ text, textAfterBreak, email },
  socialLinks[]{ url, ariaLabel, svgPath }
}"#;

/// Team members, in editorial order.
pub const TEAM_MEMBERS_QUERY: &str = r#"*[_type == "teamMember"] | order(orderRank asc) {
  _id,
  name,
  surname,
  bio,
  "imageUrl": image.asset->url
}"#;

/// Product grid entries, in editorial order.
pub const PRODUCTS_QUERY: &str = r#"*[_type == "product"] | order(orderRank asc) {
  _id,
  name,
  "imageUrl": image.asset->url,
  "hoverImageUrl": hoverImage.asset->url,
  url,
  darkBackground,
  bgColor,
  bgSize
}"#;

/// Intro copy singleton, its four panels collected into one array.
pub const INTRO_QUERY: &str = r#"*[_type == "introSection"][0]{
  "asteriskUrl": asterisk.asset->url,
  "panels": [
    section1{ title{ line1, line2 }, paragraph },
    section2{ title{ line1, line2 }, paragraph },
    section3{ title{ line1, line2 }, paragraph },
    section4{ title{ line1, line2 }, paragraph }
  ]
}"#;
