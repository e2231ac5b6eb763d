//! Embed URL derivation for the hosted video platform.

use regex::Regex;
use url::Url;

/// Host every derived embed URL points at; also the marker the init
/// path checks before binding a handle to the surface.
pub const EMBED_HOST: &str = "player.vimeo.com";

/// Fixed query parameters of the embed document: autoplay with sound,
/// chrome suppressed, tracking opted out.
const EMBED_PARAMS: [(&str, &str); 7] = [
    ("autoplay", "1"),
    ("loop", "0"),
    ("muted", "0"),
    ("controls", "0"),
    ("byline", "0"),
    ("portrait", "0"),
    ("dnt", "1"),
];

/// Extract the numeric video id: the first run of digits following a
/// slash anywhere in the source URL.
pub fn extract_video_id(source_url: &str) -> Option<String> {
    let pattern = Regex::new(r"/(\d+)").ok()?;
    pattern
        .captures(source_url)
        .map(|captures| captures[1].to_string())
}

/// Derive the embeddable URL for a source video URL. `None` when the
/// source carries no extractable id.
pub fn derive_embed_url(source_url: &str) -> Option<String> {
    let id = extract_video_id(source_url)?;
    let mut url = Url::parse(&format!("https://{EMBED_HOST}/video/{id}")).ok()?;
    url.query_pairs_mut().extend_pairs(EMBED_PARAMS);
    Some(url.into())
}
