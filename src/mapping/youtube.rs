//! YouTube video id extraction
//!
//! Portfolio rows carry either a bare video id or any of the usual share
//! URL shapes. Anything that does not yield a well-formed id maps to the
//! empty string and the row is dropped by the caller.

use crate::constants::YOUTUBE_ID_LEN;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static BARE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern should compile"));

static QUERY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").expect("query id pattern should compile")
});

static SHORT_LINK_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").expect("short link pattern should compile")
});

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == YOUTUBE_ID_LEN && BARE_ID.is_match(candidate)
}

fn from_url(url: &Url) -> Option<String> {
    let host = url.host_str().unwrap_or_default();
    if host.contains("youtu.be") {
        let id = url.path_segments()?.find(|s| !s.is_empty())?;
        return is_video_id(id).then(|| id.to_string());
    }

    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| is_video_id(id))
}

fn from_text(raw: &str) -> Option<String> {
    QUERY_ID
        .captures(raw)
        .or_else(|| SHORT_LINK_ID.captures(raw))
        .map(|caps| caps[1].to_string())
}

/// Extract an 11-character video id from a bare id or a share URL
///
/// Returns an empty string when no id can be found.
pub fn youtube_video_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_video_id(raw) {
        return raw.to_string();
    }

    let id = match Url::parse(raw) {
        Ok(url) => from_url(&url),
        Err(_) => from_text(raw),
    };
    id.unwrap_or_default()
}
