//! Request URL construction for the repository API.

use crate::config::ClientConfig;

pub const VERSION_URI: &str = "/api/v4";

/// Percent-encode a repository path so it fits in a single URL segment.
///
/// Slashes are encoded too, which is what the files endpoints expect.
pub fn encode_path(path: &str) -> String {
    urlencoding::encode(path).into_owned()
}

/// Build the full URL for `uri` under `/projects/{id}/repository/`.
///
/// `ref` is always present and set to the configured branch; a caller
/// parameter with the same key replaces it in place. Every value is
/// percent-encoded exactly once.
pub fn build_uri(config: &ClientConfig, uri: &str, params: &[(&str, String)]) -> String {
    let mut merged: Vec<(&str, &str)> = vec![("ref", config.branch.as_str())];

    for (key, value) in params {
        match merged.iter_mut().find(|(existing, _)| existing == key) {
            Some(slot) => slot.1 = value.as_str(),
            None => merged.push((*key, value.as_str())),
        }
    }

    let query = merged
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let base_url = format!("{}{}", config.base_url.trim_end_matches('/'), VERSION_URI);

    format!(
        "{}/projects/{}/repository/{}?{}",
        base_url, config.project_id, uri, query
    )
}
