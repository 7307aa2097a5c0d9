use url::Url;

use crate::filler::FillerSource;
use crate::http::Header;

/// Header carrying the API key on every media server request
pub const AUTH_HEADER: &str = "X-MediaBrowser-Token";

/// Connection details for an Emby compatible media server
#[derive(Debug, Clone)]
pub struct MediaServer {
    pub base_url: Url,
    pub api_key: String,
}

impl MediaServer {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Resolve a path relative to the server base URL
    ///
    /// Any path prefix of the base URL (reverse proxy setups) is kept.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))
    }

    /// URL listing all episodes below a series, with the fields needed to
    /// extract absolute episode numbers
    pub fn items_url(&self, series_id: &str) -> Result<Url, url::ParseError> {
        let mut url = self.endpoint("emby/Items")?;
        url.query_pairs_mut()
            .append_pair("Recursive", "true")
            .append_pair("ParentId", series_id)
            .append_pair("IncludeItemTypes", "Episode")
            .append_pair("Fields", "Path,SortName,IndexOptions")
            .append_pair("EnableUserData", "true")
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// URL for creating a new collection
    pub fn collections_url(&self) -> Result<Url, url::ParseError> {
        let mut url = self.endpoint("Collections")?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Authentication headers sent with every request
    pub fn auth_headers(&self) -> [Header<'_>; 1] {
        [(AUTH_HEADER, self.api_key.as_str())]
    }
}

/// Render a URL for messages with the `api_key` query parameter masked
pub fn redact_url(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == "api_key") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "api_key" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Everything a sync run needs, passed explicitly to each step
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub server: MediaServer,
    /// Media server identifier of the series whose episodes are grouped
    pub series_id: String,
    /// Display name used as prefix for the created collections
    pub series_name: String,
    pub filler: FillerSource,
}
