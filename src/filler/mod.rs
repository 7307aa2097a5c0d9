mod fetch;

pub use fetch::{fetch_filler_list, parse_filler_list, resolve_filler_set};

use std::collections::HashSet;

use url::Url;

/// JSON field holding the filler episode numbers in the remote list
pub const DEFAULT_FILLER_FIELD: &str = "fillerEpisodes";

/// Absolute episode numbers classified as filler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillerSet(HashSet<u32>);

impl FillerSet {
    pub fn contains(&self, absolute_number: u32) -> bool {
        self.0.contains(&absolute_number)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for FillerSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Where the filler episode numbers are taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillerSource {
    /// Fetch a JSON document and read the list from `field`
    Remote { url: Url, field: String },
    /// Use a list supplied up front, no request is made
    Precomputed(Vec<u32>),
}

impl FillerSource {
    /// Remote source reading the default `fillerEpisodes` field
    pub fn remote(url: Url) -> Self {
        Self::Remote {
            url,
            field: DEFAULT_FILLER_FIELD.to_string(),
        }
    }
}
