//! Emby item listing response types for deserialization.
//!
//! Only the fields needed to map episodes to absolute numbers are kept.

use serde::Deserialize;

use crate::item_id::optional_id;

/// The response of the `/emby/Items` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ItemsResponse {
    /// Listed items; missing or null when the series has no children
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

/// A single library item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Item {
    /// Server assigned identifier; only episodes need one
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    /// Item type such as "Episode", "Season" or "Series"
    #[serde(rename = "Type", default)]
    pub item_type: Option<String>,
    /// Media file path, only present when requested through `Fields`
    #[serde(default)]
    pub path: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

impl Item {
    pub fn is_episode(&self) -> bool {
        self.item_type.as_deref() == Some("Episode")
    }
}
