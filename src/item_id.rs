//! Media server identifiers arrive as strings on Emby but as numbers on
//! some forks; both are kept as text.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(id) => id,
            RawId::Number(id) => id.to_string(),
        }
    }
}

/// Deserialize an optional string-or-number identifier.
///
/// Use together with `#[serde(default)]` so a missing field becomes `None`.
pub(crate) fn optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
