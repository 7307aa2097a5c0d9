// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;
use serde_json::json;

use crate::config::{MediaServer, redact_url};
use crate::error::CollectionError;
use crate::http::HttpClient;
use crate::item_id::optional_id;
use crate::partition::Buckets;
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// The three collections published per series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Canon,
    Filler,
    All,
}

impl BucketKind {
    /// Publishing order
    pub const ORDER: [BucketKind; 3] = [BucketKind::Canon, BucketKind::Filler, BucketKind::All];

    pub fn label(self) -> &'static str {
        match self {
            BucketKind::Canon => "CANON ONLY",
            BucketKind::Filler => "FILLER ONLY",
            BucketKind::All => "ALL EPISODES",
        }
    }

    /// Collection name shown on the media server, e.g. `Naruto - CANON ONLY`
    pub fn collection_name(self, series_name: &str) -> String {
        format!("{} - {}", series_name, self.label())
    }

    pub fn items(self, buckets: &Buckets) -> &[String] {
        match self {
            BucketKind::Canon => &buckets.canon,
            BucketKind::Filler => &buckets.filler,
            BucketKind::All => &buckets.all,
        }
    }
}

/// A collection the media server reported as created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCollection {
    pub name: String,
    /// Identifier assigned by the server, if it sent one back
    pub id: Option<String>,
    pub item_count: usize,
}

/// What happened to one bucket during publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    Created {
        kind: BucketKind,
        collection: CreatedCollection,
    },
    /// The bucket was empty and no request was sent
    Skipped { kind: BucketKind, name: String },
}

impl CollectionOutcome {
    pub fn kind(&self) -> BucketKind {
        match self {
            CollectionOutcome::Created { kind, .. } | CollectionOutcome::Skipped { kind, .. } => *kind,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CollectionOutcome::Created { .. })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CollectionCreationResult {
    #[serde(default, deserialize_with = "optional_id")]
    id: Option<String>,
}

/// Create a collection holding `item_ids`
///
/// Returns `Ok(None)` without contacting the server when there is nothing
/// to put into the collection.
pub async fn create_collection<C: HttpClient>(
    client: &C,
    server: &MediaServer,
    name: &str,
    item_ids: &[String],
) -> Result<Option<CreatedCollection>, CollectionError> {
    if item_ids.is_empty() {
        return Ok(None);
    }

    let url = server.collections_url()?;
    let body = json!({
        "Name": name,
        "api_key": server.api_key,
        "IsLocked": false,
        "Ids": item_ids.join(","),
    });

    let response = client
        .post_json(url.as_str(), &server.auth_headers(), &body)
        .await
        .map_err(|e| CollectionError::RequestFailed {
            name: name.to_string(),
            url: redact_url(&url),
            source: e,
        })?;

    if !response.is_success() {
        return Err(CollectionError::HttpStatus {
            name: name.to_string(),
            url: redact_url(&url),
            status: response.status,
        });
    }

    // Some servers answer 204 without a body
    let id = if response.body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<CollectionCreationResult>(&response.body)
            .map_err(|e| CollectionError::InvalidResponse {
                name: name.to_string(),
                source: e,
            })?
            .id
    };

    Ok(Some(CreatedCollection {
        name: name.to_string(),
        id,
        item_count: item_ids.len(),
    }))
}

/// Publish the canon, filler and all-episodes collections in that order
///
/// Empty buckets are skipped. The first failing request aborts the
/// remaining buckets.
pub async fn publish_buckets<C: HttpClient>(
    client: &C,
    server: &MediaServer,
    series_name: &str,
    buckets: &Buckets,
    reporter: &SharedProgressReporter,
) -> Result<Vec<CollectionOutcome>, CollectionError> {
    let mut outcomes = Vec::with_capacity(BucketKind::ORDER.len());

    for kind in BucketKind::ORDER {
        let name = kind.collection_name(series_name);
        let item_ids = kind.items(buckets);

        if item_ids.is_empty() {
            reporter.report(ProgressEvent::CollectionSkipped { name: name.clone() });
            outcomes.push(CollectionOutcome::Skipped { kind, name });
            continue;
        }

        reporter.report(ProgressEvent::CreatingCollection {
            name: name.clone(),
            item_count: item_ids.len(),
        });

        // Non-empty ids always produce a collection
        if let Some(collection) = create_collection(client, server, &name, item_ids).await? {
            reporter.report(ProgressEvent::CollectionCreated {
                name: collection.name.clone(),
                collection_id: collection.id.clone(),
            });
            outcomes.push(CollectionOutcome::Created { kind, collection });
        }
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::http::mock::MockHttpClient;
    use crate::progress::NoopReporter;

    fn server() -> MediaServer {
        MediaServer::new(Url::parse("http://emby.local:8096").unwrap(), "secret")
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn buckets() -> Buckets {
        Buckets {
            canon: ids(&["a", "c"]),
            filler: ids(&["b"]),
            all: ids(&["a", "b", "c"]),
        }
    }

    #[test]
    fn collection_names_follow_series_name() {
        assert_eq!(BucketKind::Canon.collection_name("Naruto"), "Naruto - CANON ONLY");
        assert_eq!(BucketKind::Filler.collection_name("Naruto"), "Naruto - FILLER ONLY");
        assert_eq!(BucketKind::All.collection_name("Naruto"), "Naruto - ALL EPISODES");
    }

    #[tokio::test]
    async fn create_posts_comma_joined_ids() {
        let client = MockHttpClient::new().on_post("/Collections", 200, r#"{"Id": "9001"}"#);

        let created = create_collection(&client, &server(), "Naruto - CANON ONLY", &ids(&["a", "c"]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.id, Some("9001".to_string()));
        assert_eq!(created.item_count, 2);

        let posts = client.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "http://emby.local:8096/Collections?api_key=secret");
        assert_eq!(
            posts[0].body,
            Some(json!({
                "Name": "Naruto - CANON ONLY",
                "api_key": "secret",
                "IsLocked": false,
                "Ids": "a,c",
            }))
        );
    }

    #[tokio::test]
    async fn create_skips_empty_ids() {
        let client = MockHttpClient::new();

        let created = create_collection(&client, &server(), "Naruto - FILLER ONLY", &[])
            .await
            .unwrap();

        assert!(created.is_none());
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn create_accepts_empty_response_body() {
        let client = MockHttpClient::new().on_post("/Collections", 204, "");

        let created = create_collection(&client, &server(), "Naruto - ALL EPISODES", &ids(&["a"]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.id, None);
    }

    #[tokio::test]
    async fn create_accepts_numeric_collection_id() {
        let client = MockHttpClient::new().on_post("/Collections", 200, r#"{"Id": 123}"#);

        let created = create_collection(&client, &server(), "Naruto - CANON ONLY", &ids(&["a"]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.id, Some("123".to_string()));
    }

    #[tokio::test]
    async fn create_fails_on_http_error() {
        let client = MockHttpClient::new().on_post("/Collections", 500, "boom");

        let result = create_collection(&client, &server(), "Naruto - CANON ONLY", &ids(&["a"])).await;

        match result.unwrap_err() {
            CollectionError::HttpStatus { status, name, .. } => {
                assert_eq!(status, 500);
                assert_eq!(name, "Naruto - CANON ONLY");
            }
            other => panic!("Expected HttpStatus error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_fails_on_unexpected_body() {
        let client = MockHttpClient::new().on_post("/Collections", 200, "<html></html>");

        let result = create_collection(&client, &server(), "Naruto - CANON ONLY", &ids(&["a"])).await;

        assert!(matches!(result, Err(CollectionError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn publish_creates_collections_in_order() {
        let client = MockHttpClient::new().on_post("/Collections", 200, r#"{"Id": "1"}"#);

        let outcomes = publish_buckets(&client, &server(), "Naruto", &buckets(), &NoopReporter::shared())
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(CollectionOutcome::is_created));

        let names: Vec<String> = client
            .posts()
            .into_iter()
            .filter_map(|post| post.body)
            .map(|body| body["Name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            ["Naruto - CANON ONLY", "Naruto - FILLER ONLY", "Naruto - ALL EPISODES"]
        );
    }

    #[tokio::test]
    async fn publish_continues_after_numeric_collection_id() {
        let client = MockHttpClient::new().on_post("/Collections", 200, r#"{"Id": 123}"#);

        let outcomes = publish_buckets(&client, &server(), "Naruto", &buckets(), &NoopReporter::shared())
            .await
            .unwrap();

        assert_eq!(client.posts().len(), 3);
        assert!(outcomes.iter().all(CollectionOutcome::is_created));
    }

    #[tokio::test]
    async fn publish_skips_empty_bucket() {
        let client = MockHttpClient::new().on_post("/Collections", 200, r#"{"Id": "1"}"#);
        let buckets = Buckets {
            canon: ids(&["a"]),
            filler: vec![],
            all: ids(&["a"]),
        };

        let outcomes = publish_buckets(&client, &server(), "Naruto", &buckets, &NoopReporter::shared())
            .await
            .unwrap();

        assert_eq!(client.posts().len(), 2);
        assert_eq!(
            outcomes[1],
            CollectionOutcome::Skipped {
                kind: BucketKind::Filler,
                name: "Naruto - FILLER ONLY".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn publish_stops_at_first_failure() {
        let client = MockHttpClient::new().on_post("/Collections", 503, "");

        let result = publish_buckets(&client, &server(), "Naruto", &buckets(), &NoopReporter::shared()).await;

        assert!(result.is_err());
        assert_eq!(client.posts().len(), 1);
    }
}
