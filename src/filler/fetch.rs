// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::Value;
use url::Url;

use crate::config::redact_url;
use crate::error::FillerListError;
use crate::http::HttpClient;
use crate::progress::{FillerOrigin, ProgressEvent, SharedProgressReporter};

use super::{FillerSet, FillerSource};

/// Parse the filler episode numbers out of a JSON document
///
/// The document must be a JSON object. A missing (or null) field counts as
/// an empty list. A field holding anything but an array of non-negative
/// integers is rejected.
pub fn parse_filler_list(body: &[u8], url: &Url, field: &str) -> Result<FillerSet, FillerListError> {
    let document: Value = serde_json::from_slice(body).map_err(|e| FillerListError::InvalidJson {
        url: redact_url(url),
        source: e,
    })?;

    let invalid_field = || FillerListError::InvalidField {
        url: redact_url(url),
        field: field.to_string(),
    };

    let Value::Object(document) = document else {
        return Err(FillerListError::NotAnObject {
            url: redact_url(url),
        });
    };

    match document.get(field) {
        None | Some(Value::Null) => Ok(FillerSet::default()),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| value.as_u64().and_then(|n| u32::try_from(n).ok()))
            .collect::<Option<FillerSet>>()
            .ok_or_else(invalid_field),
        Some(_) => Err(invalid_field()),
    }
}

/// Fetch and parse a filler list from a URL
pub async fn fetch_filler_list<C: HttpClient>(
    client: &C,
    url: &Url,
    field: &str,
) -> Result<FillerSet, FillerListError> {
    let response = client
        .get(url.as_str(), &[])
        .await
        .map_err(|e| FillerListError::RequestFailed {
            url: redact_url(url),
            source: e,
        })?;

    if !response.is_success() {
        return Err(FillerListError::HttpStatus {
            url: redact_url(url),
            status: response.status,
        });
    }

    parse_filler_list(&response.body, url, field)
}

/// Produce the filler set from whichever source is configured
pub async fn resolve_filler_set<C: HttpClient>(
    client: &C,
    source: &FillerSource,
    reporter: &SharedProgressReporter,
) -> Result<FillerSet, FillerListError> {
    let (filler, origin) = match source {
        FillerSource::Precomputed(numbers) => {
            (
                numbers.iter().copied().collect::<FillerSet>(),
                FillerOrigin::Precomputed,
            )
        }
        FillerSource::Remote { url, field } => {
            reporter.report(ProgressEvent::FetchingFillerList {
                url: redact_url(url),
            });

            let filler = fetch_filler_list(client, url, field).await?;
            (
                filler,
                FillerOrigin::Remote {
                    url: redact_url(url),
                },
            )
        }
    };

    reporter.report(ProgressEvent::FillerListLoaded {
        origin,
        filler_count: filler.len(),
    });

    Ok(filler)
}
