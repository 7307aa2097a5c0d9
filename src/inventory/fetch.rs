// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::{MediaServer, redact_url};
use crate::error::InventoryError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::extract::absolute_number;
use super::types::{Item, ItemsResponse};
use super::{EpisodeRecord, Inventory};

/// Turn listed items into episode records, dropping everything that is not an episode
///
/// Episodes without an identifier cannot be put into a collection and are
/// reported as unmatched.
fn episode_records(items: Vec<Item>, reporter: &SharedProgressReporter) -> Vec<EpisodeRecord> {
    items
        .into_iter()
        .filter(Item::is_episode)
        .filter_map(|item| {
            let number = absolute_number(item.path.as_deref(), item.name.as_deref());

            if number.is_none() || item.id.is_none() {
                reporter.report(ProgressEvent::EpisodeUnmatched {
                    item_id: item.id.clone(),
                    source: item
                        .path
                        .clone()
                        .filter(|p| !p.is_empty())
                        .or_else(|| item.name.clone()),
                });
            }

            Some(EpisodeRecord {
                absolute_number: number,
                item_id: item.id?,
            })
        })
        .collect()
}

/// Build the inventory mapping from episode records in listing order
///
/// Records without an absolute number are left out. When two records share
/// a number the later one wins.
pub fn build_inventory(records: Vec<EpisodeRecord>, reporter: &SharedProgressReporter) -> Inventory {
    let mut inventory = Inventory::new();

    for record in records {
        let Some(number) = record.absolute_number else {
            continue;
        };

        if let Some(replaced_id) = inventory.insert(number, record.item_id.clone()) {
            reporter.report(ProgressEvent::DuplicateAbsoluteNumber {
                absolute_number: number,
                replaced_id,
                item_id: record.item_id,
            });
        }
    }

    inventory
}

/// Fetch all episodes below a series and map them by absolute episode number
pub async fn fetch_inventory<C: HttpClient>(
    client: &C,
    server: &MediaServer,
    series_id: &str,
    reporter: &SharedProgressReporter,
) -> Result<Inventory, InventoryError> {
    reporter.report(ProgressEvent::FetchingInventory {
        series_id: series_id.to_string(),
    });

    let url = server.items_url(series_id)?;

    let response = client
        .get(url.as_str(), &server.auth_headers())
        .await
        .map_err(|e| InventoryError::RequestFailed {
            url: redact_url(&url),
            source: e,
        })?;

    if !response.is_success() {
        return Err(InventoryError::HttpStatus {
            url: redact_url(&url),
            status: response.status,
        });
    }

    let listing: ItemsResponse =
        serde_json::from_slice(&response.body).map_err(|e| InventoryError::InvalidResponse {
            url: redact_url(&url),
            source: e,
        })?;

    let items = listing.items.unwrap_or_default();
    let total_items = items.len();

    let inventory = build_inventory(episode_records(items, reporter), reporter);

    reporter.report(ProgressEvent::InventoryLoaded {
        total_items,
        matched_episodes: inventory.len(),
    });

    Ok(inventory)
}
