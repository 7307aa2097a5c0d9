// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::collection::{CollectionOutcome, publish_buckets};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::filler::resolve_filler_set;
use crate::http::HttpClient;
use crate::inventory::fetch_inventory;
use crate::partition::partition;
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// Result of a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Number of episode numbers classified as filler
    pub filler_numbers: usize,
    /// Number of episodes mapped to an absolute episode number
    pub matched_episodes: usize,
    /// True when no episode could be mapped and nothing was published
    pub inventory_empty: bool,
    pub canon_count: usize,
    pub filler_count: usize,
    /// One outcome per bucket, in publishing order
    pub collections: Vec<CollectionOutcome>,
}

impl SyncResult {
    pub fn created_count(&self) -> usize {
        self.collections.iter().filter(|c| c.is_created()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.collections.len() - self.created_count()
    }
}

/// Synchronize canon and filler collections for one series
///
/// This is the main entry point for the library. It:
/// 1. Resolves the filler episode numbers
/// 2. Fetches the series episodes and maps them by absolute number
/// 3. Splits them into canon, filler and all buckets
/// 4. Creates one collection per non-empty bucket
///
/// Steps run strictly one after another and the first error aborts the run.
pub async fn sync_collections<C: HttpClient>(
    client: &C,
    config: &SyncConfig,
    reporter: SharedProgressReporter,
) -> Result<SyncResult, SyncError> {
    let filler = resolve_filler_set(client, &config.filler, &reporter).await?;

    let inventory = fetch_inventory(client, &config.server, &config.series_id, &reporter).await?;

    if inventory.is_empty() {
        reporter.report(ProgressEvent::InventoryEmpty {
            series_id: config.series_id.clone(),
        });

        return Ok(SyncResult {
            filler_numbers: filler.len(),
            inventory_empty: true,
            ..Default::default()
        });
    }

    let buckets = partition(&inventory, &filler);

    reporter.report(ProgressEvent::BucketsReady {
        canon_count: buckets.canon.len(),
        filler_count: buckets.filler.len(),
        all_count: buckets.all.len(),
    });

    let collections = publish_buckets(
        client,
        &config.server,
        &config.series_name,
        &buckets,
        &reporter,
    )
    .await?;

    let result = SyncResult {
        filler_numbers: filler.len(),
        matched_episodes: inventory.len(),
        inventory_empty: false,
        canon_count: buckets.canon.len(),
        filler_count: buckets.filler.len(),
        collections,
    };

    reporter.report(ProgressEvent::SyncCompleted {
        created_count: result.created_count(),
        skipped_count: result.skipped_count(),
    });

    Ok(result)
}
