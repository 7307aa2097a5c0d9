pub mod collection;
pub mod config;
pub mod error;
pub mod filler;
pub mod http;
pub mod inventory;
mod item_id;
pub mod partition;
pub mod progress;
pub mod sync;

// Re-export main types for convenience
pub use collection::{BucketKind, CollectionOutcome, CreatedCollection, create_collection, publish_buckets};
pub use config::{MediaServer, SyncConfig};
pub use error::{CollectionError, ErrorKind, FillerListError, InventoryError, SyncError};
pub use filler::{DEFAULT_FILLER_FIELD, FillerSet, FillerSource, fetch_filler_list, resolve_filler_set};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use inventory::{EpisodeRecord, Inventory, extract_from_name, extract_from_path, fetch_inventory};
pub use partition::{Buckets, partition};
pub use progress::{FillerOrigin, NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use sync::{SyncResult, sync_collections};
