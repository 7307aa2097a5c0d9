use thiserror::Error;

/// Errors that can occur when fetching the filler episode list
#[derive(Error, Debug)]
pub enum FillerListError {
    #[error("Failed to fetch filler list from {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Filler list from {url} is not valid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Filler list from {url} is not a JSON object")]
    NotAnObject { url: String },

    #[error("Field '{field}' in filler list from {url} is not a list of episode numbers")]
    InvalidField { url: String, field: String },
}

/// Errors that can occur when fetching the series inventory from the media server
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Invalid media server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch episodes from {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unexpected episode listing from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when creating a collection on the media server
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Invalid media server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to create collection '{name}' at {url}: {source}")]
    RequestFailed {
        name: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} creating collection '{name}' at {url}")]
    HttpStatus {
        name: String,
        url: String,
        status: u16,
    },

    #[error("Unexpected response creating collection '{name}': {source}")]
    InvalidResponse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Broad classification of a sync failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection failure or non-success HTTP status from either service
    Network,
    /// Malformed responses, invalid configuration and anything else
    Unexpected,
}

/// Top-level errors for sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Filler list error: {0}")]
    FillerList(#[from] FillerListError),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),
}

impl SyncError {
    /// Classify this error as a network or an unexpected failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::FillerList(
                FillerListError::RequestFailed { .. } | FillerListError::HttpStatus { .. },
            )
            | SyncError::Inventory(
                InventoryError::RequestFailed { .. } | InventoryError::HttpStatus { .. },
            )
            | SyncError::Collection(
                CollectionError::RequestFailed { .. } | CollectionError::HttpStatus { .. },
            ) => ErrorKind::Network,
            _ => ErrorKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_network_errors() {
        let filler: SyncError = FillerListError::HttpStatus {
            url: "https://example.com/list.json".to_string(),
            status: 503,
        }
        .into();
        let inventory: SyncError = InventoryError::HttpStatus {
            url: "https://emby.local/emby/Items".to_string(),
            status: 401,
        }
        .into();
        let collection: SyncError = CollectionError::HttpStatus {
            name: "Show - CANON ONLY".to_string(),
            url: "https://emby.local/Collections".to_string(),
            status: 500,
        }
        .into();

        assert_eq!(filler.kind(), ErrorKind::Network);
        assert_eq!(inventory.kind(), ErrorKind::Network);
        assert_eq!(collection.kind(), ErrorKind::Network);
    }

    #[test]
    fn format_errors_are_unexpected() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let inventory: SyncError = InventoryError::InvalidResponse {
            url: "https://emby.local/emby/Items".to_string(),
            source: json_error,
        }
        .into();
        let filler: SyncError = FillerListError::InvalidField {
            url: "https://example.com/list.json".to_string(),
            field: "fillerEpisodes".to_string(),
        }
        .into();

        assert_eq!(inventory.kind(), ErrorKind::Unexpected);
        assert_eq!(filler.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn error_messages_name_the_failing_endpoint() {
        let error = CollectionError::HttpStatus {
            name: "Show - FILLER ONLY".to_string(),
            url: "https://emby.local/Collections".to_string(),
            status: 400,
        };

        assert_eq!(
            error.to_string(),
            "HTTP error 400 creating collection 'Show - FILLER ONLY' at https://emby.local/Collections"
        );
    }
}
