//! Error types for catalog fetches and preference storage

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Catalog resource a request was made for, used in user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResource {
    Products,
    Product,
    Categories,
}

impl fmt::Display for CatalogResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogResource::Products => "products",
            CatalogResource::Product => "product",
            CatalogResource::Categories => "categories",
        };
        f.write_str(name)
    }
}

/// Failure of a catalog fetch
///
/// The `Display` output is the message shown to the user.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request timeout - please try again")]
    Timeout { resource: CatalogResource },

    #[error("Failed to fetch {resource}: HTTP error! status: {status}")]
    Http { resource: CatalogResource, status: u16 },

    #[error("Failed to fetch {resource}: {message}")]
    Transport {
        resource: CatalogResource,
        /// Full cause chain, outermost first
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to fetch {resource}: invalid response body ({source})")]
    Decode {
        resource: CatalogResource,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Message displayed by the view layer
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Resource the failed request was for
    pub fn resource(&self) -> CatalogResource {
        match self {
            FetchError::Timeout { resource }
            | FetchError::Http { resource, .. }
            | FetchError::Transport { resource, .. }
            | FetchError::Decode { resource, .. } => *resource,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    /// HTTP status code, if the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure reading or writing the preference file
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read preferences from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {} is corrupted: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write preferences to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}
