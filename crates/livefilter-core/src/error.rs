//! Error types for page loading and profile resolution.
//!
//! Filtering itself never fails; these errors only come from the edges where
//! documents and names enter the system.

use std::path::PathBuf;

/// Failure to load or validate a [`Page`](crate::page::Page).
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("failed to read page {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed page document")]
    Parse(#[from] serde_json::Error),
    #[error("element id {0:?} is used more than once")]
    DuplicateId(String),
}

/// Failure to resolve a named [`FilterProfile`](crate::profile::FilterProfile).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("unknown profile {0:?} (expected `strict` or `generic`)")]
    UnknownPreset(String),
}
