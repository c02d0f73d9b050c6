//! Source traits describing where content documents come from.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentSourceError {
    #[error("content document `{path}` could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The raw TOML text of every content document, before parsing.
#[derive(Debug, Clone)]
pub struct ContentDocuments {
    pub site: String,
    pub projects: String,
    pub posts: String,
    pub tutorials: String,
}

/// Supplies content documents to the catalog at startup.
pub trait ContentSource: Send + Sync {
    /// Human-readable origin used in logs (`embedded`, a directory path, ...).
    fn describe(&self) -> String;

    fn load(&self) -> Result<ContentDocuments, ContentSourceError>;
}
