//! Content sources: documents compiled into the binary, or read from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::repos::{ContentDocuments, ContentSource, ContentSourceError};

pub const SITE_FILE: &str = "site.toml";
pub const PROJECTS_FILE: &str = "projects.toml";
pub const POSTS_FILE: &str = "posts.toml";
pub const TUTORIALS_FILE: &str = "tutorials.toml";

/// The `content/` documents shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedContent;

impl ContentSource for EmbeddedContent {
    fn describe(&self) -> String {
        "embedded".to_string()
    }

    fn load(&self) -> Result<ContentDocuments, ContentSourceError> {
        Ok(ContentDocuments {
            site: include_str!("../../content/site.toml").to_string(),
            projects: include_str!("../../content/projects.toml").to_string(),
            posts: include_str!("../../content/posts.toml").to_string(),
            tutorials: include_str!("../../content/tutorials.toml").to_string(),
        })
    }
}

/// Reads the four content documents from `root` at load time.
#[derive(Debug, Clone)]
pub struct DirectoryContent {
    root: PathBuf,
}

impl DirectoryContent {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<String, ContentSourceError> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|source| ContentSourceError::Read { path, source })
    }
}

impl ContentSource for DirectoryContent {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self) -> Result<ContentDocuments, ContentSourceError> {
        Ok(ContentDocuments {
            site: self.read(SITE_FILE)?,
            projects: self.read(PROJECTS_FILE)?,
            posts: self.read(POSTS_FILE)?,
            tutorials: self.read(TUTORIALS_FILE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_embedded_copy(dir: &TempDir) {
        let documents = EmbeddedContent.load().expect("embedded documents");
        for (name, text) in [
            (SITE_FILE, &documents.site),
            (PROJECTS_FILE, &documents.projects),
            (POSTS_FILE, &documents.posts),
            (TUTORIALS_FILE, &documents.tutorials),
        ] {
            fs::write(dir.path().join(name), text).expect("write document");
        }
    }

    #[test]
    fn directory_matches_embedded_documents() {
        let dir = TempDir::new().expect("tempdir");
        write_embedded_copy(&dir);

        let source = DirectoryContent::new(dir.path());
        let loaded = source.load().expect("directory documents");
        let embedded = EmbeddedContent.load().expect("embedded documents");

        assert_eq!(loaded.projects, embedded.projects);
        assert_eq!(loaded.tutorials, embedded.tutorials);
        assert_eq!(source.describe(), dir.path().display().to_string());
    }

    #[test]
    fn missing_document_names_the_path() {
        let dir = TempDir::new().expect("tempdir");
        write_embedded_copy(&dir);
        fs::remove_file(dir.path().join(POSTS_FILE)).expect("remove posts");

        let err = DirectoryContent::new(dir.path())
            .load()
            .expect_err("posts are missing");

        let ContentSourceError::Read { path, .. } = err;
        assert!(path.ends_with(POSTS_FILE));
    }
}
