//! Filesystem-style access on top of a repository.
//!
//! [`Filesystem`] is the interface a storage layer drives: paths in, file
//! contents and metadata out. Every write is a commit on the remote branch.

mod gitlab;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use crate::error::Result;

pub use gitlab::GitlabAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// What is known about one path. Optional fields are filled only by the
/// operations that learn them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub path: String,
    pub kind: EntryKind,
    pub size: Option<u64>,
    pub mimetype: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl FileMetadata {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: None,
            mimetype: None,
            timestamp: None,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Dir,
            ..Self::file(path)
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Commit message templates. `{path}`, `{from}` and `{to}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessages {
    pub create: String,
    pub update: String,
    pub delete: String,
    pub copy: String,
}

impl Default for CommitMessages {
    fn default() -> Self {
        Self {
            create: "Created {path}".to_string(),
            update: "Updated {path}".to_string(),
            delete: "Deleted {path}".to_string(),
            copy: "Copied {from} to {to}".to_string(),
        }
    }
}

impl CommitMessages {
    pub fn created(&self, path: &str) -> String {
        self.create.replace("{path}", path)
    }

    pub fn updated(&self, path: &str) -> String {
        self.update.replace("{path}", path)
    }

    pub fn deleted(&self, path: &str) -> String {
        self.delete.replace("{path}", path)
    }

    pub fn copied(&self, from: &str, to: &str) -> String {
        self.copy.replace("{from}", from).replace("{to}", to)
    }
}

pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Whether a file exists at `path`.
    async fn has(&self, path: &str) -> Result<bool>;

    async fn read(&self, path: &str) -> Result<String>;

    async fn read_stream(&self, path: &str) -> Result<BoxedReader>;

    /// Create a new file. Fails if it already exists.
    async fn write(&self, path: &str, contents: &str) -> Result<FileMetadata>;

    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<FileMetadata>;

    /// Replace an existing file. Fails if it does not exist.
    async fn update(&self, path: &str, contents: &str) -> Result<FileMetadata>;

    async fn update_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<FileMetadata>;

    async fn copy(&self, from: &str, to: &str) -> Result<()>;

    /// Copy then delete; two commits, not one.
    async fn rename(&self, from: &str, to: &str) -> Result<()>;

    async fn delete(&self, path: &str) -> Result<()>;

    async fn create_dir(&self, dir: &str) -> Result<FileMetadata>;

    /// Delete every file below `dir`, one commit per file. The repository
    /// root (`""` or `"/"`) is rejected with [`Error::InvalidArgument`].
    ///
    /// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
    async fn delete_dir(&self, dir: &str) -> Result<()>;

    async fn list_contents(&self, dir: &str, recursive: bool) -> Result<Vec<FileMetadata>>;

    async fn get_metadata(&self, path: &str) -> Result<FileMetadata>;

    async fn get_size(&self, path: &str) -> Result<u64>;

    async fn get_mimetype(&self, path: &str) -> Result<String>;

    /// Time of the last commit that touched `path`.
    async fn get_timestamp(&self, path: &str) -> Result<DateTime<Utc>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commit_messages() {
        let messages = CommitMessages::default();
        assert_eq!(messages.created("a.txt"), "Created a.txt");
        assert_eq!(messages.updated("a.txt"), "Updated a.txt");
        assert_eq!(messages.deleted("a.txt"), "Deleted a.txt");
        assert_eq!(messages.copied("a.txt", "b.txt"), "Copied a.txt to b.txt");
    }

    #[test]
    fn test_custom_templates() {
        let messages = CommitMessages {
            create: "docs: add {path} [skip ci]".to_string(),
            ..Default::default()
        };
        assert_eq!(messages.created("x.md"), "docs: add x.md [skip ci]");
    }

    #[test]
    fn test_metadata_constructors() {
        assert!(FileMetadata::file("a").is_file());
        assert_eq!(FileMetadata::dir("d").kind, EntryKind::Dir);
        assert_eq!(FileMetadata::dir("d").size, None);
    }
}
