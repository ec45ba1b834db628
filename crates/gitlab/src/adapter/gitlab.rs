use std::io::Cursor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncRead;
use tracing::{debug, warn};

use super::{BoxedReader, CommitMessages, FileMetadata, Filesystem};
use crate::client::GitlabClient;
use crate::error::{Error, Result};
use crate::models::{EntryType, TreeEntry};

const DIR_PLACEHOLDER: &str = ".gitkeep";

/// [`Filesystem`] backed by one branch of a GitLab project.
pub struct GitlabAdapter {
    client: GitlabClient,
    messages: CommitMessages,
}

impl GitlabAdapter {
    pub fn new(client: GitlabClient) -> Self {
        Self {
            client,
            messages: CommitMessages::default(),
        }
    }

    pub fn with_commit_messages(mut self, messages: CommitMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn client(&self) -> &GitlabClient {
        &self.client
    }

    /// Mutable access for switching branch, project or token between calls.
    pub fn client_mut(&mut self) -> &mut GitlabClient {
        &mut self.client
    }

    fn written(path: &str, committed_path: String, size: Option<u64>) -> FileMetadata {
        let path = if committed_path.is_empty() {
            path.to_string()
        } else {
            committed_path
        };

        let mimetype = guess_mimetype(&path);
        FileMetadata {
            size,
            mimetype: Some(mimetype),
            ..FileMetadata::file(path)
        }
    }
}

fn guess_mimetype(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn normalize_dir(dir: &str) -> &str {
    dir.trim_matches('/')
}

fn to_metadata(entry: TreeEntry) -> Option<FileMetadata> {
    match entry.entry_type {
        EntryType::Blob => Some(FileMetadata::file(entry.path)),
        EntryType::Tree => Some(FileMetadata::dir(entry.path)),
        EntryType::Commit => {
            warn!("Skipping submodule entry: {}", entry.path);
            None
        }
        EntryType::Unknown => {
            warn!("Skipping entry of unknown type: {}", entry.path);
            None
        }
    }
}

#[async_trait]
impl Filesystem for GitlabAdapter {
    async fn has(&self, path: &str) -> Result<bool> {
        match self.client.read(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn read(&self, path: &str) -> Result<String> {
        self.client.read_raw(path).await
    }

    async fn read_stream(&self, path: &str) -> Result<BoxedReader> {
        let contents = self.client.read_raw_bytes(path).await?;
        Ok(Box::new(Cursor::new(contents)))
    }

    async fn write(&self, path: &str, contents: &str) -> Result<FileMetadata> {
        let commit = self
            .client
            .upload(path, contents, &self.messages.created(path), false)
            .await?;

        Ok(Self::written(
            path,
            commit.file_path,
            Some(contents.len() as u64),
        ))
    }

    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<FileMetadata> {
        let commit = self
            .client
            .upload_stream(path, reader, &self.messages.created(path), false)
            .await?;

        Ok(Self::written(path, commit.file_path, None))
    }

    async fn update(&self, path: &str, contents: &str) -> Result<FileMetadata> {
        let commit = self
            .client
            .upload(path, contents, &self.messages.updated(path), true)
            .await?;

        Ok(Self::written(
            path,
            commit.file_path,
            Some(contents.len() as u64),
        ))
    }

    async fn update_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<FileMetadata> {
        let commit = self
            .client
            .upload_stream(path, reader, &self.messages.updated(path), true)
            .await?;

        Ok(Self::written(path, commit.file_path, None))
    }

    async fn copy(&self, from: &str, to: &str) -> Result<()> {
        debug!("Copying {} to {}", from, to);

        let contents = self.client.read_raw(from).await?;
        self.client
            .upload(to, &contents, &self.messages.copied(from, to), false)
            .await?;

        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        debug!("Renaming {} to {}", from, to);

        self.copy(from, to).await?;
        self.delete(from).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.client
            .delete(path, &self.messages.deleted(path))
            .await
    }

    async fn create_dir(&self, dir: &str) -> Result<FileMetadata> {
        let dir = normalize_dir(dir);
        let placeholder = if dir.is_empty() {
            DIR_PLACEHOLDER.to_string()
        } else {
            format!("{}/{}", dir, DIR_PLACEHOLDER)
        };

        self.client
            .upload(&placeholder, "", &self.messages.created(&placeholder), false)
            .await?;

        Ok(FileMetadata::dir(dir))
    }

    async fn delete_dir(&self, dir: &str) -> Result<()> {
        let dir = normalize_dir(dir);
        if dir.is_empty() {
            return Err(Error::InvalidArgument(
                "refusing to delete the repository root".to_string(),
            ));
        }

        let entries = self.client.tree(Some(dir), true).await?;

        let files: Vec<TreeEntry> = entries
            .into_iter()
            .filter(|entry| entry.entry_type == EntryType::Blob)
            .collect();

        debug!("Deleting {} files below {}", files.len(), dir);

        for file in files {
            self.delete(&file.path).await?;
        }

        Ok(())
    }

    async fn list_contents(&self, dir: &str, recursive: bool) -> Result<Vec<FileMetadata>> {
        let entries = self
            .client
            .tree(Some(normalize_dir(dir)), recursive)
            .await?;

        Ok(entries.into_iter().filter_map(to_metadata).collect())
    }

    async fn get_metadata(&self, path: &str) -> Result<FileMetadata> {
        let file = self.client.read(path).await?;
        let path = if file.file_path.is_empty() {
            path.to_string()
        } else {
            file.file_path
        };

        let mimetype = guess_mimetype(&path);
        Ok(FileMetadata {
            size: Some(file.size),
            mimetype: Some(mimetype),
            ..FileMetadata::file(path)
        })
    }

    async fn get_size(&self, path: &str) -> Result<u64> {
        Ok(self.client.read(path).await?.size)
    }

    async fn get_mimetype(&self, path: &str) -> Result<String> {
        Ok(guess_mimetype(path))
    }

    async fn get_timestamp(&self, path: &str) -> Result<DateTime<Utc>> {
        let file = self.client.read(path).await?;
        let sha = file
            .last_commit_id
            .or(file.commit_id)
            .ok_or_else(|| Error::MissingField {
                path: path.to_string(),
                field: "last_commit_id",
            })?;

        self.client.commit(&sha).await?.committed_at()
    }
}
