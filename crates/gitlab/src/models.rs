//! Response bodies of the repository API.
//!
//! Fields the service documents are typed; anything else it sends is kept
//! in `extra` so callers still see the full response.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A file as returned by `GET files/{path}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFile {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_sha256: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub blob_id: Option<String>,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    pub last_commit_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepositoryFile {
    /// The file content as bytes, decoding it when the service sent base64.
    pub fn decoded_content(&self) -> Result<Vec<u8>> {
        match self.encoding.as_str() {
            "base64" => {
                // Large files come back wrapped across lines.
                let compact: String = self
                    .content
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                STANDARD
                    .decode(compact)
                    .map_err(|e| Error::ContentEncoding {
                        path: self.file_path.clone(),
                        message: e.to_string(),
                    })
            }
            "" | "text" => Ok(self.content.clone().into_bytes()),
            other => Err(Error::ContentEncoding {
                path: self.file_path.clone(),
                message: format!("unsupported encoding '{}'", other),
            }),
        }
    }
}

/// Result of creating or updating a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileCommit {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub branch: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Blob,
    Tree,
    /// A submodule pointer.
    Commit,
    #[serde(other)]
    Unknown,
}

/// One entry of `GET tree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEntry {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub path: String,
    #[serde(default)]
    pub mode: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A commit as returned by `GET commits/{sha}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default)]
    pub short_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author_name: String,
    pub committed_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Commit {
    pub fn committed_at(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.committed_date)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| Error::Timestamp {
                value: self.committed_date.clone(),
                source: e,
            })
    }
}
