//! repofs GitLab backend
//!
//! Stores and retrieves files in one branch of a GitLab project through the
//! repository REST API (v4). Two layers are exposed:
//!
//! - [`GitlabClient`]: one method per endpoint (raw read, read with
//!   metadata, create/update, delete, tree listing).
//! - [`GitlabAdapter`]: a [`Filesystem`] built on the client, for storage
//!   layers that think in paths rather than endpoints.
//!
//! # Examples
//!
//! ```no_run
//! use repofs_gitlab::GitlabClient;
//!
//! # async fn example() -> repofs_gitlab::Result<()> {
//! let mut client = GitlabClient::new("glpat-token", "42", "main", "https://gitlab.com");
//!
//! let readme = client.read_raw("README.md").await?;
//! client
//!     .upload("notes/todo.txt", &readme, "Add notes", false)
//!     .await?;
//!
//! client.set_branch("develop");
//! for entry in client.tree(Some("notes"), false).await? {
//!     println!("{} {}", entry.path, entry.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod uri;

pub use adapter::{CommitMessages, EntryKind, FileMetadata, Filesystem, GitlabAdapter};
pub use client::GitlabClient;
pub use config::ClientConfig;
pub use error::{Error, Result, TransportError};
pub use models::{Commit, EntryType, FileCommit, RepositoryFile, TreeEntry};
