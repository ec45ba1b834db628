//! Command-line front-end for repofs.

pub mod cli;
pub mod commands;
pub mod config;

use eyre::Result;
use repofs_gitlab::{GitlabAdapter, GitlabClient};

use crate::config::{Config, Overrides};

/// Resolve configuration (file, then `REPOFS_*` variables, then flags) and
/// build the adapter it describes.
pub fn build_adapter(mut config: Config, overrides: Overrides) -> Result<GitlabAdapter> {
    config.apply_env(|key| std::env::var(key).ok());
    config.apply_overrides(overrides);

    let client = GitlabClient::from_config(config.client_config()?);
    Ok(GitlabAdapter::new(client).with_commit_messages(config.messages))
}
