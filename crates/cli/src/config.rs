use directories::ProjectDirs;
use eyre::Result;
use repofs_gitlab::{ClientConfig, CommitMessages};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CONFIG_PATH_ENV: &str = "REPOFS_CONFIG";
pub const BASE_URL_ENV: &str = "REPOFS_BASE_URL";
pub const PROJECT_ID_ENV: &str = "REPOFS_PROJECT_ID";
pub const BRANCH_ENV: &str = "REPOFS_BRANCH";
pub const TOKEN_ENV: &str = "REPOFS_TOKEN";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitlabConfig,
    #[serde(default)]
    pub messages: CommitMessages,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GitlabConfig {
    pub base_url: String,
    pub project_id: String,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gitlab.com".to_string(),
            project_id: String::new(),
            branch: "main".to_string(),
            access_token: None,
        }
    }
}

/// Per-invocation values that take precedence over the file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub project_id: Option<String>,
    pub branch: Option<String>,
    pub access_token: Option<String>,
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => get_default_config_dir().join("config.json"),
        }
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()).await
    }

    /// Load the file at `path`, writing the defaults there first if it is missing.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Apply `REPOFS_*` variables as returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BASE_URL_ENV) {
            self.gitlab.base_url = value;
        }
        if let Some(value) = lookup(PROJECT_ID_ENV) {
            self.gitlab.project_id = value;
        }
        if let Some(value) = lookup(BRANCH_ENV) {
            self.gitlab.branch = value;
        }
        if let Some(value) = lookup(TOKEN_ENV) {
            self.gitlab.access_token = Some(value);
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(value) = overrides.base_url {
            self.gitlab.base_url = value;
        }
        if let Some(value) = overrides.project_id {
            self.gitlab.project_id = value;
        }
        if let Some(value) = overrides.branch {
            self.gitlab.branch = value;
        }
        if let Some(value) = overrides.access_token {
            self.gitlab.access_token = Some(value);
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.gitlab.project_id.is_empty() {
            return Err(eyre::eyre!(
                "No project configured; run `repofs config set gitlab.project_id <id>` or set {}",
                PROJECT_ID_ENV
            ));
        }

        let access_token = self.gitlab.access_token.clone().ok_or_else(|| {
            eyre::eyre!(
                "No access token configured; set {} or `gitlab.access_token`",
                TOKEN_ENV
            )
        })?;

        Ok(ClientConfig::new(
            access_token,
            self.gitlab.project_id.clone(),
            self.gitlab.branch.clone(),
            self.gitlab.base_url.clone(),
        ))
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["gitlab", "base_url"] => self.gitlab.base_url = value.to_string(),
            ["gitlab", "project_id"] => self.gitlab.project_id = value.to_string(),
            ["gitlab", "branch"] => self.gitlab.branch = value.to_string(),
            ["gitlab", "access_token"] => {
                self.gitlab.access_token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            ["messages", "create"] => self.messages.create = value.to_string(),
            ["messages", "update"] => self.messages.update = value.to_string(),
            ["messages", "delete"] => self.messages.delete = value.to_string(),
            ["messages", "copy"] => self.messages.copy = value.to_string(),
            _ => {
                return Err(eyre::eyre!("Unknown configuration key: {}", key));
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        let value = match parts.as_slice() {
            ["gitlab", "base_url"] => self.gitlab.base_url.clone(),
            ["gitlab", "project_id"] => self.gitlab.project_id.clone(),
            ["gitlab", "branch"] => self.gitlab.branch.clone(),
            ["gitlab", "access_token"] => redact(self.gitlab.access_token.as_deref()),
            ["messages", "create"] => self.messages.create.clone(),
            ["messages", "update"] => self.messages.update.clone(),
            ["messages", "delete"] => self.messages.delete.clone(),
            ["messages", "copy"] => self.messages.copy.clone(),
            _ => {
                return Err(eyre::eyre!("Unknown configuration key: {}", key));
            }
        };

        Ok(value)
    }

    pub fn show_all(&self) -> String {
        format!(
            "Configuration:\n\
             GitLab:\n\
             ├─ base_url: {}\n\
             ├─ project_id: {}\n\
             ├─ branch: {}\n\
             └─ access_token: {}\n\
             Commit messages:\n\
             ├─ create: {}\n\
             ├─ update: {}\n\
             ├─ delete: {}\n\
             └─ copy: {}",
            self.gitlab.base_url,
            if self.gitlab.project_id.is_empty() {
                "(not set)"
            } else {
                self.gitlab.project_id.as_str()
            },
            self.gitlab.branch,
            redact(self.gitlab.access_token.as_deref()),
            self.messages.create,
            self.messages.update,
            self.messages.delete,
            self.messages.copy,
        )
    }

    pub async fn reset() -> Result<Self> {
        let config = Self::default();
        config.save().await?;
        Ok(config)
    }
}

fn redact(token: Option<&str>) -> String {
    match token {
        Some(token) if token.chars().count() > 4 => {
            format!("{}****", token.chars().take(4).collect::<String>())
        }
        Some(_) => "****".to_string(),
        None => "(not set)".to_string(),
    }
}

/// Get the default configuration directory
fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "repofs", "repofs") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        PathBuf::from(".repofs").join("config")
    }
}
