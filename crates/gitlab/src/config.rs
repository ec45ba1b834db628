use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection settings for one project and branch.
///
/// Nothing is validated here; a wrong token or project id only shows up as
/// an HTTP error from the remote service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub access_token: String,
    pub project_id: String,
    pub branch: String,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(
        access_token: impl Into<String>,
        project_id: impl Into<String>,
        branch: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            project_id: project_id.into(),
            branch: branch.into(),
            base_url: base_url.into(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("branch", &self.branch)
            .field("base_url", &self.base_url)
            .finish()
    }
}
