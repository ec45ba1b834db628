//! Authenticated access to the files and tree endpoints of one project.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result, TransportError};
use crate::http::{HttpExecutor, HttpRequest, HttpResponse, Method, ReqwestExecutor};
use crate::models::{Commit, FileCommit, RepositoryFile, TreeEntry};
use crate::uri::{build_uri, encode_path};

pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Client for reading and writing files in a GitLab repository branch.
///
/// Reconfiguration goes through `&mut self`, so it cannot overlap a request
/// that is still running on the same instance. Clone the client to work
/// against several branches at once; clones share the executor.
#[derive(Clone)]
pub struct GitlabClient {
    config: ClientConfig,
    executor: Arc<dyn HttpExecutor>,
}

impl GitlabClient {
    pub fn new(
        access_token: impl Into<String>,
        project_id: impl Into<String>,
        branch: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::from_config(ClientConfig::new(
            access_token,
            project_id,
            branch,
            base_url,
        ))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_executor(config, Arc::new(ReqwestExecutor::new()))
    }

    pub fn with_executor(config: ClientConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self { config, executor }
    }

    /// Read a file's content as text. Invalid UTF-8 is replaced.
    pub async fn read_raw(&self, path: &str) -> Result<String> {
        let body = self.read_raw_bytes(path).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Read a file's content exactly as stored.
    pub async fn read_raw_bytes(&self, path: &str) -> Result<Bytes> {
        let uri = format!("files/{}/raw", encode_path(path));
        let response = self.request(Method::Get, &uri, &[]).await?;

        Ok(response.body)
    }

    /// Read a file together with its metadata. The content is base64 encoded.
    pub async fn read(&self, path: &str) -> Result<RepositoryFile> {
        let uri = format!("files/{}", encode_path(path));
        let response = self.request(Method::Get, &uri, &[]).await?;

        self.decode(&uri, &response)
    }

    /// Create (`overwrite == false`) or update a file in one commit.
    ///
    /// Whether the file already exists is not checked here; the service
    /// rejects a create of an existing file and an update of a missing one.
    pub async fn upload(
        &self,
        path: &str,
        contents: &str,
        commit_message: &str,
        overwrite: bool,
    ) -> Result<FileCommit> {
        let uri = format!("files/{}", encode_path(path));
        let method = if overwrite { Method::Put } else { Method::Post };

        let response = self
            .request(
                method,
                &uri,
                &[
                    ("content", contents.to_string()),
                    ("commit_message", commit_message.to_string()),
                ],
            )
            .await?;

        self.decode(&uri, &response)
    }

    /// Buffer `reader` completely and upload it as the file content.
    pub async fn upload_stream<R>(
        &self,
        path: &str,
        mut reader: R,
        commit_message: &str,
        overwrite: bool,
    ) -> Result<FileCommit>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;

        let contents = String::from_utf8(buffer).map_err(|e| {
            Error::InvalidArgument(format!(
                "Stream content for '{}' must be valid UTF-8: {}",
                path, e
            ))
        })?;

        self.upload(path, &contents, commit_message, overwrite)
            .await
    }

    pub async fn delete(&self, path: &str, commit_message: &str) -> Result<()> {
        let uri = format!("files/{}", encode_path(path));
        self.request(
            Method::Delete,
            &uri,
            &[("commit_message", commit_message.to_string())],
        )
        .await?;

        Ok(())
    }

    /// List a directory. `None`, `""` and `"/"` all mean the repository root.
    ///
    /// Only the first page the service returns is listed.
    pub async fn tree(&self, directory: Option<&str>, recursive: bool) -> Result<Vec<TreeEntry>> {
        let directory = directory.filter(|dir| !dir.is_empty() && *dir != "/");

        let mut params = Vec::with_capacity(2);
        if let Some(dir) = directory {
            params.push(("path", dir.to_string()));
        }
        params.push(("recursive", recursive.to_string()));

        let response = self.request(Method::Get, "tree", &params).await?;

        self.decode("tree", &response)
    }

    pub async fn commit(&self, sha: &str) -> Result<Commit> {
        let uri = format!("commits/{}", encode_path(sha));
        let response = self.request(Method::Get, &uri, &[]).await?;

        self.decode(&uri, &response)
    }

    pub fn access_token(&self) -> &str {
        &self.config.access_token
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.config.access_token = access_token.into();
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    pub fn set_project_id(&mut self, project_id: impl Into<String>) {
        self.config.project_id = project_id.into();
    }

    pub fn branch(&self) -> &str {
        &self.config.branch
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.config.branch = branch.into();
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send one request. GET parameters go in the query string; for every
    /// other method they are sent as a form body with `branch` first.
    async fn request(
        &self,
        method: Method,
        uri: &str,
        params: &[(&str, String)],
    ) -> Result<HttpResponse> {
        let (url, body) = if method == Method::Get {
            (build_uri(&self.config, uri, params), None)
        } else {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            form.append_pair("branch", &self.config.branch);
            for (key, value) in params {
                form.append_pair(key, value);
            }
            (build_uri(&self.config, uri, &[]), Some(form.finish()))
        };

        debug!("{} {}", method, url);

        let request = HttpRequest {
            method,
            url: url.clone(),
            headers: vec![(TOKEN_HEADER.to_string(), self.config.access_token.clone())],
            body,
        };

        let response = self.executor.execute(request).await?;

        if !response.is_success() {
            debug!("{} {} failed with status {}", method, url, response.status);
            return Err(TransportError::Status {
                status: response.status,
                url,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }
            .into());
        }

        Ok(response)
    }

    fn decode<T: DeserializeOwned>(&self, uri: &str, response: &HttpResponse) -> Result<T> {
        serde_json::from_slice(&response.body).map_err(|e| Error::Decode {
            uri: uri.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_replace_configuration() {
        let mut client = GitlabClient::new("tok", "42", "main", "https://gitlab.example.com");

        client.set_branch("develop");
        client.set_project_id("group%2Fproject");
        client.set_access_token("other");

        assert_eq!(client.branch(), "develop");
        assert_eq!(client.project_id(), "group%2Fproject");
        assert_eq!(client.access_token(), "other");
        assert_eq!(client.base_url(), "https://gitlab.example.com");
    }

    #[test]
    fn test_clones_are_configured_independently() {
        let client = GitlabClient::new("tok", "42", "main", "https://gitlab.example.com");
        let mut other = client.clone();
        other.set_branch("release");

        assert_eq!(client.branch(), "main");
        assert_eq!(other.branch(), "release");
    }
}
