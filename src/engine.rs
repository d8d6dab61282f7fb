//! Container engine client, backed by bollard.
//!
//! The engine is wrapped behind a narrow trait (build, run, fetch-logs, stop,
//! remove) so the sequencing code can be exercised against a fake engine in
//! tests. The production implementation talks to the local Docker daemon.

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{
    Config as ContainerConfig, CreateContainerOptions, LogOutput, LogsOptions,
    RemoveContainerOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::image::BuildImageOptions;
use futures_util::StreamExt;
use std::path::Path;
use thiserror::Error;

use crate::workspace;

/// Errors surfaced at the engine seam. The attempt runner collapses all of
/// these into a boolean failure signal.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to connect to Docker daemon (is Docker running?): {0}")]
    Connect(#[source] bollard::errors::Error),
    #[error("build error: {0}")]
    Build(String),
    #[error("failed to archive build context: {0}")]
    Context(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] bollard::errors::Error),
}

/// The operations the driver needs from a container engine.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Build an image from a context directory containing a Dockerfile.
    async fn build_image(&self, context_dir: &Path, tag: &str) -> Result<(), EngineError>;

    /// Create and start a detached container; returns the container id.
    async fn run_container(&self, image: &str, name: &str) -> Result<String, EngineError>;

    /// Fetch the container's combined stdout/stderr logs.
    async fn container_logs(&self, id: &str) -> Result<String, EngineError>;

    /// Stop a running container.
    async fn stop_container(&self, id: &str) -> Result<(), EngineError>;

    /// Remove a stopped container.
    async fn remove_container(&self, id: &str) -> Result<(), EngineError>;
}

/// Docker client wrapper for the local daemon.
pub struct DockerEngine {
    client: Docker,
    stop_timeout_secs: i64,
}

impl DockerEngine {
    /// Connect to the local Docker daemon and verify it responds.
    pub async fn connect(stop_timeout_secs: i64) -> Result<Self, EngineError> {
        let client = Docker::connect_with_local_defaults().map_err(EngineError::Connect)?;
        client.ping().await.map_err(EngineError::Connect)?;
        log::debug!("Connected to Docker daemon");
        Ok(Self {
            client,
            stop_timeout_secs,
        })
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn build_image(&self, context_dir: &Path, tag: &str) -> Result<(), EngineError> {
        let context = archive_context(context_dir)?;

        let options = BuildImageOptions {
            dockerfile: workspace::DOCKERFILE_NAME.to_string(),
            t: tag.to_string(),
            rm: true,
            ..Default::default()
        };

        let mut stream = self
            .client
            .build_image(options, None, Some(bytes::Bytes::from(context)));

        while let Some(item) = stream.next().await {
            let info = item?;
            if let Some(msg) = info.stream {
                let msg = msg.trim_end();
                if !msg.is_empty() {
                    log::debug!("build: {}", msg);
                }
            }
            // The daemon reports build failures as error lines in the stream.
            if let Some(err) = info.error {
                return Err(EngineError::Build(err));
            }
        }

        log::info!("Built image {}", tag);
        Ok(())
    }

    async fn run_container(&self, image: &str, name: &str) -> Result<String, EngineError> {
        let options = CreateContainerOptions {
            name: name.to_string(),
            ..Default::default()
        };

        let config = ContainerConfig {
            image: Some(image.to_string()),
            ..Default::default()
        };

        let response = self.client.create_container(Some(options), config).await?;
        self.client
            .start_container(&response.id, None::<StartContainerOptions<String>>)
            .await?;

        log::info!("Started container {} from image {}", &response.id[..12], image);
        Ok(response.id)
    }

    async fn container_logs(&self, id: &str) -> Result<String, EngineError> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            tail: "all".to_string(),
            ..Default::default()
        };

        let mut stream = self.client.logs(id, Some(options));
        let mut output = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk? {
                LogOutput::StdOut { message }
                | LogOutput::StdErr { message }
                | LogOutput::Console { message } => {
                    output.push_str(&String::from_utf8_lossy(&message));
                }
                _ => {}
            }
        }
        Ok(output)
    }

    async fn stop_container(&self, id: &str) -> Result<(), EngineError> {
        self.client
            .stop_container(
                id,
                Some(StopContainerOptions {
                    t: self.stop_timeout_secs,
                }),
            )
            .await?;
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> Result<(), EngineError> {
        self.client
            .remove_container(id, Some(RemoveContainerOptions::default()))
            .await?;
        Ok(())
    }
}

/// Tar up a build context directory for the engine's build endpoint.
fn archive_context(dir: &Path) -> std::io::Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    builder.append_dir_all(".", dir)?;
    builder.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn test_archive_context_includes_workspace_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM python:3.12-slim\n").unwrap();
        std::fs::write(dir.path().join("app.py"), "print('hi')\n").unwrap();

        let bytes = archive_context(dir.path()).unwrap();
        let mut archive = tar::Archive::new(bytes.as_slice());

        let names: HashSet<String> = archive
            .entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .trim_start_matches("./")
                    .to_string()
            })
            .collect();

        assert!(names.contains("Dockerfile"));
        assert!(names.contains("app.py"));
    }

    #[test]
    fn test_archive_context_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(archive_context(&dir.path().join("nope")).is_err());
    }
}
