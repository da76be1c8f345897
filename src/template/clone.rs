//! Repository cloning

#[cfg(test)]
use mockall::automock;

use std::path::Path;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, info};

use crate::template::error::CloneError;

/// Clones a repository branch into a directory
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Cloner: Send + Sync {
    /// Clones `url` at `branch` into `destination`, which must not exist yet
    async fn clone_repo(&self, destination: &Path, url: &str, branch: &str)
    -> Result<(), CloneError>;
}

#[async_trait::async_trait]
impl<T: Cloner + ?Sized> Cloner for Arc<T> {
    async fn clone_repo(
        &self,
        destination: &Path,
        url: &str,
        branch: &str,
    ) -> Result<(), CloneError> {
        (**self).clone_repo(destination, url, branch).await
    }
}

/// Templates are cloned without history
const CLONE_DEPTH: u32 = 1;

/// Cloner backed by the `git` executable
#[derive(Debug, Clone, Default)]
pub struct GitCloner;

impl GitCloner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Cloner for GitCloner {
    async fn clone_repo(
        &self,
        destination: &Path,
        url: &str,
        branch: &str,
    ) -> Result<(), CloneError> {
        info!("Cloning {}#{} -> {}", url, branch, destination.display());

        if destination.exists() {
            return Err(CloneError::DestinationExists(destination.to_path_buf()));
        }

        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg("--depth")
            .arg(CLONE_DEPTH.to_string())
            .arg("--branch")
            .arg(branch)
            .arg(url)
            .arg(destination);

        debug!("Running: git clone");
        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CloneError::GitFailed(stderr.trim().to_string()));
        }

        info!("Repository cloned successfully");
        Ok(())
    }
}
