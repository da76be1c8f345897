//! Registry trait for looking up the latest published version of a package

#[cfg(test)]
use mockall::automock;

use tracing::warn;

use crate::version::error::RegistryError;

/// Trait for fetching the latest published version from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionRegistry: Send + Sync {
    /// Fetches the version currently tagged as latest
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "@scope/name")
    ///
    /// # Returns
    /// * `Ok(String)` - The latest version
    /// * `Err(RegistryError)` - If the request or the response is unusable
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError>;
}

/// Looks up the latest version of `package_name`, absorbing every failure.
///
/// Returns `None` when the registry cannot be reached or answers with
/// something unusable. The failure is logged, never propagated.
pub async fn latest_version(registry: &dyn VersionRegistry, package_name: &str) -> Option<String> {
    registry
        .fetch_latest_version(package_name)
        .await
        .inspect_err(|e| warn!("Failed to look up latest version of {}: {}", package_name, e))
        .ok()
}
