//! npm registry API implementation

use std::collections::HashMap;
use std::time::Duration;

use crate::config::{REGISTRY_CONNECT_TIMEOUT_MS, REGISTRY_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::registry::VersionRegistry;
use serde::Deserialize;
use tracing::{debug, warn};

/// Response from npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

/// Registry implementation for npm registry API
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        Self::with_timeout(base_url, Duration::from_millis(REGISTRY_TIMEOUT_MS))
    }

    /// Creates a new NpmRegistry whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let connect_timeout = timeout.min(Duration::from_millis(REGISTRY_CONNECT_TIMEOUT_MS));
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("scaffold/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .connect_timeout(connect_timeout)
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

#[async_trait::async_trait]
impl VersionRegistry for NpmRegistry {
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let encoded_name = Self::encode_package_name(package_name);
        let url = format!("{}/{}", self.base_url, encoded_name);

        debug!("Fetching dist-tags from {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package_info: NpmPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse npm registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        package_info
            .dist_tags
            .get("latest")
            .cloned()
            .ok_or_else(|| RegistryError::InvalidResponse("Missing dist-tags.latest".to_string()))
    }
}
