//! Self-update advisory
//!
//! Compares the running version against the latest published one and tells
//! the user how to update. Nothing here can fail the calling process.

use tracing::{debug, info};

use crate::output;
use crate::version::compare::greater_than;
use crate::version::registry::{VersionRegistry, latest_version};

/// A newer release is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAdvisory {
    pub package: String,
    pub current_version: String,
    pub latest_version: String,
}

impl UpdateAdvisory {
    /// The command that installs the latest release
    pub fn command(&self) -> String {
        format!("npm install -g {}@latest", self.package)
    }

    /// The two advisory lines shown to the user
    pub fn lines(&self) -> [String; 2] {
        [
            format!(
                "A new version of {} is available: {} (current: {})",
                self.package, self.latest_version, self.current_version
            ),
            format!("Run `{}` to update", self.command()),
        ]
    }
}

/// Decide whether an update advisory applies to `current_version`.
///
/// Returns `None` when the latest version is unknown or not newer.
pub async fn check_for_update(
    registry: &dyn VersionRegistry,
    package_name: &str,
    current_version: &str,
) -> Option<UpdateAdvisory> {
    let latest = latest_version(registry, package_name).await?;

    if !greater_than(&latest, current_version) {
        debug!(
            "{} {} is up to date (latest: {})",
            package_name, current_version, latest
        );
        return None;
    }

    info!(
        "{} {} is outdated (latest: {})",
        package_name, current_version, latest
    );
    Some(UpdateAdvisory {
        package: package_name.to_string(),
        current_version: current_version.to_string(),
        latest_version: latest,
    })
}

/// Print the advisory to stderr
pub fn print_advisory(advisory: &UpdateAdvisory) {
    for line in advisory.lines() {
        output::warning(&line);
    }
}

/// Check for a newer release and print the advisory if there is one.
pub async fn check_version(
    registry: &dyn VersionRegistry,
    package_name: &str,
    current_version: &str,
) {
    if let Some(advisory) = check_for_update(registry, package_name, current_version).await {
        print_advisory(&advisory);
    }
}
