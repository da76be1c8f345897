//! Supported package managers

use crate::template::error::TemplateError;

/// Package manager used for the post-clone instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Command that installs the project's dependencies
    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    /// Command that runs a package.json script
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm | PackageManager::Bun => {
                format!("{} run {}", self.as_str(), script)
            }
            PackageManager::Yarn | PackageManager::Pnpm => format!("{} {}", self.as_str(), script),
        }
    }
}

impl std::str::FromStr for PackageManager {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str() == normalized)
            .ok_or_else(|| TemplateError::UnsupportedPackageManager(s.to_string()))
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
