//! Cloner test utilities

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use scaffold::template::{CloneError, Cloner};

/// Cloner that fails a fixed number of times, then writes a marker file
pub struct FakeCloner {
    failures_left: Mutex<u32>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeCloner {
    pub fn failing(times: u32) -> Self {
        Self {
            failures_left: Mutex::new(times),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (url, branch) of every clone attempt
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Cloner for FakeCloner {
    async fn clone_repo(
        &self,
        destination: &Path,
        url: &str,
        branch: &str,
    ) -> Result<(), CloneError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), branch.to_string()));

        {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(CloneError::GitFailed("early EOF".to_string()));
            }
        }

        if destination.exists() {
            return Err(CloneError::DestinationExists(destination.to_path_buf()));
        }
        std::fs::create_dir_all(destination)?;
        std::fs::write(destination.join("README.md"), format!("cloned from {url}"))?;
        Ok(())
    }
}
