//! Plain URI download backend
//!
//! Fetches a single file into the dependency's source directory. HTTP and
//! HTTPS go through reqwest; anything else is treated as a local path and
//! copied, which also gives tests a network-free failure path.

use super::ActionStatus;
use crate::report::Reporter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct UriDownload {
    uri: String,
    destination: PathBuf,
}

impl UriDownload {
    pub fn new(uri: &str, destination: &Path) -> Self {
        Self {
            uri: uri.to_string(),
            destination: destination.to_path_buf(),
        }
    }

    pub fn download(&self, reporter: &dyn Reporter) -> ActionStatus {
        let result = if self.uri.starts_with("http://") || self.uri.starts_with("https://") {
            self.fetch_http()
        } else {
            self.copy_local()
        };

        match result {
            Ok(()) => ActionStatus::Success,
            Err(e) => {
                reporter.error(&format!("Download of {} failed: {e}", self.uri));
                ActionStatus::Failure
            }
        }
    }

    /// Target file name inside the source directory
    fn target_path(&self) -> PathBuf {
        let name = self
            .uri
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("download");
        self.destination.join(name)
    }

    fn fetch_http(&self) -> Result<(), Box<dyn std::error::Error>> {
        let response = reqwest::blocking::get(&self.uri)?.error_for_status()?;
        let bytes = response.bytes()?;
        std::fs::write(self.target_path(), &bytes)?;
        Ok(())
    }

    fn copy_local(&self) -> Result<(), Box<dyn std::error::Error>> {
        let source = Path::new(&self.uri);
        if !source.is_file() {
            return Err(format!("{} is not a file", self.uri).into());
        }
        std::fs::copy(source, self.target_path())?;
        Ok(())
    }
}
