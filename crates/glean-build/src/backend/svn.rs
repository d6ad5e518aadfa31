//! Subversion download backend

use super::{run_tool, ActionStatus};
use crate::report::Reporter;
use std::path::{Path, PathBuf};

/// Checks a repository out into the cache, or updates an existing working copy.
#[derive(Debug, Clone)]
pub struct SvnDownload {
    uri: String,
    /// Revision; empty means HEAD
    version: String,
    destination: PathBuf,
    svn_binary: String,
}

impl SvnDownload {
    pub fn new(uri: &str, version: &str, destination: &Path, svn_binary: &str) -> Self {
        Self {
            uri: uri.to_string(),
            version: version.to_string(),
            destination: destination.to_path_buf(),
            svn_binary: svn_binary.to_string(),
        }
    }

    pub fn download(&self, reporter: &dyn Reporter) -> ActionStatus {
        let mut args = if self.destination.join(".svn").is_dir() {
            vec!["update".to_string(), self.destination.display().to_string()]
        } else {
            vec![
                "checkout".to_string(),
                self.uri.clone(),
                self.destination.display().to_string(),
            ]
        };
        if !self.version.is_empty() {
            args.push("--revision".to_string());
            args.push(self.version.clone());
        }
        run_tool(&self.svn_binary, &args, None, reporter)
    }
}
