//! Git download backend

use super::{run_tool, ActionStatus};
use crate::report::Reporter;
use std::path::{Path, PathBuf};

/// Clones a repository into the cache, or updates an existing checkout.
#[derive(Debug, Clone)]
pub struct GitDownload {
    uri: String,
    /// Branch or tag; empty means the remote's default branch
    version: String,
    destination: PathBuf,
    git_binary: String,
}

impl GitDownload {
    pub fn new(uri: &str, version: &str, destination: &Path, git_binary: &str) -> Self {
        Self {
            uri: uri.to_string(),
            version: version.to_string(),
            destination: destination.to_path_buf(),
            git_binary: git_binary.to_string(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn download(&self, reporter: &dyn Reporter) -> ActionStatus {
        if self.destination.join(".git").is_dir() {
            self.update(reporter)
        } else {
            self.clone_repo(reporter)
        }
    }

    fn clone_repo(&self, reporter: &dyn Reporter) -> ActionStatus {
        let mut args = vec!["clone".to_string()];
        if !self.version.is_empty() {
            args.push("--branch".to_string());
            args.push(self.version.clone());
        }
        args.push(self.uri.clone());
        args.push(self.destination.display().to_string());
        run_tool(&self.git_binary, &args, None, reporter)
    }

    fn update(&self, reporter: &dyn Reporter) -> ActionStatus {
        let dest = self.destination.display().to_string();
        let fetch = vec!["-C".to_string(), dest.clone(), "fetch".to_string()];
        let status = run_tool(&self.git_binary, &fetch, None, reporter);

        status.and(|| {
            // a pinned version stays pinned; otherwise follow the branch
            let rest: &[&str] = if self.version.is_empty() {
                &["pull", "--ff-only"]
            } else {
                &["checkout", self.version.as_str()]
            };
            let mut args = vec!["-C".to_string(), dest.clone()];
            args.extend(rest.iter().map(|s| s.to_string()));
            run_tool(&self.git_binary, &args, None, reporter)
        })
    }
}
