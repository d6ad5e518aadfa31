//! Download and build backends
//!
//! Closed sets of capabilities selected by the manifest's `download_type`
//! and `build_type` tags. Unknown tags never reach this module; the manifest
//! parser rejects them with a typed error.

mod cmake;
mod git;
mod svn;
mod uri;

pub use cmake::CmakeBuild;
pub use git::GitDownload;
pub use svn::SvnDownload;
pub use uri::UriDownload;

use crate::cache::CachePaths;
use crate::options::{BuildMode, GleanOptions, ToolPaths};
use crate::report::Reporter;
use glean_package::{BuildKind, DependencyItem, DownloadKind};
use std::path::Path;
use std::process::{Command, Stdio};

/// Outcome of a backend action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    Failure,
}

impl ActionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Combine sequential actions; the first failure wins
    pub fn and(self, next: impl FnOnce() -> ActionStatus) -> ActionStatus {
        match self {
            Self::Success => next(),
            Self::Failure => Self::Failure,
        }
    }
}

impl From<bool> for ActionStatus {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Run an external tool, forwarding its stderr through the reporter.
///
/// Spawn errors (tool missing) are a Failure, not a panic.
pub(crate) fn run_tool(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    reporter: &dyn Reporter,
) -> ActionStatus {
    let mut command = Command::new(program);
    command.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let spawned = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            reporter.error(&format!("Failed to start {program}: {e}"));
            return ActionStatus::Failure;
        }
    };

    match spawned.wait_with_output() {
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !output.status.success() && !stderr.is_empty() {
                reporter.error(stderr.trim_end());
            }
            ActionStatus::from(output.status.success())
        }
        Err(e) => {
            reporter.error(&format!("Failed to wait on {program}: {e}"));
            ActionStatus::Failure
        }
    }
}

/// Download capability bound to a dependency's cache slot
#[derive(Debug, Clone)]
pub enum DownloadBackend {
    /// No-op, used for the root and aggregate-only dependencies
    None,
    Git(GitDownload),
    Svn(SvnDownload),
    Uri(UriDownload),
}

impl DownloadBackend {
    /// Select and bind the backend for a manifest item
    pub fn for_item(item: &DependencyItem, destination: &Path, tools: &ToolPaths) -> Self {
        match item.download_type {
            DownloadKind::None => Self::None,
            DownloadKind::Git => Self::Git(GitDownload::new(
                &item.uri,
                &item.version,
                destination,
                &tools.git,
            )),
            DownloadKind::GitHub => Self::Git(GitDownload::new(
                &github_to_git_uri(&item.uri),
                &item.version,
                destination,
                &tools.git,
            )),
            DownloadKind::Svn => Self::Svn(SvnDownload::new(
                &item.uri,
                &item.version,
                destination,
                &tools.svn,
            )),
            DownloadKind::Uri => Self::Uri(UriDownload::new(&item.uri, destination)),
        }
    }

    /// Fetch or refresh the dependency's source tree.
    ///
    /// Idempotent: an existing checkout is updated in place.
    pub fn download(&self, reporter: &dyn Reporter) -> ActionStatus {
        match self {
            Self::None => ActionStatus::Success,
            Self::Git(git) => git.download(reporter),
            Self::Svn(svn) => svn.download(reporter),
            Self::Uri(uri) => uri.download(reporter),
        }
    }
}

/// `github` items name `owner/repo`; expand to a clone URL
pub(crate) fn github_to_git_uri(uri: &str) -> String {
    format!("https://github.com/{}.git", uri.trim_matches('/'))
}

/// Build capability bound to a dependency's cache slot
#[derive(Debug, Clone)]
pub enum BuildBackend {
    /// No-op, used for the root and aggregate-only dependencies
    None,
    Cmake(CmakeBuild),
}

impl BuildBackend {
    /// Select and bind the backend for a manifest item.
    ///
    /// `has_nested_manifest` tells a cmake child build where to find the
    /// install root its own already-resolved dependencies went into.
    pub fn for_item(
        item: &DependencyItem,
        paths: &CachePaths,
        opts: &GleanOptions,
        has_nested_manifest: bool,
    ) -> Self {
        match item.build_type {
            BuildKind::None => Self::None,
            BuildKind::Cmake => {
                let mut args = opts.cmake_args.clone();
                args.extend(
                    opts.dep_opts
                        .cmake_args_for(&item.provides, &item.cmake_args),
                );
                args.extend(item.custom_options.split_whitespace().map(String::from));
                Self::Cmake(CmakeBuild::new(
                    &paths.source,
                    &paths.build,
                    &opts.install_prefix,
                    &opts.tools.cmake,
                    args,
                    opts.jobs,
                    has_nested_manifest,
                ))
            }
        }
    }

    pub fn build(&self, mode: BuildMode, reporter: &dyn Reporter) -> ActionStatus {
        match self {
            Self::None => ActionStatus::Success,
            Self::Cmake(cmake) => cmake.build(mode, reporter),
        }
    }

    pub fn install(&self, mode: BuildMode, reporter: &dyn Reporter) -> ActionStatus {
        match self {
            Self::None => ActionStatus::Success,
            Self::Cmake(cmake) => cmake.install(mode, reporter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;

    fn item(download: DownloadKind, build: BuildKind) -> DependencyItem {
        DependencyItem {
            provides: "libfoo".to_string(),
            download_type: download,
            build_type: build,
            uri: "beached/libfoo".to_string(),
            version: String::new(),
            custom_options: String::new(),
            cmake_args: Vec::new(),
            is_optional: false,
        }
    }

    #[test]
    fn test_github_uri_expansion() {
        assert_eq!(
            github_to_git_uri("beached/header_libraries"),
            "https://github.com/beached/header_libraries.git"
        );
    }

    #[test]
    fn test_none_backends_are_noops() {
        let download = DownloadBackend::None;
        assert!(download.download(&NullReporter).is_success());

        let build = BuildBackend::None;
        assert!(build.build(BuildMode::Release, &NullReporter).is_success());
        assert!(build.install(BuildMode::Debug, &NullReporter).is_success());
    }

    #[test]
    fn test_github_item_selects_git_backend() {
        let tools = ToolPaths::default();
        let backend = DownloadBackend::for_item(
            &item(DownloadKind::GitHub, BuildKind::None),
            Path::new("/tmp/dest"),
            &tools,
        );
        match backend {
            DownloadBackend::Git(git) => {
                assert_eq!(git.uri(), "https://github.com/beached/libfoo.git");
            }
            other => panic!("expected git backend, got {other:?}"),
        }
    }

    #[test]
    fn test_action_status_and() {
        let status = ActionStatus::Success.and(|| ActionStatus::Failure);
        assert!(!status.is_success());
        // short-circuits on failure
        let status = ActionStatus::Failure.and(|| panic!("must not run"));
        assert!(!status.is_success());
    }

    #[test]
    fn test_run_tool_missing_program() {
        let status = run_tool(
            "glean-no-such-tool",
            &["--version".to_string()],
            None,
            &NullReporter,
        );
        assert!(!status.is_success());
    }
}
