//! CMake build backend
//!
//! Drives configure, build, and install for one dependency. Each build mode
//! gets its own subtree under the cache's `build/` directory so release and
//! debug artifacts never collide.

use super::{run_tool, ActionStatus};
use crate::options::BuildMode;
use crate::report::Reporter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CmakeBuild {
    source_dir: PathBuf,
    build_dir: PathBuf,
    install_prefix: PathBuf,
    cmake_binary: String,
    cmake_args: Vec<String>,
    jobs: Option<u32>,
    has_nested_manifest: bool,
}

impl CmakeBuild {
    pub fn new(
        source_dir: &Path,
        build_dir: &Path,
        install_prefix: &Path,
        cmake_binary: &str,
        cmake_args: Vec<String>,
        jobs: Option<u32>,
        has_nested_manifest: bool,
    ) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            build_dir: build_dir.to_path_buf(),
            install_prefix: install_prefix.to_path_buf(),
            cmake_binary: cmake_binary.to_string(),
            cmake_args,
            jobs,
            has_nested_manifest,
        }
    }

    fn mode_dir(&self, mode: BuildMode) -> PathBuf {
        self.build_dir.join(mode.name())
    }

    /// Arguments for the configure step
    fn configure_args(&self, mode: BuildMode) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.mode_dir(mode).display().to_string(),
            format!("-DCMAKE_BUILD_TYPE={}", mode.cmake_name()),
            format!("-DCMAKE_INSTALL_PREFIX={}", self.install_prefix.display()),
        ];
        if self.has_nested_manifest {
            // tells a nested glean build where its dependencies were installed
            args.push(format!(
                "-DGLEAN_INSTALL_ROOT={}",
                self.install_prefix.display()
            ));
        }
        args.extend(self.cmake_args.iter().cloned());
        args
    }

    pub fn build(&self, mode: BuildMode, reporter: &dyn Reporter) -> ActionStatus {
        let mode_dir = self.mode_dir(mode);
        if let Err(e) = std::fs::create_dir_all(&mode_dir) {
            reporter.error(&format!(
                "Could not create build directory {}: {e}",
                mode_dir.display()
            ));
            return ActionStatus::Failure;
        }

        let configure = self.configure_args(mode);
        run_tool(&self.cmake_binary, &configure, None, reporter).and(|| {
            let mut args = vec!["--build".to_string(), mode_dir.display().to_string()];
            if let Some(jobs) = self.jobs {
                args.push("--parallel".to_string());
                args.push(jobs.to_string());
            }
            run_tool(&self.cmake_binary, &args, None, reporter)
        })
    }

    pub fn install(&self, mode: BuildMode, reporter: &dyn Reporter) -> ActionStatus {
        let args = vec![
            "--build".to_string(),
            self.mode_dir(mode).display().to_string(),
            "--target".to_string(),
            "install".to_string(),
        ];
        run_tool(&self.cmake_binary, &args, None, reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(nested: bool, jobs: Option<u32>) -> CmakeBuild {
        CmakeBuild::new(
            Path::new("/cache/cmake/libfoo/source"),
            Path::new("/cache/cmake/libfoo/build"),
            Path::new("/prefix"),
            "cmake",
            vec!["-DBUILD_TESTING=OFF".to_string()],
            jobs,
            nested,
        )
    }

    #[test]
    fn test_configure_args_release() {
        let args = backend(false, None).configure_args(BuildMode::Release);
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
        assert!(args.contains(&"-DCMAKE_INSTALL_PREFIX=/prefix".to_string()));
        assert!(args.contains(&"-DBUILD_TESTING=OFF".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-DGLEAN_INSTALL_ROOT")));
    }

    #[test]
    fn test_configure_args_nested_manifest() {
        let args = backend(true, None).configure_args(BuildMode::Debug);
        assert!(args.contains(&"-DGLEAN_INSTALL_ROOT=/prefix".to_string()));
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
    }

    #[test]
    fn test_mode_build_trees_are_disjoint() {
        let b = backend(false, None);
        assert_ne!(b.mode_dir(BuildMode::Release), b.mode_dir(BuildMode::Debug));
        assert_eq!(
            b.mode_dir(BuildMode::Release),
            Path::new("/cache/cmake/libfoo/build/release")
        );
    }
}
