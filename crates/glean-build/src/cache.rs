//! Cache location for downloaded dependencies
//!
//! Every dependency gets a deterministic slot under the cache root keyed by
//! its build kind and name: `<cache_root>/<build_kind>/<provides>/{source,build}`.
//! Two runs against the same cache land in the same place, which is what
//! makes re-resolution idempotent.

use crate::error::{BuildError, BuildResult};
use glean_package::BuildKind;
use std::path::{Path, PathBuf};

/// On-disk layout of one dependency's cache slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub root: PathBuf,
    pub source: PathBuf,
    pub build: PathBuf,
}

/// Pure mapping from a dependency's identity to its cache slot
pub fn cache_paths(cache_root: &Path, build_kind: BuildKind, provides: &str) -> CachePaths {
    let root = cache_root.join(build_kind.as_str()).join(provides);
    CachePaths {
        source: root.join("source"),
        build: root.join("build"),
        root,
    }
}

impl CachePaths {
    /// Create the `source/` and `build/` layout if absent.
    ///
    /// Fails if any component already exists as a non-directory.
    pub fn ensure(&self) -> BuildResult<()> {
        for dir in [&self.root, &self.source, &self.build] {
            if dir.exists() {
                if !dir.is_dir() {
                    return Err(BuildError::CachePathConflict { path: dir.clone() });
                }
            } else {
                std::fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cache_paths_deterministic() {
        let a = cache_paths(Path::new("/cache"), BuildKind::Cmake, "libfoo");
        let b = cache_paths(Path::new("/cache"), BuildKind::Cmake, "libfoo");
        assert_eq!(a, b);
        assert_eq!(a.root, Path::new("/cache/cmake/libfoo"));
        assert_eq!(a.source, Path::new("/cache/cmake/libfoo/source"));
        assert_eq!(a.build, Path::new("/cache/cmake/libfoo/build"));
    }

    #[test]
    fn test_cache_paths_vary_by_identity() {
        let cmake = cache_paths(Path::new("/cache"), BuildKind::Cmake, "libfoo");
        let none = cache_paths(Path::new("/cache"), BuildKind::None, "libfoo");
        let other = cache_paths(Path::new("/cache"), BuildKind::Cmake, "libbar");
        assert_ne!(cmake.root, none.root);
        assert_ne!(cmake.root, other.root);
    }

    #[test]
    fn test_ensure_creates_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = cache_paths(tmp.path(), BuildKind::Cmake, "libfoo");
        paths.ensure().unwrap();
        assert!(paths.source.is_dir());
        assert!(paths.build.is_dir());

        // repeat is a no-op
        paths.ensure().unwrap();
    }

    #[test]
    fn test_ensure_rejects_file_in_the_way() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = cache_paths(tmp.path(), BuildKind::None, "libfoo");
        std::fs::create_dir_all(paths.root.parent().unwrap()).unwrap();
        std::fs::write(&paths.root, b"not a directory").unwrap();

        let err = paths.ensure().unwrap_err();
        assert!(matches!(err, BuildError::CachePathConflict { .. }));
    }
}
