//! Glean build layer
//!
//! Resolves a manifest into a dependency graph (downloading sources into the
//! cache along the way) and either drives build+install in leaves-first order
//! or renders the graph as a CMake ExternalProject description.

pub mod backend;
pub mod cache;
pub mod dependency;
pub mod emitter;
pub mod error;
pub mod options;
pub mod report;
pub mod resolver;
pub mod scheduler;

pub use backend::{ActionStatus, BuildBackend, CmakeBuild, DownloadBackend};
pub use cache::{cache_paths, CachePaths};
pub use dependency::{Alternative, Dependency};
pub use emitter::emit;
pub use error::{BuildError, BuildResult};
pub use options::{BuildMode, GleanOptions, ModeSelection, OutputKind, ToolPaths};
pub use report::{MemoryReporter, NullReporter, Reporter};
pub use resolver::resolve;
pub use scheduler::{execute, BuildReport};
