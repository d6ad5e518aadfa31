//! Resolver integration tests
//!
//! All fixtures use `none` download/build kinds with pre-seeded cache source
//! trees, so resolution runs without subprocesses or network access.

use glean_build::{resolve, BuildError, GleanOptions, MemoryReporter, NullReporter};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _tmp: TempDir,
    manifest: PathBuf,
    opts: GleanOptions,
}

impl Fixture {
    fn new(root_manifest: &str) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("glean.json");
        std::fs::write(&manifest, root_manifest).unwrap();
        let opts = GleanOptions::new(tmp.path().join("cache"), tmp.path().join("prefix"));
        Self {
            _tmp: tmp,
            manifest,
            opts,
        }
    }

    /// Seed a nested manifest into a dependency's cache source tree, as a
    /// completed download would have left it
    fn seed_nested(&self, build_kind: &str, provides: &str, manifest: &str) {
        let source = self
            .opts
            .cache_root
            .join(build_kind)
            .join(provides)
            .join("source");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("glean.json"), manifest).unwrap();
    }
}

fn none_dep(provides: &str) -> String {
    format!(
        r#"{{ "provides": "{provides}", "download_type": "none", "build_type": "none", "uri": "" }}"#
    )
}

fn node_names(graph: &glean_package::DepGraph<glean_build::Dependency>) -> Vec<String> {
    let mut names: Vec<String> = graph
        .node_ids()
        .filter_map(|id| graph.get(id).map(|d| d.name().to_string()))
        .collect();
    names.sort();
    names
}

fn edges_by_name(graph: &glean_package::DepGraph<glean_build::Dependency>) -> Vec<(String, String)> {
    let mut edges = Vec::new();
    for id in graph.node_ids() {
        let parent = graph.get(id).unwrap().name().to_string();
        for &child in graph.children(id) {
            edges.push((parent.clone(), graph.get(child).unwrap().name().to_string()));
        }
    }
    edges.sort();
    edges
}

#[test]
fn test_single_none_dependency() {
    // one none/none dependency gives two nodes and one edge
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {} ] }}"#,
        none_dep("a")
    ));

    let graph = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(node_names(&graph), vec!["a", "root"]);
    assert_eq!(
        edges_by_name(&graph),
        vec![("root".to_string(), "a".to_string())]
    );
}

#[test]
fn test_missing_manifest_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = GleanOptions::new(tmp.path().join("cache"), tmp.path().join("prefix"));

    let err = resolve(Path::new("/nonexistent/glean.json"), &opts, &NullReporter).unwrap_err();
    assert!(matches!(err, BuildError::ManifestNotFound { .. }));
}

#[test]
fn test_nested_manifest_recursion() {
    // root -> a, root -> b, a -> c; c must come from a's nested manifest
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {}, {} ] }}"#,
        none_dep("a"),
        none_dep("b")
    ));
    fixture.seed_nested(
        "none",
        "a",
        &format!(
            r#"{{ "provides": "a", "build_type": "none", "dependencies": [ {} ] }}"#,
            none_dep("c")
        ),
    );

    let graph = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();
    assert_eq!(node_names(&graph), vec!["a", "b", "c", "root"]);
    assert_eq!(
        edges_by_name(&graph),
        vec![
            ("a".to_string(), "c".to_string()),
            ("root".to_string(), "a".to_string()),
            ("root".to_string(), "b".to_string()),
        ]
    );
}

#[test]
fn test_provides_mismatch_is_fatal() {
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {} ] }}"#,
        none_dep("a")
    ));
    fixture.seed_nested(
        "none",
        "a",
        r#"{ "provides": "something_else", "build_type": "none" }"#,
    );

    let err = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap_err();
    match err {
        BuildError::ProvidesMismatch {
            expected, found, ..
        } => {
            assert_eq!(expected, "a");
            assert_eq!(found, "something_else");
        }
        other => panic!("expected provides mismatch, got {other}"),
    }
}

#[test]
fn test_duplicate_identical_declarations_deduplicate() {
    // a and b both depend on the same c; one node, two inbound edges
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {}, {} ] }}"#,
        none_dep("a"),
        none_dep("b")
    ));
    let nested = format!(
        r#"{{ "provides": "%NAME%", "build_type": "none", "dependencies": [ {} ] }}"#,
        none_dep("c")
    );
    fixture.seed_nested("none", "a", &nested.replace("%NAME%", "a"));
    fixture.seed_nested("none", "b", &nested.replace("%NAME%", "b"));

    let graph = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();
    assert_eq!(node_names(&graph), vec!["a", "b", "c", "root"]);

    let c = graph.find(|d| d.name() == "c").unwrap();
    assert_eq!(graph.parents(c).len(), 2);
    assert_eq!(graph.get(c).unwrap().alternatives().len(), 1);
}

#[test]
fn test_conflicting_declarations_become_alternatives() {
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {}, {} ] }}"#,
        none_dep("a"),
        none_dep("b")
    ));
    fixture.seed_nested(
        "none",
        "a",
        r#"{ "provides": "a", "build_type": "none", "dependencies": [
            { "provides": "c", "download_type": "none", "build_type": "none", "uri": "first" }
        ] }"#,
    );
    fixture.seed_nested(
        "none",
        "b",
        r#"{ "provides": "b", "build_type": "none", "dependencies": [
            { "provides": "c", "download_type": "none", "build_type": "none", "uri": "second" }
        ] }"#,
    );

    let reporter = MemoryReporter::new();
    let graph = resolve(&fixture.manifest, &fixture.opts, &reporter).unwrap();

    let c = graph.find(|d| d.name() == "c").unwrap();
    let node = graph.get(c).unwrap();
    assert_eq!(node.alternatives().len(), 2);
    assert_eq!(graph.parents(c).len(), 2);

    // first-registered declaration stays active
    let active = node.active(true).unwrap();
    assert_eq!(active.item.as_ref().unwrap().uri, "first");
}

#[test]
fn test_optional_download_failure_skips_subtree() {
    // uri download of a nonexistent local file fails without network access
    let fixture = Fixture::new(
        r#"{ "provides": "root", "build_type": "none", "dependencies": [
            { "provides": "a", "download_type": "uri", "build_type": "none",
              "uri": "/nonexistent/archive.tar.gz", "is_optional": true },
            { "provides": "b", "download_type": "none", "build_type": "none", "uri": "" }
        ] }"#,
    );

    let graph = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();
    assert_eq!(node_names(&graph), vec!["b", "root"]);
}

#[test]
fn test_required_download_failure_is_fatal() {
    let fixture = Fixture::new(
        r#"{ "provides": "root", "build_type": "none", "dependencies": [
            { "provides": "a", "download_type": "uri", "build_type": "none",
              "uri": "/nonexistent/archive.tar.gz" }
        ] }"#,
    );

    let err = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap_err();
    match err {
        BuildError::DownloadFailed { name, uri } => {
            assert_eq!(name, "a");
            assert_eq!(uri, "/nonexistent/archive.tar.gz");
        }
        other => panic!("expected download failure, got {other}"),
    }
}

#[test]
fn test_re_resolution_is_idempotent() {
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {}, {} ] }}"#,
        none_dep("a"),
        none_dep("b")
    ));
    fixture.seed_nested(
        "none",
        "a",
        &format!(
            r#"{{ "provides": "a", "build_type": "none", "dependencies": [ {} ] }}"#,
            none_dep("c")
        ),
    );

    let first = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();
    let second = resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();

    assert_eq!(node_names(&first), node_names(&second));
    assert_eq!(edges_by_name(&first), edges_by_name(&second));
}

#[test]
fn test_cache_layout_created() {
    let fixture = Fixture::new(&format!(
        r#"{{ "provides": "root", "build_type": "none", "dependencies": [ {} ] }}"#,
        none_dep("a")
    ));

    resolve(&fixture.manifest, &fixture.opts, &NullReporter).unwrap();

    let slot = fixture.opts.cache_root.join("none").join("a");
    assert!(slot.join("source").is_dir());
    assert!(slot.join("build").is_dir());
}
