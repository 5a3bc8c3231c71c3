#![cfg(unix)]

use classpack_api::{ArtifactLocation, ClassRef, GraphProvider};
use classpack_core::{
    ArchiveConfig, ClassDependencyResolver, DeploymentCollection, InMemoryGraph, JsonGraphProvider,
    ResolverConfig, resolve,
};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;
use zip::ZipArchive;

fn loc(raw: &str) -> ArtifactLocation {
    ArtifactLocation::parse(raw).unwrap()
}

fn config_in(root: &Path) -> ResolverConfig {
    ResolverConfig {
        archive: ArchiveConfig::default().with_temp_root(root),
        ..ResolverConfig::default()
    }
}

fn archive_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries: Vec<_> = (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).unwrap();
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            (entry.name().to_string(), bytes)
        })
        .collect();
    entries.sort();
    entries
}

#[test]
fn test_root_chain_with_directory_is_archived() {
    let dir = tempdir().unwrap();
    let classes_b = dir.path().join("classes/b");
    std::fs::create_dir_all(classes_b.join("com/example")).unwrap();
    std::fs::write(classes_b.join("com/example/B.class"), b"\xCA\xFE\xBA\xBEb").unwrap();

    let b_location = ArtifactLocation::from_directory_path(&classes_b).unwrap();
    let mut graph = InMemoryGraph::new();
    graph
        .add_class("com.example.Root", loc("/app/root.jar"))
        .add_class("com.example.A", loc("/lib/a.jar"))
        .add_class("com.example.B", b_location.clone())
        .add_dependency("com.example.Root", "com.example.A")
        .add_dependency("com.example.A", "com.example.B");

    let resolution = ClassDependencyResolver::new()
        .with_config(config_in(dir.path()))
        .with_classes(["com.example.Root"])
        .process(&graph, true)
        .unwrap();

    assert_eq!(resolution.len(), 2);
    assert!(resolution.contains(&loc("/lib/a.jar")));
    assert!(!resolution.contains(&b_location));
    assert!(!resolution.contains(&loc("/app/root.jar")));

    let workspace = resolution.workspace_path().unwrap().to_path_buf();
    let archive = workspace.join("b-dir.jar");
    assert!(resolution.contains(&ArtifactLocation::from_file_path(&archive).unwrap()));
    assert_eq!(
        archive_entries(&archive),
        vec![("com/example/B.class".to_string(), b"\xCA\xFE\xBA\xBEb".to_vec())]
    );

    let paths = resolution.deployment_paths();
    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&"/lib/a.jar".to_string()));
    assert!(paths.contains(&archive.to_string_lossy().into_owned()));
}

#[test]
fn test_archive_preserves_nested_layout() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("out");
    std::fs::create_dir_all(source.join("sub")).unwrap();
    std::fs::write(source.join("a.txt"), b"first").unwrap();
    std::fs::write(source.join("sub/b.txt"), b"second").unwrap();

    let mut graph = InMemoryGraph::new();
    graph
        .add_class("Root", loc("/app/root.jar"))
        .add_class("Dep", ArtifactLocation::from_directory_path(&source).unwrap())
        .add_dependency("Root", "Dep");

    let resolution = ClassDependencyResolver::new()
        .with_config(config_in(dir.path()))
        .with_classes(["Root"])
        .process(&graph, true)
        .unwrap();

    let archive = resolution
        .locations()
        .iter()
        .next()
        .and_then(ArtifactLocation::to_file_path)
        .unwrap();
    assert_eq!(
        archive_entries(&archive),
        vec![
            ("a.txt".to_string(), b"first".to_vec()),
            ("sub/b.txt".to_string(), b"second".to_vec()),
        ]
    );
}

#[test]
fn test_without_archive_flag_directories_are_returned() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("classes");
    std::fs::create_dir_all(&source).unwrap();
    let location = ArtifactLocation::from_directory_path(&source).unwrap();

    let mut graph = InMemoryGraph::new();
    graph
        .add_class("Root", loc("/app/root.jar"))
        .add_class("Dep", location.clone())
        .add_dependency("Root", "Dep");

    let resolution = ClassDependencyResolver::new()
        .with_classes(["Root"])
        .process(&graph, false)
        .unwrap();
    assert_eq!(resolution.locations(), &BTreeSet::from([location]));
    assert!(resolution.workspace_path().is_none());
}

#[test]
fn test_persist_keeps_archives() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("keep");
    std::fs::create_dir_all(&source).unwrap();
    std::fs::write(source.join("k.txt"), b"k").unwrap();

    let mut graph = InMemoryGraph::new();
    graph
        .add_class("Root", loc("/app/root.jar"))
        .add_class("Dep", ArtifactLocation::from_directory_path(&source).unwrap())
        .add_dependency("Root", "Dep");

    let resolution = ClassDependencyResolver::new()
        .with_config(config_in(dir.path()))
        .with_classes(["Root"])
        .process(&graph, true)
        .unwrap();
    let (locations, workspace) = resolution.persist();

    let workspace = workspace.unwrap();
    assert!(workspace.join("keep-dir.jar").is_file());
    assert_eq!(locations.len(), 1);
}

#[test]
fn test_empty_roots_use_every_known_location() {
    let mut graph = InMemoryGraph::new();
    graph
        .add_class("A", loc("/lib/a.jar"))
        .add_class("B", loc("/lib/b.jar"))
        .add_class("C", loc("/lib/b.jar"))
        .add_class("D", loc("jrt:/java.base"));

    let found = resolve(&[], &[], &graph).unwrap();
    assert_eq!(found, BTreeSet::from([loc("/lib/a.jar"), loc("/lib/b.jar")]));

    let excluded = resolve(&[], &["a.jar".to_string()], &graph).unwrap();
    assert_eq!(excluded, BTreeSet::from([loc("/lib/b.jar")]));
}

#[test]
fn test_resolving_twice_is_stable() {
    let mut graph = InMemoryGraph::new();
    graph
        .add_class("Root", loc("/app/root.jar"))
        .add_class("A", loc("/lib/a.jar"))
        .add_class("B", loc("/lib/skip-me.jar"))
        .add_dependency("Root", "A")
        .add_dependency("Root", "B")
        .add_dependency("B", "Root");

    let roots = [ClassRef::from("Root")];
    let exclusions = ["skip".to_string()];
    let first = resolve(&roots, &exclusions, &graph).unwrap();
    let second = resolve(&roots, &exclusions, &graph).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, BTreeSet::from([loc("/app/root.jar"), loc("/lib/a.jar")]));
}

#[test]
fn test_json_snapshot_end_to_end() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("build/classes")).unwrap();
    std::fs::write(dir.path().join("build/classes/Service.class"), b"svc").unwrap();
    let snapshot = r#"{
        "classes": {
            "app.Config": { "location": "app.jar", "dependencies": ["app.Service", "org.geode.Cache"] },
            "app.Service": { "location": "build/classes/", "dependencies": ["java.lang.Object"] },
            "org.geode.Cache": { "location": "/repo/geode-core-1.0.jar" },
            "java.lang.Object": { "location": "jrt:/java.base" }
        }
    }"#;
    let graph_path = dir.path().join("graph.json");
    std::fs::write(&graph_path, snapshot).unwrap();

    let provider = JsonGraphProvider::new(&graph_path);
    assert_eq!(provider.load().unwrap().known_classes().unwrap().len(), 4);

    let resolution = ClassDependencyResolver::new()
        .with_config(config_in(dir.path()))
        .with_classes(["app.Config"])
        .excluding(["geode-core"])
        .process(&provider, true)
        .unwrap();

    assert_eq!(resolution.len(), 1);
    let archive = resolution.workspace_path().unwrap().join("classes-dir.jar");
    assert!(resolution.contains(&ArtifactLocation::from_file_path(&archive).unwrap()));

    let collection = DeploymentCollection::from_resolution("app.Config", &resolution).unwrap();
    assert_eq!(collection.paths(), vec![archive.to_string_lossy().into_owned()]);
}
