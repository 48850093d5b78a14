use scratchpad_core::{DocumentStore, ErrorKind, FsDocumentStore, ScratchpadConfig};
use std::fs;

fn open(workspace: &tempfile::TempDir, config: &ScratchpadConfig) -> FsDocumentStore {
    FsDocumentStore::open(workspace.path(), config).unwrap()
}

#[test]
fn create_then_read_and_write_roundtrip() {
    let workspace = tempfile::tempdir().unwrap();
    let mut store = open(&workspace, &ScratchpadConfig::default());

    let path = store.create("docs/notes/pad.md", "# pad\n").unwrap();
    assert!(path.is_file());
    assert_eq!(store.read().unwrap(), "# pad\n");

    store.write("# pad\nmore\n").unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "# pad\nmore\n");
}

#[test]
fn discovery_probes_search_directories_in_order() {
    let workspace = tempfile::tempdir().unwrap();
    fs::create_dir_all(workspace.path().join(".vscode")).unwrap();
    fs::create_dir_all(workspace.path().join(".scratchpad")).unwrap();
    fs::write(workspace.path().join(".vscode/scratchpad.md"), "vscode").unwrap();
    fs::write(workspace.path().join(".scratchpad/scratchpad.md"), "own").unwrap();

    let mut store = open(&workspace, &ScratchpadConfig::default());
    let located = store.locate().unwrap().unwrap();
    assert!(located.ends_with(".vscode/scratchpad.md"));
    assert_eq!(store.read().unwrap(), "vscode");
}

#[test]
fn discovery_ignores_directories_outside_search_list() {
    let workspace = tempfile::tempdir().unwrap();
    fs::create_dir_all(workspace.path().join("docs")).unwrap();
    fs::write(workspace.path().join("docs/scratchpad.md"), "docs").unwrap();

    let mut store = open(&workspace, &ScratchpadConfig::default());
    assert!(!store.exists());
    assert_eq!(store.read().unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn create_rejects_locations_outside_policy() {
    let workspace = tempfile::tempdir().unwrap();
    let mut store = open(&workspace, &ScratchpadConfig::default());

    for location in [
        "../escape.md",
        "/etc/scratchpad.md",
        "src/scratchpad.md",
        ".idea/scratchpad.exe",
        ".idea",
        "~/.idea/scratchpad.md",
    ] {
        let err = store.create(location, "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath, "location {location}");
    }
    assert!(!store.exists());
}

#[test]
fn create_refuses_existing_file() {
    let workspace = tempfile::tempdir().unwrap();
    let mut store = open(&workspace, &ScratchpadConfig::default());
    store.create(".idea/scratchpad.md", "first").unwrap();

    let err = store.create(".idea/scratchpad.md", "second").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(store.read().unwrap(), "first");
}

#[test]
fn oversized_content_is_rejected_on_read_and_write() {
    let workspace = tempfile::tempdir().unwrap();
    let config = ScratchpadConfig {
        max_file_size: 16,
        ..ScratchpadConfig::default()
    };
    let mut store = open(&workspace, &config);
    store.create(".idea/scratchpad.md", "small").unwrap();

    let err = store.write(&"y".repeat(17)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeExceeded);
    assert_eq!(store.read().unwrap(), "small");

    // Multi-byte characters count by encoded size.
    let err = store.write(&"é".repeat(9)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeExceeded);

    fs::write(workspace.path().join(".idea/scratchpad.md"), "z".repeat(32)).unwrap();
    assert_eq!(store.read().unwrap_err().kind(), ErrorKind::SizeExceeded);
}

#[test]
fn invalid_utf8_is_an_encoding_error() {
    let workspace = tempfile::tempdir().unwrap();
    fs::create_dir_all(workspace.path().join(".idea")).unwrap();
    fs::write(
        workspace.path().join(".idea/scratchpad.md"),
        [0x66, 0x6f, 0xff, 0xfe],
    )
    .unwrap();

    let mut store = open(&workspace, &ScratchpadConfig::default());
    let err = store.read().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingError);
    assert_eq!(err.user_message(), "Invalid character encoding");
}

#[test]
fn removed_file_is_rediscovered_as_missing() {
    let workspace = tempfile::tempdir().unwrap();
    let mut store = open(&workspace, &ScratchpadConfig::default());
    let path = store.create(".cache/scratchpad.md", "x").unwrap();
    assert!(store.exists());

    fs::remove_file(path).unwrap();
    assert!(!store.exists());
    assert_eq!(store.write("y").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn missing_workspace_is_rejected() {
    let workspace = tempfile::tempdir().unwrap();
    let missing = workspace.path().join("nope");
    let err = FsDocumentStore::open(&missing, &ScratchpadConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPath);
}
