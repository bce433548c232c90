use chrono::{Local, TimeZone};
use clipshelf::history::History;
use clipshelf::model::{ContentType, Entry};
use clipshelf::store::fs_backend::FsBackend;
use clipshelf::store::HistoryBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_load_without_file_is_empty() {
    let (_dir, backend) = setup();
    assert!(backend.load_entries().unwrap().is_empty());
}

#[test]
fn test_save_leaves_no_tmp_files() {
    let (dir, backend) = setup();
    let entries = vec![Entry::new_text(1, "hello".into(), ContentType::Text)];
    backend.save_entries(&entries).unwrap();
    backend.save_entries(&entries).unwrap();

    assert!(dir.path().join("history.json").exists());
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_history_file_uses_camel_case_records() {
    let (dir, backend) = setup();
    let mut history = History::open(backend, 10);
    history.add_text("hello", ContentType::Text);

    let raw = fs::read_to_string(dir.path().join("history.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &json[0];
    assert_eq!(record["id"], 1);
    assert_eq!(record["content"], "hello");
    assert_eq!(record["type"], "Text");
    assert!(record["imageRef"].is_null());
    assert!(record["timestamp"].is_string());
}

#[test]
fn test_blobs_never_overwrite() {
    let (_dir, backend) = setup();
    let first = backend.write_blob("clip.png", b"one").unwrap();
    let second = backend.write_blob("clip.png", b"two").unwrap();

    assert_ne!(first, second);
    assert_eq!(backend.read_blob(&first).unwrap(), Some(b"one".to_vec()));
    assert_eq!(backend.read_blob(&second).unwrap(), Some(b"two".to_vec()));
}

#[test]
fn test_missing_blob_reads_as_none_and_deletes_cleanly() {
    let (dir, backend) = setup();
    let path = dir.path().join("images").join("gone.png");
    assert_eq!(backend.read_blob(&path).unwrap(), None);
    backend.delete_blob(&path).unwrap();
    assert!(!backend.blob_exists(&path));
}

#[test]
fn test_round_trip_drops_entries_with_deleted_blobs() {
    let (dir, backend) = setup();
    let mut history = History::open(backend, 10);

    let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let kept_blob = history.store_image_blob(b"kept", at).unwrap();
    let kept = history.add_image(kept_blob.clone());
    history.add_text("middle", ContentType::Text);
    let lost_blob = history.store_image_blob(b"lost", at).unwrap();
    history.add_image(lost_blob.clone());
    history.add_text("/a\n/b", ContentType::FilePaths);

    assert_eq!(kept_blob.parent().unwrap(), dir.path().join("images"));
    fs::remove_file(&lost_blob).unwrap();

    let reloaded = History::open(FsBackend::new(dir.path().to_path_buf()), 10);
    let ids: Vec<u64> = reloaded.list().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![4, 2, 1]);
    assert_eq!(reloaded.get(1), Some(&kept));
    assert_eq!(reloaded.get(4).unwrap().kind, ContentType::FilePaths);
}

#[test]
fn test_delete_and_clear_remove_blob_files() {
    let (dir, backend) = setup();
    let mut history = History::open(backend, 10);
    let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

    let first = history.store_image_blob(b"a", at).unwrap();
    let first_entry = history.add_image(first.clone());
    let second = history.store_image_blob(b"b", at).unwrap();
    history.add_image(second.clone());

    history.delete(first_entry.id);
    assert!(!first.exists());
    assert!(second.exists());

    history.clear();
    assert!(!second.exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("history.json")).unwrap().trim(),
        "[]"
    );
}

#[test]
fn test_corrupt_history_file_loads_empty() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("history.json"), "{ truncated").unwrap();

    let mut history = History::open(backend, 10);
    assert!(history.is_empty());
    history.add_text("fresh", ContentType::Text);
    assert_eq!(history.head().unwrap().id, 1);
}
