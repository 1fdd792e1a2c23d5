// SPDX-License-Identifier: Apache-2.0

use rootscale_model::{DimensionRecord, DEFAULT_GROUP};
use rootscale_store::{DimensionStore, JsonFileBackend};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn file_store(path: &Path) -> DimensionStore {
    DimensionStore::new(Arc::new(JsonFileBackend::new(path.to_path_buf())))
}

#[test]
fn legacy_mapping_file_loads_as_records_without_rewrite() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("saved_dimensions.json");
    fs::write(&path, r#"{"Head": 20}"#).expect("seed legacy file");

    let store = file_store(&path);
    assert_eq!(
        store.load().expect("load"),
        vec![DimensionRecord {
            name: "Head".into(),
            value: 20.0,
            group: DEFAULT_GROUP.into(),
        }]
    );
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        r#"{"Head": 20}"#,
        "load must not rewrite the file"
    );

    store.rename(0, "Head height").expect("rename");
    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(
        on_disk,
        serde_json::json!([{"name": "Head height", "value": 20.0, "group": "Default"}])
    );
}

#[test]
fn loading_twice_without_mutation_is_identical() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dims.json");
    let store = file_store(&path);
    store.add("A", 1.005, "G").expect("add");
    store.add("B", 2.0, "").expect("add");
    assert_eq!(store.load().expect("first"), store.load().expect("second"));
}

#[test]
fn malformed_file_is_treated_as_empty_until_next_mutation() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dims.json");
    fs::write(&path, "{oops").expect("seed");

    let store = file_store(&path);
    assert!(store.load().expect("load").is_empty());
    assert_eq!(fs::read_to_string(&path).expect("read"), "{oops");

    store.add("Waist", 80.0, "Lower").expect("add");
    assert_eq!(store.load().expect("load").len(), 1);
}

#[test]
fn add_then_reload_rounds_value() {
    let dir = tempdir().expect("tempdir");
    let store = file_store(&dir.path().join("dims.json"));
    store.add("X", 3.14159, "G").expect("add");
    let loaded = file_store(&dir.path().join("dims.json"))
        .load()
        .expect("reload");
    assert_eq!(loaded[0].value, 3.14);
    assert_eq!(loaded[0].group, "G");
}

#[test]
fn huge_values_survive_a_reload() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dims.json");
    let store = file_store(&path);
    let added = store.add("X", 1e307, "G").expect("add");
    assert_eq!(added.value, 1e307);
    assert!(!fs::read_to_string(&path).expect("read").contains("null"));
    let loaded = file_store(&path).load().expect("reload");
    assert_eq!(loaded, vec![DimensionRecord::new("X", 1e307, "G")]);
    assert_eq!(loaded[0].value, 1e307);
}

#[test]
fn half_cent_values_round_like_the_stored_binary() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dims.json");
    let store = file_store(&path);
    store.add("a", 2.675, "G").expect("add");
    store.add("b", 1.115, "G").expect("add");
    let values: Vec<f64> = file_store(&path)
        .load()
        .expect("reload")
        .into_iter()
        .map(|r| r.value)
        .collect();
    assert_eq!(values, vec![2.67, 1.11]);
}

#[test]
fn concurrent_adds_are_not_lost() {
    let dir = tempdir().expect("tempdir");
    let store = Arc::new(file_store(&dir.path().join("dims.json")));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..10 {
                    store
                        .add(&format!("t{t}-{i}"), f64::from(i), "Default")
                        .expect("add");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("join");
    }
    assert_eq!(store.load().expect("load").len(), 80);
}

#[test]
fn unreadable_path_surfaces_store_error() {
    let dir = tempdir().expect("tempdir");
    // A directory where the file should be cannot be read as a document.
    let store = file_store(dir.path());
    assert!(store.load().is_err());
}
