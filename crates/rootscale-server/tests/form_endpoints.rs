// SPDX-License-Identifier: Apache-2.0

mod http_support;

use http_support::{body, header, post_form, send_raw, spawn_app};
use rootscale_store::{DimensionStore, JsonFileBackend};
use std::sync::Arc;
use tempfile::tempdir;

fn reload(path: &std::path::Path) -> Vec<rootscale_model::DimensionRecord> {
    DimensionStore::new(Arc::new(JsonFileBackend::new(path.to_path_buf())))
        .load()
        .expect("load")
}

#[tokio::test]
async fn index_renders_empty_state_and_request_id() {
    let tmp = tempdir().expect("tempdir");
    let addr = spawn_app(&tmp.path().join("dims.json")).await;

    let response = send_raw(addr, "GET", "/", None, "").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("No dimensions saved yet."));
    assert!(header(&response, "x-request-id").is_some_and(|id| id.starts_with("req-")));
}

#[tokio::test]
async fn compute_shows_rounded_product_and_ignores_garbage() {
    let tmp = tempdir().expect("tempdir");
    let addr = spawn_app(&tmp.path().join("dims.json")).await;

    let response = post_form(addr, "/", "number=5").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(body(&response).contains("5 × √2 = 7.07"));
    assert!(body(&response).contains("Save this dimension"));

    let response = post_form(addr, "/", "number=abc").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(!body(&response).contains("× √2 ="));
    assert!(!body(&response).contains("Save this dimension"));
}

#[tokio::test]
async fn save_into_new_group_redirects_with_group_open() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    let addr = spawn_app(&path).await;

    let response = post_form(
        addr,
        "/save",
        "dimension_name=Head&value=7.0710678&group=__new__&new_group=Upper+Body&open_groups=default",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 303 See Other\r\n"));
    assert_eq!(
        header(&response, "location"),
        Some("/?open=default&open=upper-body")
    );

    let records = reload(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Head");
    assert_eq!(records[0].value, 7.07);
    assert_eq!(records[0].group, "Upper Body");

    let page = send_raw(addr, "GET", "/?open=upper-body", None, "").await;
    assert!(page.contains("group-content-upper-body\" class=\"group-content\""));
}

#[tokio::test]
async fn save_with_blank_new_group_falls_back_to_default() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    let addr = spawn_app(&path).await;

    let response = post_form(
        addr,
        "/save",
        "dimension_name=Arm&value=3&group=__new__&new_group=++",
    )
    .await;
    assert_eq!(header(&response, "location"), Some("/"));
    assert_eq!(reload(&path)[0].group, "Default");
}

#[tokio::test]
async fn save_without_name_or_number_writes_nothing() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    let addr = spawn_app(&path).await;

    post_form(addr, "/save", "dimension_name=&value=3&group=G").await;
    post_form(addr, "/save", "dimension_name=X&value=abc&group=G").await;
    assert!(!path.exists());
}

#[tokio::test]
async fn delete_keeps_the_deleted_records_group_open() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    std::fs::write(
        &path,
        r#"[{"name":"a","value":1,"group":"Shoe Sizes"},{"name":"b","value":2,"group":"Default"}]"#,
    )
    .expect("seed");
    let addr = spawn_app(&path).await;

    let response = post_form(addr, "/delete/0", "open_groups=default").await;
    assert!(response.starts_with("HTTP/1.1 303 See Other\r\n"));
    assert_eq!(
        header(&response, "location"),
        Some("/?open=default&open=shoe-sizes")
    );
    let records = reload(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "b");

    let response = post_form(addr, "/delete/9", "").await;
    assert_eq!(header(&response, "location"), Some("/"));
    assert_eq!(reload(&path).len(), 1);
}

#[tokio::test]
async fn delete_is_not_reachable_with_get() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    std::fs::write(&path, r#"{"Head": 20}"#).expect("seed");
    let addr = spawn_app(&path).await;

    let response = send_raw(addr, "GET", "/delete/0", None, "").await;
    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert_eq!(reload(&path).len(), 1);
}

#[tokio::test]
async fn rename_and_update_group_preserve_open_groups() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    std::fs::write(&path, r#"{"Head": 20}"#).expect("seed");
    let addr = spawn_app(&path).await;

    let response = post_form(addr, "/rename/0", "new_name=Head+height&open_groups=default").await;
    assert_eq!(header(&response, "location"), Some("/?open=default"));
    assert_eq!(reload(&path)[0].name, "Head height");

    let response = post_form(
        addr,
        "/update_group/0",
        "group=__new__&new_group=Hats&open_groups=default",
    )
    .await;
    assert_eq!(
        header(&response, "location"),
        Some("/?open=default&open=hats")
    );
    assert_eq!(reload(&path)[0].group, "Hats");

    let response = post_form(addr, "/rename/0", "new_name=").await;
    assert_eq!(header(&response, "location"), Some("/"));
    assert_eq!(reload(&path)[0].name, "Head height");
}

#[tokio::test]
async fn add_group_only_marks_the_panel_open() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    let addr = spawn_app(&path).await;

    let response = post_form(addr, "/add_group", "group_name=Lower+Body&open_groups=hats").await;
    assert_eq!(
        header(&response, "location"),
        Some("/?open=hats&open=lower-body")
    );
    assert!(!path.exists());
}

#[tokio::test]
async fn malformed_store_file_renders_as_empty() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("dims.json");
    std::fs::write(&path, "{broken").expect("seed");
    let addr = spawn_app(&path).await;

    let response = send_raw(addr, "GET", "/", None, "").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("No dimensions saved yet."));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "{broken");
}

#[tokio::test]
async fn unreadable_store_returns_json_error() {
    let tmp = tempdir().expect("tempdir");
    let addr = spawn_app(tmp.path()).await;

    let response = send_raw(addr, "GET", "/", None, "").await;
    assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
    assert!(response.contains("\"code\":\"store_unavailable\""));
}

#[tokio::test]
async fn health_and_version_endpoints() {
    let tmp = tempdir().expect("tempdir");
    let addr = spawn_app(&tmp.path().join("dims.json")).await;

    let response = send_raw(addr, "GET", "/healthz", None, "").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body(&response), "ok");

    let response = send_raw(addr, "GET", "/v1/version", None, "").await;
    assert!(response.contains("\"name\":\"rootscale-server\""));
}
