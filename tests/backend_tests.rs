//! End-to-end tests of the vocab-search commands against a mock backend

mod common;

use common::{hit, mount_concept, mount_empty, mount_search, vocab_search};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

// ============================================================================
// search
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_search_lists_results() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        2,
        vec![
            hit("1", "http://ex/c1", "cat"),
            hit("2", "http://ex/c2", "catfish"),
        ],
    )
    .await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "search", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  http://ex/c1"))
        .stdout(predicate::str::contains("en: catfish"))
        .stdout(predicate::str::contains("2 results, page 1 of 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_without_results() {
    let server = MockServer::start().await;
    mount_search(&server, 0, Vec::new()).await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "search", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found for 'zebra'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_appends_selection_outside_results() {
    let server = MockServer::start().await;
    mount_search(&server, 1, vec![hit("2", "http://ex/c2", "catfish")]).await;
    mount_concept(&server, "http://ex/c1", "house cat").await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "search", "cat"])
        .args(["--select", "http://ex/c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  http://ex/c2"))
        .stdout(predicate::str::contains("* http://ex/c1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_json_output() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        32,
        vec![
            hit("1", "http://ex/c1", "cat"),
            hit("2", "http://ex/c2", "catfish"),
        ],
    )
    .await;
    mount_concept(&server, "http://ex/c9", "a rather long selected label").await;

    let output = vocab_search()
        .args(["--endpoint", &server.uri(), "--format", "json"])
        .args(["search", "cat", "--select", "http://ex/c9"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 32);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
    assert_eq!(json["candidates"].as_array().unwrap().len(), 3);
    assert_eq!(json["selection"][0]["trimmedPrefLabel"], "a rather long s...");
    assert_eq!(json["pagination"]["last"], json!({"number": 2, "size": 2}));
    assert_eq!(json["pagination"]["next"], json!({"number": 1, "size": 15}));
    assert!(json["pagination"].get("prev").is_none());
    assert!(json["errors"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_sends_scope_filters_and_sort() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/concepts/search"))
        .and(matchers::query_param("page[size]", "5"))
        .and(matchers::query_param("page[number]", "1"))
        .and(matchers::query_param(
            "filter[:sqs:prefLabel.en,prefLabel.nl,tagLabels]",
            "(big*|big) (cat*|cat)",
        ))
        .and(matchers::query_param("filter[:terms:tagLabels]", "animal,pet"))
        .and(matchers::query_param("sort[prefLabel]", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "search", "big cat"])
        .args(["--tag", "animal,pet", "--languages", "en,nl"])
        .args(["--page", "1", "--size", "5", "--sort", "-prefLabel"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_backend_error_is_data_error() {
    let server = MockServer::start().await;
    Mock::given(matchers::path("/concepts/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "search", "cat"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_selection_is_a_warning() {
    let server = MockServer::start().await;
    mount_search(&server, 0, Vec::new()).await;
    mount_empty(&server, "concepts").await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "search", "cat"])
        .args(["--select", "http://ex/gone"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "The initial selected uri \"http://ex/gone\" was not found",
        ));

    vocab_search()
        .args(["--endpoint", &server.uri(), "--quiet", "search", "cat"])
        .args(["--select", "http://ex/gone"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_endpoint_from_config_file() {
    let server = MockServer::start().await;
    mount_search(&server, 1, vec![hit("1", "http://ex/c1", "cat")]).await;

    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("vocab-search.toml"),
        format!("search_endpoint = \"{}\"\n", server.uri()),
    )
    .unwrap();

    vocab_search()
        .current_dir(dir.path())
        .args(["search", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://ex/c1"));
}

// ============================================================================
// resolve
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_resolve_replaces_alias() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/vocabularies"))
        .and(matchers::query_param("filter[:or:][:exact:alias]", "unesco"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "v1", "attributes": {"uri": "http://ex/vocab/unesco", "alias": "unesco"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "resolve", "unesco"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unesco -> http://ex/vocab/unesco"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resolve_unknown_dataset_json() {
    let server = MockServer::start().await;
    mount_empty(&server, "datasets").await;

    let output = vocab_search()
        .args(["--endpoint", &server.uri(), "--format", "json"])
        .args(["resolve", "nope", "--kind", "dataset"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "datasets");
    assert_eq!(json["entries"][0]["uri"], "nope");
    assert_eq!(json["entries"][0]["resolved"], false);
    assert_eq!(json["unresolved"][0]["kind"], "dataset");
    assert_eq!(
        json["unresolved"][0]["message"],
        "dataset \"nope\" was not found as a dataset uri or alias of a dataset"
    );
}

// ============================================================================
// hydrate
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_hydrate_prints_display_labels() {
    let server = MockServer::start().await;
    mount_concept(&server, "http://ex/c1", "cat").await;

    vocab_search()
        .args(["--endpoint", &server.uri(), "hydrate", "http://ex/c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://ex/c1  cat"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_hydrate_scopes_lookup_to_dataset() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/datasets"))
        .and(matchers::query_param("filter[:or:][:exact:alias]", "ds1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "d1", "attributes": {"uri": "http://ex/dataset/1", "alias": "ds1"}}]
        })))
        .mount(&server)
        .await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/concepts"))
        .and(matchers::query_param("filter[:uri:]", "http://ex/c1"))
        .and(matchers::query_param(
            "filter[:or:][:exact:source-dataset]",
            "http://ex/dataset/1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "c1", "attributes": {
                "uri": "http://ex/c1",
                "pref-label": [{"content": "kat", "language": "nl"}]
            }}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = vocab_search()
        .args(["--endpoint", &server.uri(), "--format", "json"])
        .args(["hydrate", "http://ex/c1", "--dataset", "ds1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["scope"]["datasets"], json!(["http://ex/dataset/1"]));
    assert_eq!(json["selection"][0]["prefLabel"]["nl"][0], "kat");
}
