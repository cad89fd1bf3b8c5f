use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::{json, Value};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

/// Get a Command for vocab-search with a clean environment
#[allow(dead_code)]
pub fn vocab_search() -> Command {
    let mut cmd = cargo_bin_cmd!("vocab-search");
    cmd.env_remove("VOCAB_SEARCH_ENDPOINT")
        .env_remove("VOCAB_SEARCH_TIMEOUT")
        .env_remove("VOCAB_SEARCH_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// A search hit with one English label
#[allow(dead_code)]
pub fn hit(id: &str, uri: &str, label: &str) -> Value {
    json!({
        "id": id,
        "attributes": {"uri": uri, "prefLabel": {"en": [label]}}
    })
}

/// Serve `hits` for every search on the `concepts` index
#[allow(dead_code)]
pub async fn mount_search(server: &MockServer, count: u64, hits: Vec<Value>) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/concepts/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": count,
            "data": hits,
        })))
        .mount(server)
        .await;
}

/// Serve one concept for a `filter[:uri:]` lookup
#[allow(dead_code)]
pub async fn mount_concept(server: &MockServer, uri: &str, label: &str) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/concepts"))
        .and(matchers::query_param("filter[:uri:]", uri))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": format!("id-{label}"),
                "attributes": {
                    "uri": uri,
                    "pref-label": [{"content": label, "language": "en"}]
                }
            }]
        })))
        .mount(server)
        .await;
}

/// Answer every lookup of `resource` with no data
#[allow(dead_code)]
pub async fn mount_empty(server: &MockServer, resource: &str) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path(format!("/{resource}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(server)
        .await;
}
