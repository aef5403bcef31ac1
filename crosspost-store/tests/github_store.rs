use chrono::Utc;
use crosspost_core::types::{ArticleId, PublishedRecord};
use crosspost_core::GithubConfig;
use crosspost_store::{CommitStep, GithubStore, StateStore, StoreError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> GithubStore {
    GithubStore::new(GithubConfig {
        token: "gh-token".to_string(),
        owner: "someone".to_string(),
        repo: "publish-status".to_string(),
        api_root: server.uri(),
    })
}

fn record(id: &str, url: &str) -> PublishedRecord {
    PublishedRecord {
        url: url.to_string(),
        id: ArticleId::from(id),
        publish_timestamp: Utc::now(),
        medium_response: json!({"id": format!("m-{id}")}),
    }
}

async fn blocking<T: Send + 'static>(task: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(task).await.expect("join")
}

#[tokio::test]
async fn load_parses_the_status_file() {
    let server = MockServer::start().await;
    let body = serde_json::to_string_pretty(&[record("1", "https://example.com/posts/a/")])
        .expect("serialize");
    Mock::given(method("GET"))
        .and(path("/repos/someone/publish-status/contents/status.json"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let records = blocking(move || store.load()).await.expect("load");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, ArticleId::from("1"));
}

#[tokio::test]
async fn missing_status_file_reads_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/someone/publish-status/contents/status.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let records = blocking(move || store.load()).await.expect("load");
    assert!(records.is_empty(), "first run must read as empty, not fail");
}

#[tokio::test]
async fn other_read_failures_propagate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/someone/publish-status/contents/status.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = blocking(move || store.load()).await.unwrap_err();
    assert!(matches!(err, StoreError::RemoteRead(_)));
}

#[tokio::test]
async fn save_walks_the_full_commit_protocol() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/someone/publish-status/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commit": { "sha": "c0", "commit": { "tree": { "sha": "t0" } } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/someone/publish-status/git/blobs"))
        .and(body_string_contains("publishTimestamp"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sha": "b1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/someone/publish-status/git/trees"))
        .and(body_partial_json(json!({
            "base_tree": "t0",
            "tree": [{ "path": "status.json", "mode": "100644", "type": "blob", "sha": "b1" }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sha": "t1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/someone/publish-status/git/commits"))
        .and(body_partial_json(json!({
            "message": "update the medium content",
            "tree": "t1",
            "parents": ["c0"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sha": "c1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/someone/publish-status/git/refs/heads/main"))
        .and(body_partial_json(json!({ "sha": "c1", "force": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main", "object": { "sha": "c1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let records = vec![record("1", "https://example.com/posts/a/")];
    blocking(move || store.save(&records)).await.expect("save");
}

#[tokio::test]
async fn failed_step_is_named_in_the_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/someone/publish-status/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commit": { "sha": "c0", "commit": { "tree": { "sha": "t0" } } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/someone/publish-status/git/blobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sha": "b1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/someone/publish-status/git/trees"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = blocking(move || store.save(&[])).await.unwrap_err();
    match err {
        StoreError::RemoteCommit { step, .. } => assert_eq!(step, CommitStep::TreeCreate),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn aborted_save_never_touches_the_ref() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/someone/publish-status/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commit": { "sha": "c0", "commit": { "tree": { "sha": "t0" } } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/someone/publish-status/git/blobs"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/someone/publish-status/git/refs/heads/main"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = blocking(move || store.save(&[])).await.unwrap_err();
    match err {
        StoreError::RemoteCommit { step, .. } => assert_eq!(step, CommitStep::BlobCreate),
        other => panic!("unexpected error: {other}"),
    }
}
