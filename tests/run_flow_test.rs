//! Run-flow integration tests.
//!
//! Exercises the top-level flow against a mock server: the empty-listing
//! termination, the notebook resolution fallback, the ad-hoc single-query
//! path, the full demo sequence, and the listing-failure abort.

use serde_json::json;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nbquery::commands::{run::run, QueryOptions, RunOptions};
use nbquery::config::Config;
use nbquery::QueryClient;

fn config_for(server: &MockServer, notebook_id: &str) -> Config {
    Config {
        base_url: server.uri(),
        api_key: "dbn_testkey".to_string(),
        notebook_id: notebook_id.to_string(),
    }
}

fn options() -> RunOptions {
    RunOptions {
        query: None,
        no_demo: false,
        max_history: 5,
        query_options: QueryOptions::default(),
    }
}

fn listing_with(notebooks: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "notebooks": notebooks }))
}

fn query_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "response": "ok",
        "metadata": {"stateless": true},
        "sources": []
    }))
}

#[tokio::test]
async fn test_empty_listing_issues_no_queries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query/notebooks"))
        .respond_with(listing_with(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    // No /api/query request may ever be issued for an empty listing
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(query_ok())
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, "abc");
    let client = QueryClient::new(&config).unwrap();
    let result = run(&config, &client, &options()).await;

    // Graceful informational termination, not an error
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unknown_notebook_falls_back_to_first_listed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query/notebooks"))
        .respond_with(listing_with(json!([
            {"id": "abc", "name": "HR Docs", "document_count": 3,
             "created_at": "2024-01-01T00:00:00Z"},
            {"id": "def", "name": "Engineering", "document_count": 1,
             "created_at": "2024-02-01T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(query_ok())
        .mount(&server)
        .await;

    // Configured notebook id is not in the listing
    let config = config_for(&server, "not-listed");
    let client = QueryClient::new(&config).unwrap();
    run(&config, &client, &options()).await.unwrap();

    let posts: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .collect();
    assert!(!posts.is_empty());
    for post in posts {
        let body: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
        assert_eq!(body["notebook_id"], json!("abc"));
    }
}

#[tokio::test]
async fn test_ad_hoc_query_with_no_demo_issues_single_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query/notebooks"))
        .respond_with(listing_with(json!([
            {"id": "abc", "name": "HR Docs", "document_count": 3,
             "created_at": "2024-01-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(query_ok())
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "abc");
    let client = QueryClient::new(&config).unwrap();
    let run_options = RunOptions {
        query: Some("What is the leave policy?".to_string()),
        no_demo: true,
        ..options()
    };
    run(&config, &client, &run_options).await.unwrap();

    let posts: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .collect();
    assert_eq!(posts.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&posts[0].body).unwrap();
    assert_eq!(body["query"], json!("What is the leave policy?"));
    // Ad-hoc queries are stateless
    assert!(!body.as_object().unwrap().contains_key("session_id"));
}

#[tokio::test]
async fn test_demo_sequence_runs_one_stateless_and_three_turns() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query/notebooks"))
        .respond_with(listing_with(json!([
            {"id": "abc", "name": "HR Docs", "document_count": 3,
             "created_at": "2024-01-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(query_ok())
        .expect(4)
        .mount(&server)
        .await;

    let config = config_for(&server, "abc");
    let client = QueryClient::new(&config).unwrap();
    run(&config, &client, &options()).await.unwrap();

    let posts: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .collect();
    assert_eq!(posts.len(), 4);

    let first: serde_json::Value = serde_json::from_slice(&posts[0].body).unwrap();
    assert!(!first.as_object().unwrap().contains_key("session_id"));

    // The three conversational turns share one session id
    let session_ids: Vec<serde_json::Value> = posts[1..]
        .iter()
        .map(|p| {
            let body: serde_json::Value = serde_json::from_slice(&p.body).unwrap();
            body["session_id"].clone()
        })
        .collect();
    assert!(session_ids[0].is_string());
    assert_eq!(session_ids[0], session_ids[1]);
    assert_eq!(session_ids[1], session_ids[2]);
}

#[tokio::test]
async fn test_listing_failure_aborts_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query/notebooks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(query_ok())
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, "abc");
    let client = QueryClient::new(&config).unwrap();
    let result = run(&config, &client, &options()).await;
    assert!(result.is_err());
}
