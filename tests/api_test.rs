//! # HTTP API Tests
//!
//! End-to-end tests for the table API: each test assembles the real router
//! against an isolated in-memory store, serves it on an ephemeral port and
//! drives it over HTTP.
//!
//! ## Running the Tests
//!
//! ```bash
//! cargo test --test api_test
//! ```

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

use pool_replay::config::Config;
use pool_replay::serve::{build_router, AppState};
use pool_replay::store::now_ms;

/// Serve an isolated instance on an ephemeral port, returning its base URL
async fn spawn_server(config: Config) -> String {
    let state = Arc::new(AppState::from_config(&config));
    let app = build_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn test_config(table_count: u32, replay_delay_ms: u64) -> Config {
    Config {
        table_count,
        replay_delay_ms,
        ..Config::default()
    }
}

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let res = reqwest::get(url).await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

async fn post_json(url: &str) -> (reqwest::StatusCode, Value) {
    let res = reqwest::Client::new().post(url).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn list_returns_all_tables_in_id_order() {
    let base = spawn_server(test_config(5, 3000)).await;

    let (status, body) = get_json(&format!("{}/api/tables", base)).await;
    assert_eq!(status, 200);

    let tables = body.as_array().unwrap();
    assert_eq!(tables.len(), 5);
    for (i, table) in tables.iter().enumerate() {
        assert_eq!(table["id"], i as u64 + 1);
        assert_eq!(table["isLive"], true);
        assert_eq!(table["hasReplay"], false);
        assert!(table["lastReplayTimestamp"].is_null());
        assert!(table["replayUrl"].is_null());
        assert!(table["streamUrl"].is_string());
    }
}

#[tokio::test]
async fn get_by_id_echoes_requested_id() {
    let base = spawn_server(test_config(3, 3000)).await;

    for id in 1..=3 {
        let (status, body) = get_json(&format!("{}/api/tables/{}", base, id)).await;
        assert_eq!(status, 200);
        assert_eq!(body["id"], id);
        assert_eq!(body["name"], format!("Mesa {}", id));
    }
}

#[tokio::test]
async fn unknown_and_non_numeric_ids_get_404() {
    let base = spawn_server(test_config(3, 3000)).await;
    let expected = serde_json::json!({ "error": "Table not found" });

    for bad in ["999", "0", "abc", "-1", "1.5"] {
        let (status, body) = get_json(&format!("{}/api/tables/{}", base, bad)).await;
        assert_eq!(status, 404, "GET id {:?}", bad);
        assert_eq!(body, expected);

        let (status, body) = post_json(&format!("{}/api/tables/{}/trigger", base, bad)).await;
        assert_eq!(status, 404, "POST id {:?}", bad);
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn repeated_reads_return_identical_data() {
    let base = spawn_server(test_config(4, 3000)).await;
    let url = format!("{}/api/tables", base);

    let (_, first) = get_json(&url).await;
    let (_, second) = get_json(&url).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn trigger_flips_state_only_after_the_delay() {
    // Scenario A: trigger, observe not-yet-ready, then ready
    let base = spawn_server(test_config(1, 300)).await;
    let table_url = format!("{}/api/tables/1", base);

    let (_, before) = get_json(&table_url).await;
    assert_eq!(before["hasReplay"], false);

    let issued_at = now_ms();
    let (status, ack) = post_json(&format!("{}/api/tables/1/trigger", base)).await;
    assert_eq!(status, 200);
    assert_eq!(ack["status"], "processing");
    assert_eq!(ack["message"], "Replay generation started");

    // Acknowledged, not yet completed
    let (_, during) = get_json(&table_url).await;
    assert_eq!(during["hasReplay"], false);

    tokio::time::sleep(Duration::from_millis(700)).await;

    let (_, after) = get_json(&table_url).await;
    assert_eq!(after["hasReplay"], true);
    assert!(after["lastReplayTimestamp"].as_i64().unwrap() >= issued_at);
    assert!(after["replayUrl"].is_string());
}

#[tokio::test]
async fn trigger_does_not_block_on_the_configured_delay() {
    let base = spawn_server(test_config(1, 10_000)).await;

    let start = Instant::now();
    let (status, _) = post_json(&format!("{}/api/tables/1/trigger", base)).await;
    assert_eq!(status, 200);
    assert!(
        start.elapsed() < Duration::from_millis(100),
        "trigger took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn overlapping_triggers_settle_on_the_later_completion() {
    // Scenario C: second trigger fires while the first is still pending
    let base = spawn_server(test_config(1, 200)).await;
    let trigger_url = format!("{}/api/tables/1/trigger", base);

    let (status, _) = post_json(&trigger_url).await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let second_issued_at = now_ms();
    let (status, _) = post_json(&trigger_url).await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(600)).await;

    let (_, table) = get_json(&format!("{}/api/tables/1", base)).await;
    assert_eq!(table["hasReplay"], true);
    // The later completion wins the timestamp
    assert!(table["lastReplayTimestamp"].as_i64().unwrap() >= second_issued_at);
}

#[cfg(feature = "web-frontend")]
#[tokio::test]
async fn index_carries_the_injected_runtime_config() {
    let config = Config {
        freshness_window_ms: 45_000,
        ..test_config(1, 3000)
    };
    let base = spawn_server(config).await;

    let res = reqwest::get(&base).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "text/html"
    );
    let html = res.text().await.unwrap();
    assert!(html.contains("window.__REPLAY_CONFIG__"));
    assert!(html.contains("\"freshnessWindowMs\":45000"));
}

#[cfg(feature = "web-frontend")]
#[tokio::test]
async fn embedded_assets_served_with_content_types() {
    let base = spawn_server(test_config(1, 3000)).await;

    let res = reqwest::get(format!("{}/assets/main.js", base)).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/javascript"
    );

    let res = reqwest::get(format!("{}/assets/style.css", base)).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"].to_str().unwrap(), "text/css");

    let res = reqwest::get(format!("{}/assets/missing.txt", base)).await.unwrap();
    assert_eq!(res.status(), 404);
}
