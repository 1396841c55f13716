//! End-to-end checks against a running server.
//!
//! These tests require:
//! - The server running on a freshly seeded state (cargo run -p maruzzella-server)
//!
//! Run with: cargo test -p maruzzella-integration-tests -- --ignored

#![allow(clippy::indexing_slicing)]

use maruzzella_integration_tests::{CHEF_ID, MANAGER_ID, base_url, client, logged_in};
use reqwest::StatusCode;
use serde_json::{Value, json};

// ============================================================================
// Health & Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health_endpoints() {
    let client = client().expect("Failed to create HTTP client");

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach server");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach server");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_login_and_me() {
    let client = logged_in(MANAGER_ID).await.expect("Login failed");

    let me: Value = client
        .get(format!("{}/api/me", base_url()))
        .send()
        .await
        .expect("Failed to get /api/me")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(me["id"], MANAGER_ID);
    assert_eq!(me["role"], "Manager");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_anonymous_requests_are_rejected() {
    let client = client().expect("Failed to create HTTP client");
    let resp = client
        .get(format!("{}/api/payroll", base_url()))
        .send()
        .await
        .expect("Failed to reach server");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Roster
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_roster_add_and_remove_shift() {
    let client = logged_in(MANAGER_ID).await.expect("Login failed");
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/rosters/next/Sunday"))
        .json(&json!({"employeeIds": [CHEF_ID], "startTime": "22:00", "endTime": "00:00"}))
        .send()
        .await
        .expect("Failed to add shift");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let roster: Value = client
        .get(format!("{base_url}/api/rosters/next"))
        .send()
        .await
        .expect("Failed to get roster")
        .json()
        .await
        .expect("Invalid JSON");
    let sunday = roster["Sunday"].as_array().expect("Sunday missing");
    let index = sunday.len() - 1;
    assert_eq!(sunday[index]["endTime"], "00:00");

    let resp = client
        .delete(format!("{base_url}/api/rosters/next/Sunday/{index}"))
        .send()
        .await
        .expect("Failed to delete shift");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Time clock
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_chef_clock_round_trip() {
    let client = logged_in(CHEF_ID).await.expect("Login failed");
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/clock/{CHEF_ID}/in"))
        .send()
        .await
        .expect("Failed to clock in");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let rows: Value = client
        .get(format!("{base_url}/api/clock"))
        .send()
        .await
        .expect("Failed to get clock")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(rows[0]["status"], "in");

    let resp = client
        .post(format!("{base_url}/api/clock/{CHEF_ID}/out"))
        .send()
        .await
        .expect("Failed to clock out");
    assert_eq!(resp.status(), StatusCode::OK);
    let log: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(log["status"], "pending");
}
