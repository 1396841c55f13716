//! Integration tests for Maruzzella.
//!
//! These run against a live server, so they are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server on a scratch data file
//! MARUZZELLA_DATA_FILE=/tmp/mz-test.json cargo run -p maruzzella-server
//!
//! # Run integration tests
//! MARUZZELLA_TEST_URL=http://localhost:4000 cargo test -p maruzzella-integration-tests -- --ignored
//! ```
//!
//! The tests log in as seeded staff with the default PIN, so the server must
//! start from a fresh (seeded) state.

use reqwest::{Client, StatusCode};
use serde_json::json;

/// Seeded manager.
pub const MANAGER_ID: i64 = 1;
/// Seeded chef.
pub const CHEF_ID: i64 = 3;
/// PIN every seeded employee starts with.
pub const SEED_PIN: &str = "1234";

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("MARUZZELLA_TEST_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// Client that keeps the session cookie between requests.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn client() -> reqwest::Result<Client> {
    Client::builder().cookie_store(true).build()
}

/// Client logged in as `employee_id` with the seed PIN.
///
/// # Errors
///
/// Returns an error if the request fails or the login is refused.
pub async fn logged_in(employee_id: i64) -> Result<Client, Box<dyn std::error::Error>> {
    let client = client()?;
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({"employeeId": employee_id, "pin": SEED_PIN}))
        .send()
        .await?;

    if resp.status() != StatusCode::OK {
        return Err(format!("login as {employee_id} failed: {}", resp.status()).into());
    }
    Ok(client)
}
