//! Greeting endpoint
//!
//! - `GET /greeter/greet?name=<value>` - plaintext greeting for `value`
//!
//! Every other path falls through to axum's default 404.

use axum::{
    extract::{ConnectInfo, Query},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tracing::info;

/// Route served by the greeter
pub const GREET_PATH: &str = "/greeter/greet";

/// Name used when the caller does not supply one
pub const DEFAULT_NAME: &str = "Stranger";

/// Pick the name to greet from decoded query pairs
///
/// The first `name` pair wins. A missing or empty value resolves to
/// [`DEFAULT_NAME`]; anything else is used verbatim.
pub fn resolve_name(params: &[(String, String)]) -> &str {
    params
        .iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_NAME)
}

/// Format the response body for a resolved name
pub fn greeting(name: &str) -> String {
    format!("Hello, {}!\n", name)
}

/// Greeting handler
///
/// Query pairs are taken as a list rather than a struct so duplicate or
/// unknown keys never cause a rejection.
async fn greet(
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    Query(params): Query<Vec<(String, String)>>,
) -> String {
    let name = resolve_name(&params);
    info!(name = %name, remote_addr = %remote_addr, "Greeting request received");
    greeting(name)
}

/// Build the router for the greeter endpoint
pub fn build_router() -> Router {
    Router::new().route(GREET_PATH, get(greet))
}
