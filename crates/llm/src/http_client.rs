//! HTTP Client Factory
//!
//! Builds the reqwest client shared by the Gemini and OpenAI providers.

use std::time::Duration;

use promptsmith_core::ProxyConfig;

/// Upper bound for a single generation round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the client for provider calls.
///
/// With a proxy configured every request goes through it; without one,
/// proxy environment variables are ignored. An unusable proxy is logged
/// and skipped rather than failing provider construction.
pub fn build_http_client(proxy: Option<&ProxyConfig>) -> reqwest::Client {
    let builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
    let builder = match proxy.map(to_reqwest_proxy) {
        Some(Ok(p)) => builder.proxy(p),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "ignoring invalid proxy configuration");
            builder.no_proxy()
        }
        None => builder.no_proxy(),
    };

    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default HTTP client");
        reqwest::Client::default()
    })
}

fn to_reqwest_proxy(cfg: &ProxyConfig) -> reqwest::Result<reqwest::Proxy> {
    let proxy = reqwest::Proxy::all(cfg.url())?;
    Ok(match (&cfg.username, &cfg.password) {
        (Some(user), Some(password)) => proxy.basic_auth(user, password),
        _ => proxy,
    })
}
