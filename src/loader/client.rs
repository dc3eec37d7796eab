// src/loader/client.rs
use crate::utils::error::LoadError;
use reqwest::header;
use std::time::Duration;

// SEC requires a descriptive User-Agent; override with FILING_SEGMENTER_USER_AGENT
const DEFAULT_USER_AGENT: &str = "filing-segmenter/0.1 admin@example.com";
// SEC asks for 10 requests/second max. Be conservative.
const REQUEST_DELAY_MS: u64 = 150;
const REQUEST_TIMEOUT_SECS: u64 = 60;

fn user_agent() -> String {
    std::env::var("FILING_SEGMENTER_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string())
}

fn build_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

/// Maps a non-2xx status to the matching `LoadError`.
fn status_error(status: reqwest::StatusCode, url: &str) -> LoadError {
    match status {
        reqwest::StatusCode::FORBIDDEN => {
            tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
            LoadError::Forbidden(url.to_string())
        }
        reqwest::StatusCode::NOT_FOUND => LoadError::NotFound(url.to_string()),
        _ => LoadError::Http(status),
    }
}

/// Downloads a filing document as text.
/// Sleeps briefly before each request to stay under EDGAR's rate limit.
pub async fn download(url: &str) -> Result<String, LoadError> {
    let user_agent = user_agent();
    let client = build_client(&user_agent)?;

    tracing::info!("Downloading filing from: {}", url);
    tracing::debug!("Using User-Agent: {}", user_agent);

    tokio::time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,text/plain,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(status_error(status, url));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}
