//! # Resource Client
//!
//! The two HTTP edges the console has: the menu-tree fetch at boot, and
//! image preloading during playback. Boot-fetch failure is fatal to the
//! whole session; a preload failure is local to its segment.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::core::menu::MenuTree;

/// Errors from resource acquisition. The boot fetch treats all of these as
/// fatal; image preloads report them inline and move on.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not the shape we expected.
    Parse(String),
    /// Image preload exceeded its deadline.
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status(code) => write!(f, "HTTP error! status: {code}"),
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Fetch the menu-tree resource. Called exactly once, at boot; there is no
/// retry path — the caller halts the session on any error.
pub async fn fetch_menu_tree(client: &reqwest::Client, url: &str) -> Result<MenuTree, FetchError> {
    info!("Fetching menu tree from {url}");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        warn!("Menu tree fetch returned {status}");
        return Err(FetchError::Status(status.as_u16()));
    }

    let tree: MenuTree = response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))?;
    info!("Menu tree loaded ({} root entries)", tree.root.len());
    Ok(tree)
}

/// What a successful preload learned about the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub bytes: usize,
    pub content_type: Option<String>,
}

/// Preload an image resource with a deadline. Success means the bytes
/// arrived and the status was OK; everything else — including running out
/// of time — is a load failure the renderer reports inline.
pub async fn preload_image(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<ImageInfo, FetchError> {
    debug!("Preloading image {url} (timeout {timeout:?})");
    let fetch = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(ImageInfo {
            bytes: body.len(),
            content_type,
        })
    };

    match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Image preload timed out: {url}");
            Err(FetchError::Timeout)
        }
    }
}
