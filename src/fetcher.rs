use crate::parsers;
use crate::results::PageMeta;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent sent with every page request
pub const USER_AGENT: &str = "Mozilla/5.0 (Miori-v2)";

/// Default page fetch timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetches a page and extracts its metadata with the default timeout.
///
/// Never fails: network errors, non-success statuses and unparsable URLs all
/// degrade to an empty body, which in turn yields an empty [`PageMeta`].
pub async fn fetch_meta(url: &str) -> PageMeta {
    fetch_meta_with_timeout(url, DEFAULT_TIMEOUT).await
}

/// Same as [`fetch_meta`] with an explicit timeout
pub async fn fetch_meta_with_timeout(url: &str, timeout: Duration) -> PageMeta {
    ::log::info!("Fetching page metadata: {}", url);

    let html = fetch_body(url, timeout).await.unwrap_or_default();
    let meta = parsers::parse_meta(&html);

    ::log::debug!("Extracted page metadata: {:?}", meta);
    meta
}

/// Downloads the page body, returning None on any failure
async fn fetch_body(url: &str, timeout: Duration) -> Option<String> {
    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(e) => {
            ::log::warn!("Invalid page URL {}: {}", url, e);
            return None;
        }
    };

    let client = match Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            ::log::warn!("Failed to create HTTP client: {}", e);
            return None;
        }
    };

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            if e.is_timeout() {
                ::log::warn!("Timeout fetching {}", url);
            } else {
                ::log::warn!("Failed to fetch {}: {}", url, e);
            }
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        ::log::warn!("HTTP {} for {}", status.as_u16(), url);
        return None;
    }

    match response.text().await {
        Ok(body) => {
            ::log::debug!("Fetched {} bytes from {}", body.len(), url);
            Some(body)
        }
        Err(e) => {
            ::log::warn!("Failed to read body of {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <title>Example | Shop</title>
        <meta property="og:description" content="An example shop">
        <meta property="og:image" content="https://example.com/og.png">
    </head><body></body></html>"#;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/product")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(PAGE)
            .create_async()
            .await;

        let meta = fetch_meta(&format!("{}/product", server.url())).await;
        mock.assert_async().await;

        assert_eq!(meta.title, "Example | Shop");
        assert_eq!(meta.description, "An example shop");
        assert_eq!(meta.image, "https://example.com/og.png");
    }

    #[tokio::test]
    async fn test_non_success_status_yields_empty_meta() {
        let mut server = mockito::Server::new_async().await;
        for (path, status) in [("/missing", 404), ("/error", 500), ("/denied", 403)] {
            let _mock = server
                .mock("GET", path)
                .with_status(status)
                .with_body(PAGE)
                .create_async()
                .await;

            let meta = fetch_meta(&format!("{}{}", server.url(), path)).await;
            assert_eq!(meta, PageMeta::default(), "status {} should yield empty meta", status);
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty_meta() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let meta = fetch_meta_with_timeout("http://127.0.0.1:9/", Duration::from_secs(2)).await;
        assert_eq!(meta, PageMeta::default());
    }

    #[tokio::test]
    async fn test_invalid_url_yields_empty_meta() {
        let meta = fetch_meta("not a url").await;
        assert_eq!(meta, PageMeta::default());
    }

    #[tokio::test]
    async fn test_empty_body_yields_empty_meta() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let meta = fetch_meta(&server.url()).await;
        assert!(meta.is_empty());
    }
}
