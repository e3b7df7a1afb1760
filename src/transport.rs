//! Single HTTP exchange: send, check status, read body.

use crate::error::Failure;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::time::Instant;

/// Longest body excerpt kept in a [`Failure::Decode`] message.
const DECODE_PREVIEW_CHARS: usize = 200;

/// Sends requests and turns non-2xx responses into [`Failure::Server`].
///
/// No retries: one call, one round trip.
#[derive(Clone)]
pub(crate) struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub(crate) fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    pub(crate) fn request(
        &self,
        method: reqwest::Method,
        url: reqwest::Url,
    ) -> reqwest::RequestBuilder {
        self.http_client.request(method, url)
    }

    /// Send a request and return the response if its status is 2xx.
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Failure> {
        let request = request
            .build()
            .map_err(|e| Failure::Transport(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!("[TABLE_HTTP] Sending {} {}", method, url);
        let start = Instant::now();

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "[TABLE_HTTP] Transport error: {} {} error=\"{}\" duration_ms={}",
                    method,
                    url,
                    e,
                    start.elapsed().as_millis()
                );
                return Err(Failure::from(e));
            }
        };

        let status = response.status();
        debug!(
            "[TABLE_HTTP] Response received: status={} duration_ms={}",
            status,
            start.elapsed().as_millis()
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(
            "[TABLE_HTTP] Server error: {} {} status={} body=\"{}\"",
            method,
            url,
            status,
            body.trim_end()
        );

        Err(Failure::Server {
            status: status.as_u16(),
            body,
        })
    }

    /// Send a request and decode its 2xx body as JSON.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Failure> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(Failure::from)?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("[TABLE_HTTP] Malformed response body: {}", e);
            debug!("[TABLE_HTTP] Malformed body ({} bytes): {}", body.len(), body);
            Failure::Decode(format!("{}: {}", e, body_preview(&body)))
        })
    }
}

/// First [`DECODE_PREVIEW_CHARS`] characters of `body`, marked when cut.
fn body_preview(body: &str) -> String {
    match body.char_indices().nth(DECODE_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}
