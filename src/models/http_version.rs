use serde::{Deserialize, Serialize};

/// HTTP protocol version used by the underlying transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVersion {
    /// HTTP/1.1 only
    #[default]
    Http1,
    /// HTTP/2 with prior knowledge
    Http2,
    /// Negotiated with the server (ALPN over TLS, HTTP/1.1 otherwise)
    Auto,
}
