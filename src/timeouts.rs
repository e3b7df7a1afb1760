//! Timeout configuration for table-link requests.
//!
//! Timeouts belong to the transport: the client itself never retries or
//! cancels, it only hands these values to the HTTP client.

use std::time::Duration;

/// Timeout configuration for HTTP exchanges.
///
/// # Examples
///
/// ```rust
/// use table_link::LinkTimeouts;
/// use std::time::Duration;
///
/// // Defaults (10s connect, 30s per request)
/// let timeouts = LinkTimeouts::default();
///
/// // Custom timeouts for a slow network
/// let timeouts = LinkTimeouts::builder()
///     .connection_timeout(Duration::from_secs(30))
///     .receive_timeout(Duration::from_secs(120))
///     .build();
///
/// // Short timeouts for a server on localhost
/// let timeouts = LinkTimeouts::fast();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Timeout for a whole request, from send until the body is read.
    /// Zero disables it.
    /// Default: 30 seconds
    pub receive_timeout: Duration,
}

impl Default for LinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            receive_timeout: Duration::from_secs(30),
        }
    }
}

impl LinkTimeouts {
    pub fn builder() -> LinkTimeoutsBuilder {
        LinkTimeoutsBuilder::new()
    }

    /// Short timeouts suitable for localhost.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            receive_timeout: Duration::from_secs(5),
        }
    }

    /// Long timeouts for high-latency or unreliable networks.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            receive_timeout: Duration::from_secs(120),
        }
    }

    /// Check if a duration represents "no timeout" (zero or very large).
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero() || duration > Duration::from_secs(86400 * 365)
    }
}

/// Builder for custom [`LinkTimeouts`].
#[derive(Debug, Clone)]
pub struct LinkTimeoutsBuilder {
    timeouts: LinkTimeouts,
}

impl LinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: LinkTimeouts::default(),
        }
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    pub fn receive_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    pub fn receive_timeout_secs(self, secs: u64) -> Self {
        self.receive_timeout(Duration::from_secs(secs))
    }

    pub fn build(self) -> LinkTimeouts {
        self.timeouts
    }
}
