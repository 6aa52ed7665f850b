//! HTTP client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// User agent attached to every request sent through a shared transport
pub const DEFAULT_USER_AGENT: &str = "SdkCore-Rust HTTP/1.1";

/// HTTP client configuration
///
/// The transport-level settings (`pooled_connection_lifetime`,
/// `connect_timeout`, `user_agent`, `max_redirects`, `proxy`) are applied
/// when the shared transport for a base URL is first created. Later clients
/// for the same base URL reuse that transport as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout applied to the send step of each request
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// How long an idle pooled connection is kept alive
    #[serde(default = "default_pooled_connection_lifetime")]
    pub pooled_connection_lifetime: Duration,

    /// Connection timeout
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    /// Default user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum redirects to follow (0 = no redirects)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// HTTP/HTTPS proxy URL
    #[serde(default)]
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            pooled_connection_lifetime: default_pooled_connection_lifetime(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            proxy: None,
        }
    }
}

impl HttpConfig {
    /// Create a new HTTP config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the send timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pooled connection lifetime
    pub fn with_pooled_connection_lifetime(mut self, lifetime: Duration) -> Self {
        self.pooled_connection_lifetime = lifetime;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set maximum redirects
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Set proxy URL
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

// Default value functions for serde
fn default_timeout() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_pooled_connection_lifetime() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_max_redirects() -> usize {
    10
}
