//! Process-wide transport cache
//!
//! One [`Transport`] exists per distinct base URL (compared
//! case-insensitively) for the life of the process. The first client
//! constructed for a base URL creates it; every later client shares it.

use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
};

/// Shared transports keyed by lower-cased base URL
static CONNECTION_POOL: Lazy<DashMap<String, Arc<Transport>>> = Lazy::new(DashMap::new);

/// Long-lived, connection-pooling handle for one base URL
#[derive(Debug)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
    pooled_connection_lifetime: Duration,
    user_agent: String,
}

impl Transport {
    fn build(base_url: &str, config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pooled_connection_lifetime)
            .user_agent(&config.user_agent)
            .redirect(if config.max_redirects > 0 {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            pooled_connection_lifetime: config.pooled_connection_lifetime,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Underlying reqwest client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Base URL the transport was first created for
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pooled_connection_lifetime(&self) -> Duration {
        self.pooled_connection_lifetime
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Get the shared transport for `base_url`, creating it on first use
///
/// Creation happens under the map's entry lock, so concurrent first use
/// from many threads builds exactly one transport. `config` only matters
/// for the call that creates it.
pub fn shared_transport(base_url: &str, config: &HttpConfig) -> Result<Arc<Transport>> {
    let key = base_url.to_lowercase();

    let entry = CONNECTION_POOL.entry(key).or_try_insert_with(|| {
        debug!(
            "Creating shared transport for {} (pooled connection lifetime {:?})",
            base_url, config.pooled_connection_lifetime
        );
        Transport::build(base_url, config).map(Arc::new)
    })?;

    Ok(Arc::clone(entry.value()))
}

/// Cached transport for `base_url`, if one has been created
pub fn cached_transport(base_url: &str) -> Option<Arc<Transport>> {
    CONNECTION_POOL
        .get(&base_url.to_lowercase())
        .map(|entry| Arc::clone(entry.value()))
}
