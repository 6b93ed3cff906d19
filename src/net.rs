// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Connectivity probe.
//!
//! ```text
//! ConnectivityProbe::new(url, connect_timeout, read_timeout)
//!        |
//!        v
//!    check()  --> one HEAD request, no retry, no cache
//!        |
//!        +--> 2xx              Reachable
//!        +--> other status     HttpStatus(code)
//!        +--> refused/timeout  Unreachable(reason)
//!        |
//!        v
//!    is_reachable() -> bool   (advisory, never errors)
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::types::ProbeConfig;
use crate::error::{NetworkError, StreakResult};

/// Something that can tell whether the push remote is worth trying.
pub trait Probe {
    /// Returns true only when the probe positively confirmed reachability.
    fn is_reachable(&self) -> impl Future<Output = bool> + Send;
}

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The host answered with a success status.
    Reachable,
    /// The host answered, but not with a success status.
    HttpStatus(u16),
    /// No answer: DNS failure, refused connection, or timeout.
    Unreachable(String),
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

/// HEAD-request probe against a fixed well-known host.
#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
    client: Client,
    url: String,
}

impl ConnectivityProbe {
    /// Creates a probe with bounded connect and read timeouts.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the URL is not http(s) or the HTTP client
    /// cannot be built.
    pub fn new(
        url: impl Into<String>,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> StreakResult<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(NetworkError::InvalidUrl(url).into());
        }

        let client = Client::builder()
            .user_agent(format!("streak-booster/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()
            .map_err(NetworkError::ClientBuild)?;

        Ok(Self { client, url })
    }

    /// Creates a probe from the `[probe]` configuration section.
    ///
    /// # Errors
    ///
    /// See [`ConnectivityProbe::new`].
    pub fn from_config(config: &ProbeConfig) -> StreakResult<Self> {
        Self::new(
            config.url.clone(),
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_millis(config.read_timeout_ms),
        )
    }

    /// The probed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one HEAD request and classifies the answer.
    pub async fn check(&self) -> ProbeOutcome {
        match self.client.head(&self.url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url = %self.url, status = response.status().as_u16(), "probe ok");
                ProbeOutcome::Reachable
            }
            Ok(response) => ProbeOutcome::HttpStatus(response.status().as_u16()),
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("timed out: {e}")
                } else if e.is_connect() {
                    format!("connection failed: {e}")
                } else {
                    e.to_string()
                };
                ProbeOutcome::Unreachable(reason)
            }
        }
    }
}

impl Probe for ConnectivityProbe {
    async fn is_reachable(&self) -> bool {
        let outcome = self.check().await;
        match &outcome {
            ProbeOutcome::Reachable => {}
            ProbeOutcome::HttpStatus(status) => {
                warn!(url = %self.url, status, "connectivity check got a non-success status");
            }
            ProbeOutcome::Unreachable(reason) => {
                warn!(url = %self.url, reason = %reason, "failed to check internet connectivity");
            }
        }
        outcome.is_reachable()
    }
}
