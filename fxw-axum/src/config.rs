//! Where the HTTP API listens.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Listening settings for the HTTP API.
///
/// An absent `bind_address` means every interface on [`AxumConfig::DEFAULT_PORT`].
///
/// ```
/// use fxw_axum::config::AxumConfig;
///
/// let config = AxumConfig::default();
/// assert_eq!(config.bind_address.port(), AxumConfig::DEFAULT_PORT);
///
/// let local = AxumConfig::local(3000);
/// assert!(local.bind_address.ip().is_loopback());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AxumConfig {
    /// The socket the listener binds, e.g. `127.0.0.1:3000`
    pub bind_address: SocketAddr,
}

impl AxumConfig {
    /// The port served when none is configured
    pub const DEFAULT_PORT: u16 = 8080;

    /// Listen on `port` of the loopback interface only
    pub fn local(port: u16) -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
        }
    }
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, Self::DEFAULT_PORT)),
        }
    }
}
