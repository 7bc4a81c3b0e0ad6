use core::{net::SocketAddr, time::Duration};
use std::net::{IpAddr, Ipv4Addr};

use anyhow::Result;
use tokio::net::TcpListener;
use tower_http::cors::AllowOrigin;

#[derive(Clone, Debug)]
pub struct HttpApiConfig {
    pub address: SocketAddr,
    pub allow_origin: AllowOrigin,
    // `HttpApiConfig.timeout` is optional to prevent timeouts in tests.
    pub timeout: Option<Duration>,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self::with_address(Ipv4Addr::LOCALHOST, 5052)
    }
}

impl HttpApiConfig {
    #[must_use]
    pub fn with_address(ip_address: impl Into<IpAddr>, port: u16) -> Self {
        let address = (ip_address, port).into();

        let allowed_origin = format!("http://{address}")
            .try_into()
            .expect("http:// followed by a socket address should be a valid header value");

        Self {
            address,
            allow_origin: AllowOrigin::list([allowed_origin]),
            timeout: None,
        }
    }

    pub(crate) async fn listener(&self) -> Result<TcpListener> {
        TcpListener::bind(self.address).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_address_is_localhost_5052() {
        let config = HttpApiConfig::default();

        assert_eq!(config.address, SocketAddr::from((Ipv4Addr::LOCALHOST, 5052)));
        assert_eq!(config.timeout, None);
    }

    #[tokio::test]
    async fn listener_binds_to_configured_address() -> Result<()> {
        let config = HttpApiConfig::with_address(Ipv4Addr::LOCALHOST, 0);
        let listener = config.listener().await?;

        assert!(listener.local_addr()?.ip().is_loopback());

        Ok(())
    }
}
