//! Connectivity probes.

use std::future::Future;
use std::io;

use tokio::net::TcpStream;

/// One lightweight readiness attempt.
pub trait Probe {
    /// Succeeds when the target accepts the probe.
    fn probe(&self) -> impl Future<Output = io::Result<()>> + Send;
}

/// Probes by opening (and immediately dropping) a TCP connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpProbe {
    target: String,
}

impl TcpProbe {
    /// `target` is a `host:port` address.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Probe for TcpProbe {
    async fn probe(&self) -> io::Result<()> {
        TcpStream::connect(self.target.as_str()).await.map(drop)
    }
}
