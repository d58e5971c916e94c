//! Printer adapters for sending ESC/POS data
//!
//! Badge printers on the registration desks are raw TCP printers (port 9100).

use crate::error::{PrintError, PrintResult};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (TCP port 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(PrintError::InvalidTarget(format!("Invalid host: {:?}", host)));
        }
        Ok(Self {
            host: host.to_string(),
            port,
            timeout: Duration::from_secs(5),
        })
    }

    /// Create from a printer unit address: `host`, `host:port`, an IP
    /// address, or a bracketed IPv6 address with optional port
    pub fn from_unit(unit: &str) -> PrintResult<Self> {
        if let Ok(addr) = unit.parse::<SocketAddr>() {
            return Self::new(&addr.ip().to_string(), addr.port());
        }
        if let Ok(ip) = unit.parse::<IpAddr>() {
            return Self::new(&ip.to_string(), DEFAULT_PORT);
        }
        if let Some(ip) = unit
            .strip_prefix('[')
            .and_then(|u| u.strip_suffix(']'))
            .and_then(|u| u.parse::<IpAddr>().ok())
        {
            return Self::new(&ip.to_string(), DEFAULT_PORT);
        }
        match unit.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| PrintError::InvalidTarget(format!("Invalid port: {}", unit)))?;
                Self::new(host, port)
            }
            None => Self::new(unit, DEFAULT_PORT),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn connect(&self) -> PrintResult<TcpStream> {
        tokio::time::timeout(self.timeout, TcpStream::connect((self.host.as_str(), self.port)))
            .await
            .map_err(|_| {
                PrintError::Timeout(format!("Connection timeout: {}:{}", self.host, self.port))
            })?
            .map_err(|e| PrintError::Connection(format!("{}:{}: {}", self.host, self.port, e)))
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(host = %self.host, port = self.port, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");
        let mut stream = self.connect().await?;

        stream.write_all(data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(e.kind(), format!("Write failed: {}", e)))
        })?;
        stream.flush().await?;

        info!("Print job sent");
        Ok(())
    }

    #[instrument(skip(self), fields(host = %self.host, port = self.port))]
    async fn is_online(&self) -> bool {
        match self.connect().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }
}
