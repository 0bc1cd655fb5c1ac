use std::{fmt, str::FromStr};

use crate::ServerError;

/// Listen address in `host:port` form.
///
/// An empty host (`:9309`) means every interface: [`bind`](crate::bind)
/// listens on `[::]` (dual-stack) and falls back to `0.0.0.0` when the host
/// has no IPv6. IPv6 hosts are written in brackets (`[::1]:9309`).
/// Hostnames are resolved at bind time.
///
/// # Examples
/// ```
/// use lastrun_api::ListenAddr;
///
/// let addr: ListenAddr = "127.0.0.1:9309".parse().unwrap();
/// assert_eq!((addr.host(), addr.port()), ("127.0.0.1", 9309));
///
/// let any: ListenAddr = ":9309".parse().unwrap();
/// assert!(any.is_unspecified());
/// assert_eq!(any.to_string(), ":9309");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddr {
    host: String,
    port: u16,
}

impl ListenAddr {
    /// Default value of `--telemetry.address`.
    pub const DEFAULT: &'static str = ":9309";

    /// Address from an unbracketed host and a port. An empty host listens on
    /// every interface.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host as written, without IPv6 brackets; empty for every interface.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `true` when no host was given.
    pub fn is_unspecified(&self) -> bool {
        self.host.is_empty()
    }
}

impl Default for ListenAddr {
    fn default() -> Self {
        Self::new("", 9309)
    }
}

impl FromStr for ListenAddr {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ServerError::InvalidAddress {
            addr: s.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = s.trim().rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| invalid("port must be a number between 0 and 65535"))?;

        let host = match host {
            "" => "",
            h if h.starts_with('[') => h
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .ok_or_else(|| invalid("unterminated IPv6 bracket"))?,
            h if h.contains(':') => return Err(invalid("IPv6 hosts must be bracketed")),
            h => h,
        };

        Ok(Self::new(host, port))
    }
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
