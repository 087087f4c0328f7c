use std::fmt;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Default bridge port.
pub const DEFAULT_PORT: u16 = 3475;

/// Default minimum interval between command sends (the rate gate).
pub const DEFAULT_SEND_INTERVAL: Duration = Duration::from_millis(25);

/// Which wire protocol to speak to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Line-oriented, password-authenticated TCP.
    Tcp,
    /// Sequenced, CRC-checked UDP datagrams. No authentication; the bridge
    /// trusts the source address.
    Udp,
}

impl Protocol {
    /// Parse the numeric selector used by bridge configurations
    /// (0 = TCP, 1 = UDP).
    pub fn from_selector(selector: u8) -> Result<Self> {
        match selector {
            0 => Ok(Protocol::Tcp),
            1 => Ok(Protocol::Udp),
            other => Err(ClientError::Configuration(other)),
        }
    }
}

/// What to do when session setup hits a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FatalPolicy {
    /// Log the error and exit the process with code 2. This is the
    /// original fail-fast contract for the motion-control link and the
    /// default.
    #[default]
    Terminate,
    /// Return the typed error to the caller. For embedding and tests.
    Propagate,
}

/// Configuration for one commander session.
#[derive(Clone)]
pub struct ClientConfig {
    /// Wire protocol to use.
    pub protocol: Protocol,
    /// Bridge host name or address.
    pub host: String,
    /// Bridge port.
    pub port: u16,
    /// Password for TCP authentication. Accepted but never transmitted in
    /// UDP mode. Sent in clear text; redacted in debug output.
    pub password: String,
    /// Minimum interval between command sends.
    pub min_send_interval: Duration,
    /// Terminate or propagate on fatal setup errors.
    pub fatal_policy: FatalPolicy,
    /// Optional read timeout for the TCP handshake. `None` means a stalled
    /// bridge blocks session construction indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Tcp,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            password: String::new(),
            min_send_interval: DEFAULT_SEND_INTERVAL,
            fatal_policy: FatalPolicy::default(),
            read_timeout: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "password",
                &format_args!("<redacted:{} bytes>", self.password.len()),
            )
            .field("min_send_interval", &self.min_send_interval)
            .field("fatal_policy", &self.fatal_policy)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}
