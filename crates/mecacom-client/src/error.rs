/// Errors that can occur while opening or driving a commander session.
///
/// All of these are fatal categories: the client never retries a connection
/// or an authentication on its own. Whether they terminate the process or
/// propagate to the caller is selected by
/// [`FatalPolicy`](crate::config::FatalPolicy).
///
/// Rate limiting and stop suppression are not errors; they are
/// [`SendOutcome`](crate::client::SendOutcome) values.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Unknown protocol selector in the configuration.
    #[error("unknown protocol selector {0} (0 = tcp, 1 = udp)")]
    Configuration(u8),

    /// Transport-level failure (refused connection, resolve, I/O).
    #[error("transport error: {0}")]
    Transport(#[from] mecacom_transport::TransportError),

    /// Connected to something, but it did not present the commander banner.
    #[error("peer is not a commander bridge: {banner:?}")]
    ProtocolMismatch { banner: String },

    /// The bridge rejected the password (unexpected welcome line).
    #[error("bridge rejected authentication (wrong password?): {welcome:?}")]
    Authentication { welcome: String },

    /// Wire encoding failure.
    #[error("wire error: {0}")]
    Wire(#[from] mecacom_wire::WireError),

    /// I/O failure during the handshake line exchange.
    #[error("handshake I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
