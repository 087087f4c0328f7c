use std::net::SocketAddr;

/// Errors that can occur on the command link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The bridge actively refused the TCP connection.
    #[error("connection to {addr} refused (is the bridge running?)")]
    Refused { addr: SocketAddr },

    /// The host/port pair did not resolve to any address.
    #[error("could not resolve {host}:{port}")]
    Resolve { host: String, port: u16 },

    /// Failed to bind the local datagram socket.
    #[error("failed to bind local datagram socket: {0}")]
    Bind(std::io::Error),

    /// The peer closed the stream mid-write.
    #[error("link closed by peer")]
    Closed,

    /// Any other I/O failure, propagated unmodified.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
