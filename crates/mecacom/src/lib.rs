//! Remote-control client for the NLAB-MecanumCommander robot bridge.
//!
//! mecacom sends motion commands (translation speed X/Y and rotation) to a
//! bridge process that drives the robot hardware, over either a
//! line-oriented authenticated TCP protocol or a sequenced, CRC-checked UDP
//! datagram protocol.
//!
//! # Crate Structure
//!
//! - [`wire`] — command rendering, CRC-16/XMODEM, UDP datagram codec
//! - [`transport`] — TCP/UDP socket ownership, the `transmit` capability
//! - [`client`] — session object: auth handshake, rate gate, stop dedup
//!
//! # Example
//!
//! ```no_run
//! use mecacom::client::{ClientConfig, CommanderClient, FatalPolicy, Protocol};
//!
//! let mut robot = CommanderClient::connect(ClientConfig {
//!     protocol: Protocol::Udp,
//!     host: "192.168.0.20".to_string(),
//!     fatal_policy: FatalPolicy::Propagate,
//!     ..ClientConfig::default()
//! })?;
//! robot.set_velocity(0, 0, 600)?;
//! robot.stop()?;
//! # Ok::<(), mecacom::client::ClientError>(())
//! ```

/// Re-export wire types.
pub mod wire {
    pub use mecacom_wire::*;
}

/// Re-export transport types.
pub mod transport {
    pub use mecacom_transport::*;
}

/// Re-export client session types.
pub mod client {
    pub use mecacom_client::*;
}
