//! Transport layer for the NLAB-MecanumCommander client.
//!
//! Owns exactly one socket per session — a connected TCP stream or a bound
//! UDP socket with a fixed destination — and exposes a single
//! [`CommandLink::transmit`] capability. Everything above this layer deals
//! in bytes only.

pub mod error;
pub mod link;

pub use error::{Result, TransportError};
pub use link::CommandLink;
