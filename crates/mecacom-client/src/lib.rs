//! Client session management for the NLAB-MecanumCommander bridge.
//!
//! This is the "just works" layer: open a [`CommanderClient`] against a
//! running bridge, call [`CommanderClient::set_velocity`] and
//! [`CommanderClient::stop`], and let the session enforce the protocol
//! policies for you:
//!
//! - a minimum inter-command send interval (default 25 ms),
//! - idempotent STOPZERO suppression,
//! - TCP banner check and password authentication,
//! - UDP sequencing and CRC stamping (via `mecacom-wire`).
//!
//! Fully synchronous and caller-driven. No background threads.

pub mod client;
pub mod config;
pub mod error;
pub mod handshake;

pub use client::{CommanderClient, SendOutcome};
pub use config::{ClientConfig, FatalPolicy, Protocol, DEFAULT_PORT, DEFAULT_SEND_INTERVAL};
pub use error::{ClientError, Result};
pub use handshake::{authenticate, GREETING, WELCOME_PREFIX, WELCOME_SUFFIX};
