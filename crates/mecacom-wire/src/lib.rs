//! Wire encoding for the NLAB-MecanumCommander motion command protocols.
//!
//! A command travels to the bridge in one of two shapes:
//! - A CRLF-terminated ASCII line over an authenticated TCP stream
//!   (`"SPX00600\r\n"`).
//! - A sequenced, CRC-checked UDP datagram
//!   (`[2B BE sequence][ASCII command][2B BE CRC-16/XMODEM]`).
//!
//! This crate only renders and checks bytes. Socket ownership lives in
//! `mecacom-transport`, send policy (rate gate, stop dedup) in
//! `mecacom-client`.

pub mod command;
pub mod crc16;
pub mod datagram;
pub mod error;

pub use command::{velocity_lines, MotionCommand, STOP_LINE};
pub use crc16::Crc16;
pub use datagram::{
    decode_datagram, encode_datagram, Datagram, SequenceCounter, HEADER_SIZE, MAX_COMMAND_LEN,
    TRAILER_SIZE,
};
pub use error::{Result, WireError};
