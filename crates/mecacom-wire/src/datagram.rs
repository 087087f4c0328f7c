use bytes::{BufMut, BytesMut};

use crate::crc16::Crc16;
use crate::error::{Result, WireError};

/// Datagram header: 2-byte big-endian sequence number.
pub const HEADER_SIZE: usize = 2;

/// Datagram trailer: 2-byte big-endian CRC-16/XMODEM.
pub const TRAILER_SIZE: usize = 2;

/// Sanity cap on command text length. The real command set tops out at
/// 9 characters (`"SPX-12345"` and friends).
pub const MAX_COMMAND_LEN: usize = 32;

/// Wrapping 16-bit packet sequence counter.
///
/// Starts at 0 and is advanced before each send, so the first datagram on
/// the wire carries sequence 1. After 0xFFFF the counter resets to 0 (a
/// sequence-0 datagram does appear after wraparound).
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceCounter(u16);

impl SequenceCounter {
    /// A fresh counter, as created for each UDP session.
    pub fn new() -> Self {
        Self(0)
    }

    /// Advance the counter and return the value to stamp on the next packet.
    pub fn advance(&mut self) -> u16 {
        self.0 = if self.0 == 0xFFFF { 0 } else { self.0 + 1 };
        self.0
    }

    /// The most recently issued sequence number.
    pub fn current(&self) -> u16 {
        self.0
    }
}

/// A decoded UDP command datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    /// Sequence number carried in the header.
    pub sequence: u16,
    /// ASCII command text, e.g. `"ROT00600"`.
    pub command: String,
}

/// Encode one command datagram into `dst`.
///
/// Wire format:
/// ```text
/// ┌───────────────┬──────────────────┬──────────────────────┐
/// │ Sequence (2B) │ Command (ASCII)  │ CRC-16/XMODEM (2B)   │
/// │ big-endian    │                  │ big-endian, over     │
/// │               │                  │ sequence + command   │
/// └───────────────┴──────────────────┴──────────────────────┘
/// ```
pub fn encode_datagram(sequence: u16, command: &str, dst: &mut BytesMut) -> Result<()> {
    if !command.is_ascii() {
        return Err(WireError::NotAscii(command.to_string()));
    }
    if command.len() > MAX_COMMAND_LEN {
        return Err(WireError::CommandTooLong {
            len: command.len(),
            max: MAX_COMMAND_LEN,
        });
    }

    dst.reserve(HEADER_SIZE + command.len() + TRAILER_SIZE);
    let start = dst.len();
    dst.put_u16(sequence);
    dst.put_slice(command.as_bytes());
    let checksum = Crc16::compute(&dst[start..]);
    dst.put_u16(checksum);
    Ok(())
}

/// Decode and verify one command datagram.
///
/// Rejects short packets, bad checksums, and non-ASCII command bytes.
/// Used by the test suites and by bridge-side receivers; the client itself
/// is fire-and-forget.
pub fn decode_datagram(src: &[u8]) -> Result<Datagram> {
    let min = HEADER_SIZE + TRAILER_SIZE;
    if src.len() < min {
        return Err(WireError::Truncated {
            len: src.len(),
            min,
        });
    }

    let body = &src[..src.len() - TRAILER_SIZE];
    let carried = u16::from_be_bytes([src[src.len() - 2], src[src.len() - 1]]);
    let computed = Crc16::compute(body);
    if carried != computed {
        return Err(WireError::ChecksumMismatch { carried, computed });
    }

    let sequence = u16::from_be_bytes([src[0], src[1]]);
    let command_bytes = &body[HEADER_SIZE..];
    if !command_bytes.is_ascii() {
        return Err(WireError::NotAscii(
            String::from_utf8_lossy(command_bytes).into_owned(),
        ));
    }

    Ok(Datagram {
        sequence,
        // ASCII was checked above.
        command: String::from_utf8_lossy(command_bytes).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let mut buf = BytesMut::new();
        encode_datagram(1, "ROT00600", &mut buf).unwrap();

        assert_eq!(buf.len(), HEADER_SIZE + 8 + TRAILER_SIZE);
        assert_eq!(&buf[..2], &[0x00, 0x01]);
        assert_eq!(&buf[2..10], b"ROT00600");

        let datagram = decode_datagram(&buf).unwrap();
        assert_eq!(datagram.sequence, 1);
        assert_eq!(datagram.command, "ROT00600");
    }

    #[test]
    fn trailing_checksum_recomputes_over_preceding_bytes() {
        let mut buf = BytesMut::new();
        encode_datagram(42, "STOPZERO", &mut buf).unwrap();

        let body = &buf[..buf.len() - TRAILER_SIZE];
        let carried = u16::from_be_bytes([buf[buf.len() - 2], buf[buf.len() - 1]]);
        assert!(Crc16::verify(body, carried));
    }

    #[test]
    fn corrupted_payload_rejected() {
        let mut buf = BytesMut::new();
        encode_datagram(7, "SPX00100", &mut buf).unwrap();
        buf[4] ^= 0xFF;

        assert!(matches!(
            decode_datagram(&buf),
            Err(WireError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn short_packet_rejected() {
        assert!(matches!(
            decode_datagram(&[0x00, 0x01, 0x02]),
            Err(WireError::Truncated { len: 3, min: 4 })
        ));
    }

    #[test]
    fn non_ascii_command_rejected_on_encode() {
        let mut buf = BytesMut::new();
        let err = encode_datagram(1, "ROT±600", &mut buf).unwrap_err();
        assert!(matches!(err, WireError::NotAscii(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn oversized_command_rejected() {
        let mut buf = BytesMut::new();
        let long = "X".repeat(MAX_COMMAND_LEN + 1);
        let err = encode_datagram(1, &long, &mut buf).unwrap_err();
        assert!(matches!(err, WireError::CommandTooLong { .. }));
    }

    #[test]
    fn sequence_starts_at_one() {
        let mut seq = SequenceCounter::new();
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.advance(), 1);
        assert_eq!(seq.advance(), 2);
        assert_eq!(seq.advance(), 3);
    }

    #[test]
    fn sequence_wraps_to_zero_after_ffff() {
        let mut seq = SequenceCounter::new();
        for _ in 0..0xFFFF {
            seq.advance();
        }
        assert_eq!(seq.current(), 0xFFFF);
        assert_eq!(seq.advance(), 0);
        assert_eq!(seq.advance(), 1);
    }

    #[test]
    fn empty_command_encodes() {
        // Degenerate but well-formed: header + trailer only.
        let mut buf = BytesMut::new();
        encode_datagram(5, "", &mut buf).unwrap();
        let datagram = decode_datagram(&buf).unwrap();
        assert_eq!(datagram.sequence, 5);
        assert!(datagram.command.is_empty());
    }
}
