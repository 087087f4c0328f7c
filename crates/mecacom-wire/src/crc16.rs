//! CRC-16/XMODEM checksum used by the UDP command protocol.
//!
//! Polynomial 0x1021, initial value 0x0000, no reflection, no final XOR.
//! This is the variant the bridge computes over `sequence ++ command` bytes.

/// CRC-16/XMODEM polynomial (CCITT, MSB-first).
const CRC16_POLYNOMIAL: u16 = 0x1021;

/// Pre-computed lookup table, generated at compile time.
const CRC16_TABLE: [u16; 256] = generate_crc16_table();

const fn generate_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut j = 0;

        while j < 8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ CRC16_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
            j += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Incremental CRC-16/XMODEM calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc16 {
    state: u16,
}

impl Crc16 {
    /// Start a new checksum at the XMODEM initial value (0x0000).
    pub fn new() -> Self {
        Self { state: 0 }
    }

    /// Feed more bytes into the running checksum.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.state >> 8) ^ u16::from(byte)) & 0xFF;
            self.state = (self.state << 8) ^ CRC16_TABLE[index as usize];
        }
    }

    /// The checksum over everything fed so far.
    pub fn finalize(self) -> u16 {
        self.state
    }

    /// One-shot checksum over a byte slice.
    pub fn compute(data: &[u8]) -> u16 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Check a slice against an expected checksum.
    pub fn verify(data: &[u8], expected: u16) -> bool {
        Self::compute(data) == expected
    }
}
