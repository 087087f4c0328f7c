/// Errors that can occur while encoding or decoding command frames.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The command text contains non-ASCII bytes.
    #[error("command text is not ASCII: {0:?}")]
    NotAscii(String),

    /// The command text exceeds the datagram command budget.
    #[error("command too long ({len} bytes, max {max})")]
    CommandTooLong { len: usize, max: usize },

    /// The datagram is shorter than header + trailer.
    #[error("datagram too short ({len} bytes, need at least {min})")]
    Truncated { len: usize, min: usize },

    /// The trailing checksum does not match the recomputed one.
    #[error("checksum mismatch (carried {carried:#06x}, computed {computed:#06x})")]
    ChecksumMismatch { carried: u16, computed: u16 },
}

pub type Result<T> = std::result::Result<T, WireError>;
