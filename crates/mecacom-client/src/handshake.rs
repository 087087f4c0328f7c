//! TCP greeting and password exchange.
//!
//! The bridge speaks first. The exchange is three CRLF-terminated lines:
//!
//! ```text
//! bridge: I'm NLAB-MecanumCommander. Please authenticate yourself.
//! client: <password>
//! bridge: NLAB-MecanumCommander <version info> Ready.
//! ```
//!
//! Generic over `BufRead`/`Write` so it runs against in-memory streams in
//! tests and a split TCP stream in production. The password travels in
//! clear text by protocol design.

use std::io::{BufRead, ErrorKind, Write};

use tracing::{debug, info};

use crate::error::{ClientError, Result};

/// Exact greeting the bridge must present, compared after trimming.
pub const GREETING: &str = "I'm NLAB-MecanumCommander. Please authenticate yourself.";

/// Required prefix of the trimmed welcome line (its first 21 characters).
pub const WELCOME_PREFIX: &str = "NLAB-MecanumCommander";

/// Required suffix of the trimmed welcome line (its last 6 characters).
pub const WELCOME_SUFFIX: &str = "Ready.";

/// Authenticate against the bridge over an established stream.
///
/// Returns the trimmed welcome line on success. Fails with
/// [`ClientError::ProtocolMismatch`] when the greeting is not the commander
/// banner, and [`ClientError::Authentication`] when the welcome line does
/// not carry the expected prefix and suffix (typically a wrong password).
pub fn authenticate<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    password: &str,
) -> Result<String> {
    let banner = read_trimmed_line(reader)?;
    if banner != GREETING {
        return Err(ClientError::ProtocolMismatch { banner });
    }
    debug!("bridge banner verified");

    writer.write_all(password.as_bytes())?;
    writer.write_all(b"\r\n")?;
    writer.flush()?;

    let welcome = read_trimmed_line(reader)?;
    if !welcome.starts_with(WELCOME_PREFIX) || !welcome.ends_with(WELCOME_SUFFIX) {
        return Err(ClientError::Authentication { welcome });
    }

    info!(%welcome, "authenticated with bridge");
    Ok(welcome)
}

fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Err(ClientError::Io(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "bridge closed the connection during handshake",
        )));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(input: &str, password: &str) -> (Result<String>, Vec<u8>) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut written = Vec::new();
        let result = authenticate(&mut reader, &mut written, password);
        (result, written)
    }

    #[test]
    fn successful_handshake() {
        let input = "I'm NLAB-MecanumCommander. Please authenticate yourself.\r\n\
                     NLAB-MecanumCommander v2 (TCP/UDP) Ready.\r\n";
        let (result, written) = run(input, "secret");

        assert_eq!(result.unwrap(), "NLAB-MecanumCommander v2 (TCP/UDP) Ready.");
        assert_eq!(written, b"secret\r\n");
    }

    #[test]
    fn wrong_banner_is_protocol_mismatch() {
        let (result, written) = run("220 some.smtp.server ESMTP\r\n", "secret");

        match result.unwrap_err() {
            ClientError::ProtocolMismatch { banner } => {
                assert_eq!(banner, "220 some.smtp.server ESMTP");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Never send the password to an unverified peer.
        assert!(written.is_empty());
    }

    #[test]
    fn welcome_without_prefix_rejected() {
        let input = "I'm NLAB-MecanumCommander. Please authenticate yourself.\r\n\
                     SomethingElse v2 Ready.\r\n";
        let (result, _written) = run(input, "secret");
        assert!(matches!(
            result.unwrap_err(),
            ClientError::Authentication { .. }
        ));
    }

    #[test]
    fn welcome_without_ready_suffix_rejected() {
        let input = "I'm NLAB-MecanumCommander. Please authenticate yourself.\r\n\
                     NLAB-MecanumCommander access denied\r\n";
        let (result, _written) = run(input, "wrong-password");
        match result.unwrap_err() {
            ClientError::Authentication { welcome } => {
                assert_eq!(welcome, "NLAB-MecanumCommander access denied");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn minimal_welcome_accepted() {
        // Prefix and suffix may overlap any middle content, including none
        // beyond a separating space.
        let input = "I'm NLAB-MecanumCommander. Please authenticate yourself.\r\n\
                     NLAB-MecanumCommander Ready.\r\n";
        let (result, _written) = run(input, "secret");
        assert!(result.is_ok());
    }

    #[test]
    fn eof_during_handshake_is_io_error() {
        let (result, _written) = run("", "secret");
        assert!(matches!(result.unwrap_err(), ClientError::Io(_)));
    }

    #[test]
    fn eof_after_banner_is_io_error() {
        let input = "I'm NLAB-MecanumCommander. Please authenticate yourself.\r\n";
        let (result, written) = run(input, "secret");
        assert!(matches!(result.unwrap_err(), ClientError::Io(_)));
        assert_eq!(written, b"secret\r\n");
    }
}
