use std::fmt;

use mecacom_client::ClientError;
use mecacom_transport::TransportError;

// Exit codes. CONNECT_FAILED matches the exit(2) contract of the original
// bridge client distribution.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const CONNECT_FAILED: i32 = 2;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: std::io::Error) -> CliError {
    let code = match err.kind() {
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => TIMEOUT,
        std::io::ErrorKind::ConnectionRefused => CONNECT_FAILED,
        std::io::ErrorKind::UnexpectedEof => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    match err {
        ClientError::Configuration(_) => CliError::new(USAGE, format!("{context}: {err}")),
        ClientError::Transport(TransportError::Refused { .. })
        | ClientError::Transport(TransportError::Resolve { .. }) => {
            CliError::new(CONNECT_FAILED, format!("{context}: {err}"))
        }
        ClientError::Transport(TransportError::Io(source))
        | ClientError::Transport(TransportError::Bind(source)) => io_error(context, source),
        ClientError::Transport(TransportError::Closed) => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
        ClientError::ProtocolMismatch { .. } | ClientError::Authentication { .. } => {
            CliError::new(CONNECT_FAILED, format!("{context}: {err}"))
        }
        ClientError::Io(source) => io_error(context, source),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_maps_to_connect_code() {
        let err = client_error(
            "connect failed",
            ClientError::Authentication {
                welcome: "access denied".to_string(),
            },
        );
        assert_eq!(err.code, CONNECT_FAILED);
        assert!(err.message.contains("connect failed"));
    }

    #[test]
    fn bad_selector_maps_to_usage() {
        let err = client_error("connect failed", ClientError::Configuration(9));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn handshake_timeout_maps_to_timeout() {
        let source = std::io::Error::from(std::io::ErrorKind::TimedOut);
        let err = client_error("connect failed", ClientError::Io(source));
        assert_eq!(err.code, TIMEOUT);
    }
}
