mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "mecacom",
    version,
    about = "Remote-control client for the NLAB-MecanumCommander robot bridge"
)]
struct Cli {
    /// Output format on stdout.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_drive_subcommand() {
        let cli = Cli::try_parse_from([
            "mecacom",
            "drive",
            "192.168.0.20",
            "--protocol",
            "udp",
            "--rot",
            "600",
            "--duration",
            "2s",
        ])
        .expect("drive args should parse");

        match cli.command {
            Command::Drive(args) => {
                assert_eq!(args.connect.host, "192.168.0.20");
                assert_eq!(args.connect.port, 3475);
                assert_eq!(args.rotation, 600);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_negative_speeds() {
        let cli = Cli::try_parse_from([
            "mecacom",
            "drive",
            "localhost",
            "--speed-x",
            "-300",
            "--speed-y",
            "-25",
        ])
        .expect("negative speeds should parse");

        match cli.command {
            Command::Drive(args) => {
                assert_eq!(args.speed_x, -300);
                assert_eq!(args.speed_y, -25);
                assert_eq!(args.rotation, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_stop_with_tcp_password() {
        let cli = Cli::try_parse_from([
            "mecacom",
            "stop",
            "roverhost",
            "--protocol",
            "tcp",
            "--password",
            "secret",
        ])
        .expect("stop args should parse");

        match cli.command {
            Command::Stop(args) => {
                assert!(matches!(args.connect.protocol, cmd::ProtocolArg::Tcp));
                assert_eq!(args.connect.password, "secret");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_protocol() {
        let err = Cli::try_parse_from(["mecacom", "drive", "localhost", "--protocol", "serial"])
            .expect_err("unknown protocol should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
