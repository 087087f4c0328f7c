use clap::{Args, Subcommand, ValueEnum};

use mecacom_client::{Protocol, DEFAULT_PORT};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod drive;
pub mod stop;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive the robot: send velocity commands periodically, then stop.
    Drive(DriveArgs),
    /// Send a single STOPZERO command.
    Stop(StopArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Drive(args) => drive::run(args, format),
        Command::Stop(args) => stop::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProtocolArg {
    Tcp,
    Udp,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Tcp => Protocol::Tcp,
            ProtocolArg::Udp => Protocol::Udp,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Bridge host name or address.
    pub host: String,

    /// Wire protocol.
    #[arg(long, value_enum, default_value = "udp")]
    pub protocol: ProtocolArg,

    /// Bridge port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Password for TCP authentication (sent in clear text; unused over UDP).
    #[arg(long, env = "MECACOM_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Read timeout for the TCP handshake (e.g. "5s", "500ms").
    /// Without it a stalled bridge blocks indefinitely.
    #[arg(long, value_name = "DURATION")]
    pub handshake_timeout: Option<String>,
}

#[derive(Args, Debug)]
pub struct DriveArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Translation speed along X.
    #[arg(long = "speed-x", short = 'x', default_value_t = 0, allow_hyphen_values = true)]
    pub speed_x: i32,

    /// Translation speed along Y.
    #[arg(long = "speed-y", short = 'y', default_value_t = 0, allow_hyphen_values = true)]
    pub speed_y: i32,

    /// Rotation speed.
    #[arg(long = "rot", short = 'r', default_value_t = 0, allow_hyphen_values = true)]
    pub rotation: i32,

    /// How long to keep driving before stopping.
    #[arg(long, value_name = "DURATION", default_value = "2s")]
    pub duration: String,

    /// Command repeat interval. Must stay under the bridge's 500 ms
    /// disconnect watchdog.
    #[arg(long, value_name = "DURATION", default_value = "400ms")]
    pub interval: String,
}

#[derive(Args, Debug)]
pub struct StopArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Include build and target details.
    #[arg(long)]
    pub extended: bool,
}
