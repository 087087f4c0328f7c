use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use mecacom_client::{ClientConfig, CommanderClient, FatalPolicy, SendOutcome};

use crate::cmd::{ConnectArgs, DriveArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_report, DriveReport, OutputFormat};

/// The bridge drops a client it has not heard from in this long.
const BRIDGE_WATCHDOG: Duration = Duration::from_millis(500);

pub fn run(args: DriveArgs, format: OutputFormat) -> CliResult<i32> {
    let duration = parse_duration(&args.duration)?;
    let interval = parse_duration(&args.interval)?;
    if interval >= BRIDGE_WATCHDOG {
        warn!(
            "repeat interval {:?} is at or above the bridge's {:?} disconnect watchdog",
            interval, BRIDGE_WATCHDOG
        );
    }

    let mut client = connect(&args.connect)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        let _ = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst));
    }

    let started = Instant::now();
    let deadline = started + duration;
    let mut commands_sent = 0u64;
    let mut rate_limited = 0u64;

    while Instant::now() < deadline && !interrupted.load(Ordering::SeqCst) {
        match client
            .set_velocity(args.speed_x, args.speed_y, args.rotation)
            .map_err(|err| client_error("send failed", err))?
        {
            SendOutcome::Sent => commands_sent += 1,
            SendOutcome::RateLimited => rate_limited += 1,
            // Velocity sends are never stop-suppressed.
            SendOutcome::StopSuppressed => {}
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        std::thread::sleep(interval.min(remaining));
    }

    let mut stops_suppressed = 0u64;
    loop {
        match client
            .stop()
            .map_err(|err| client_error("stop failed", err))?
        {
            SendOutcome::Sent => {
                commands_sent += 1;
                break;
            }
            SendOutcome::StopSuppressed => {
                stops_suppressed += 1;
                break;
            }
            // The last velocity send may still hold the gate; wait it out.
            SendOutcome::RateLimited => std::thread::sleep(client.min_send_interval()),
        }
    }

    let report = DriveReport {
        transport: transport_name(&args.connect),
        peer: format!("{}:{}", args.connect.host, args.connect.port),
        commands_sent,
        rate_limited,
        stops_suppressed,
        elapsed_ms: started.elapsed().as_millis(),
        interrupted: interrupted.load(Ordering::SeqCst),
    };
    client
        .shutdown()
        .map_err(|err| client_error("shutdown failed", err))?;
    print_report(&report, format);

    Ok(SUCCESS)
}

pub fn connect(args: &ConnectArgs) -> CliResult<CommanderClient> {
    let read_timeout = args
        .handshake_timeout
        .as_deref()
        .map(parse_duration)
        .transpose()?;

    let config = ClientConfig {
        protocol: args.protocol.into(),
        host: args.host.clone(),
        port: args.port,
        password: args.password.clone(),
        fatal_policy: FatalPolicy::Propagate,
        read_timeout,
        ..ClientConfig::default()
    };

    CommanderClient::connect(config).map_err(|err| client_error("connect failed", err))
}

pub fn transport_name(args: &ConnectArgs) -> &'static str {
    match args.protocol {
        crate::cmd::ProtocolArg::Tcp => "tcp",
        crate::cmd::ProtocolArg::Udp => "udp",
    }
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("400ms").unwrap(), Duration::from_millis(400));
        assert_eq!(parse_duration("5").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("10m").is_err());
    }
}
