//! Rotate the robot at speed 600 for two seconds, then stop.
//!
//! The bridge drops clients it has not heard from in 500 ms, so the
//! velocity command is repeated every 400 ms.
//!
//! Run against a bridge on localhost:
//! ```text
//! cargo run --example rotate-robot
//! ```

use std::time::Duration;

use mecacom::client::{ClientConfig, CommanderClient, FatalPolicy, Protocol};

fn main() -> Result<(), mecacom::client::ClientError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut robot = CommanderClient::connect(ClientConfig {
        protocol: Protocol::Udp,
        host: "127.0.0.1".to_string(),
        fatal_policy: FatalPolicy::Propagate,
        ..ClientConfig::default()
    })?;

    for _ in 0..5 {
        robot.set_velocity(0, 0, 600)?;
        std::thread::sleep(Duration::from_millis(400));
    }

    robot.stop()?;
    Ok(())
}
