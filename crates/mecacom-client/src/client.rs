use std::io::BufReader;
use std::time::{Duration, Instant};

use bytes::BytesMut;
use tracing::{debug, error, info};

use mecacom_transport::CommandLink;
use mecacom_wire::{encode_datagram, velocity_lines, MotionCommand, SequenceCounter, STOP_LINE};

use crate::config::{ClientConfig, FatalPolicy, Protocol};
use crate::error::Result;
use crate::handshake;

/// What happened to one send operation.
///
/// Only `Sent` touched the wire. The other two are deliberate no-ops which
/// leave all session state unchanged; they are reported here (and logged)
/// rather than raised as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The command reached the transmit call and session state was updated.
    Sent,
    /// Blocked by the minimum-interval rate gate.
    RateLimited,
    /// Suppressed because the previous sent command was already STOPZERO.
    StopSuppressed,
}

/// One synchronous session against a commander bridge.
///
/// Owns the socket for its whole lifetime; the socket closes when the
/// client drops, on every exit path. No background threads, no locking:
/// every operation completes (or is skipped) before returning.
pub struct CommanderClient {
    link: CommandLink,
    min_send_interval: Duration,
    last_sent: Option<Instant>,
    last_was_stop: bool,
    sequence: SequenceCounter,
    scratch: BytesMut,
}

impl CommanderClient {
    /// Open a session per `config`, honoring its
    /// [`FatalPolicy`](crate::config::FatalPolicy): with
    /// `Terminate` (the default) any setup failure is logged and the
    /// process exits with code 2; with `Propagate` the typed error is
    /// returned.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        match Self::try_connect(&config) {
            Ok(client) => Ok(client),
            Err(err) => match config.fatal_policy {
                FatalPolicy::Propagate => Err(err),
                FatalPolicy::Terminate => {
                    error!("session setup failed: {err}");
                    std::process::exit(2);
                }
            },
        }
    }

    fn try_connect(config: &ClientConfig) -> Result<Self> {
        let link = match config.protocol {
            Protocol::Tcp => {
                let mut link = CommandLink::connect_tcp(&config.host, config.port)?;
                link.set_read_timeout(config.read_timeout)?;
                let mut reader = BufReader::new(link.try_clone()?);
                handshake::authenticate(&mut reader, &mut link, &config.password)?;
                link
            }
            // No handshake; the password is accepted but never transmitted.
            Protocol::Udp => CommandLink::open_udp(&config.host, config.port)?,
        };

        info!(
            transport = link.transport_name(),
            peer = %link.peer_addr(),
            "commander session open"
        );

        Ok(Self {
            link,
            min_send_interval: config.min_send_interval,
            last_sent: None,
            last_was_stop: false,
            sequence: SequenceCounter::new(),
            scratch: BytesMut::with_capacity(64),
        })
    }

    /// Send one velocity update (translation X/Y plus rotation).
    ///
    /// TCP sends the three command lines as a single write. UDP sends three
    /// independent datagrams in SPX, SPY, ROT order; a failure partway
    /// through is not rolled back (earlier datagrams stay sent) and the
    /// session timestamp is only advanced on full success.
    pub fn set_velocity(
        &mut self,
        speed_x: i32,
        speed_y: i32,
        rotation: i32,
    ) -> Result<SendOutcome> {
        if !self.gate_open() {
            debug!(speed_x, speed_y, rotation, "rate gate closed, velocity command skipped");
            return Ok(SendOutcome::RateLimited);
        }

        if self.link.is_datagram() {
            self.send_datagram(&MotionCommand::SpeedX(speed_x).render())?;
            self.send_datagram(&MotionCommand::SpeedY(speed_y).render())?;
            self.send_datagram(&MotionCommand::Rotation(rotation).render())?;
        } else {
            let lines = velocity_lines(speed_x, speed_y, rotation);
            self.link.transmit(lines.as_bytes())?;
            debug!(command = %lines.escape_debug(), "tcp command sent");
        }

        self.last_sent = Some(Instant::now());
        self.last_was_stop = false;
        Ok(SendOutcome::Sent)
    }

    /// Send STOPZERO, zeroing all motion.
    ///
    /// Idempotent on the wire: if the previous sent command was already
    /// STOPZERO this is a no-op (checked before the rate gate). Otherwise
    /// the usual rate gate applies.
    pub fn stop(&mut self) -> Result<SendOutcome> {
        if self.last_was_stop {
            debug!("previous command was already STOPZERO, suppressed");
            return Ok(SendOutcome::StopSuppressed);
        }
        if !self.gate_open() {
            debug!("rate gate closed, STOPZERO skipped");
            return Ok(SendOutcome::RateLimited);
        }

        if self.link.is_datagram() {
            self.send_datagram(&MotionCommand::StopZero.render())?;
        } else {
            self.link.transmit(STOP_LINE.as_bytes())?;
            debug!("tcp STOPZERO sent");
        }

        self.last_sent = Some(Instant::now());
        self.last_was_stop = true;
        Ok(SendOutcome::Sent)
    }

    /// Whether the most recently sent command was STOPZERO.
    pub fn is_stopped(&self) -> bool {
        self.last_was_stop
    }

    /// The configured minimum inter-command interval.
    pub fn min_send_interval(&self) -> Duration {
        self.min_send_interval
    }

    /// Close the session. Idempotent; the socket is also released when the
    /// client drops.
    pub fn shutdown(&self) -> Result<()> {
        self.link.shutdown()?;
        Ok(())
    }

    fn gate_open(&self) -> bool {
        match self.last_sent {
            None => true,
            Some(at) => at.elapsed() >= self.min_send_interval,
        }
    }

    fn send_datagram(&mut self, command: &str) -> Result<()> {
        let sequence = self.sequence.advance();
        self.scratch.clear();
        encode_datagram(sequence, command, &mut self.scratch)?;
        let len = self.scratch.len();
        let checksum = u16::from_be_bytes([self.scratch[len - 2], self.scratch[len - 1]]);
        self.link.transmit(&self.scratch)?;
        debug!(sequence, command, checksum, "udp packet sent");
        Ok(())
    }
}

impl std::fmt::Debug for CommanderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommanderClient")
            .field("link", &self.link)
            .field("min_send_interval", &self.min_send_interval)
            .field("last_was_stop", &self.last_was_stop)
            .field("sequence", &self.sequence.current())
            .finish()
    }
}
