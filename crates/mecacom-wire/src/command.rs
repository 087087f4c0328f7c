use std::fmt;

/// The STOPZERO line as written to a TCP stream.
pub const STOP_LINE: &str = "STOPZERO\r\n";

/// One motion command as understood by the bridge.
///
/// Velocity magnitudes are rendered as a sign-aware zero-padded 5-character
/// decimal field (`600` → `"00600"`, `-600` → `"-0600"`), byte-identical to
/// the `%05d` formatting the bridge was written against. The sign consumes
/// one character of the field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    /// Translation speed along X (`SPX`).
    SpeedX(i32),
    /// Translation speed along Y (`SPY`).
    SpeedY(i32),
    /// Rotation speed (`ROT`).
    Rotation(i32),
    /// Zero all motion (`STOPZERO`).
    StopZero,
}

impl MotionCommand {
    /// The 3- or 8-character command name on the wire.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            MotionCommand::SpeedX(_) => "SPX",
            MotionCommand::SpeedY(_) => "SPY",
            MotionCommand::Rotation(_) => "ROT",
            MotionCommand::StopZero => "STOPZERO",
        }
    }

    /// Render the bare command text, e.g. `"SPX00600"` or `"STOPZERO"`.
    ///
    /// This is the exact payload of one UDP datagram.
    pub fn render(&self) -> String {
        match self {
            MotionCommand::SpeedX(v) => format!("SPX{v:05}"),
            MotionCommand::SpeedY(v) => format!("SPY{v:05}"),
            MotionCommand::Rotation(v) => format!("ROT{v:05}"),
            MotionCommand::StopZero => "STOPZERO".to_string(),
        }
    }

    /// Render the command as one CRLF-terminated TCP line.
    pub fn render_line(&self) -> String {
        let mut line = self.render();
        line.push_str("\r\n");
        line
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a full velocity update as one TCP write:
/// `"SPX%05d\r\nSPY%05d\r\nROT%05d\r\n"`.
///
/// The bridge accepts the three lines concatenated in a single write.
pub fn velocity_lines(speed_x: i32, speed_y: i32, rotation: i32) -> String {
    let mut out = String::with_capacity(30);
    out.push_str(&MotionCommand::SpeedX(speed_x).render_line());
    out.push_str(&MotionCommand::SpeedY(speed_y).render_line());
    out.push_str(&MotionCommand::Rotation(rotation).render_line());
    out
}
