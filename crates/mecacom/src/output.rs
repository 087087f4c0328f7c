use std::io::IsTerminal;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

/// Summary of one drive session, printed when the loop ends.
#[derive(Debug, Serialize)]
pub struct DriveReport {
    pub transport: &'static str,
    pub peer: String,
    pub commands_sent: u64,
    pub rate_limited: u64,
    pub stops_suppressed: u64,
    pub elapsed_ms: u128,
    pub interrupted: bool,
}

pub fn print_report(report: &DriveReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Text => {
            println!(
                "sent {} command(s) over {} to {} in {} ms ({} rate-limited, {} stop(s) suppressed){}",
                report.commands_sent,
                report.transport,
                report.peer,
                report.elapsed_ms,
                report.rate_limited,
                report.stops_suppressed,
                if report.interrupted {
                    " [interrupted]"
                } else {
                    ""
                },
            );
        }
    }
}
