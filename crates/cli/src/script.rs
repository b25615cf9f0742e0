//! Frame-scheduled commands for headless runs.
//!
//! Each `--at` entry is `FRAME:COMMAND`, where `COMMAND` is anything
//! [`Command::parse`] accepts. Commands scheduled for a frame are applied, in
//! the order given, before that frame is simulated.

use crate::error::CliError;
use flowfield_advect::Command;

/// A command to apply before frame `frame` (0-based).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledCommand {
    pub frame: usize,
    pub command: Command,
}

impl ScheduledCommand {
    pub fn parse(entry: &str) -> Result<Self, CliError> {
        let (frame, command) = entry
            .split_once(':')
            .ok_or_else(|| CliError::Input(format!("script entry '{entry}' must be FRAME:COMMAND")))?;
        let frame = frame
            .trim()
            .parse()
            .map_err(|e| CliError::Input(format!("bad frame in script entry '{entry}': {e}")))?;
        let command = Command::parse(command)
            .ok_or_else(|| CliError::Input(format!("unknown command in script entry '{entry}'")))?;
        Ok(Self { frame, command })
    }
}

/// Parses every entry and sorts by frame, keeping the given order within a
/// frame.
pub fn parse_script(entries: &[String]) -> Result<Vec<ScheduledCommand>, CliError> {
    let mut script = entries
        .iter()
        .map(|e| ScheduledCommand::parse(e))
        .collect::<Result<Vec<_>, _>>()?;
    script.sort_by_key(|s| s.frame);
    Ok(script)
}
