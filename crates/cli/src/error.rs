//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (allocation failure, bad dimensions, empty registry)
//! - 11: I/O error (config file read, snapshot write)
//! - 12: input error (bad config values, colors, scripts, JSON params)
//! - 13: serialization error

use flowfield_core::FlowError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A simulation-level error (allocation failure, bad canvas size).
    Flow(FlowError),
    /// An I/O error (config file, snapshot).
    Io(String),
    /// A user input error (bad config value, color, script entry, JSON).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Flow(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Flow(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<FlowError> for CliError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Io(msg) => CliError::Io(msg),
            e @ (FlowError::InvalidConfig { .. } | FlowError::InvalidColor(_)) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Flow(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_error_exit_code_is_10() {
        let err = CliError::Flow(FlowError::AllocationFailed { requested: 1 });
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad script".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_flow_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(FlowError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_flow_error_bad_config_routes_to_input() {
        let cli_err = CliError::from(FlowError::invalid_config("integration_step", "must be positive"));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("integration_step"));
        let cli_err = CliError::from(FlowError::InvalidColor("zz".into()));
        assert_eq!(cli_err.exit_code(), 12);
    }

    #[test]
    fn from_flow_error_other_routes_to_cli_flow() {
        let cli_err = CliError::from(FlowError::InvalidDimensions);
        assert_eq!(cli_err.exit_code(), 10);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
