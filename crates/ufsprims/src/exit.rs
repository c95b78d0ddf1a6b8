use std::fmt;
use std::io;

use ufsprims_device::DeviceError;
use ufsprims_transport::TransportError;

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
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

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Open { source, .. } | TransportError::Ioctl(source) => {
            io_error(context, source)
        }
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Transport(err) => transport_error(context, err),
        DeviceError::Protocol(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        DeviceError::Config(_) => CliError::new(USAGE, format!("{context}: {err}")),
        DeviceError::EomUnsupported => CliError::new(FAILURE, format!("{context}: {err}")),
        DeviceError::PollBudgetExhausted { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        DeviceError::StressIo(source) => io_error(context, source),
        DeviceError::Capacity { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ufsprims_device::ConfigError;

    #[test]
    fn config_errors_map_to_usage() {
        let err = device_error("query failed", ConfigError::MissingIdn.into());
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("idn is not given"));
    }

    #[test]
    fn poll_exhaustion_maps_to_timeout() {
        let err = device_error(
            "eom failed",
            DeviceError::PollBudgetExhausted {
                register: "RX_EYEMON_Start",
                attempts: 10,
            },
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn permission_denied_is_distinguished() {
        let err = io_error(
            "open failed",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
