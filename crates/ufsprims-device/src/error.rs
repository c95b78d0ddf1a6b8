use ufsprims_transport::TransportError;
use ufsprims_upiu::UpiuError;

/// Operation-parameter problems, all detected before any I/O.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("query request opcode is not given")]
    MissingOpcode,

    #[error("unsupported query request opcode {0}")]
    UnknownOpcode(u8),

    #[error("query write descriptor is not supported")]
    WriteDescriptorUnsupported,

    #[error("query request idn is not given")]
    MissingIdn,

    #[error("query request index is not given")]
    MissingIndex,

    #[error("query request selector is not given")]
    MissingSelector,

    #[error("query write attribute needs a value")]
    MissingAttrValue,

    #[error("invalid lane number {0}")]
    InvalidLane(u32),

    #[error("invalid target test count {0}")]
    InvalidTargetTestCount(u32),

    #[error("voltage offset {voltage} outside capability range +/-{max}")]
    VoltageOutOfRange { voltage: i32, max: u32 },
}

/// Errors from device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Transport-level failure (ioctl, midlayer status, bsg result).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The device answered but reported a protocol failure in the reply.
    #[error("protocol error: {0}")]
    Protocol(#[from] UpiuError),

    /// Bad or missing operation parameters; rejected before any exchange.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The device does not implement the eye monitor.
    #[error("eye monitor not supported by this device")]
    EomUnsupported,

    /// The EOM result sequence would exceed its capability-derived size.
    /// Sizing is computed before the sweep; hitting this is fatal.
    #[error("EOM result count exceeds the device-derived maximum {capacity}")]
    Capacity { capacity: usize },

    /// A bounded poll loop ran out of attempts waiting on the device.
    #[error("device did not report completion on {register} within {attempts} polls")]
    PollBudgetExhausted {
        register: &'static str,
        attempts: u32,
    },

    /// The stress-I/O workload failed mid-sweep.
    #[error("stress I/O failed: {0}")]
    StressIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DeviceError>;
