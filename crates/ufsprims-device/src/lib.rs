//! High-level UFS device operations.
//!
//! Sits between the wire codec and callers: validates operation requests,
//! dispatches the eight query opcodes, wraps DME get/set, and runs the
//! receiver eye-opening (EOM) characterization sweep. Every operation is
//! synchronous and performs exactly one transport exchange per protocol
//! step; nothing is cached between calls.

pub mod dme;
pub mod eom;
pub mod error;
pub mod mib;
pub mod query;

pub use dme::{dme_get, dme_set, DmeTarget};
pub use eom::{
    decode_step, encode_step, read_device_identity, DeviceIdentity, EomCapabilities, EomParams,
    EomRecord, EomSweep, StressWorkload, EOM_ERROR_COUNT_THRESHOLD, EOM_TARGET_TEST_COUNT_DEFAULT,
    EOM_TARGET_TEST_COUNT_MAX,
};
pub use error::{ConfigError, DeviceError, Result};
pub use query::{execute_query, read_descriptor, QueryOperation, QueryOutcome, QuerySpec};
