//! Host-side UFS control and diagnostics over the Linux bsg interface.
//!
//! ufsprims encodes UPIU query and UIC wire messages, exchanges them
//! synchronously with a ufs-bsg device node, interprets descriptor,
//! attribute, and flag data, and runs the receiver eye-opening (EOM)
//! characterization sweep.
//!
//! # Crate Structure
//!
//! - [`transport`] — Blocking SG_IO exchange primitive
//! - [`upiu`] — Wire-message codec for query and UIC transactions
//! - [`registry`] — Characteristic registries and descriptor interpretation
//! - [`device`] — Query dispatch, DME access, and the EOM sweep engine

/// Re-export transport types.
pub mod transport {
    pub use ufsprims_transport::*;
}

/// Re-export UPIU codec types.
pub mod upiu {
    pub use ufsprims_upiu::*;
}

/// Re-export registry types.
pub mod registry {
    pub use ufsprims_registry::*;
}

/// Re-export device operation types.
pub mod device {
    pub use ufsprims_device::*;
}
