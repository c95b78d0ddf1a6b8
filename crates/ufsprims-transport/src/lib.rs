//! Blocking UFS BSG transport.
//!
//! Provides the single request/response exchange primitive the rest of
//! ufsprims is built on: one `SG_IO` ioctl against a ufs-bsg character
//! device per call, carrying an opaque request buffer and filling an
//! opaque reply buffer. Message layout knowledge lives one layer up in
//! `ufsprims-upiu`.

pub mod error;
pub mod traits;

#[cfg(unix)]
pub mod bsg;

pub use error::{Result, TransportError};
pub use traits::{Direction, UpiuTransport};

#[cfg(unix)]
pub use bsg::BsgDevice;
