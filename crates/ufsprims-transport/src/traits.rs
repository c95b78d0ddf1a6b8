use crate::error::Result;

/// Data-phase direction of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Host writes the data buffer to the device (dout).
    ToDevice,
    /// Device fills the data buffer (din).
    FromDevice,
}

/// One blocking UPIU exchange against a UFS management endpoint.
///
/// Implemented by [`crate::BsgDevice`] for real hardware and by scripted
/// fakes in tests. Exactly one request/response round trip per call; the
/// transport never retries.
pub trait UpiuTransport {
    /// Send `request`, block until the device responds, and fill `reply`.
    ///
    /// `data` is the optional data segment: an empty slice means the
    /// exchange has no data phase. For [`Direction::FromDevice`] the
    /// device fills `data`; for [`Direction::ToDevice`] its contents are
    /// transferred to the device.
    ///
    /// Fails when the underlying call reports a non-zero driver,
    /// transport, or device status, or when the logical result word in
    /// the reply is non-zero.
    fn exchange(
        &self,
        request: &[u8],
        reply: &mut [u8],
        data: &mut [u8],
        dir: Direction,
    ) -> Result<()>;
}
