use std::path::PathBuf;

/// Errors that can occur in BSG transport exchanges.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the bsg device node.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The SG_IO ioctl itself failed.
    #[error("SG_IO ioctl failed: {0}")]
    Ioctl(std::io::Error),

    /// The midlayer reported a non-zero completion status.
    #[error(
        "SG_IO completed with device_status 0x{device:x}, transport_status 0x{transport:x}, \
         driver_status 0x{driver:x}"
    )]
    Status {
        device: u32,
        transport: u32,
        driver: u32,
    },

    /// The exchange completed cleanly at the transport level but the bsg
    /// reply carries a non-zero logical result word.
    #[error("bsg reply result 0x{result:x}")]
    ReplyResult { result: i32 },

    /// The caller-supplied reply buffer cannot hold the result word.
    #[error("reply buffer too short ({len} bytes)")]
    ReplyTooShort { len: usize },
}

pub type Result<T> = std::result::Result<T, TransportError>;
