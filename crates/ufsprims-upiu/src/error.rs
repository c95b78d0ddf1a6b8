/// Errors raised while decoding UPIU replies.
#[derive(Debug, thiserror::Error)]
pub enum UpiuError {
    /// The query response code in the reply header is non-zero.
    #[error("query request failed with response code 0x{code:x}")]
    QueryFailed { code: u8 },

    /// The UIC config result code echoed in argument 2 is non-zero.
    #[error("UIC command failed with config result code 0x{code:x}")]
    UicConfigFailed { code: u8 },

    /// The reply buffer is shorter than a complete bsg reply.
    #[error("reply truncated ({len} bytes)")]
    ShortReply { len: usize },
}

pub type Result<T> = std::result::Result<T, UpiuError>;
