//! UPIU wire-message codec.
//!
//! Builds the bsg request buffers for the two transaction families ufsprims
//! speaks — query requests (descriptor/attribute/flag access) and UIC DME
//! commands — and decodes the matching replies. All multi-byte UPIU fields
//! are written and read explicitly: header words big-endian per JESD223,
//! UIC argument words host-endian per UFSHCI. No struct overlays.
//!
//! Buffer geometry (bsg framing around the UPIU):
//!
//! ```text
//! request:  msgcode (4B, native) | header (3 x 4B, BE) | payload (20B)
//! reply:    result (4B, native)  | rcv_len (4B)        | echoed UPIU (32B)
//! ```

pub mod error;
pub mod query;
pub mod uic;

pub use error::{Result, UpiuError};
pub use query::{
    decode_query_reply, encode_query_request, QueryOpcode, QueryReply, QueryRequest,
    DESCRIPTOR_BUFFER_SIZE, QUERY_FUNC_STD_READ, QUERY_FUNC_STD_WRITE,
};
pub use uic::{
    attr_id_of, attr_type, decode_uic_reply, encode_uic_command, mib_sel, select_rx, select_tx,
    DmeOpcode, UicCommand, ATTR_SET_NOR, ATTR_SET_ST,
};

/// Total bsg request buffer size: 4-byte msgcode + 32-byte UPIU.
pub const BSG_REQUEST_LEN: usize = 36;

/// Total bsg reply buffer size: 4-byte result + 4-byte received length +
/// 32-byte echoed UPIU.
pub const BSG_REPLY_LEN: usize = 40;

/// UPIU transaction code for query requests.
pub const UPIU_TRANSACTION_QUERY_REQ: u32 = 0x16;

/// bsg message code for UIC commands.
pub const UPIU_TRANSACTION_UIC_CMD: u32 = 0x1F;
