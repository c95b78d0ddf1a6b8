use bytes::{BufMut, BytesMut};
use ufsprims_transport::Direction;

use crate::error::{Result, UpiuError};
use crate::{BSG_REPLY_LEN, BSG_REQUEST_LEN, UPIU_TRANSACTION_QUERY_REQ};

/// Query request function code: standard read.
pub const QUERY_FUNC_STD_READ: u8 = 0x01;
/// Query request function code: standard write.
pub const QUERY_FUNC_STD_WRITE: u8 = 0x81;

/// Descriptor transfer buffer size; large enough for every descriptor
/// defined through JESD220 4.1.
pub const DESCRIPTOR_BUFFER_SIZE: usize = 256;

/// Byte offset of the 8-bit query response code within the reply buffer
/// (header word 1, bits 15..8 of the echoed UPIU).
const RSP_CODE_OFFSET: usize = 14;

/// The eight query opcodes, with their stable wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum QueryOpcode {
    ReadDescriptor = 0x1,
    WriteDescriptor = 0x2,
    ReadAttribute = 0x3,
    WriteAttribute = 0x4,
    ReadFlag = 0x5,
    SetFlag = 0x6,
    ClearFlag = 0x7,
    ToggleFlag = 0x8,
}

impl QueryOpcode {
    /// Map a wire value to an opcode; `None` for anything outside 1..=8.
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0x1 => Some(Self::ReadDescriptor),
            0x2 => Some(Self::WriteDescriptor),
            0x3 => Some(Self::ReadAttribute),
            0x4 => Some(Self::WriteAttribute),
            0x5 => Some(Self::ReadFlag),
            0x6 => Some(Self::SetFlag),
            0x7 => Some(Self::ClearFlag),
            0x8 => Some(Self::ToggleFlag),
            _ => None,
        }
    }

    /// Data-phase direction this opcode requires.
    pub fn direction(self) -> Direction {
        match self {
            Self::ReadDescriptor | Self::ReadAttribute | Self::ReadFlag => Direction::FromDevice,
            _ => Direction::ToDevice,
        }
    }

    /// Query function code this opcode travels under.
    pub fn function(self) -> u8 {
        match self.direction() {
            Direction::FromDevice => QUERY_FUNC_STD_READ,
            Direction::ToDevice => QUERY_FUNC_STD_WRITE,
        }
    }
}

/// A fully-specified query request, ready to encode.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub opcode: QueryOpcode,
    pub idn: u8,
    pub index: u8,
    pub selector: u8,
    /// Data-segment length; meaningful for descriptor reads only.
    pub length: u16,
    /// Attribute value; meaningful for write-attribute only.
    pub attr_value: u64,
}

/// Decoded fields of a successful query reply.
#[derive(Debug, Clone, Copy)]
pub struct QueryReply {
    /// Data-segment length reported in header word 2.
    pub data_segment_len: u16,
    /// 64-bit attribute value from the packed attribute layout.
    pub attr_value: u64,
    /// Low-order bit of the flag value word.
    pub flag_value: bool,
}

/// Encode a query request into the bsg request wire format.
///
/// Header word 0 carries the transaction type in its top byte, word 1 the
/// function code, word 2 the data-segment length. The 20-byte transaction
/// payload starts with opcode/idn/index/selector; descriptor reads add the
/// requested length (big-endian u16 at payload offset 6), attribute writes
/// use the packed layout with the value as a big-endian u64 at payload
/// offset 4.
pub fn encode_query_request(req: &QueryRequest, dst: &mut BytesMut) {
    let start = dst.len();
    dst.reserve(BSG_REQUEST_LEN);

    dst.put_u32_ne(UPIU_TRANSACTION_QUERY_REQ);

    dst.put_u32(UPIU_TRANSACTION_QUERY_REQ << 24);
    dst.put_u32((req.opcode.function() as u32) << 16);
    dst.put_u32(req.length as u32);

    dst.put_u8(req.opcode as u8);
    dst.put_u8(req.idn);
    dst.put_u8(req.index);
    dst.put_u8(req.selector);

    match req.opcode {
        QueryOpcode::WriteAttribute => {
            dst.put_u64(req.attr_value);
            dst.put_bytes(0, 8);
        }
        QueryOpcode::ReadDescriptor => {
            dst.put_u16(0); // reserved OSF
            dst.put_u16(req.length);
            dst.put_bytes(0, 12);
        }
        _ => {
            dst.put_bytes(0, 16);
        }
    }

    debug_assert_eq!(dst.len() - start, BSG_REQUEST_LEN);
}

/// Decode a query reply.
///
/// A non-zero response code is a protocol failure regardless of transport
/// status. On success every value field is extracted; the caller picks the
/// one its opcode defines.
pub fn decode_query_reply(reply: &[u8]) -> Result<QueryReply> {
    if reply.len() < BSG_REPLY_LEN {
        return Err(UpiuError::ShortReply { len: reply.len() });
    }

    let code = reply[RSP_CODE_OFFSET];
    if code != 0 {
        return Err(UpiuError::QueryFailed { code });
    }

    let data_segment_len = u16::from_be_bytes(reply[18..20].try_into().unwrap());
    let attr_value = u64::from_be_bytes(reply[24..32].try_into().unwrap());
    let flag_value = u32::from_be_bytes(reply[28..32].try_into().unwrap()) & 0x1 == 0x1;

    Ok(QueryReply {
        data_segment_len,
        attr_value,
        flag_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(req: &QueryRequest) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_query_request(req, &mut buf);
        buf.to_vec()
    }

    #[test]
    fn read_opcodes_select_from_device_and_std_read() {
        for raw in [0x1u8, 0x3, 0x5] {
            let op = QueryOpcode::from_raw(raw).unwrap();
            assert_eq!(op.direction(), Direction::FromDevice);
            assert_eq!(op.function(), QUERY_FUNC_STD_READ);
        }
    }

    #[test]
    fn write_opcodes_select_to_device_and_std_write() {
        for raw in [0x2u8, 0x4, 0x6, 0x7, 0x8] {
            let op = QueryOpcode::from_raw(raw).unwrap();
            assert_eq!(op.direction(), Direction::ToDevice);
            assert_eq!(op.function(), QUERY_FUNC_STD_WRITE);
        }
    }

    #[test]
    fn opcode_from_raw_rejects_out_of_range() {
        assert!(QueryOpcode::from_raw(0).is_none());
        assert!(QueryOpcode::from_raw(9).is_none());
    }

    #[test]
    fn read_descriptor_request_layout() {
        let wire = encode(&QueryRequest {
            opcode: QueryOpcode::ReadDescriptor,
            idn: 0x00,
            index: 0,
            selector: 0,
            length: 256,
            attr_value: 0,
        });

        assert_eq!(wire.len(), BSG_REQUEST_LEN);
        // msgcode, native endian
        assert_eq!(wire[0..4], 0x16u32.to_ne_bytes());
        // header word 0: transaction type in the top byte
        assert_eq!(wire[4..8], [0x16, 0, 0, 0]);
        // header word 1: standard read function code
        assert_eq!(wire[8..12], [0, QUERY_FUNC_STD_READ, 0, 0]);
        // header word 2: data segment length
        assert_eq!(wire[12..16], [0, 0, 0x01, 0x00]);
        // payload: opcode/idn/index/selector, then length at offset 6
        assert_eq!(wire[16..20], [0x1, 0x00, 0, 0]);
        assert_eq!(wire[22..24], [0x01, 0x00]);
    }

    #[test]
    fn write_attribute_request_packs_value_big_endian() {
        let wire = encode(&QueryRequest {
            opcode: QueryOpcode::WriteAttribute,
            idn: 0x2d,
            index: 0,
            selector: 0,
            length: 0,
            attr_value: 0x02,
        });

        assert_eq!(wire[8..12], [0, QUERY_FUNC_STD_WRITE, 0, 0]);
        assert_eq!(wire[16..20], [0x4, 0x2d, 0, 0]);
        // packed attribute layout: value immediately follows the selector
        assert_eq!(wire[20..28], 0x02u64.to_be_bytes());
    }

    #[test]
    fn reply_decode_extracts_values() {
        let mut reply = [0u8; BSG_REPLY_LEN];
        reply[18..20].copy_from_slice(&0x0020u16.to_be_bytes());
        reply[24..32].copy_from_slice(&0x0123_4567_89ab_cdefu64.to_be_bytes());

        let decoded = decode_query_reply(&reply).unwrap();
        assert_eq!(decoded.data_segment_len, 0x20);
        assert_eq!(decoded.attr_value, 0x0123_4567_89ab_cdef);
        assert!(decoded.flag_value); // low bit of bytes 28..32 (0xcdef)
    }

    #[test]
    fn reply_decode_fails_on_response_code() {
        let mut reply = [0u8; BSG_REPLY_LEN];
        reply[14] = 0xf9; // general failure
        let err = decode_query_reply(&reply).unwrap_err();
        assert!(matches!(err, UpiuError::QueryFailed { code: 0xf9 }));
    }

    #[test]
    fn reply_decode_rejects_truncated_buffer() {
        let err = decode_query_reply(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, UpiuError::ShortReply { len: 10 }));
    }
}
