use bytes::{BufMut, BytesMut};

use crate::error::{Result, UpiuError};
use crate::{BSG_REPLY_LEN, BSG_REQUEST_LEN, UPIU_TRANSACTION_UIC_CMD};

/// Normal attribute set.
pub const ATTR_SET_NOR: u32 = 0;
/// Static attribute set.
pub const ATTR_SET_ST: u32 = 1;

const MASK_UIC_CONFIG_RESULT_CODE: u32 = 0xFF;

/// Pack a UniPro/M-PHY attribute id and a lane/direction selector into the
/// DME argument-1 word: attribute in the high 16 bits, selector in the low.
pub fn mib_sel(attr: u32, sel: u32) -> u32 {
    ((attr & 0xFFFF) << 16) | (sel & 0xFFFF)
}

/// Attribute id carried in a packed argument-1 word.
pub fn attr_id_of(attr_sel: u32) -> u32 {
    (attr_sel >> 16) & 0xFFFF
}

/// Attribute-set type tag for DME set, packed into argument 2.
pub fn attr_type(set: u32) -> u32 {
    (set & 0xFF) << 16
}

/// Lane selector for a TX-side attribute.
pub fn select_tx(lane: u32) -> u32 {
    lane
}

/// Lane selector for an RX-side attribute.
pub fn select_rx(lane: u32) -> u32 {
    lane + 4
}

/// The four DME commands, with their stable wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DmeOpcode {
    Get = 0x01,
    Set = 0x02,
    PeerGet = 0x03,
    PeerSet = 0x04,
}

impl DmeOpcode {
    /// Select the command for a {get,set} x {local,peer} combination.
    pub fn new(set: bool, peer: bool) -> Self {
        match (set, peer) {
            (false, false) => Self::Get,
            (false, true) => Self::PeerGet,
            (true, false) => Self::Set,
            (true, true) => Self::PeerSet,
        }
    }
}

/// A DME command: opcode plus the three UFSHCI argument registers.
#[derive(Debug, Clone, Copy)]
pub struct UicCommand {
    pub opcode: DmeOpcode,
    pub arg1: u32,
    pub arg2: u32,
    pub arg3: u32,
}

impl UicCommand {
    /// DME get of the attribute addressed by a packed argument-1 word.
    pub fn get(attr_sel: u32, peer: bool) -> Self {
        Self {
            opcode: DmeOpcode::new(false, peer),
            arg1: attr_sel,
            arg2: 0,
            arg3: 0,
        }
    }

    /// DME set: attribute-set tag in argument 2, value in argument 3.
    pub fn set(attr_sel: u32, attr_set: u32, value: u32, peer: bool) -> Self {
        Self {
            opcode: DmeOpcode::new(true, peer),
            arg1: attr_sel,
            arg2: attr_type(attr_set),
            arg3: value,
        }
    }
}

/// Encode a UIC command into the bsg request wire format.
///
/// The UPIU header words stay zero; the four command words are host-endian
/// register values per UFSHCI 2.1 §5.6.1.
pub fn encode_uic_command(cmd: &UicCommand, dst: &mut BytesMut) {
    let start = dst.len();
    dst.reserve(BSG_REQUEST_LEN);

    dst.put_u32_ne(UPIU_TRANSACTION_UIC_CMD);
    dst.put_bytes(0, 12);

    dst.put_u32_ne(cmd.opcode as u32);
    dst.put_u32_ne(cmd.arg1);
    dst.put_u32_ne(cmd.arg2);
    dst.put_u32_ne(cmd.arg3);
    dst.put_bytes(0, 4);

    debug_assert_eq!(dst.len() - start, BSG_REQUEST_LEN);
}

/// Decode a UIC reply: the echoed command words sit where the request
/// carried them. A non-zero config-result code in argument 2 is a protocol
/// failure; otherwise argument 3 holds the value for a get (zero for set).
pub fn decode_uic_reply(reply: &[u8]) -> Result<u32> {
    if reply.len() < BSG_REPLY_LEN {
        return Err(UpiuError::ShortReply { len: reply.len() });
    }

    let arg2 = u32::from_ne_bytes(reply[28..32].try_into().unwrap());
    let code = (arg2 & MASK_UIC_CONFIG_RESULT_CODE) as u8;
    if code != 0 {
        return Err(UpiuError::UicConfigFailed { code });
    }

    Ok(u32::from_ne_bytes(reply[32..36].try_into().unwrap()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mib_sel_packs_attr_high_selector_low() {
        let word = mib_sel(0x00F6, select_rx(1));
        assert_eq!(word, 0x00F6_0005);
        assert_eq!(attr_id_of(word), 0x00F6);
    }

    #[test]
    fn lane_selectors() {
        assert_eq!(select_tx(0), 0);
        assert_eq!(select_tx(1), 1);
        assert_eq!(select_rx(0), 4);
        assert_eq!(select_rx(1), 5);
    }

    #[test]
    fn opcode_selection_covers_all_four_commands() {
        assert_eq!(DmeOpcode::new(false, false), DmeOpcode::Get);
        assert_eq!(DmeOpcode::new(true, false), DmeOpcode::Set);
        assert_eq!(DmeOpcode::new(false, true), DmeOpcode::PeerGet);
        assert_eq!(DmeOpcode::new(true, true), DmeOpcode::PeerSet);
    }

    #[test]
    fn set_command_wire_layout() {
        let mut buf = BytesMut::new();
        encode_uic_command(
            &UicCommand::set(mib_sel(0x1571, select_tx(0)), ATTR_SET_NOR, 0x11, false),
            &mut buf,
        );

        assert_eq!(buf.len(), BSG_REQUEST_LEN);
        assert_eq!(buf[0..4], 0x1Fu32.to_ne_bytes());
        // header words untouched
        assert_eq!(&buf[4..16], &[0u8; 12]);
        assert_eq!(buf[16..20], 0x02u32.to_ne_bytes());
        assert_eq!(buf[20..24], 0x1571_0000u32.to_ne_bytes());
        assert_eq!(buf[24..28], 0u32.to_ne_bytes());
        assert_eq!(buf[28..32], 0x11u32.to_ne_bytes());
    }

    #[test]
    fn get_reply_returns_argument3() {
        let mut reply = [0u8; BSG_REPLY_LEN];
        reply[32..36].copy_from_slice(&0xDEAD_BEEFu32.to_ne_bytes());
        assert_eq!(decode_uic_reply(&reply).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn non_zero_config_result_is_a_failure() {
        let mut reply = [0u8; BSG_REPLY_LEN];
        reply[28..32].copy_from_slice(&0x0000_0001u32.to_ne_bytes());
        reply[32..36].copy_from_slice(&0x1234u32.to_ne_bytes());
        let err = decode_uic_reply(&reply).unwrap_err();
        assert!(matches!(err, UpiuError::UicConfigFailed { code: 1 }));
    }
}
