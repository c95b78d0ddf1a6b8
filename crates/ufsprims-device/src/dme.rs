use bytes::BytesMut;
use tracing::debug;
use ufsprims_transport::{Direction, UpiuTransport};
use ufsprims_upiu::{decode_uic_reply, encode_uic_command, UicCommand, BSG_REPLY_LEN};

use crate::error::Result;

/// Which end of the link a DME command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmeTarget {
    /// The host controller.
    Local,
    /// The storage device across the link.
    Peer,
}

impl DmeTarget {
    pub fn is_peer(self) -> bool {
        matches!(self, Self::Peer)
    }
}

/// DME get of the attribute addressed by a packed argument-1 word.
///
/// One fresh exchange per call; nothing is cached.
pub fn dme_get<T: UpiuTransport + ?Sized>(dev: &T, attr_sel: u32, target: DmeTarget) -> Result<u32> {
    let value = send_uic(dev, &UicCommand::get(attr_sel, target.is_peer()))?;
    debug!(attr_sel, ?target, value, "dme get");
    Ok(value)
}

/// DME set. Success only when the echoed config result code is zero.
pub fn dme_set<T: UpiuTransport + ?Sized>(
    dev: &T,
    attr_sel: u32,
    attr_set: u32,
    value: u32,
    target: DmeTarget,
) -> Result<()> {
    send_uic(dev, &UicCommand::set(attr_sel, attr_set, value, target.is_peer()))?;
    debug!(attr_sel, ?target, value, "dme set");
    Ok(())
}

fn send_uic<T: UpiuTransport + ?Sized>(dev: &T, cmd: &UicCommand) -> Result<u32> {
    let mut wire = BytesMut::new();
    encode_uic_command(cmd, &mut wire);

    let mut reply = [0u8; BSG_REPLY_LEN];
    dev.exchange(&wire, &mut reply, &mut [], Direction::FromDevice)?;

    Ok(decode_uic_reply(&reply)?)
}
