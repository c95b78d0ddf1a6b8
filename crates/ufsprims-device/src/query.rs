use bytes::BytesMut;
use tracing::debug;
use ufsprims_transport::UpiuTransport;
use ufsprims_upiu::{
    decode_query_reply, encode_query_request, QueryOpcode, QueryReply, QueryRequest,
    BSG_REPLY_LEN, DESCRIPTOR_BUFFER_SIZE,
};

use crate::error::{ConfigError, Result};

/// A query operation as collected from the caller, fields still optional.
///
/// Mirrors the adaptation layer's view: every field must be explicitly
/// supplied before dispatch; [`QuerySpec::validate`] enforces that and
/// produces the concrete [`QueryOperation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySpec {
    pub opcode: Option<u8>,
    pub idn: Option<u8>,
    pub index: Option<u8>,
    pub selector: Option<u8>,
    pub value: Option<u64>,
}

impl QuerySpec {
    /// Check completeness and produce a dispatchable operation.
    ///
    /// Rejects unknown opcodes, the unsupported write-descriptor opcode,
    /// and a write-attribute without a value — all before any I/O.
    pub fn validate(&self) -> std::result::Result<QueryOperation, ConfigError> {
        let raw = self.opcode.ok_or(ConfigError::MissingOpcode)?;
        let opcode = QueryOpcode::from_raw(raw).ok_or(ConfigError::UnknownOpcode(raw))?;
        if opcode == QueryOpcode::WriteDescriptor {
            return Err(ConfigError::WriteDescriptorUnsupported);
        }

        let attr_value = match opcode {
            QueryOpcode::WriteAttribute => self.value.ok_or(ConfigError::MissingAttrValue)?,
            _ => 0, // ignored by every other opcode
        };

        Ok(QueryOperation {
            opcode,
            idn: self.idn.ok_or(ConfigError::MissingIdn)?,
            index: self.index.ok_or(ConfigError::MissingIndex)?,
            selector: self.selector.ok_or(ConfigError::MissingSelector)?,
            attr_value,
        })
    }
}

/// A validated query operation.
#[derive(Debug, Clone, Copy)]
pub struct QueryOperation {
    pub opcode: QueryOpcode,
    pub idn: u8,
    pub index: u8,
    pub selector: u8,
    pub attr_value: u64,
}

/// Typed result of a dispatched query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Raw descriptor bytes, truncated to the reply's data-segment length.
    Descriptor(Vec<u8>),
    /// 64-bit attribute value.
    Attribute(u64),
    /// Flag state.
    Flag(bool),
    /// Write or flag manipulation acknowledged.
    Written,
}

/// Dispatch one validated query operation: one transition per opcode.
pub fn execute_query<T: UpiuTransport + ?Sized>(
    dev: &T,
    op: &QueryOperation,
) -> Result<QueryOutcome> {
    match op.opcode {
        QueryOpcode::ReadDescriptor => {
            let buf = read_descriptor(dev, op.idn, op.index, op.selector)?;
            Ok(QueryOutcome::Descriptor(buf))
        }
        QueryOpcode::ReadAttribute => {
            let reply = send_query(dev, op, &mut [])?;
            Ok(QueryOutcome::Attribute(reply.attr_value))
        }
        QueryOpcode::ReadFlag => {
            let reply = send_query(dev, op, &mut [])?;
            Ok(QueryOutcome::Flag(reply.flag_value))
        }
        QueryOpcode::WriteAttribute
        | QueryOpcode::SetFlag
        | QueryOpcode::ClearFlag
        | QueryOpcode::ToggleFlag => {
            send_query(dev, op, &mut [])?;
            Ok(QueryOutcome::Written)
        }
        // Validation already refuses this; keep the dispatcher total.
        QueryOpcode::WriteDescriptor => Err(ConfigError::WriteDescriptorUnsupported.into()),
    }
}

/// Read a descriptor into a fresh buffer, truncated to the length the
/// device reported. Used by the dispatcher and by the EOM identity reads.
pub fn read_descriptor<T: UpiuTransport + ?Sized>(
    dev: &T,
    idn: u8,
    index: u8,
    selector: u8,
) -> Result<Vec<u8>> {
    let op = QueryOperation {
        opcode: QueryOpcode::ReadDescriptor,
        idn,
        index,
        selector,
        attr_value: 0,
    };

    let mut buf = vec![0u8; DESCRIPTOR_BUFFER_SIZE];
    let reply = send_query(dev, &op, &mut buf)?;
    buf.truncate(usize::from(reply.data_segment_len).min(DESCRIPTOR_BUFFER_SIZE));
    Ok(buf)
}

fn send_query<T: UpiuTransport + ?Sized>(
    dev: &T,
    op: &QueryOperation,
    data: &mut [u8],
) -> Result<QueryReply> {
    let request = QueryRequest {
        opcode: op.opcode,
        idn: op.idn,
        index: op.index,
        selector: op.selector,
        length: data.len() as u16,
        attr_value: op.attr_value,
    };

    let mut wire = BytesMut::new();
    encode_query_request(&request, &mut wire);

    let mut reply = [0u8; BSG_REPLY_LEN];
    dev.exchange(&wire, &mut reply, data, op.opcode.direction())?;

    let decoded = decode_query_reply(&reply)?;
    debug!(
        opcode = ?op.opcode,
        idn = op.idn,
        index = op.index,
        data_segment_len = decoded.data_segment_len,
        "query exchange complete"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(opcode: u8) -> QuerySpec {
        QuerySpec {
            opcode: Some(opcode),
            idn: Some(0x2d),
            index: Some(0),
            selector: Some(0),
            value: None,
        }
    }

    #[test]
    fn complete_spec_validates() {
        let op = spec(0x3).validate().unwrap();
        assert_eq!(op.opcode, QueryOpcode::ReadAttribute);
        assert_eq!(op.idn, 0x2d);
    }

    #[test]
    fn missing_fields_are_config_errors() {
        assert_eq!(
            QuerySpec::default().validate().unwrap_err(),
            ConfigError::MissingOpcode
        );

        let mut s = spec(0x3);
        s.idn = None;
        assert_eq!(s.validate().unwrap_err(), ConfigError::MissingIdn);

        let mut s = spec(0x3);
        s.index = None;
        assert_eq!(s.validate().unwrap_err(), ConfigError::MissingIndex);

        let mut s = spec(0x3);
        s.selector = None;
        assert_eq!(s.validate().unwrap_err(), ConfigError::MissingSelector);
    }

    #[test]
    fn write_attribute_requires_a_value() {
        assert_eq!(
            spec(0x4).validate().unwrap_err(),
            ConfigError::MissingAttrValue
        );

        let mut s = spec(0x4);
        s.value = Some(0x2);
        assert_eq!(s.validate().unwrap().attr_value, 0x2);
    }

    #[test]
    fn write_descriptor_is_rejected() {
        assert_eq!(
            spec(0x2).validate().unwrap_err(),
            ConfigError::WriteDescriptorUnsupported
        );
    }

    #[test]
    fn out_of_range_opcodes_are_rejected() {
        assert_eq!(
            spec(0x0).validate().unwrap_err(),
            ConfigError::UnknownOpcode(0x0)
        );
        assert_eq!(
            spec(0x9).validate().unwrap_err(),
            ConfigError::UnknownOpcode(0x9)
        );
    }
}
