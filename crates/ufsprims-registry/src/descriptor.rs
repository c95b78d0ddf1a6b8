//! Table-driven descriptor interpretation.
//!
//! UFS descriptors are self-describing byte buffers: the first byte is the
//! descriptor's own length, and the spec names every field with a width
//! prefix (`b` byte, `w` word, `d` dword, `q` qword). The interpreter
//! walks a field table in offset order and decodes each field from the
//! raw buffer in network byte order, stopping at the first field that
//! would cross the end of the descriptor — trailing fields are simply
//! absent on devices built against older spec revisions.

use tracing::trace;

/// Decodes the raw bytes of one composite field into extra display lines.
///
/// Registered per field in a table; the stock implementation is
/// [`ExtendedUfsFeatures`], which expands the 32-bit extended-features
/// word into named capability bits.
pub trait FieldDecoder: Sync {
    fn render(&self, raw: &[u8]) -> Vec<String>;
}

/// One field of a descriptor layout.
pub struct DescField {
    /// Byte offset within the descriptor.
    pub offset: usize,
    /// Spec field name; the first character encodes the width.
    pub name: &'static str,
    /// Optional nested decoder for composite fields.
    pub decoder: Option<&'static dyn FieldDecoder>,
}

const fn field(offset: usize, name: &'static str) -> DescField {
    DescField {
        offset,
        name,
        decoder: None,
    }
}

/// Field width from the spec naming convention: `w` 2, `d` 4, `q` 8,
/// anything else (including an empty name) 1.
pub fn field_width(name: &str) -> usize {
    match name.as_bytes().first() {
        Some(b'w') => 2,
        Some(b'd') => 4,
        Some(b'q') => 8,
        _ => 1,
    }
}

fn is_reserved(name: &str) -> bool {
    name.starts_with("Reserved")
}

/// One decoded descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub offset: usize,
    pub name: &'static str,
    pub width: usize,
    /// Field value, read in network byte order.
    pub value: u64,
    /// Extra lines produced by the field's nested decoder.
    pub notes: Vec<String>,
}

impl RenderedField {
    /// The value formatted as fixed-width hex matching the field size.
    pub fn hex_value(&self) -> String {
        match self.width {
            2 => format!("0x{:04X}", self.value),
            4 => format!("0x{:08X}", self.value),
            8 => format!("0x{:016X}", self.value),
            _ => format!("0x{:02X}", self.value),
        }
    }
}

/// Decode `buf` against a field table.
///
/// `declared_len` is the transfer length the device reported; the
/// effective descriptor end is `min(declared_len, buf[0])` since the
/// length byte is authoritative for the descriptor's own extent.
/// Iteration stops — it does not merely skip — at the first field that
/// would cross that end. Reserved fields participate in the bounds check
/// but produce no output.
pub fn interpret(buf: &[u8], declared_len: usize, fields: &[DescField]) -> Vec<RenderedField> {
    let mut rendered = Vec::new();

    if buf.is_empty() {
        return rendered;
    }

    let end = declared_len.min(buf[0] as usize).min(buf.len());

    for field in fields {
        let width = field_width(field.name);
        if field.offset + width > end {
            trace!(
                offset = field.offset,
                width,
                end,
                "descriptor ends before field, stopping"
            );
            break;
        }

        if is_reserved(field.name) {
            continue;
        }

        let raw = &buf[field.offset..field.offset + width];
        let value = raw.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        let notes = match field.decoder {
            Some(decoder) => decoder.render(raw),
            None => Vec::new(),
        };

        rendered.push(RenderedField {
            offset: field.offset,
            name: field.name,
            width,
            value,
            notes,
        });
    }

    rendered
}

/// Decode a string descriptor into its character payload.
///
/// Layout: length byte, type byte, then the string bytes up to the
/// reported length; NUL padding bytes are dropped.
pub fn parse_string_descriptor(buf: &[u8]) -> String {
    let mut out = String::new();
    if buf.is_empty() {
        return out;
    }

    let len = (buf[0] as usize).min(buf.len());
    if len <= 2 {
        return out;
    }

    for &byte in &buf[2..len] {
        if byte != 0 {
            out.push(char::from(byte));
        }
    }

    out
}

/// Expands `dExtendedUFSFeaturesSupport` into its named capability bits
/// (JESD220D 4.1).
pub struct ExtendedUfsFeatures;

const EXTENDED_FEATURE_BITS: &[(u32, &str)] = &[
    (0, "Field Firmware Update (FFU)"),
    (1, "Production State Awareness (PSA)"),
    (2, "Device Life Span"),
    (3, "Refresh Operation"),
    (4, "High Temperature Operation"),
    (5, "Low Temperature Operation"),
    (6, "Extended Temperature"),
    (7, "HPB Extension"),
    (8, "WriteBooster"),
    (9, "Performance Throttling"),
    (10, "Advanced RPMB"),
    (11, "Zoned UFS Extension"),
    (12, "Device Level Exception Warning"),
    (13, "Host Initiated Defrag (HID)"),
    (14, "Barrier Support"),
    (15, "Clear Error History"),
    (16, "EXT_IID Support"),
    (17, "File Based Optimization (FBO)"),
    (18, "Fast Recovery Mode"),
    (19, "RPMB Authenticated Vendor CMD"),
];

impl FieldDecoder for ExtendedUfsFeatures {
    fn render(&self, raw: &[u8]) -> Vec<String> {
        if raw.len() < 4 {
            return vec!["[Incomplete data for extended features]".to_string()];
        }

        let features = u32::from_be_bytes(raw[0..4].try_into().unwrap());
        let mut lines = Vec::with_capacity(EXTENDED_FEATURE_BITS.len() + 2);
        lines.push("Extended UFS Features Support (JESD220D 4.1):".to_string());

        for &(bit, name) in EXTENDED_FEATURE_BITS {
            let supported = features & (1 << bit) != 0;
            lines.push(format!(
                "{name:<40}: {}",
                if supported { "Supported" } else { "Not supported" }
            ));
        }

        if features & 0xFFF0_0000 != 0 {
            lines.push(format!(
                "NOTE: Reserved bits 20-31 are set (0x{:08X})",
                features & 0xFFF0_0000
            ));
        }

        lines
    }
}

/// Device descriptor layout, JESD220 §14.1.4.
pub static DEVICE_DESCRIPTOR_FIELDS: &[DescField] = &[
    field(0x00, "bLength"),
    field(0x01, "bDescriptorIDN"),
    field(0x02, "bDevice"),
    field(0x03, "bDeviceClass"),
    field(0x04, "bDeviceSubClass"),
    field(0x05, "bProtocol"),
    field(0x06, "bNumberLU"),
    field(0x07, "bNumberWLU"),
    field(0x08, "bBootEnable"),
    field(0x09, "bDescrAccessEn"),
    field(0x0A, "bInitPowerMode"),
    field(0x0B, "bHighPriorityLUN"),
    field(0x0C, "bSecureRemovalType"),
    field(0x0D, "bSecurityLU"),
    field(0x0E, "bBackgroundOpsTermLat"),
    field(0x0F, "bInitActiveICCLevel"),
    field(0x10, "wSpecVersion"),
    field(0x12, "wManufactureDate"),
    field(0x14, "iManufacturerName"),
    field(0x15, "iProductName"),
    field(0x16, "iSerialNumber"),
    field(0x17, "iOemID"),
    field(0x18, "wManufacturerID"),
    field(0x1A, "bUD0BaseOffset"),
    field(0x1B, "bUDConfigPLength"),
    field(0x1C, "bDeviceRTTCap"),
    field(0x1D, "wPeriodicRTCUpdate"),
    field(0x1F, "bUFSFeaturesSupport"),
    field(0x20, "bFFUTimeout"),
    field(0x21, "bQueueDepth"),
    field(0x22, "wDeviceVersion"),
    field(0x24, "bNumSecureWPArea"),
    field(0x25, "dPSAMaxDataSize"),
    field(0x29, "bPSAStateTimeout"),
    field(0x2A, "iProductRevisionLevel"),
    field(0x2B, "Reserved"),
    field(0x40, "wHPBVersion"),
    field(0x42, "bHPBControl"),
    field(0x43, "Reserved1"),
    DescField {
        offset: 0x4F,
        name: "dExtendedUFSFeaturesSupport",
        decoder: Some(&ExtendedUfsFeatures),
    },
    field(0x53, "bWriteBoosterBufferPreserveUserSpaceEn"),
    field(0x54, "bWriteBoosterBufferType"),
    field(0x55, "dNumSharedWriteBoosterBufferAllocUnits"),
];

/// Device Health descriptor layout, JESD220 §14.1.6.
pub static DEVICE_HEALTH_DESCRIPTOR_FIELDS: &[DescField] = &[
    field(0x00, "bLength"),
    field(0x01, "bDescriptorIDN"),
    field(0x02, "bPreEOLInfo"),
    field(0x03, "bDeviceLifeTimeEstA"),
    field(0x04, "bDeviceLifeTimeEstB"),
    field(0x25, "dRefreshTotalCount"),
    field(0x29, "dRefreshProgress"),
];

/// The field table for a descriptor idn, when ufsprims carries one.
/// Callers fall back to a raw byte dump for descriptor types without a
/// table (configuration, unit, string, ...).
pub fn field_table_for(idn: u8) -> Option<&'static [DescField]> {
    match idn {
        0x0 => Some(DEVICE_DESCRIPTOR_FIELDS),
        0x9 => Some(DEVICE_HEALTH_DESCRIPTOR_FIELDS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_name_prefix() {
        assert_eq!(field_width("wSpecVersion"), 2);
        assert_eq!(field_width("dPSAMaxDataSize"), 4);
        assert_eq!(field_width("qTimestamp"), 8);
        assert_eq!(field_width("bLength"), 1);
        assert_eq!(field_width("iManufacturerName"), 1);
        assert_eq!(field_width(""), 1);
    }

    #[test]
    fn interpretation_reads_network_byte_order() {
        let mut buf = vec![0u8; 0x20];
        buf[0] = 0x20; // bLength
        buf[0x10] = 0x03; // wSpecVersion = 0x0310
        buf[0x11] = 0x10;

        let fields = interpret(&buf, buf.len(), DEVICE_DESCRIPTOR_FIELDS);
        let spec = fields.iter().find(|f| f.name == "wSpecVersion").unwrap();
        assert_eq!(spec.value, 0x0310);
        assert_eq!(spec.hex_value(), "0x0310");
    }

    #[test]
    fn stops_at_self_reported_length() {
        // Self-reported length 0x20: iManufacturerName (0x14, 1 byte)
        // still fits, wDeviceVersion (0x22..0x24) does not, and nothing
        // after it may appear either.
        let mut buf = vec![0xFFu8; 0x59];
        buf[0] = 0x20;

        let fields = interpret(&buf, buf.len(), DEVICE_DESCRIPTOR_FIELDS);
        assert!(fields.iter().any(|f| f.name == "iManufacturerName"));
        assert!(fields.iter().all(|f| f.offset + f.width <= 0x20));
        assert!(!fields.iter().any(|f| f.name == "wDeviceVersion"));
        assert!(!fields
            .iter()
            .any(|f| f.name == "dExtendedUFSFeaturesSupport"));
    }

    #[test]
    fn stops_at_declared_length_when_shorter() {
        let mut buf = vec![0u8; 0x59];
        buf[0] = 0x59;

        let fields = interpret(&buf, 0x10, DEVICE_DESCRIPTOR_FIELDS);
        // 0x10 + 2 > 0x10: wSpecVersion must already be cut off.
        assert_eq!(fields.last().unwrap().name, "bInitActiveICCLevel");
    }

    #[test]
    fn boundary_field_is_omitted_not_truncated() {
        // A field whose last byte would land exactly one past the end.
        let table: &[DescField] = &[field(0x1F, "wEdge")];
        let mut buf = vec![0u8; 0x40];
        buf[0] = 0x20;

        assert!(interpret(&buf, buf.len(), table).is_empty());
    }

    #[test]
    fn reserved_fields_bound_but_do_not_render() {
        let fields = {
            let mut buf = vec![0u8; 0x59];
            buf[0] = 0x59;
            interpret(&buf, buf.len(), DEVICE_DESCRIPTOR_FIELDS)
        };
        assert!(!fields.iter().any(|f| f.name.starts_with("Reserved")));

        // A reserved field past the end stops iteration for good.
        let table: &[DescField] = &[field(0x30, "Reserved"), field(0x02, "bAfter")];
        let mut buf = vec![0u8; 0x40];
        buf[0] = 0x10;
        assert!(interpret(&buf, buf.len(), table).is_empty());
    }

    #[test]
    fn empty_buffer_renders_nothing() {
        assert!(interpret(&[], 0x20, DEVICE_DESCRIPTOR_FIELDS).is_empty());
    }

    #[test]
    fn extended_features_expand_to_named_bits() {
        let mut buf = vec![0u8; 0x59];
        buf[0] = 0x59;
        // WriteBooster (bit 8) + FFU (bit 0)
        buf[0x4F..0x53].copy_from_slice(&0x0000_0101u32.to_be_bytes());

        let fields = interpret(&buf, buf.len(), DEVICE_DESCRIPTOR_FIELDS);
        let ext = fields
            .iter()
            .find(|f| f.name == "dExtendedUFSFeaturesSupport")
            .unwrap();

        assert_eq!(ext.value, 0x101);
        assert!(ext
            .notes
            .iter()
            .any(|l| l.starts_with("WriteBooster") && l.ends_with(": Supported")));
        assert!(ext
            .notes
            .iter()
            .any(|l| l.contains("Device Life Span") && l.ends_with(": Not supported")));
    }

    #[test]
    fn extended_features_flag_reserved_bits() {
        let lines = ExtendedUfsFeatures.render(&0x8000_0000u32.to_be_bytes());
        assert!(lines.iter().any(|l| l.contains("Reserved bits 20-31")));
    }

    #[test]
    fn extended_features_incomplete_data() {
        let lines = ExtendedUfsFeatures.render(&[0x01, 0x02]);
        assert_eq!(lines, vec!["[Incomplete data for extended features]"]);
    }

    #[test]
    fn string_descriptor_drops_nul_padding() {
        // "ACME" encoded UTF-16BE, bLength covering 2 + 8 bytes.
        let buf = [
            0x0A, 0x05, 0x00, b'A', 0x00, b'C', 0x00, b'M', 0x00, b'E', 0xFF, 0xFF,
        ];
        assert_eq!(parse_string_descriptor(&buf), "ACME");
    }

    #[test]
    fn string_descriptor_handles_degenerate_buffers() {
        assert_eq!(parse_string_descriptor(&[]), "");
        assert_eq!(parse_string_descriptor(&[0x02, 0x05]), "");
    }
}
