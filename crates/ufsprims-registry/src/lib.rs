//! Static UFS characteristic registries and the descriptor interpreter.
//!
//! Everything in this crate is pure data and pure functions: id-to-name
//! tables for descriptors, attributes, flags, and UniPro/M-PHY attribute
//! ids, plus the table-driven interpreter that decodes raw descriptor
//! buffers into typed fields. Absence of an id is never an error — callers
//! render a `???` placeholder and continue.

pub mod characteristics;
pub mod descriptor;
pub mod mphy;

pub use characteristics::{
    lookup, name_or_unknown, Characteristic, ATTRIBUTES, DESCRIPTORS, FLAGS, UNKNOWN_LABEL,
};
pub use descriptor::{
    field_table_for, field_width, interpret, parse_string_descriptor, DescField, FieldDecoder,
    RenderedField, DEVICE_DESCRIPTOR_FIELDS, DEVICE_HEALTH_DESCRIPTOR_FIELDS,
};
pub use mphy::UNIPRO_MPHY_ATTRIBUTES;
