//! M-PHY, PA-layer, and vendor attribute ids the device layer drives.
//! Display names for these live in `ufsprims-registry::mphy`.

/// RX eye monitor block (M-PHY vendor extension).
pub const RX_EYEMON_CAPABILITY: u32 = 0x00F1;
pub const RX_EYEMON_TIMING_MAX_STEPS_CAPABILITY: u32 = 0x00F2;
pub const RX_EYEMON_TIMING_MAX_OFFSET_CAPABILITY: u32 = 0x00F3;
pub const RX_EYEMON_VOLTAGE_MAX_STEPS_CAPABILITY: u32 = 0x00F4;
pub const RX_EYEMON_VOLTAGE_MAX_OFFSET_CAPABILITY: u32 = 0x00F5;
pub const RX_EYEMON_ENABLE: u32 = 0x00F6;
pub const RX_EYEMON_TIMING_STEPS: u32 = 0x00F7;
pub const RX_EYEMON_VOLTAGE_STEPS: u32 = 0x00F8;
pub const RX_EYEMON_TARGET_TEST_COUNT: u32 = 0x00F9;
pub const RX_EYEMON_TESTED_COUNT: u32 = 0x00FA;
pub const RX_EYEMON_ERROR_COUNT: u32 = 0x00FB;
pub const RX_EYEMON_START: u32 = 0x00FC;

pub const RX_EYEMON_START_MASK: u32 = 0x1;

/// PA layer.
pub const PA_PWRMODE: u32 = 0x1571;
pub const PA_TXHSADAPTTYPE: u32 = 0x15D4;

/// Adapt types for `PA_TxHsAdaptType`.
pub const PA_REFRESH_ADAPT: u32 = 0x00;
pub const PA_INITIAL_ADAPT: u32 = 0x01;
pub const PA_NO_ADAPT: u32 = 0x03;

/// Fast mode on both directions, written to `PA_PWRMode` to trigger a
/// power mode change.
pub const PA_PWRMODE_FAST_BOTH: u32 = 0x11;

/// Vendor UniPro state register polled after a power mode change.
pub const VS_UNIPRO_STATE: u32 = 0xD000;
pub const VS_UNIPRO_STATE_MASK: u32 = 0x7;
pub const VS_UNIPRO_STATE_LINK_UP: u32 = 0x2;
