/// One id-to-name mapping in a characteristic registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Characteristic {
    pub id: u32,
    pub name: &'static str,
}

/// Label rendered for ids with no registry entry.
pub const UNKNOWN_LABEL: &str = "???";

const fn c(id: u32, name: &'static str) -> Characteristic {
    Characteristic { id, name }
}

/// First-match lookup by id. O(n), deterministic, never fails — an absent
/// id is a normal outcome.
pub fn lookup(table: &[Characteristic], id: u32) -> Option<&'static str> {
    table.iter().find(|entry| entry.id == id).map(|entry| entry.name)
}

/// Lookup that renders absence as [`UNKNOWN_LABEL`].
pub fn name_or_unknown(table: &[Characteristic], id: u32) -> &'static str {
    lookup(table, id).unwrap_or(UNKNOWN_LABEL)
}

/// Descriptor types, JESD220 §14.1.
pub static DESCRIPTORS: &[Characteristic] = &[
    c(0x0, "Device Descriptor"),
    c(0x1, "Configuration Descriptor"),
    c(0x2, "Unit Descriptor"),
    c(0x4, "Interconnect Descriptor"),
    c(0x5, "String Descriptor"),
    c(0x7, "Geometry Descriptor"),
    c(0x8, "Power Parameters Descriptor"),
    c(0x9, "Device Health Descriptor"),
];

/// Attributes, JESD220 §14.3.
pub static ATTRIBUTES: &[Characteristic] = &[
    c(0x00, "bBootLunEn"),
    c(0x02, "bCurrentPowerMode"),
    c(0x03, "bActiveICCLevel"),
    c(0x04, "bOutOfOrderDataEn"),
    c(0x05, "bBackgroundOpStatus"),
    c(0x06, "bPurgeStatus"),
    c(0x07, "bMaxDataInSize"),
    c(0x08, "bMaxDataOutSize"),
    c(0x09, "dDynCapNeeded"),
    c(0x0a, "bRefClkFreq"),
    c(0x0b, "bConfigDescrLock"),
    c(0x0c, "bMaxNumOfRTT"),
    c(0x0d, "wExceptionEventControl"),
    c(0x0e, "wExceptionEventStatus"),
    c(0x0f, "dSecondsPassed"),
    c(0x10, "wContextConf"),
    c(0x11, "Obsolete"),
    c(0x14, "bDeviceFFUStatus"),
    c(0x15, "bPSAState"),
    c(0x16, "dPSADataSize"),
    c(0x17, "bRefClkGatingWaitTime"),
    c(0x18, "bDeviceCaseRoughTemperaure"),
    c(0x19, "bDeviceTooHighTempBoundary"),
    c(0x1a, "bDeviceTooLowTempBoundary"),
    c(0x1b, "bThrottlingStatus"),
    c(0x1c, "bWriteBoosterBufferFlushStatus"),
    c(0x1d, "bAvailableWriteBoosterBufferSize"),
    c(0x1e, "bWriteBoosterBufferLifeTimeEst"),
    c(0x1f, "dCurrentWriteBoosterBufferSize"),
    c(0x2a, "bEXTIIDEn"),
    c(0x2b, "wHostHintCacheSize"),
    c(0x2c, "bRefreshStatus"),
    c(0x2d, "bRefreshFreq"),
    c(0x2e, "bRefreshUnit"),
    c(0x2f, "bRefreshMethod"),
    c(0x30, "qTimestamp"),
    c(0x34, "qDeviceLevelExceptionID"),
    c(0x35, "bDefragOperation"),
    c(0x36, "dHIDAvaliableSize"),
    c(0x37, "dHIDSize"),
    c(0x38, "bHIDProgressRatio"),
    c(0x39, "bHIDState"),
    c(0x3c, "bWriteBoosterBufferResizeHint"),
    c(0x3d, "bWriteBoosterBufferResizeEn"),
    c(0x3e, "bWriteBoosterBufferResizeStatus"),
    c(0x3f, "bWriteBoosterBufferPartialFlushMode"),
    c(0x40, "dMaxFIFOSizeForWriteBoosterPartialFlushMode"),
    c(0x41, "dCurrentFIFOSizeForWriteBoosterPartialFlushMode"),
    c(0x42, "dPinnedWriteBoosterBufferCurrentAllocUnits"),
    c(0x43, "bPinnedWriteBoosterBufferAvailablePercentage"),
    c(0x44, "dPinnedWriteBoosterCummulativeWrittenSize"),
    c(0x45, "dPinnedWriteBoosterBufferNumAllocUnits"),
    c(0x46, "dNonPinnedWriteBoosterBufferMinNumAllocUnits"),
];

/// Flags, JESD220 §14.2.
pub static FLAGS: &[Characteristic] = &[
    c(0x01, "fDeviceInit"),
    c(0x02, "fPermanentWPEn"),
    c(0x03, "fPowerOnWPEn"),
    c(0x04, "fBackgroundOpsEn"),
    c(0x05, "fDeviceLifeSpanModeEn"),
    c(0x06, "fPurgeEnable"),
    c(0x07, "fRefreshEnable"),
    c(0x08, "fPhyResourceRemoval"),
    c(0x09, "fBusyRTC"),
    c(0x0b, "fPermanentlyDisableFwUpdate"),
    c(0x0e, "fWriteBoosterEn"),
    c(0x0f, "fWriteBoosterBufferFlushEn"),
    c(0x10, "fWriteBoosterBufferFlushDuringHibernate"),
    c(0x11, "fHPBReset"),
    c(0x12, "fHPBEnable"),
    c(0x13, "fUnpinEn"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_first_match() {
        assert_eq!(lookup(FLAGS, 0x07), Some("fRefreshEnable"));
        assert_eq!(lookup(ATTRIBUTES, 0x2d), Some("bRefreshFreq"));
        assert_eq!(lookup(DESCRIPTORS, 0x9), Some("Device Health Descriptor"));
    }

    #[test]
    fn lookup_miss_is_not_an_error() {
        assert_eq!(lookup(FLAGS, 0x99), None);
        assert_eq!(name_or_unknown(FLAGS, 0x99), UNKNOWN_LABEL);
    }
}
