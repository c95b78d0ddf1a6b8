//! UniPro and M-PHY attribute id names, used for display when rendering
//! DME get/set results. Sourced from MIPI M-PHY / UniPro and the UFSHCI
//! vendor extensions ufsprims drives (eye-monitor block, DME QoS counters).

use crate::characteristics::Characteristic;

const fn c(id: u32, name: &'static str) -> Characteristic {
    Characteristic { id, name }
}

pub static UNIPRO_MPHY_ATTRIBUTES: &[Characteristic] = &[
    c(0x0001, "TX_HSMODE_Capability"),
    c(0x0002, "TX_HSGEAR_Capability"),
    c(0x0003, "TX_PWMG0_Capability"),
    c(0x0004, "TX_PWMGEAR_Capability"),
    c(0x0005, "TX_Amplitude_Capability"),
    c(0x0006, "TX_ExternalSYNC_Capability"),
    c(0x0007, "TX_HS_Unterminated_LINE_Drive_Capability"),
    c(0x0008, "TX_LS_Terminated_LINE_Drive_Capability"),
    c(0x0009, "TX_Min_SLEEP_NoConfig_Time_Capability"),
    c(0x000A, "TX_Min_STALL_NoConfig_Time_Capability"),
    c(0x000B, "TX_Min_SAVE_Config_Time_Capability"),
    c(0x000C, "TX_REF_CLOCK_SHARED_Capability"),
    c(0x000D, "TX_PHY_MajorMinor_Release_Capability"),
    c(0x000E, "TX_PHY_Editorial_Release_Capability"),
    c(0x000F, "TX_Hibern8Time_Capability"),
    c(0x0010, "TX_Advanced_Granularity_Capability"),
    c(0x0011, "TX_Advanced_Hibern8Time_Capability"),
    c(0x0012, "TX_HS_Equalizer_Setting_Capability"),
    c(0x0021, "TX_MODE"),
    c(0x0022, "TX_HSRATE_Series"),
    c(0x0023, "TX_HSGEAR"),
    c(0x0024, "TX_PWMGEAR"),
    c(0x0025, "TX_Amplitude"),
    c(0x0026, "TX_HS_SlewRate"),
    c(0x0027, "TX_SYNC_Source"),
    c(0x0028, "TX_HS_SYNC_LENGTH"),
    c(0x0029, "TX_HS_PREPARE_LENGTH"),
    c(0x002A, "TX_LS_PREPARE_LENGTH"),
    c(0x002B, "TX_HIBERN8_Control"),
    c(0x002C, "TX_LCC_Enable"),
    c(0x002D, "TX_PWM_BURST_Closure_Extension"),
    c(0x002E, "TX_BYPASS_8B10B_Enable"),
    c(0x002F, "TX_DRIVER_POLARITY"),
    c(0x0030, "TX_HS_Unterminated_LINE_Drive_Enable"),
    c(0x0031, "TX_LS_Terminated_LINE_Drive_Enable"),
    c(0x0032, "TX_LCC_Sequencer"),
    c(0x0033, "TX_Min_ActivateTime"),
    c(0x0034, "TX_PWM_G6_G7_SYNC_LENGTH"),
    c(0x0035, "TX_Advanced_Granularity_Step"),
    c(0x0036, "TX_Advanced_Granularity"),
    c(0x0037, "TX_HS_Equalizer_Setting"),
    c(0x0038, "TX_Min_SLEEP_NoConfig_Time"),
    c(0x0039, "TX_Min_STALL_NoConfig_Time"),
    c(0x003A, "TX_HS_ADAPT_LENGTH"),
    c(0x0041, "TX_FSM_State"),
    c(0x0061, "MC_Output_Amplitude"),
    c(0x0062, "MC_HS_Unterminated_Enable"),
    c(0x0063, "MC_LS_Terminated_Enable"),
    c(0x0064, "MC_HS_Unterminated_LINE_Drive_Enable"),
    c(0x0065, "MC_LS_Terminated_LINE_Drive_Enable"),
    c(0x0081, "RX_HSMODE_Capability"),
    c(0x0082, "RX_HSGEAR_Capability"),
    c(0x0083, "RX_PWMG0_Capability"),
    c(0x0084, "RX_PWMGEAR_Capability"),
    c(0x0085, "RX_HS_Unterminated_Capability"),
    c(0x0086, "RX_LS_Terminated_Capability"),
    c(0x0087, "RX_Min_SLEEP_NoConfig_Time_Capability"),
    c(0x0088, "RX_Min_STALL_NoConfig_Time_Capability"),
    c(0x0089, "RX_Min_SAVE_Config_Time_Capability"),
    c(0x008A, "RX_REF_CLOCK_SHARED_Capability"),
    c(0x008B, "RX_HS_G1_SYNC_LENGTH_Capability"),
    c(0x008C, "RX_HS_G1_PREPARE_LENGTH_Capability"),
    c(0x008D, "RX_LS_PREPARE_LENGTH_Capability"),
    c(0x008E, "RX_PWM_Burst_Closure_Length_Capability"),
    c(0x008F, "RX_Min_ActivateTime_Capability"),
    c(0x0090, "RX_PHY_MajorMinor_Release_Capability"),
    c(0x0091, "RX_PHY_Editorial_Release_Capability"),
    c(0x0092, "RX_Hibern8Time_Capability"),
    c(0x0093, "RX_PWM_G6_G7_SYNC_LENGTH_Capability"),
    c(0x0094, "RX_HS_G2_SYNC_LENGTH_Capability"),
    c(0x0095, "RX_HS_G3_SYNC_LENGTH_Capability"),
    c(0x0096, "RX_HS_G2_PREPARE_LENGTH_Capability"),
    c(0x0097, "RX_HS_G3_PREPARE_LENGTH_Capability"),
    c(0x0098, "RX_Advanced_Granularity_Capability"),
    c(0x0099, "RX_Advanced_Hibern8Time_Capability"),
    c(0x009A, "RX_Advanced_Min_ActivateTime_Capability"),
    c(0x009B, "RX_HS_G4_SYNC_LENGTH_Capability"),
    c(0x009C, "RX_HS_G4_PREPARE_LENGTH_Capability"),
    c(0x009D, "RX_HS_Equalizer_Setting_Capability"),
    c(0x009E, "RX_HS_ADAPT_REFRESH_Capability"),
    c(0x009F, "RX_HS_ADAPT_INITIAL_Capability"),
    c(0x00A1, "RX_MODE"),
    c(0x00A2, "RX_HSRATE_Series"),
    c(0x00A3, "RX_HSGEAR"),
    c(0x00A4, "RX_PWMGEAR"),
    c(0x00A5, "RX_LS_Terminated_Enable"),
    c(0x00A6, "RX_HS_Unterminated_Enable"),
    c(0x00A7, "RX_Enter_HIBERN8"),
    c(0x00A8, "RX_BYPASS_8B10B_Enable"),
    c(0x00A9, "RX_Termination_Force_Enable"),
    c(0x00AA, "RX_ADAPT_Control"),
    c(0x00AB, "RX_RECEIVER_POLARITY"),
    c(0x00AC, "RX_HS_ADAPT_LENGTH"),
    c(0x00C1, "RX_FSM_State"),
    c(0x00D1, "OMC_TYPE_Capability"),
    c(0x00D2, "MC_HSMODE_Capability"),
    c(0x00D3, "MC_HSGEAR_Capability"),
    c(0x00D4, "MC_HS_START_TIME_Var_Capability"),
    c(0x00D5, "MC_HS_START_TIME_Range_Capability"),
    c(0x00D6, "MC_RX_SA_Capability"),
    c(0x00D7, "MC_HS_LA_Capability"),
    c(0x00D8, "MC_HS_LS_PREPARE_LENGTH"),
    c(0x00D9, "MC_PWMG0_Capability"),
    c(0x00DA, "MC_PWMGEAR_Capability"),
    c(0x00DB, "MC_LS_Terminated_Capability"),
    c(0x00DC, "MC_HS_Unterminated_Capability"),
    c(0x00DD, "MC_LS_Terminated_LINE_Drive_Capability"),
    c(0x00DE, "MC_HS_Unterminated_LINE_Drive_Capabilit"),
    c(0x00DF, "MC_MFG_ID_Part1"),
    c(0x00E0, "MC_MFG_ID_Part2"),
    c(0x00E1, "MC_PHY_MajorMinor_Release_Capability"),
    c(0x00E2, "MC_PHY_Editorial_Release_Capability"),
    c(0x00E3, "MC_Vendor_Info_Part1"),
    c(0x00E4, "MC_Vendor_Info_Part2"),
    c(0x00E5, "MC_Vendor_Info_Part3"),
    c(0x00E6, "MC_Vendor_Info_Part4"),
    c(0x00F1, "RX_EYEMON_Capability"),
    c(0x00F2, "RX_EYEMON_Timing_MAX_Steps_Capability"),
    c(0x00F3, "RX_EYEMON_Timing_MAX_Offset_Capability"),
    c(0x00F4, "RX_EYEMON_Voltage_MAX_Steps_Capability"),
    c(0x00F5, "RX_EYEMON_Voltage_MAX_Offset_Capability"),
    c(0x00F6, "RX_EYEMON_Enable"),
    c(0x00F7, "RX_EYEMON_Timing_Steps"),
    c(0x00F8, "RX_EYEMON_Voltage_Steps"),
    c(0x00F9, "RX_EYEMON_Target_Test_Count"),
    c(0x00FA, "RX_EYEMON_Tested_Count"),
    c(0x00FB, "RX_EYEMON_Error_Count"),
    c(0x00FC, "RX_EYEMON_Start"),
    c(0x1560, "PA_ActiveTxDataLanes"),
    c(0x1564, "PA_TxTrailingClocks"),
    c(0x1580, "PA_ActiveRxDataLanes"),
    c(0x1500, "PA_PHY_Type"),
    c(0x1520, "PA_AvailTxDataLanes"),
    c(0x1540, "PA_AvailRxDataLanes"),
    c(0x1543, "PA_MinRxTrailingClocks"),
    c(0x1567, "PA_TxPWRStatus"),
    c(0x1582, "PA_RxPWRStatus"),
    c(0x15A0, "PA_RemoteVerInfo"),
    c(0x1552, "PA_TxHsG1SyncLength"),
    c(0x1553, "PA_TxHsG1PrepareLength"),
    c(0x1554, "PA_TxHsG2SyncLength"),
    c(0x1555, "PA_TxHsG2PrepareLength"),
    c(0x1556, "PA_TxHsG3SyncLength"),
    c(0x1557, "PA_TxHsG3PrepareLength"),
    c(0x155A, "PA_TxMk2Extension"),
    c(0x155B, "PA_PeerScrambling"),
    c(0x155C, "PA_TxSkip"),
    c(0x155D, "PA_TxSkipPeriod"),
    c(0x155E, "PA_Local_TX_LCC_Enable"),
    c(0x155F, "PA_Peer_TX_LCC_Enable"),
    c(0x1561, "PA_ConnectedTxDataLanes"),
    c(0x1568, "PA_TxGear"),
    c(0x1569, "PA_TxTermination"),
    c(0x156A, "PA_HSSeries"),
    c(0x1571, "PA_PWRMode"),
    c(0x1581, "PA_ConnectedRxDataLanes"),
    c(0x1583, "PA_RxGear"),
    c(0x1584, "PA_RxTermination"),
    c(0x1585, "PA_Scrambling"),
    c(0x1586, "PA_MaxRxPWMGear"),
    c(0x1587, "PA_MaxRxHSGear"),
    c(0x1590, "PA_PACPReqTimeout"),
    c(0x1591, "PA_PACPReqEoBTimeout"),
    c(0x15A1, "PA_LogicalLaneMap"),
    c(0x15A2, "PA_SleepNoConfigTime"),
    c(0x15A3, "PA_StallNoConfigTime"),
    c(0x15A4, "PA_SaveConfigTime"),
    c(0x15A5, "PA_RxHSUnterminationCapability"),
    c(0x15A6, "PA_RxLSTerminationCapability"),
    c(0x15A7, "PA_Hibern8Time"),
    c(0x15A8, "PA_TActivate"),
    c(0x15A9, "PA_LocalVerInfo"),
    c(0x15AA, "PA_Granularity"),
    c(0x15AB, "PA_MK2ExtensionGuardBand"),
    c(0x15B0, "PA_PWRModeUserData"),
    c(0x15C0, "PA_PACPFrameCount"),
    c(0x15C1, "PA_PACPErrorCount"),
    c(0x15C2, "PA_PHYTestControl"),
    c(0x15D0, "PA_TxHsG4SyncLength"),
    c(0x15D1, "PA_TxHsG4PrepareLength"),
    c(0x15D2, "PA_PeerRxHsAdaptRefresh"),
    c(0x15D3, "PA_PeerRxHsAdaptInitial"),
    c(0x15D4, "PA_TxHsAdaptType"),
    c(0x15D5, "PA_AdaptAfterLRSTInPA_INIT"),
    c(0x5100, "DME_TX_DATA_OFL"),
    c(0x5101, "DME_TX_NAC_RECEIVED"),
    c(0x5102, "DME_TX_QoS_COUNT"),
    c(0x5103, "DME_TX_DL_LM_ERROR"),
    c(0x5110, "DME_RX_DATA_OFL"),
    c(0x5111, "DME_RX_CRC_ERROR"),
    c(0x5112, "DME_RX_QoS_COUNT"),
    c(0x5113, "DME_RX_DL_LM_ERROR"),
    c(0x5120, "DME_TXRX_DATA_OFL"),
    c(0x5121, "DME_TXRX_PA_INIT_REQUEST"),
    c(0x5122, "DME_TXRX_QoS_COUNT"),
    c(0x5123, "DME_TXRX_DL_LM_ERROR"),
    c(0x5130, "DME_QoS_ENABLE"),
    c(0x5131, "DME_QoS_STATUS"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristics::lookup;

    #[test]
    fn eyemon_block_is_registered() {
        assert_eq!(lookup(UNIPRO_MPHY_ATTRIBUTES, 0x00F1), Some("RX_EYEMON_Capability"));
        assert_eq!(lookup(UNIPRO_MPHY_ATTRIBUTES, 0x00FC), Some("RX_EYEMON_Start"));
    }

    #[test]
    fn pa_layer_attributes_present() {
        assert_eq!(lookup(UNIPRO_MPHY_ATTRIBUTES, 0x1571), Some("PA_PWRMode"));
        assert_eq!(lookup(UNIPRO_MPHY_ATTRIBUTES, 0x15D4), Some("PA_TxHsAdaptType"));
    }
}
