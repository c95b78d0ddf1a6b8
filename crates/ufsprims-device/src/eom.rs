//! Receiver eye-opening monitor (EOM) sweep.
//!
//! Characterizes a link receiver by programming the eye monitor across a
//! 2D timing x voltage offset grid and counting bit errors at each point.
//! The sweep drives only [`dme_get`]/[`dme_set`] plus descriptor reads for
//! the report header; it owns the accumulated result sequence until the
//! report is written.
//!
//! Both poll loops are bounded by injectable attempt ceilings so an
//! unresponsive device fails the sweep instead of hanging the process;
//! completion is still detected solely from device-reported state.

use std::io::Write;
use std::time::Duration;

use tracing::{debug, info, warn};
use ufsprims_registry::parse_string_descriptor;
use ufsprims_transport::UpiuTransport;
use ufsprims_upiu::{mib_sel, select_rx, select_tx, ATTR_SET_NOR};

use crate::dme::{dme_get, dme_set, DmeTarget};
use crate::error::{ConfigError, DeviceError, Result};
use crate::mib;
use crate::query::read_descriptor;

/// Default RX_EYEMON_Target_Test_Count.
pub const EOM_TARGET_TEST_COUNT_DEFAULT: u32 = 0x5D;
/// Largest programmable target test count.
pub const EOM_TARGET_TEST_COUNT_MAX: u32 = 0x7F;
/// Error count at which a point is considered characterized.
pub const EOM_ERROR_COUNT_THRESHOLD: u32 = 0x3C;

const EOM_DIRECTION_SHIFT: u32 = 6;
const EOM_STEP_MASK: u32 = 0x3F;

const DEVICE_DESCRIPTOR_IDN: u8 = 0x0;
const STRING_DESCRIPTOR_IDN: u8 = 0x5;
const MANUFACTURER_NAME_OFFSET: usize = 0x14;
const PRODUCT_NAME_OFFSET: usize = 0x15;
const PRODUCT_REVISION_LEVEL_OFFSET: usize = 0x2A;

/// Settle delay used when the vendor UniPro state register is absent.
const LINK_UP_FALLBACK_DELAY: Duration = Duration::from_millis(200);

/// Encode a signed step offset into the 7-bit sign-magnitude register
/// code: bit 6 carries the direction, bits 0..5 the magnitude.
pub fn encode_step(offset: i32) -> u32 {
    if offset < 0 {
        (1 << EOM_DIRECTION_SHIFT) | (offset.unsigned_abs() & EOM_STEP_MASK)
    } else {
        offset as u32 & EOM_STEP_MASK
    }
}

/// Invert [`encode_step`].
pub fn decode_step(code: u32) -> i32 {
    let magnitude = (code & EOM_STEP_MASK) as i32;
    if code & (1 << EOM_DIRECTION_SHIFT) != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Sweep configuration.
#[derive(Debug, Clone)]
pub struct EomParams {
    /// Which receiver to characterize: the host's (local) or the
    /// device's (peer).
    pub target: DmeTarget,
    /// Lane to sweep; `None` sweeps all connected lanes.
    pub lane: Option<u32>,
    pub target_test_count: u32,
    /// Restrict the sweep to a single voltage offset.
    pub single_voltage: Option<i32>,
    /// Attempt ceiling for the per-point completion poll.
    pub scan_poll_limit: u32,
    /// Attempt ceiling for the post-power-mode-change link-up poll.
    pub link_poll_limit: u32,
}

impl EomParams {
    pub fn new(target: DmeTarget) -> Self {
        Self {
            target,
            lane: None,
            target_test_count: EOM_TARGET_TEST_COUNT_DEFAULT,
            single_voltage: None,
            scan_poll_limit: 1_000_000,
            link_poll_limit: 100_000,
        }
    }
}

/// Capability registers read once before the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct EomCapabilities {
    pub timing_max_steps: u32,
    pub timing_max_offset: u32,
    pub voltage_max_steps: u32,
    pub voltage_max_offset: u32,
}

/// One characterized point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EomRecord {
    pub lane: u32,
    pub timing: i32,
    pub voltage: i32,
    pub error_count: u32,
}

/// Optional link-stress hook, pumped once per completion-poll iteration:
/// writes exercise the peer's receiver, reads the local one.
pub trait StressWorkload {
    fn pump(&mut self, target: DmeTarget) -> std::io::Result<()>;
}

/// Device identity strings for the report header.
#[derive(Debug, Clone)]
pub struct DeviceIdentity {
    pub manufacturer: String,
    pub product: String,
    pub revision: String,
}

/// Read the manufacturer/product/revision strings: the device descriptor
/// carries string-descriptor indices at fixed offsets.
pub fn read_device_identity<T: UpiuTransport + ?Sized>(dev: &T) -> Result<DeviceIdentity> {
    let desc = read_descriptor(dev, DEVICE_DESCRIPTOR_IDN, 0, 0)?;

    let read_string = |offset: usize| -> Result<String> {
        let index = desc.get(offset).copied().unwrap_or(0);
        let buf = read_descriptor(dev, STRING_DESCRIPTOR_IDN, index, 0)?;
        Ok(parse_string_descriptor(&buf))
    };

    Ok(DeviceIdentity {
        manufacturer: read_string(MANUFACTURER_NAME_OFFSET)?,
        product: read_string(PRODUCT_NAME_OFFSET)?,
        revision: read_string(PRODUCT_REVISION_LEVEL_OFFSET)?,
    })
}

/// A prepared sweep: capabilities read, result sequence sized.
#[derive(Debug)]
pub struct EomSweep<'d, T: ?Sized> {
    dev: &'d T,
    params: EomParams,
    caps: EomCapabilities,
    lanes: Vec<u32>,
    capacity: usize,
    records: Vec<EomRecord>,
}

impl<'d, T: UpiuTransport + ?Sized> EomSweep<'d, T> {
    /// Validate parameters, require the eye-monitor capability bit, read
    /// the four capability registers, and size the result sequence to
    /// `(2*timing_steps + 1) * (2*voltage_steps + 1) * lanes`.
    pub fn prepare(dev: &'d T, params: EomParams) -> Result<Self> {
        if params.target_test_count == 0 || params.target_test_count > EOM_TARGET_TEST_COUNT_MAX {
            return Err(ConfigError::InvalidTargetTestCount(params.target_test_count).into());
        }
        if let Some(lane) = params.lane {
            if lane > 1 {
                return Err(ConfigError::InvalidLane(lane).into());
            }
        }

        let probe_lane = params.lane.unwrap_or(0);
        let rx = |attr: u32| mib_sel(attr, select_rx(probe_lane));

        let cap = dme_get(dev, rx(mib::RX_EYEMON_CAPABILITY), params.target)?;
        if cap & 0x1 == 0 {
            return Err(DeviceError::EomUnsupported);
        }

        let caps = EomCapabilities {
            timing_max_steps: dme_get(dev, rx(mib::RX_EYEMON_TIMING_MAX_STEPS_CAPABILITY), params.target)?,
            timing_max_offset: dme_get(dev, rx(mib::RX_EYEMON_TIMING_MAX_OFFSET_CAPABILITY), params.target)?,
            voltage_max_steps: dme_get(dev, rx(mib::RX_EYEMON_VOLTAGE_MAX_STEPS_CAPABILITY), params.target)?,
            voltage_max_offset: dme_get(dev, rx(mib::RX_EYEMON_VOLTAGE_MAX_OFFSET_CAPABILITY), params.target)?,
        };
        info!(?caps, "eye monitor capabilities");

        if let Some(voltage) = params.single_voltage {
            if voltage.unsigned_abs() > caps.voltage_max_steps {
                return Err(ConfigError::VoltageOutOfRange {
                    voltage,
                    max: caps.voltage_max_steps,
                }
                .into());
            }
        }

        let lanes = match params.lane {
            Some(lane) => vec![lane],
            None => vec![0, 1],
        };

        let capacity = (caps.timing_max_steps as usize * 2 + 1)
            * (caps.voltage_max_steps as usize * 2 + 1)
            * lanes.len();

        Ok(Self {
            dev,
            params,
            caps,
            lanes,
            capacity,
            records: Vec::with_capacity(capacity),
        })
    }

    pub fn capabilities(&self) -> EomCapabilities {
        self.caps
    }

    pub fn target(&self) -> DmeTarget {
        self.params.target
    }

    pub fn lanes(&self) -> &[u32] {
        &self.lanes
    }

    /// Accumulated result records, in sweep order.
    pub fn records(&self) -> &[EomRecord] {
        &self.records
    }

    /// Sweep every (lane, timing, voltage) combination, disabling the
    /// monitor for each lane once its grid is done.
    pub fn run(&mut self, mut stress: Option<&mut dyn StressWorkload>) -> Result<()> {
        let timing_span = self.caps.timing_max_steps as i32;
        let voltage_span = self.caps.voltage_max_steps as i32;

        for lane_slot in 0..self.lanes.len() {
            let lane = self.lanes[lane_slot];
            info!(lane, "sweeping lane");

            for timing in -timing_span..=timing_span {
                match self.params.single_voltage {
                    Some(voltage) => {
                        self.scan_point(lane, timing, voltage, stress.as_deref_mut())?
                    }
                    None => {
                        for voltage in -voltage_span..=voltage_span {
                            self.scan_point(lane, timing, voltage, stress.as_deref_mut())?;
                        }
                    }
                }
            }

            dme_set(
                self.dev,
                mib_sel(mib::RX_EYEMON_ENABLE, select_rx(lane)),
                ATTR_SET_NOR,
                0,
                self.params.target,
            )?;
        }

        Ok(())
    }

    /// Characterize one grid point: program the monitor, restart the
    /// link, then poll until the device reports completion.
    fn scan_point(
        &mut self,
        lane: u32,
        timing: i32,
        voltage: i32,
        mut stress: Option<&mut (dyn StressWorkload + '_)>,
    ) -> Result<()> {
        self.configure_point(lane, encode_step(timing), encode_step(voltage))?;

        let target = self.params.target;
        let rx = |attr: u32| mib_sel(attr, select_rx(lane));

        for _ in 0..self.params.scan_poll_limit {
            if let Some(workload) = stress.as_deref_mut() {
                workload.pump(target)?;
            }

            let start = dme_get(self.dev, rx(mib::RX_EYEMON_START), target)?;
            if start & mib::RX_EYEMON_START_MASK != 0 {
                // Monitor still running.
                continue;
            }

            let tested = dme_get(self.dev, rx(mib::RX_EYEMON_TESTED_COUNT), target)?;
            let errors = dme_get(self.dev, rx(mib::RX_EYEMON_ERROR_COUNT), target)?;

            if tested >= self.params.target_test_count || errors >= EOM_ERROR_COUNT_THRESHOLD {
                debug!(lane, timing, voltage, errors, tested, "eye point complete");
                return self.push_record(EomRecord {
                    lane,
                    timing,
                    voltage,
                    error_count: errors,
                });
            }
            // Stopped but not started yet; keep polling.
        }

        Err(DeviceError::PollBudgetExhausted {
            register: "RX_EYEMON_Start",
            attempts: self.params.scan_poll_limit,
        })
    }

    fn configure_point(&self, lane: u32, timing_code: u32, voltage_code: u32) -> Result<()> {
        let target = self.params.target;
        let rx = |attr: u32| mib_sel(attr, select_rx(lane));

        dme_set(self.dev, rx(mib::RX_EYEMON_ENABLE), ATTR_SET_NOR, 1, target)?;
        dme_set(self.dev, rx(mib::RX_EYEMON_TIMING_STEPS), ATTR_SET_NOR, timing_code, target)?;
        dme_set(self.dev, rx(mib::RX_EYEMON_VOLTAGE_STEPS), ATTR_SET_NOR, voltage_code, target)?;
        dme_set(
            self.dev,
            rx(mib::RX_EYEMON_TARGET_TEST_COUNT),
            ATTR_SET_NOR,
            self.params.target_test_count,
            target,
        )?;

        // Force NO_ADAPT on the local TX, then a power mode change to
        // fast mode to apply it and kick the monitor off.
        dme_set(
            self.dev,
            mib_sel(mib::PA_TXHSADAPTTYPE, select_tx(0)),
            ATTR_SET_NOR,
            mib::PA_NO_ADAPT,
            DmeTarget::Local,
        )?;
        dme_set(
            self.dev,
            mib_sel(mib::PA_PWRMODE, select_tx(0)),
            ATTR_SET_NOR,
            mib::PA_PWRMODE_FAST_BOTH,
            DmeTarget::Local,
        )?;

        self.wait_link_up()
    }

    /// Poll the vendor UniPro state register until the link is back up.
    /// A register read failure means the vendor register is absent; fall
    /// back to a fixed settle delay.
    fn wait_link_up(&self) -> Result<()> {
        for _ in 0..self.params.link_poll_limit {
            match dme_get(
                self.dev,
                mib_sel(mib::VS_UNIPRO_STATE, select_tx(0)),
                DmeTarget::Local,
            ) {
                Ok(state) if state & mib::VS_UNIPRO_STATE_MASK == mib::VS_UNIPRO_STATE_LINK_UP => {
                    return Ok(())
                }
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "UniPro state register unavailable, using settle delay");
                    std::thread::sleep(LINK_UP_FALLBACK_DELAY);
                    return Ok(());
                }
            }
        }

        Err(DeviceError::PollBudgetExhausted {
            register: "VS_UNIPRO_STATE",
            attempts: self.params.link_poll_limit,
        })
    }

    fn push_record(&mut self, record: EomRecord) -> Result<()> {
        if self.records.len() >= self.capacity {
            return Err(DeviceError::Capacity {
                capacity: self.capacity,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Write the sweep report: title, device identity, capabilities, then
    /// one line per record.
    pub fn write_report<W: Write>(&self, out: &mut W, identity: &DeviceIdentity) -> std::io::Result<()> {
        let side = match self.params.target {
            DmeTarget::Peer => "Device",
            DmeTarget::Local => "Host",
        };

        writeln!(out, "UFS {side} Side Eye Monitor Start")?;
        writeln!(
            out,
            "- - - - UFS INQUIRY ID: {} {} {}",
            identity.manufacturer, identity.product, identity.revision
        )?;
        writeln!(out, "EOM Capabilities:")?;
        writeln!(
            out,
            "TimingMaxSteps {} TimingMaxOffset {}",
            self.caps.timing_max_steps, self.caps.timing_max_offset
        )?;
        writeln!(
            out,
            "VoltageMaxSteps {} VoltageMaxOffset {}",
            self.caps.voltage_max_steps, self.caps.voltage_max_offset
        )?;
        writeln!(out)?;

        for record in &self.records {
            writeln!(
                out,
                "lane: {} timing: {} voltage: {} error count: {}",
                record.lane, record.timing, record.voltage, record.error_count
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ufsprims_transport::{Direction, TransportError};

    #[test]
    fn step_codes_are_sign_magnitude() {
        assert_eq!(encode_step(5), 0x05);
        assert_eq!(encode_step(-5), 0x45);
        assert_eq!(encode_step(0), 0x00);
        assert_eq!(encode_step(63), 0x3F);
        assert_eq!(encode_step(-63), 0x7F);
    }

    #[test]
    fn step_codes_round_trip() {
        for offset in -63..=63 {
            assert_eq!(decode_step(encode_step(offset)), offset);
        }
    }

    /// Transport that refuses every exchange; push_record never touches
    /// the device so this is enough to exercise the capacity bound.
    struct DeadTransport;

    impl UpiuTransport for DeadTransport {
        fn exchange(
            &self,
            _request: &[u8],
            _reply: &mut [u8],
            _data: &mut [u8],
            _dir: Direction,
        ) -> ufsprims_transport::Result<()> {
            Err(TransportError::ReplyTooShort { len: 0 })
        }
    }

    fn sweep_with_capacity(
        timing_max_steps: u32,
        voltage_max_steps: u32,
        lanes: Vec<u32>,
    ) -> EomSweep<'static, DeadTransport> {
        static DEV: DeadTransport = DeadTransport;
        let capacity = (timing_max_steps as usize * 2 + 1)
            * (voltage_max_steps as usize * 2 + 1)
            * lanes.len();
        EomSweep {
            dev: &DEV,
            params: EomParams::new(DmeTarget::Local),
            caps: EomCapabilities {
                timing_max_steps,
                timing_max_offset: 10,
                voltage_max_steps,
                voltage_max_offset: 8,
            },
            lanes,
            capacity,
            records: Vec::new(),
        }
    }

    #[test]
    fn result_capacity_follows_capabilities() {
        let mut sweep = sweep_with_capacity(2, 1, vec![0]);
        assert_eq!(sweep.capacity, 15);

        for i in 0..15 {
            sweep
                .push_record(EomRecord {
                    lane: 0,
                    timing: i,
                    voltage: 0,
                    error_count: 0,
                })
                .unwrap();
        }

        let err = sweep
            .push_record(EomRecord {
                lane: 0,
                timing: 15,
                voltage: 0,
                error_count: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DeviceError::Capacity { capacity: 15 }));
    }

    #[test]
    fn report_layout_is_stable() {
        let mut sweep = sweep_with_capacity(1, 1, vec![0]);
        sweep
            .push_record(EomRecord {
                lane: 0,
                timing: -1,
                voltage: 1,
                error_count: 7,
            })
            .unwrap();

        let identity = DeviceIdentity {
            manufacturer: "ACME".to_string(),
            product: "NAND64".to_string(),
            revision: "0100".to_string(),
        };

        let mut out = Vec::new();
        sweep.write_report(&mut out, &identity).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert_eq!(
            report,
            "UFS Host Side Eye Monitor Start\n\
             - - - - UFS INQUIRY ID: ACME NAND64 0100\n\
             EOM Capabilities:\n\
             TimingMaxSteps 1 TimingMaxOffset 10\n\
             VoltageMaxSteps 1 VoltageMaxOffset 8\n\
             \n\
             lane: 0 timing: -1 voltage: 1 error count: 7\n"
        );
    }
}
