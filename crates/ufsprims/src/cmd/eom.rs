use std::alloc::Layout;
use std::fs::{File, OpenOptions};
use std::io;
use std::ops::{Deref, DerefMut};
use std::os::unix::fs::{FileExt, OpenOptionsExt};
use std::path::Path;
use std::ptr::NonNull;
use std::time::Instant;

use tracing::info;
use ufsprims_device::{
    read_device_identity, DmeTarget, EomParams, EomSweep, StressWorkload, EOM_TARGET_TEST_COUNT_DEFAULT,
};
use ufsprims_transport::BsgDevice;

use crate::cmd::EomArgs;
use crate::exit::{device_error, io_error, transport_error, CliError, CliResult, SUCCESS, USAGE};

/// Stress-file size; large enough that each pump keeps the link busy.
const TEMP_DATA_SIZE: usize = 4 * 1024 * 1024;
/// O_DIRECT requires page-aligned buffers.
const TEMP_DATA_ALIGN: usize = 4096;
const TEMP_FILE_NAME: &str = "ufseom_tmp_data";

pub fn run(args: EomArgs) -> CliResult<i32> {
    if !args.local && !args.peer {
        return Err(CliError::new(USAGE, "local or peer is not given"));
    }
    let target = if args.peer {
        DmeTarget::Peer
    } else {
        DmeTarget::Local
    };

    let mut params = EomParams::new(target);
    params.lane = args.lane;
    params.single_voltage = args.voltage;
    if let Some(count) = args.target {
        params.target_test_count = count;
    } else {
        info!(
            "target test count is not given, use default {}",
            EOM_TARGET_TEST_COUNT_DEFAULT
        );
    }
    let target_test_count = params.target_test_count;

    let dev = BsgDevice::open(&args.device)
        .map_err(|err| transport_error("failed to open device", err))?;

    let mut stress = if args.data {
        Some(
            TempFileStress::create(&args.output)
                .map_err(|err| io_error("failed to prepare stress I/O file", err))?,
        )
    } else {
        None
    };

    let mut sweep =
        EomSweep::prepare(&dev, params).map_err(|err| device_error("EOM setup failed", err))?;

    let lane_label = match args.lane {
        Some(lane) => lane.to_string(),
        None => "0_1".to_string(),
    };
    let side_label = match target {
        DmeTarget::Peer => "peer",
        DmeTarget::Local => "local",
    };
    let report_path = args
        .output
        .join(format!("{side_label}_lane_{lane_label}_ttc_{target_test_count}.eom"));

    println!("Start EOM Scan...");
    let started = Instant::now();
    sweep
        .run(stress.as_mut().map(|s| s as &mut dyn StressWorkload))
        .map_err(|err| device_error("EOM scan failed", err))?;
    println!(
        "EOM Scan Finished! Time elapsed: {} seconds",
        started.elapsed().as_secs()
    );

    let identity = read_device_identity(&dev)
        .map_err(|err| device_error("failed to read device identity", err))?;

    let mut report = File::create(&report_path)
        .map_err(|err| io_error("failed to create EOM report file", err))?;
    sweep
        .write_report(&mut report, &identity)
        .map_err(|err| io_error("failed to write EOM report", err))?;

    println!("EOM results saved to {}", report_path.display());

    Ok(SUCCESS)
}

/// Page-aligned heap buffer for O_DIRECT transfers.
struct AlignedBuf {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl AlignedBuf {
    fn zeroed(size: usize, align: usize) -> io::Result<Self> {
        let layout = Layout::from_size_align(size, align)
            .map_err(|err| io::Error::other(err.to_string()))?;
        // SAFETY: `layout` has non-zero size.
        let raw = unsafe { std::alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw)
            .ok_or_else(|| io::Error::other("failed to allocate aligned I/O buffer"))?;
        Ok(Self { ptr, layout })
    }
}

impl Deref for AlignedBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: the allocation is live and `layout.size()` bytes long.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl DerefMut for AlignedBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and we hold the only reference.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        // SAFETY: allocated with this exact layout in `zeroed`.
        unsafe { std::alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

/// Link-stress workload backed by an O_DIRECT temp file: writes exercise
/// the peer's receiver, reads the local one.
struct TempFileStress {
    file: File,
    buf: AlignedBuf,
}

impl TempFileStress {
    fn create(dir: &Path) -> io::Result<Self> {
        let path = dir.join(TEMP_FILE_NAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .mode(0o600)
            .custom_flags(libc::O_DIRECT)
            .open(&path)?;

        let mut buf = AlignedBuf::zeroed(TEMP_DATA_SIZE, TEMP_DATA_ALIGN)?;
        populate_data_pattern(&mut buf);
        file.write_all_at(&buf, 0)?;
        info!(path = %path.display(), "prepared stress I/O file");

        Ok(Self { file, buf })
    }
}

impl StressWorkload for TempFileStress {
    fn pump(&mut self, target: DmeTarget) -> io::Result<()> {
        match target {
            DmeTarget::Peer => self.file.write_all_at(&self.buf, 0),
            DmeTarget::Local => self.file.read_exact_at(&mut self.buf, 0),
        }
    }
}

/// Fill the stress buffer with a reproducible pseudo-random pattern.
fn populate_data_pattern(buf: &mut [u8]) {
    let mut seed: u64 = 99098;
    for chunk in buf.chunks_exact_mut(4) {
        let value = (fast_rand64(&mut seed) & 0xFFFF_FFFF) as u32;
        chunk.copy_from_slice(&value.to_ne_bytes());
    }
}

fn fast_rand64(seed: &mut u64) -> u64 {
    *seed = seed
        .wrapping_mul(3935559000370003845)
        .wrapping_add(3037000493);
    *seed & 0x7FFF_FFFF_FFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_pattern_is_reproducible_and_non_trivial() {
        let mut a = vec![0u8; 64];
        let mut b = vec![0u8; 64];
        populate_data_pattern(&mut a);
        populate_data_pattern(&mut b);

        assert_eq!(a, b);
        assert!(a.iter().any(|&byte| byte != 0));
    }

    #[test]
    fn aligned_buf_respects_alignment() {
        let buf = AlignedBuf::zeroed(8192, 4096).unwrap();
        assert_eq!(buf.ptr.as_ptr() as usize % 4096, 0);
        assert_eq!(buf.len(), 8192);
        assert!(buf.iter().all(|&byte| byte == 0));
    }
}
