use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::{Direction, UpiuTransport};

/// `SG_IO` ioctl request number.
const SG_IO: libc::c_ulong = 0x2285;

const SG_IO_GUARD: i32 = b'Q' as i32;
const BSG_PROTOCOL_SCSI: u32 = 0;
const BSG_SUB_PROTOCOL_SCSI_TRANSPORT: u32 = 2;

/// Kernel `sg_io_v4` ioctl argument block.
///
/// ABI mirror only. UPIU request and reply messages are encoded and
/// decoded as byte slices by `ufsprims-upiu`; nothing is ever overlaid
/// on raw message memory.
#[repr(C)]
#[derive(Default)]
struct SgIoV4 {
    guard: i32,
    protocol: u32,
    subprotocol: u32,

    request_len: u32,
    request: u64,
    request_tag: u64,
    request_attr: u32,
    request_priority: u32,
    request_extra: u32,
    max_response_len: u32,
    response: u64,

    dout_iovec_count: u32,
    dout_xfer_len: u32,
    din_iovec_count: u32,
    din_xfer_len: u32,
    dout_xferp: u64,
    din_xferp: u64,

    timeout: u32,
    flags: u32,
    usr_ptr: u64,
    spare_in: u32,

    driver_status: u32,
    transport_status: u32,
    device_status: u32,
    retry_delay: u32,
    info: u32,
    duration: u32,
    response_len: u32,
    din_resid: i32,
    dout_resid: i32,
    generated_tag: u64,
    spare_out: u32,

    padding: u32,
}

/// An opened ufs-bsg device node (e.g. `/dev/ufs-bsg0`).
///
/// Owns the file descriptor for the duration of one command or sweep;
/// there is no sharing and no more than one outstanding exchange at any
/// time.
pub struct BsgDevice {
    file: File,
    path: PathBuf,
}

impl BsgDevice {
    /// Open the device read-write (required for query writes, flag
    /// manipulation, and UIC sets).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, true)
    }

    /// Open the device read-only (sufficient for query and UIC reads).
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, false)
    }

    fn open_with(path: impl AsRef<Path>, write: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(write)
            .open(&path)
            .map_err(|e| TransportError::Open {
                path: path.clone(),
                source: e,
            })?;
        debug!(?path, write, "opened bsg device");
        Ok(Self { file, path })
    }

    /// The device node path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UpiuTransport for BsgDevice {
    fn exchange(
        &self,
        request: &[u8],
        reply: &mut [u8],
        data: &mut [u8],
        dir: Direction,
    ) -> Result<()> {
        if reply.len() < 4 {
            return Err(TransportError::ReplyTooShort { len: reply.len() });
        }

        let mut sg = SgIoV4 {
            guard: SG_IO_GUARD,
            protocol: BSG_PROTOCOL_SCSI,
            subprotocol: BSG_SUB_PROTOCOL_SCSI_TRANSPORT,
            request: request.as_ptr() as u64,
            request_len: request.len() as u32,
            response: reply.as_mut_ptr() as u64,
            max_response_len: reply.len() as u32,
            ..SgIoV4::default()
        };

        if !data.is_empty() {
            match dir {
                Direction::FromDevice => {
                    sg.din_xferp = data.as_mut_ptr() as u64;
                    sg.din_xfer_len = data.len() as u32;
                }
                Direction::ToDevice => {
                    sg.dout_xferp = data.as_mut_ptr() as u64;
                    sg.dout_xfer_len = data.len() as u32;
                }
            }
        }

        // SAFETY: `sg` stays alive across the call and every pointer it
        // carries refers to a live slice of the stated length; the fd is
        // an open bsg device owned by this process.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), SG_IO, &mut sg) };
        if rc != 0 {
            return Err(TransportError::Ioctl(std::io::Error::last_os_error()));
        }

        classify_completion(
            sg.device_status,
            sg.transport_status,
            sg.driver_status,
            sg.info,
            reply,
        )?;

        debug!(
            request_len = request.len(),
            data_len = data.len(),
            ?dir,
            duration_ms = sg.duration,
            "bsg exchange complete"
        );

        Ok(())
    }
}

/// Classify a completed SG_IO call: midlayer status words first, then the
/// logical result word at the head of the bsg reply. A clean midlayer
/// completion with a non-zero reply result is a protocol failure, never
/// success.
fn classify_completion(
    device: u32,
    transport: u32,
    driver: u32,
    info: u32,
    reply: &[u8],
) -> Result<()> {
    if device != 0 || transport != 0 || driver != 0 || info != 0 {
        return Err(TransportError::Status {
            device,
            transport,
            driver,
        });
    }

    // First reply word is the bsg logical result (host-endian i32).
    let result = i32::from_ne_bytes(reply[0..4].try_into().unwrap());
    if result != 0 {
        return Err(TransportError::ReplyResult { result });
    }

    Ok(())
}

impl std::fmt::Debug for BsgDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BsgDevice").field("path", &self.path).finish()
    }
}
