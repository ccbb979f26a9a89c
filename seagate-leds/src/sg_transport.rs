//! [`ScsiTransport`] over the Linux SCSI-generic `SG_IO` ioctl

use nix::errno::Errno;
use seagate_scsi::{DataPhase, Error, ScsiTransport};
use std::fs::{File, OpenOptions};
use std::future::Future;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, trace};

const SG_DXFER_NONE: i32 = -1;
const SG_DXFER_TO_DEV: i32 = -2;
const SG_DXFER_FROM_DEV: i32 = -3;

const SENSE_LENGTH: usize = 64;

/// Milliseconds
const TIMEOUT_IN: u32 = 10_000;
const TIMEOUT_OUT: u32 = 6_000;

/// `struct sg_io_hdr` from `<scsi/sg.h>`
#[derive(Debug)]
#[repr(C)]
#[allow(dead_code)] // the kernel reads and writes these, we don't
pub(crate) struct SgIoHdr {
    interface_id: i32,
    dxfer_direction: i32,
    cmd_len: u8,
    mx_sb_len: u8,
    iovec_count: u16,
    dxfer_len: u32,
    dxferp: *mut libc::c_void,
    cmdp: *const u8,
    sbp: *mut u8,
    timeout: u32,
    flags: u32,
    pack_id: i32,
    usr_ptr: *mut libc::c_void,
    status: u8,
    masked_status: u8,
    msg_status: u8,
    sb_len_wr: u8,
    host_status: u16,
    driver_status: u16,
    resid: i32,
    duration: u32,
    info: u32,
}

nix::ioctl_readwrite_bad!(sg_io, 0x2285, SgIoHdr);

impl SgIoHdr {
    /// A header for one command
    ///
    /// The pointers borrow from `cmd`, `data` and `sense`, which must
    /// outlive the ioctl.
    pub(crate) fn new(
        cmd: &[u8],
        data: &mut DataPhase,
        sense: &mut [u8; SENSE_LENGTH],
    ) -> Self {
        let (dxfer_direction, dxferp, dxfer_len, timeout) = match data {
            DataPhase::In(buf) => (
                SG_DXFER_FROM_DEV,
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
                TIMEOUT_IN,
            ),
            DataPhase::Out(buf) => (
                SG_DXFER_TO_DEV,
                buf.as_ptr() as *mut libc::c_void,
                buf.len(),
                TIMEOUT_OUT,
            ),
            DataPhase::None => {
                (SG_DXFER_NONE, core::ptr::null_mut(), 0, TIMEOUT_OUT)
            }
        };
        Self {
            interface_id: b'S' as i32,
            dxfer_direction,
            cmd_len: cmd.len() as u8,
            mx_sb_len: SENSE_LENGTH as u8,
            iovec_count: 0,
            dxfer_len: dxfer_len as u32,
            dxferp,
            cmdp: cmd.as_ptr(),
            sbp: sense.as_mut_ptr(),
            timeout,
            flags: 0,
            pack_id: 0,
            usr_ptr: core::ptr::null_mut(),
            status: 0,
            masked_status: 0,
            msg_status: 0,
            sb_len_wr: 0,
            host_status: 0,
            driver_status: 0,
            resid: 0,
            duration: 0,
            info: 0,
        }
    }

    /// Did the device, the host adapter and the driver all report success?
    pub(crate) fn succeeded(&self) -> bool {
        self.status == 0 && self.host_status == 0 && self.driver_status == 0
    }

    /// Bytes actually moved in the data phase
    pub(crate) fn transferred(&self) -> usize {
        let resid = usize::try_from(self.resid).unwrap_or(0);
        (self.dxfer_len as usize).saturating_sub(resid)
    }
}

/// An open SCSI-generic device node (`/dev/sgN`, or a block device
/// such as `/dev/sdb`)
///
/// The file is closed when the transport is dropped.
#[derive(Debug)]
pub struct SgTransport {
    file: File,
}

impl SgTransport {
    /// Open a device node read-write and non-blocking
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)?;
        debug!(?path, "opened device");
        Ok(Self { file })
    }

    fn execute(
        &mut self,
        cmd: &[u8],
        mut data: DataPhase,
    ) -> Result<usize, Error<Errno>> {
        let mut sense = [0u8; SENSE_LENGTH];
        let mut hdr = SgIoHdr::new(cmd, &mut data, &mut sense);

        // SAFETY: every pointer in hdr refers to a buffer borrowed for
        // the duration of this call, and the lengths match those buffers
        unsafe { sg_io(self.file.as_raw_fd(), &mut hdr) }
            .map_err(Error::Transport)?;

        trace!(
            opcode = cmd.first().copied(),
            status = hdr.status,
            host_status = hdr.host_status,
            driver_status = hdr.driver_status,
            resid = hdr.resid,
            "SG_IO complete"
        );
        if !hdr.succeeded() {
            let sb_len = (hdr.sb_len_wr as usize).min(SENSE_LENGTH);
            debug!(sense = ?&sense[..sb_len], "command failed");
            return Err(Error::CommandFailed);
        }
        Ok(hdr.transferred())
    }
}

impl ScsiTransport for SgTransport {
    type Error = Errno;

    fn command(
        &mut self,
        cmd: &[u8],
        data: DataPhase,
    ) -> impl Future<Output = Result<usize, Error<Self::Error>>> {
        // SG_IO blocks until the command completes
        std::future::ready(self.execute(cmd, data))
    }
}

#[cfg(test)]
#[path = "tests/sg_transport.rs"]
mod tests;
