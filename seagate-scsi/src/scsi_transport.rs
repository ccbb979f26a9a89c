//! The transport a [`SeagateDevice`](crate::SeagateDevice) sends its
//! commands over, and the errors those commands return

use core::future::Future;

/// The data phase of a SCSI transaction: in, out, or none
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(PartialEq, Eq)]
pub enum DataPhase<'a> {
    /// The command involves data transfer from device to host
    In(&'a mut [u8]),
    /// The command involves data transfer from host to device
    Out(&'a [u8]),
    /// The command does not involve data transfer (the status response
    /// includes everything the host needs)
    None,
}

/// An abstract SCSI communications channel to a single device
///
/// On Linux this is typically the SG_IO ioctl on an open device node;
/// on a USB host it would be a mass-storage bulk-only transport. Either
/// way, exactly one device sits at the far end.
pub trait ScsiTransport {
    /// The type of errors which can arise from the transport itself: for
    /// instance, an `errno` from a failed ioctl.
    type Error: PartialEq + Eq;

    /// Execute one SCSI command
    ///
    /// The command is a byte slice containing the raw command block:
    /// for the vendor LED commands that is always ten bytes, for
    /// INQUIRY it is six.
    ///
    /// On success, returns the number of bytes actually transferred in
    /// the data phase, which may be fewer than the buffer holds. The
    /// transport does *not* issue REQUEST SENSE on failure; a command
    /// the device rejects is simply [`Error::CommandFailed`].
    fn command(
        &mut self,
        cmd: &[u8],
        data: DataPhase,
    ) -> impl Future<Output = Result<usize, Error<Self::Error>>>;
}

/// Errors which can arise while talking to an enclosure
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error<T: PartialEq + Eq> {
    /// The device reported failure of the command.
    CommandFailed,

    /// The `ScsiTransport` itself (as opposed to the device) reported an error.
    Transport(T),

    /// Standard INQUIRY worked, but this isn't a Seagate or Maxtor device.
    UnsupportedVendor,

    /// The serial-number VPD page is longer than any Seagate serial.
    SerialTooLong,

    /// The device returned less data than the reply format requires.
    ShortRead,

    /// A capacity percentage above 100 was requested.
    OutOfRange,

    /// There is no decoder for this VPD page.
    UnsupportedPage(u8),
}

/// Errors from decoding or encoding a payload, independent of transport
///
/// Every variant has a same-named counterpart in [`Error`], so `?`
/// lifts a codec failure straight into a device failure.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum PayloadError {
    UnsupportedVendor,
    SerialTooLong,
    ShortRead,
    OutOfRange,
    UnsupportedPage(u8),
}

impl<T: PartialEq + Eq> From<PayloadError> for Error<T> {
    fn from(e: PayloadError) -> Self {
        match e {
            PayloadError::UnsupportedVendor => Error::UnsupportedVendor,
            PayloadError::SerialTooLong => Error::SerialTooLong,
            PayloadError::ShortRead => Error::ShortRead,
            PayloadError::OutOfRange => Error::OutOfRange,
            PayloadError::UnsupportedPage(p) => Error::UnsupportedPage(p),
        }
    }
}

#[cfg(feature = "std")]
impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PayloadError::UnsupportedVendor => {
                f.write_str("this does not appear to be a Seagate/Maxtor device")
            }
            PayloadError::SerialTooLong => f.write_str("serial number too long"),
            PayloadError::ShortRead => {
                f.write_str("device returned less data than expected")
            }
            PayloadError::OutOfRange => {
                f.write_str("percentage must be between 0 and 100")
            }
            PayloadError::UnsupportedPage(p) => {
                write!(f, "no decoder for VPD page 0x{p:02X}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PayloadError {}

#[cfg(feature = "std")]
impl<T: PartialEq + Eq + core::fmt::Debug> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::CommandFailed => f.write_str("device rejected the command"),
            Error::Transport(e) => write!(f, "transport error: {e:?}"),
            Error::UnsupportedVendor => {
                write!(f, "{}", PayloadError::UnsupportedVendor)
            }
            Error::SerialTooLong => write!(f, "{}", PayloadError::SerialTooLong),
            Error::ShortRead => write!(f, "{}", PayloadError::ShortRead),
            Error::OutOfRange => write!(f, "{}", PayloadError::OutOfRange),
            Error::UnsupportedPage(p) => {
                write!(f, "{}", PayloadError::UnsupportedPage(*p))
            }
        }
    }
}

#[cfg(feature = "std")]
impl<T: PartialEq + Eq + core::fmt::Debug> std::error::Error for Error<T> {}
