//! Decoding INQUIRY responses: standard data and VPD pages

use super::code_set::{CodeSet, InterfaceSet};
use super::scsi_transport::PayloadError;
use core::fmt;

/// VPD page 0x00: list of supported VPD pages
pub const SUPPORTED_PAGES: u8 = 0x00;
/// VPD page 0x80: unit serial number
pub const SERIAL_NUMBER: u8 = 0x80;
/// VPD page 0xC1 (vendor): feature list
pub const FEATURES: u8 = 0xC1;
/// VPD page 0xC2 (vendor): interface list
pub const INTERFACES: u8 = 0xC2;

/// Feature code: power management
pub const FEATURE_POWER: u8 = 8;
/// Feature code: the activity LED can be controlled
pub const FEATURE_LED: u8 = 55;
/// Feature code: the capacity-gauge LEDs can be controlled
pub const FEATURE_LED_CAPACITY: u8 = 56;

/// Longest serial number the serial VPD page may carry
pub const MAX_SERIAL_LEN: usize = 20;

/// Vendor fields (untrimmed) of the enclosures this crate drives
///
/// The second entry is "Maxtor " plus a NUL, not a space: the field is
/// compared over all eight bytes.
const SUPPORTED_VENDORS: [[u8; 8]; 4] =
    [*b"Seagate ", *b"Maxtor \0", *b"Seagate_", *b"Maxtor_ "];

/// isspace() in the "C" locale, which unlike `u8::is_ascii_whitespace`
/// includes vertical tab
fn is_space(b: &u8) -> bool {
    matches!(*b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

fn trim(raw: &[u8]) -> &[u8] {
    let start = raw.iter().position(|b| !is_space(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_space(b)).map_or(start, |e| e + 1);
    &raw[start..end]
}

/// A short ASCII string held inline, without allocation
///
/// Used for the fixed-width INQUIRY fields, for serial numbers, and for
/// locator tokens.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedAscii<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> FixedAscii<N> {
    /// An empty string
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Copy a field, removing leading and trailing whitespace
    ///
    /// Returns `None` if what remains does not fit.
    pub fn trimmed(raw: &[u8]) -> Option<Self> {
        let mut s = Self::new();
        s.push(trim(raw)).ok()?;
        Some(s)
    }

    /// The string's bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the string empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn push(&mut self, data: &[u8]) -> Result<(), fmt::Error> {
        let end = self.len + data.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.bytes[self.len..end].copy_from_slice(data);
        self.len = end;
        Ok(())
    }

    pub(crate) fn map_bytes(&mut self, f: impl Fn(u8) -> u8) {
        for b in &mut self.bytes[..self.len] {
            *b = f(*b);
        }
    }
}

impl<const N: usize> Default for FixedAscii<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for FixedAscii<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s.as_bytes())
    }
}

impl<const N: usize> fmt::Display for FixedAscii<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.as_bytes() {
            let c = if b.is_ascii() { char::from(b) } else { '?' };
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<const N: usize> fmt::Debug for FixedAscii<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_bytes().escape_ascii())
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for FixedAscii<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:a}", self.as_bytes())
    }
}

impl<const N: usize> PartialEq<str> for FixedAscii<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for FixedAscii<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// A unit serial number, from VPD page 0x80
pub type SerialNumber = FixedAscii<MAX_SERIAL_LEN>;

/// Standard INQUIRY data, with Seagate's vendor-specific trailer
/// Seagate SCSI Commands Reference Manual s3.6.2
///
/// The first 36 bytes are the standard ones; the enclosures follow them
/// with their USB product and vendor ids, big-endian.
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Copy, Clone, Default)]
#[repr(C)]
#[allow(dead_code)] // only the identification fields are read
pub(crate) struct StandardInquiryData {
    pub(crate) peripheral_device_type: u8,
    pub(crate) removable: u8,
    pub(crate) version: u8,
    pub(crate) data_format: u8,
    pub(crate) additional_length: u8,
    pub(crate) flags: [u8; 3],
    pub(crate) vendor_id: [u8; 8],
    pub(crate) product_id: [u8; 16],
    pub(crate) product_revision: [u8; 4],
    pub(crate) product_code: [u8; 2],
    pub(crate) vendor_code: [u8; 2],
}

// SAFETY: all fields zeroable
unsafe impl bytemuck::Zeroable for StandardInquiryData {}
// SAFETY: no padding, no disallowed bit patterns
unsafe impl bytemuck::Pod for StandardInquiryData {}

/// Who made the device, and what it is
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// T10 vendor id, e.g. "Seagate"
    pub vendor_id: FixedAscii<8>,
    /// Product name, e.g. "GoFlex Desk"
    pub product_id: FixedAscii<16>,
    /// Firmware revision
    pub revision: FixedAscii<4>,
    /// USB vendor id
    pub vid: u16,
    /// USB product id
    pub pid: u16,
}

/// Parse a standard INQUIRY response, refusing non-Seagate devices
pub fn decode_standard_inquiry(
    raw: &[u8],
) -> Result<DeviceIdentity, PayloadError> {
    let data: &StandardInquiryData = raw
        .get(..core::mem::size_of::<StandardInquiryData>())
        .and_then(|b| bytemuck::try_from_bytes(b).ok())
        .ok_or(PayloadError::ShortRead)?;

    if !SUPPORTED_VENDORS.contains(&data.vendor_id) {
        return Err(PayloadError::UnsupportedVendor);
    }

    // Fields are exactly their array widths, so trimming cannot overflow
    Ok(DeviceIdentity {
        vendor_id: FixedAscii::trimmed(&data.vendor_id).unwrap_or_default(),
        product_id: FixedAscii::trimmed(&data.product_id).unwrap_or_default(),
        revision: FixedAscii::trimmed(&data.product_revision)
            .unwrap_or_default(),
        vid: u16::from_be_bytes(data.vendor_code),
        pid: u16::from_be_bytes(data.product_code),
    })
}

/// A decoded VPD page
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VpdPage {
    /// Page 0x00: which VPD pages the device supports
    SupportedPages(CodeSet),
    /// Page 0x80: the unit serial number
    SerialNumber(SerialNumber),
    /// Page 0xC1: vendor feature codes
    Features(CodeSet),
    /// Page 0xC2: vendor interface codes
    Interfaces(InterfaceSet),
}

/// The payload of a VPD page: byte 3 is its length, and it starts at
/// byte 4
fn payload(raw: &[u8]) -> Result<&[u8], PayloadError> {
    let len = *raw.get(3).ok_or(PayloadError::ShortRead)? as usize;
    raw.get(4..4 + len).ok_or(PayloadError::ShortRead)
}

/// Decode the response to a VPD INQUIRY for page `page_code`
pub fn decode_vpd_page(
    page_code: u8,
    raw: &[u8],
) -> Result<VpdPage, PayloadError> {
    match page_code {
        SUPPORTED_PAGES => {
            Ok(VpdPage::SupportedPages(payload(raw)?.iter().copied().collect()))
        }
        SERIAL_NUMBER => {
            let len = *raw.get(3).ok_or(PayloadError::ShortRead)? as usize;
            if len > MAX_SERIAL_LEN {
                return Err(PayloadError::SerialTooLong);
            }
            // NUL-padded on some firmware
            let p = payload(raw)?;
            let p = p.split(|b| *b == 0).next().unwrap_or(p);
            let serial = SerialNumber::trimmed(p)
                .ok_or(PayloadError::SerialTooLong)?;
            Ok(VpdPage::SerialNumber(serial))
        }
        FEATURES => {
            Ok(VpdPage::Features(payload(raw)?.iter().copied().collect()))
        }
        INTERFACES => Ok(VpdPage::Interfaces(InterfaceSet(
            payload(raw)?.iter().copied().collect(),
        ))),
        other => Err(PayloadError::UnsupportedPage(other)),
    }
}

#[cfg(all(test, feature = "std"))]
#[path = "tests/vpd.rs"]
pub(crate) mod tests;
