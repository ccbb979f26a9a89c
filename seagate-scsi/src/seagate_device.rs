//! An enclosure, and the vendor commands it understands

use super::code_set::{CodeSet, InterfaceSet};
use super::debug;
use super::led::{CapacityLeds, LedState};
use super::scsi_transport::{DataPhase, Error, ScsiTransport};
use super::vpd::{
    self, decode_standard_inquiry, decode_vpd_page, DeviceIdentity,
    SerialNumber, VpdPage,
};

/// Allocation length for every INQUIRY, standard or VPD
const INQUIRY_LENGTH: usize = 255;

/// Length of every LED payload, in either direction
const LED_PAYLOAD_LENGTH: usize = 4;

const SET_CAPACITY_LED: u8 = 0xF8;
const SET_LED: u8 = 0xF9;
const GET_CAPACITY_LED: u8 = 0xF7;
const GET_LED: u8 = 0xFA;

/// INQUIRY
/// Seagate SCSI Commands Reference Manual s3.6
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Copy, Clone)]
#[repr(C)]
struct Inquiry {
    operation_code: u8,
    evpd: u8,
    page_code: u8,
    allocation_length_be: [u8; 2],
    control: u8,
}

impl Inquiry {
    fn new(evpd: Option<u8>, len: u16) -> Self {
        assert!(core::mem::size_of::<Self>() == 6);
        Self {
            operation_code: 0x12,
            evpd: evpd.is_some() as u8,
            page_code: evpd.unwrap_or_default(),
            allocation_length_be: len.to_be_bytes(),
            control: 0,
        }
    }
}

// SAFETY: all fields zeroable
unsafe impl bytemuck::Zeroable for Inquiry {}
// SAFETY: no padding, no disallowed bit patterns
unsafe impl bytemuck::Pod for Inquiry {}

/// The vendor LED commands (0xF7-0xFA)
///
/// Not in any published manual; the layout is that of the enclosures'
/// own utilities. Byte 6 carries the payload length.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Copy, Clone)]
#[repr(C)]
struct LedCommand {
    operation_code: u8,
    reserved1: [u8; 5],
    transfer_length: u8,
    reserved7: [u8; 2],
    control: u8,
}

impl LedCommand {
    fn new(operation_code: u8) -> Self {
        assert!(core::mem::size_of::<Self>() == 10);
        Self {
            operation_code,
            reserved1: [0; 5],
            transfer_length: LED_PAYLOAD_LENGTH as u8,
            reserved7: [0; 2],
            control: 0,
        }
    }
}

// SAFETY: all fields zeroable
unsafe impl bytemuck::Zeroable for LedCommand {}
// SAFETY: no padding, no disallowed bit patterns
unsafe impl bytemuck::Pod for LedCommand {}

/// Everything `identify` can find out about an enclosure
///
/// The optional parts are `None` when the device does not list the
/// corresponding VPD page.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// From standard INQUIRY
    pub identity: DeviceIdentity,
    /// VPD pages the device lists in page 0x00
    pub supported_pages: CodeSet,
    /// From VPD page 0x80
    pub serial: Option<SerialNumber>,
    /// From VPD page 0xC1
    pub features: Option<CodeSet>,
    /// From VPD page 0xC2
    pub interfaces: Option<InterfaceSet>,
}

impl DeviceInfo {
    fn has_feature(&self, feature: u8) -> bool {
        self.features.is_some_and(|f| f.contains(feature))
    }

    /// Does the device claim its activity LED can be controlled?
    pub fn has_led_control(&self) -> bool {
        self.has_feature(vpd::FEATURE_LED)
    }

    /// Does the device claim to have a controllable capacity gauge?
    pub fn has_capacity_leds(&self) -> bool {
        self.has_feature(vpd::FEATURE_LED_CAPACITY)
    }
}

/// A Seagate (or Maxtor) enclosure, reached over some [`ScsiTransport`]
///
/// Every method issues its commands one at a time and returns the first
/// error it meets; nothing is retried.
pub struct SeagateDevice<T: ScsiTransport> {
    transport: T,
}

impl<T: ScsiTransport> SeagateDevice<T> {
    /// Wrap a transport
    ///
    /// Nothing is sent to the device until a method is called.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Give back the transport (and so the device handle)
    pub fn into_inner(self) -> T {
        self.transport
    }

    async fn inquiry_raw(
        &mut self,
        evpd: Option<u8>,
        buf: &mut [u8; INQUIRY_LENGTH],
    ) -> Result<usize, Error<T::Error>> {
        let cmd = Inquiry::new(evpd, INQUIRY_LENGTH as u16);
        self.transport
            .command(bytemuck::bytes_of(&cmd), DataPhase::In(buf))
            .await
    }

    async fn vpd_page(&mut self, page: u8) -> Result<VpdPage, Error<T::Error>> {
        let mut buf = [0u8; INQUIRY_LENGTH];
        let sz = self.inquiry_raw(Some(page), &mut buf).await?;
        debug::println!("VPD page {} returned {} bytes", page, sz);
        Ok(decode_vpd_page(page, &buf[..sz.min(INQUIRY_LENGTH)])?)
    }

    /// Standard INQUIRY: vendor, product, revision, USB ids
    ///
    /// Fails with [`Error::UnsupportedVendor`] for anything that isn't a
    /// Seagate or Maxtor device.
    pub async fn inquiry(&mut self) -> Result<DeviceIdentity, Error<T::Error>> {
        let mut buf = [0u8; INQUIRY_LENGTH];
        let sz = self.inquiry_raw(None, &mut buf).await?;
        Ok(decode_standard_inquiry(&buf[..sz.min(INQUIRY_LENGTH)])?)
    }

    /// The VPD pages the device supports (page 0x00)
    pub async fn supported_pages(&mut self) -> Result<CodeSet, Error<T::Error>> {
        match self.vpd_page(vpd::SUPPORTED_PAGES).await? {
            VpdPage::SupportedPages(pages) => Ok(pages),
            _ => Err(Error::UnsupportedPage(vpd::SUPPORTED_PAGES)),
        }
    }

    /// The unit serial number (page 0x80)
    pub async fn serial_number(
        &mut self,
    ) -> Result<SerialNumber, Error<T::Error>> {
        match self.vpd_page(vpd::SERIAL_NUMBER).await? {
            VpdPage::SerialNumber(serial) => Ok(serial),
            _ => Err(Error::UnsupportedPage(vpd::SERIAL_NUMBER)),
        }
    }

    /// The vendor feature codes (page 0xC1)
    pub async fn features(&mut self) -> Result<CodeSet, Error<T::Error>> {
        match self.vpd_page(vpd::FEATURES).await? {
            VpdPage::Features(features) => Ok(features),
            _ => Err(Error::UnsupportedPage(vpd::FEATURES)),
        }
    }

    /// The vendor interface codes (page 0xC2)
    pub async fn interfaces(
        &mut self,
    ) -> Result<InterfaceSet, Error<T::Error>> {
        match self.vpd_page(vpd::INTERFACES).await? {
            VpdPage::Interfaces(interfaces) => Ok(interfaces),
            _ => Err(Error::UnsupportedPage(vpd::INTERFACES)),
        }
    }

    /// Everything at once: standard INQUIRY, then each VPD page that
    /// the device says it supports
    pub async fn identify(&mut self) -> Result<DeviceInfo, Error<T::Error>> {
        let identity = self.inquiry().await?;
        let supported_pages = self.supported_pages().await?;
        debug::println!("{} VPD pages supported", supported_pages.len());

        let serial = if supported_pages.contains(vpd::SERIAL_NUMBER) {
            Some(self.serial_number().await?)
        } else {
            None
        };
        let features = if supported_pages.contains(vpd::FEATURES) {
            Some(self.features().await?)
        } else {
            None
        };
        let interfaces = if supported_pages.contains(vpd::INTERFACES) {
            Some(self.interfaces().await?)
        } else {
            None
        };

        Ok(DeviceInfo {
            identity,
            supported_pages,
            serial,
            features,
            interfaces,
        })
    }

    async fn read_payload(
        &mut self,
        operation_code: u8,
    ) -> Result<[u8; LED_PAYLOAD_LENGTH], Error<T::Error>> {
        let cmd = LedCommand::new(operation_code);
        let mut payload = [0u8; LED_PAYLOAD_LENGTH];
        let sz = self
            .transport
            .command(bytemuck::bytes_of(&cmd), DataPhase::In(&mut payload))
            .await?;
        if sz != LED_PAYLOAD_LENGTH {
            debug::println!("LED read returned {} bytes", sz);
            return Err(Error::ShortRead);
        }
        Ok(payload)
    }

    async fn write_payload(
        &mut self,
        operation_code: u8,
        payload: [u8; LED_PAYLOAD_LENGTH],
    ) -> Result<(), Error<T::Error>> {
        let cmd = LedCommand::new(operation_code);
        self.transport
            .command(bytemuck::bytes_of(&cmd), DataPhase::Out(&payload))
            .await?;
        Ok(())
    }

    /// Both channels of the activity LED
    pub async fn led_state(&mut self) -> Result<LedState, Error<T::Error>> {
        Ok(LedState::decode(self.read_payload(GET_LED).await?))
    }

    /// Is the activity LED lit? `None` if the device won't say.
    pub async fn led(&mut self) -> Result<Option<bool>, Error<T::Error>> {
        Ok(self.led_state().await?.is_on())
    }

    /// Write both channels of the activity LED exactly as given
    pub async fn set_led_state(
        &mut self,
        state: LedState,
    ) -> Result<(), Error<T::Error>> {
        self.write_payload(SET_LED, state.encode()).await
    }

    /// Switch the activity LED on or off
    ///
    /// Reads the current state first, so that channels the enclosure
    /// doesn't have are written back as absent. If that read fails,
    /// nothing is written.
    pub async fn set_led(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        let current = self.led_state().await?;
        let new = current.switched(on);
        debug::println!(
            "LED channels {} {} -> {} {}",
            current.channel0.to_wire(),
            current.channel1.to_wire(),
            new.channel0.to_wire(),
            new.channel1.to_wire()
        );
        self.set_led_state(new).await
    }

    /// The capacity gauge
    pub async fn capacity_led(
        &mut self,
    ) -> Result<CapacityLeds, Error<T::Error>> {
        Ok(CapacityLeds::decode(self.read_payload(GET_CAPACITY_LED).await?))
    }

    /// Light the given capacity-gauge segments
    pub async fn set_capacity_led(
        &mut self,
        leds: CapacityLeds,
    ) -> Result<(), Error<T::Error>> {
        self.write_payload(SET_CAPACITY_LED, leds.encode()).await
    }

    /// Set the capacity gauge to show a fill percentage (0-100)
    ///
    /// An out-of-range percentage fails before anything is sent.
    pub async fn set_capacity_led_percent(
        &mut self,
        percent: u32,
    ) -> Result<(), Error<T::Error>> {
        let leds = CapacityLeds::from_percent(percent)?;
        self.set_capacity_led(leds).await
    }
}

#[cfg(all(test, feature = "std"))]
#[path = "tests/seagate_device.rs"]
pub(crate) mod tests;
