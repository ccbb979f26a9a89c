//! Vendor SCSI commands for Seagate external drive enclosures
//!
//! Seagate's GoFlex and Backup Plus enclosures (and some Maxtor-branded
//! ones) expose their activity LED, their "capacity gauge" LEDs, and a
//! little inventory information through a handful of vendor-specific
//! SCSI commands and VPD pages. This crate builds those commands, decodes
//! the replies, and issues them over any [`ScsiTransport`].
//!
//! It is deliberately not a general SCSI library: the only standard
//! command it issues is INQUIRY, and it never asks for sense data.
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
mod debug;
pub mod code_set;
pub use code_set::{CodeSet, Interface, InterfaceSet};
pub mod labels;
pub mod led;
pub use led::{CapacityLeds, LedChannel, LedState};
pub mod locator;
pub use locator::{build_locator_token, download_finder_url, LocatorToken};
pub mod scsi_transport;
pub use scsi_transport::{DataPhase, Error, PayloadError, ScsiTransport};
pub mod seagate_device;
pub use seagate_device::{DeviceInfo, SeagateDevice};
pub mod vpd;
pub use vpd::{decode_vpd_page, DeviceIdentity, FixedAscii, SerialNumber, VpdPage};
