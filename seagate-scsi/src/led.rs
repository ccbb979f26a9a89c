//! The LED payloads exchanged with the enclosure
//!
//! Both the activity LED and the capacity gauge are read and written as
//! four-byte payloads. For the activity LED, bytes 0 and 1 each describe
//! one physical channel; for the capacity gauge, byte 1 is a four-bit
//! thermometer code.

use super::scsi_transport::PayloadError;
use core::fmt;

/// The state of one LED channel, as one wire byte
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LedChannel {
    /// 0xFF: the enclosure has no such LED; writing this leaves it alone
    Absent,
    /// 0x01
    Off,
    /// 0x02
    On,
    /// Anything else the device might report
    Unknown(u8),
}

impl LedChannel {
    /// Interpret a wire byte; never fails
    pub const fn from_wire(b: u8) -> Self {
        match b {
            0xFF => LedChannel::Absent,
            0x01 => LedChannel::Off,
            0x02 => LedChannel::On,
            other => LedChannel::Unknown(other),
        }
    }

    /// The wire byte for this state
    pub const fn to_wire(self) -> u8 {
        match self {
            LedChannel::Absent => 0xFF,
            LedChannel::Off => 0x01,
            LedChannel::On => 0x02,
            LedChannel::Unknown(b) => b,
        }
    }

    /// Does the enclosure have this LED at all?
    pub fn is_present(self) -> bool {
        self != LedChannel::Absent
    }
}

/// The activity-LED payload: two channels plus two zero bytes
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LedState {
    /// Byte 0
    pub channel0: LedChannel,
    /// Byte 1
    pub channel1: LedChannel,
}

impl LedState {
    /// The state to write to switch the LED on or off
    ///
    /// A channel that is not present is written as
    /// [`LedChannel::Absent`], except that channel 0 is always written
    /// as `On` when switching on.
    pub fn new(led_on: bool, channel0_present: bool, channel1_present: bool) -> Self {
        let present = |p: bool, state: LedChannel| {
            if p {
                state
            } else {
                LedChannel::Absent
            }
        };
        if led_on {
            Self {
                channel0: LedChannel::On,
                channel1: present(channel1_present, LedChannel::On),
            }
        } else {
            Self {
                channel0: present(channel0_present, LedChannel::Off),
                channel1: present(channel1_present, LedChannel::Off),
            }
        }
    }

    /// Interpret a payload read from the device
    pub fn decode(payload: [u8; 4]) -> Self {
        Self {
            channel0: LedChannel::from_wire(payload[0]),
            channel1: LedChannel::from_wire(payload[1]),
        }
    }

    /// The payload to write to the device
    pub fn encode(&self) -> [u8; 4] {
        [self.channel0.to_wire(), self.channel1.to_wire(), 0, 0]
    }

    /// Is the LED lit?
    ///
    /// Either channel being on means on; otherwise either channel being
    /// off means off. If neither channel reports on or off, the answer
    /// is `None`.
    pub fn is_on(&self) -> Option<bool> {
        let channels = [self.channel0, self.channel1];
        if channels.contains(&LedChannel::On) {
            Some(true)
        } else if channels.contains(&LedChannel::Off) {
            Some(false)
        } else {
            None
        }
    }

    /// Does the enclosure have a channel-0 LED?
    pub fn channel0_present(&self) -> bool {
        self.channel0.is_present()
    }

    /// Does the enclosure have a channel-1 LED?
    pub fn channel1_present(&self) -> bool {
        self.channel1.is_present()
    }

    /// The state to write to switch the LED, keeping these channels
    pub fn switched(&self, led_on: bool) -> Self {
        Self::new(led_on, self.channel0_present(), self.channel1_present())
    }
}

/// Build an activity-LED payload from the aggregate state and the
/// channel-presence flags
pub fn encode_led(
    led_on: bool,
    channel0_present: bool,
    channel1_present: bool,
) -> [u8; 4] {
    LedState::new(led_on, channel0_present, channel1_present).encode()
}

/// Split an activity-LED payload into (on, channel 0 present, channel 1
/// present)
pub fn decode_led(payload: [u8; 4]) -> (Option<bool>, bool, bool) {
    let state = LedState::decode(payload);
    (
        state.is_on(),
        state.channel0_present(),
        state.channel1_present(),
    )
}

/// Byte 0 of every capacity-gauge payload written to the device
const CAPACITY_LED_MODE: u8 = 0x04;

/// Map a fill percentage onto the capacity gauge's four segments
///
/// | percent | segments |
/// |---------|----------|
/// | 0-25    | `0001`   |
/// | 26-50   | `0011`   |
/// | 51-85   | `0111`   |
/// | 86-100  | `1111`   |
pub fn percent_to_flags(percent: u32) -> Result<u8, PayloadError> {
    match percent {
        0..=25 => Ok(0b0001),
        26..=50 => Ok(0b0011),
        51..=85 => Ok(0b0111),
        86..=100 => Ok(0b1111),
        _ => Err(PayloadError::OutOfRange),
    }
}

/// The capacity gauge: a bitmask of lit segments
///
/// Bit 0 is the lowest segment. Only the low four bits mean anything,
/// but the byte is passed to the device as given.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CapacityLeds(pub u8);

impl CapacityLeds {
    /// The segments for a fill percentage (0-100)
    pub fn from_percent(percent: u32) -> Result<Self, PayloadError> {
        Ok(Self(percent_to_flags(percent)?))
    }

    /// Parse the four-character display form, lowest segment first
    ///
    /// So `"1000"` is just the bottom segment, bitmask `0b0001`. Anything
    /// but exactly four `0`/`1` characters is `None`.
    pub fn from_display_bits(s: &str) -> Option<Self> {
        if s.len() != 4 {
            return None;
        }
        let mut bits = 0u8;
        for (i, c) in s.bytes().enumerate() {
            match c {
                b'0' => {}
                b'1' => bits |= 1 << i,
                _ => return None,
            }
        }
        Some(Self(bits))
    }

    /// Interpret a payload read from the device
    pub fn decode(payload: [u8; 4]) -> Self {
        Self(payload[1])
    }

    /// The payload to write to the device
    pub fn encode(&self) -> [u8; 4] {
        [CAPACITY_LED_MODE, self.0, 0, 0]
    }

    /// Is segment `n` (0-3) lit?
    pub fn is_lit(&self, n: u8) -> bool {
        n < 4 && (self.0 & (1 << n)) != 0
    }
}

/// The display form: four `0`/`1` characters, lowest segment first
impl fmt::Display for CapacityLeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in 0..4 {
            f.write_str(if self.is_lit(n) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "std"))]
#[path = "tests/led.rs"]
mod tests;
