use super::*;
use futures::executor::block_on;
use seagate_scsi::{DataPhase, Error};
use std::future::Future;

/// An enclosure that answers from canned state and records writes
#[derive(Default)]
struct FakeEnclosure {
    vendor: [u8; 8],
    pages: Vec<u8>,
    serial: Vec<u8>,
    features: Vec<u8>,
    interfaces: Vec<u8>,
    led: [u8; 4],
    capacity: u8,
    fail: Option<u8>,
    commands: Vec<u8>,
    writes: Vec<(u8, [u8; 4])>,
}

impl FakeEnclosure {
    fn goflex() -> Self {
        Self {
            vendor: *b"Seagate ",
            pages: vec![0x00, 0x80, 0xC1, 0xC2],
            serial: b"NA0ABCDE".to_vec(),
            features: vec![0x01, 0x08, 0x37],
            interfaces: vec![0x04, 0x4A],
            led: [0x01, 0xFF, 0, 0],
            capacity: 0x07,
            ..Default::default()
        }
    }

    fn inquiry(&self) -> Vec<u8> {
        let mut v = vec![0u8; 255];
        v[8..16].copy_from_slice(&self.vendor);
        v[16..32].copy_from_slice(b"GoFlex Desk     ");
        v[32..36].copy_from_slice(b"0D19");
        v[36..38].copy_from_slice(&0x50A5_u16.to_be_bytes());
        v[38..40].copy_from_slice(&0x0BC2_u16.to_be_bytes());
        v
    }

    fn vpd(&self, page: u8) -> Vec<u8> {
        let payload = match page {
            0x00 => &self.pages,
            0x80 => &self.serial,
            0xC1 => &self.features,
            _ => &self.interfaces,
        };
        let mut v = vec![0u8; 255];
        v[1] = page;
        v[3] = payload.len() as u8;
        v[4..4 + payload.len()].copy_from_slice(payload);
        v
    }

    fn reply(&mut self, cmd: &[u8], data: DataPhase) -> Result<usize, Error<()>> {
        self.commands.push(cmd[0]);
        if self.fail == Some(cmd[0]) {
            return Err(Error::CommandFailed);
        }
        match (cmd[0], data) {
            (0x12, DataPhase::In(buf)) => {
                let reply = if cmd[1] == 0 {
                    self.inquiry()
                } else {
                    self.vpd(cmd[2])
                };
                buf[..reply.len()].copy_from_slice(&reply);
                Ok(reply.len())
            }
            (0xFA, DataPhase::In(buf)) => {
                buf.copy_from_slice(&self.led);
                Ok(4)
            }
            (0xF7, DataPhase::In(buf)) => {
                buf.copy_from_slice(&[0x04, self.capacity, 0, 0]);
                Ok(4)
            }
            (op @ (0xF8 | 0xF9), DataPhase::Out(buf)) => {
                let mut payload = [0u8; 4];
                payload.copy_from_slice(buf);
                self.writes.push((op, payload));
                Ok(4)
            }
            _ => Err(Error::CommandFailed),
        }
    }
}

impl ScsiTransport for FakeEnclosure {
    type Error = ();

    fn command(
        &mut self,
        cmd: &[u8],
        data: DataPhase,
    ) -> impl Future<Output = Result<usize, Error<Self::Error>>> {
        std::future::ready(self.reply(cmd, data))
    }
}

fn run_with(
    fake: FakeEnclosure,
    command: Command,
) -> (Result<()>, String, FakeEnclosure) {
    let mut device = SeagateDevice::new(fake);
    let mut out = Vec::new();
    let r = block_on(run(&mut device, command, 2013, &mut out));
    (r, String::from_utf8(out).unwrap(), device.into_inner())
}

#[test]
fn led_values() {
    assert_eq!(parse_led_value("1"), Ok(true));
    assert_eq!(parse_led_value("on"), Ok(true));
    assert_eq!(parse_led_value("0"), Ok(false));
    assert_eq!(parse_led_value("off"), Ok(false));
    assert!(parse_led_value("ON").is_err());
    assert!(parse_led_value("2").is_err());
    assert!(parse_led_value("").is_err());
}

#[test]
fn capacity_percent() {
    assert_eq!(parse_capacity_value("90%"), Ok(CapacityValue::Percent(90)));
    assert_eq!(parse_capacity_value("0%"), Ok(CapacityValue::Percent(0)));
    assert_eq!(parse_capacity_value("100%"), Ok(CapacityValue::Percent(100)));
    assert!(parse_capacity_value("101%").is_err());
    assert!(parse_capacity_value("x%").is_err());
}

#[test]
fn capacity_binary_is_lowest_first() {
    assert_eq!(
        parse_capacity_value("1000"),
        Ok(CapacityValue::Leds(CapacityLeds(0b0001)))
    );
    assert_eq!(
        parse_capacity_value("1110"),
        Ok(CapacityValue::Leds(CapacityLeds(0b0111)))
    );
    assert!(parse_capacity_value("1210").is_err());
}

#[test]
fn capacity_decimal() {
    assert_eq!(
        parse_capacity_value("15"),
        Ok(CapacityValue::Leds(CapacityLeds(15)))
    );
    // Five characters, so decimal rather than binary
    assert_eq!(
        parse_capacity_value("00015"),
        Ok(CapacityValue::Leds(CapacityLeds(15)))
    );
    assert!(parse_capacity_value("256").is_err());
    assert!(parse_capacity_value("lots").is_err());
}

#[test]
fn info() {
    let (r, out, fake) = run_with(FakeEnclosure::goflex(), Command::Info);
    r.unwrap();
    assert_eq!(
        out,
        "0BC2:50A5 Seagate GoFlex Desk (0D19)\n\
         Supported VPD Pages:\n\
         \t[0x00] Standard Inquiry\n\
         \t[0x80] Serial Number\n\
         \t[0xC1] Features\n\
         \t[0xC2] Interfaces\n\
         Serial #: NA0ABCDE\n\
         Download Finder URL: https://apps1.seagate.com/downloads/request.html?userPreferredLocaleCookie=en_EN_&fryqrp=QYSAQEAN5NOPQR7568\n\
         Features:\n\
         \t[0x01] Button\n\
         \t[0x08] Power\n\
         \t[0x37] LED Control\n\
         Interfaces:\n\
         \t[0x04] USB\n\
         \t[0x0A] USB3.0 [active]\n"
    );
    assert!(fake.writes.is_empty());
}

#[test]
fn info_nul_padded_serial() {
    let fake = FakeEnclosure {
        serial: b"NA0ABCDE\0\0\0\0".to_vec(),
        ..FakeEnclosure::goflex()
    };
    let (r, out, _) = run_with(fake, Command::Info);
    r.unwrap();
    assert!(out.contains("Serial #: NA0ABCDE\n"));
    assert!(out.contains("&fryqrp=QYSAQEAN5NOPQR7568\n"));
}

#[test]
fn info_minimal() {
    let fake = FakeEnclosure {
        pages: vec![0x00, 0x83],
        ..FakeEnclosure::goflex()
    };
    let (r, out, _) = run_with(fake, Command::Info);
    r.unwrap();
    assert_eq!(
        out,
        "0BC2:50A5 Seagate GoFlex Desk (0D19)\n\
         Supported VPD Pages:\n\
         \t[0x00] Standard Inquiry\n\
         \t[0x83] Device Identification\n"
    );
}

#[test]
fn info_wrong_vendor() {
    let fake = FakeEnclosure {
        vendor: *b"WDC     ",
        ..FakeEnclosure::goflex()
    };
    let (r, out, fake) = run_with(fake, Command::Info);
    let e = r.unwrap_err();
    assert_eq!(
        e.downcast_ref::<Error<()>>(),
        Some(&Error::UnsupportedVendor)
    );
    assert!(out.is_empty());
    assert_eq!(fake.commands, [0x12]);
}

#[test]
fn led_read() {
    let (r, out, _) =
        run_with(FakeEnclosure::goflex(), Command::Led { value: None });
    r.unwrap();
    assert_eq!(out, "led: off\n");
}

#[test]
fn led_read_unknown() {
    let fake = FakeEnclosure {
        led: [0xFF, 0xFF, 0, 0],
        ..FakeEnclosure::goflex()
    };
    let (r, out, _) = run_with(fake, Command::Led { value: None });
    r.unwrap();
    assert_eq!(out, "led: unknown\n");
}

#[test]
fn led_write() {
    let (r, out, fake) = run_with(
        FakeEnclosure::goflex(),
        Command::Led { value: Some(true) },
    );
    r.unwrap();
    assert!(out.is_empty());
    assert_eq!(fake.commands, [0xFA, 0xF9]);
    assert_eq!(fake.writes, [(0xF9, [0x02, 0xFF, 0, 0])]);
}

#[test]
fn led_write_read_fails() {
    let fake = FakeEnclosure {
        fail: Some(0xFA),
        ..FakeEnclosure::goflex()
    };
    let (r, _, fake) = run_with(fake, Command::Led { value: Some(false) });
    assert!(r.is_err());
    assert!(fake.writes.is_empty());
}

#[test]
fn capacity_read() {
    let (r, out, _) = run_with(
        FakeEnclosure::goflex(),
        Command::CapacityLed { value: None },
    );
    r.unwrap();
    assert_eq!(out, "1110\n");
}

#[test]
fn capacity_write_percent() {
    let (r, _, fake) = run_with(
        FakeEnclosure::goflex(),
        Command::CapacityLed {
            value: Some(CapacityValue::Percent(30)),
        },
    );
    r.unwrap();
    assert_eq!(fake.writes, [(0xF8, [0x04, 0x03, 0, 0])]);
}

#[test]
fn capacity_write_bits() {
    let (r, _, fake) = run_with(
        FakeEnclosure::goflex(),
        Command::CapacityLed {
            value: Some(CapacityValue::Leds(CapacityLeds(0b1000))),
        },
    );
    r.unwrap();
    assert_eq!(fake.commands, [0xF8]);
    assert_eq!(fake.writes, [(0xF8, [0x04, 0x08, 0, 0])]);
}

#[test]
fn capacity_write_fails() {
    let fake = FakeEnclosure {
        fail: Some(0xF8),
        ..FakeEnclosure::goflex()
    };
    let (r, _, _) = run_with(
        fake,
        Command::CapacityLed {
            value: Some(CapacityValue::Percent(100)),
        },
    );
    let e = r.unwrap_err();
    assert_eq!(e.downcast_ref::<Error<()>>(), Some(&Error::CommandFailed));
    assert!(format!("{e:?}").contains("SetCapacityLed failed"));
}
