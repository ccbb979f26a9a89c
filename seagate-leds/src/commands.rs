//! The three subcommands, and parsers for their arguments

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use seagate_scsi::labels::{feature_name, interface_name, vpd_page_name};
use seagate_scsi::{
    build_locator_token, download_finder_url, CapacityLeds, DeviceInfo,
    ScsiTransport, SeagateDevice,
};
use std::fmt::Debug;
use std::io::Write;
use tracing::{debug, info};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Identify the enclosure and list its VPD pages, features and
    /// interfaces
    Info,

    /// Show the activity LED, or switch it on or off
    Led {
        /// One of: 1, 0, on, off
        #[arg(value_parser = parse_led_value)]
        value: Option<bool>,
    },

    /// Show the capacity gauge (lowest segment first), or set it
    CapacityLed {
        /// A percentage ("90%"), four segments lowest first ("1100"),
        /// or a raw bitmask in decimal ("3")
        #[arg(value_parser = parse_capacity_value)]
        value: Option<CapacityValue>,
    },
}

/// What `capacity-led` was asked to show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityValue {
    /// 0-100
    Percent(u32),
    /// Segments given directly
    Leds(CapacityLeds),
}

pub fn parse_led_value(s: &str) -> Result<bool, String> {
    match s {
        "1" | "on" => Ok(true),
        "0" | "off" => Ok(false),
        _ => Err(format!("argument '{s}' should be one of: 1, 0, on, off")),
    }
}

pub fn parse_capacity_value(s: &str) -> Result<CapacityValue, String> {
    if let Some(percent) = s.strip_suffix('%') {
        return match percent.parse::<u32>() {
            Ok(p) if p <= 100 => Ok(CapacityValue::Percent(p)),
            _ => Err(format!("expected percentage value ('{percent}')")),
        };
    }
    if s.len() == 4 {
        return CapacityLeds::from_display_bits(s)
            .map(CapacityValue::Leds)
            .ok_or_else(|| format!("expected binary argument ('{s}')"));
    }
    s.parse::<u8>()
        .map(|b| CapacityValue::Leds(CapacityLeds(b)))
        .map_err(|_| format!("expected a percentage, four binary digits, or a number 0-255 ('{s}')"))
}

/// Print what `identify` found, in the same layout as Seagate's tools
pub fn print_info(
    out: &mut impl Write,
    info: &DeviceInfo,
    year: u16,
) -> std::io::Result<()> {
    let id = &info.identity;
    writeln!(
        out,
        "{:04X}:{:04X} {} {} ({})",
        id.vid, id.pid, id.vendor_id, id.product_id, id.revision
    )?;

    writeln!(out, "Supported VPD Pages:")?;
    for page in &info.supported_pages {
        writeln!(out, "\t[0x{page:02X}] {}", vpd_page_name(page))?;
    }

    if let Some(serial) = &info.serial {
        let token = build_locator_token(serial, year);
        writeln!(out, "Serial #: {serial}")?;
        writeln!(out, "Download Finder URL: {}", download_finder_url(&token))?;
    }

    if let Some(features) = &info.features {
        writeln!(out, "Features:")?;
        for f in features {
            writeln!(out, "\t[0x{f:02X}] {}", feature_name(f))?;
        }
    }

    if let Some(interfaces) = &info.interfaces {
        writeln!(out, "Interfaces:")?;
        for i in interfaces.iter() {
            writeln!(
                out,
                "\t[0x{:02X}] {}{}",
                i.code,
                interface_name(i.code),
                if i.active { " [active]" } else { "" }
            )?;
        }
    }
    Ok(())
}

fn led_word(led: Option<bool>) -> &'static str {
    match led {
        Some(true) => "on",
        Some(false) => "off",
        None => "unknown",
    }
}

/// Run one subcommand against an open device, printing to `out`
pub async fn run<T: ScsiTransport>(
    device: &mut SeagateDevice<T>,
    command: Command,
    year: u16,
    out: &mut impl Write,
) -> Result<()>
where
    T::Error: Debug + Send + Sync + 'static,
{
    debug!(?command, "running");
    match command {
        Command::Info => {
            let info = device.identify().await.wrap_err("identify failed")?;
            print_info(out, &info, year)?;
        }
        Command::Led { value: None } => {
            let led = device.led().await.wrap_err("GetLed failed")?;
            writeln!(out, "led: {}", led_word(led))?;
        }
        Command::Led { value: Some(on) } => {
            device.set_led(on).await.wrap_err("SetLed failed")?;
            info!(on, "LED set");
        }
        Command::CapacityLed { value: None } => {
            let leds = device
                .capacity_led()
                .await
                .wrap_err("GetCapacityLed failed")?;
            writeln!(out, "{leds}")?;
        }
        Command::CapacityLed {
            value: Some(CapacityValue::Percent(p)),
        } => {
            device
                .set_capacity_led_percent(p)
                .await
                .wrap_err("SetCapacityLed failed")?;
            info!(percent = p, "capacity gauge set");
        }
        Command::CapacityLed {
            value: Some(CapacityValue::Leds(leds)),
        } => {
            device
                .set_capacity_led(leds)
                .await
                .wrap_err("SetCapacityLed failed")?;
            info!(bits = leds.0, "capacity gauge set");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/commands.rs"]
mod tests;
