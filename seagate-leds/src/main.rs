//! Query and control the LEDs of Seagate external drive enclosures

mod commands;
#[cfg(target_os = "linux")]
mod sg_transport;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  seagate-leds /dev/disk/by-label/goflex info

  seagate-leds /dev/disk/by-label/goflex led
  seagate-leds /dev/disk/by-label/goflex led on

  seagate-leds /dev/disk/by-label/goflex capacity-led 15
  seagate-leds /dev/disk/by-label/goflex capacity-led 90%";

#[derive(Debug, Parser)]
#[command(version, about, after_help = EXAMPLES)]
struct Cli {
    /// More logging (repeat for more still); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The enclosure's device node, e.g. /dev/sg2 or /dev/sdb
    device: PathBuf,

    #[command(subcommand)]
    command: commands::Command,
}

// <sysexits.h>
const EX_USAGE: u8 = 64;
const EX_UNAVAILABLE: u8 = 69;

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
enum Outcome {
    Done,
    Usage,
    Unavailable,
    Failed,
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Done => 0,
        Outcome::Usage => EX_USAGE,
        Outcome::Unavailable => EX_UNAVAILABLE,
        Outcome::Failed => 1,
    }
}

/// `--help` and `--version` also arrive as errors, but aren't failures
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_outcome(e: &clap::Error) -> Outcome {
    if e.use_stderr() {
        Outcome::Usage
    } else {
        Outcome::Done
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(target_os = "linux")]
fn main() -> std::process::ExitCode {
    use chrono::Datelike;
    use seagate_scsi::SeagateDevice;
    use sg_transport::SgTransport;
    use std::process::ExitCode;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_code(parse_outcome(&e)));
        }
    };

    if let Err(e) = color_eyre::install() {
        eprintln!("{e}");
    }
    init_tracing(cli.verbose);

    let transport = match SgTransport::open(&cli.device) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("cannot open {}: {e}", cli.device.display());
            return ExitCode::from(exit_code(Outcome::Unavailable));
        }
    };
    let mut device = SeagateDevice::new(transport);

    let year = u16::try_from(chrono::Local::now().year()).unwrap_or(0);
    let mut stdout = std::io::stdout().lock();

    match futures::executor::block_on(commands::run(
        &mut device,
        cli.command,
        year,
        &mut stdout,
    )) {
        Ok(()) => ExitCode::from(exit_code(Outcome::Done)),
        Err(report) => {
            eprintln!(
                "Error: {:?}",
                report.wrap_err(format!("{}", cli.device.display()))
            );
            ExitCode::from(exit_code(Outcome::Failed))
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(?cli, "parsed");
    Err(color_eyre::eyre::eyre!(
        "{}: SCSI generic passthrough is only available on Linux",
        cli.device.display()
    ))
}
