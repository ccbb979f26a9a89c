//! The Seagate "download finder" link for a device
//!
//! Seagate's support site locates firmware and software for a drive from
//! an obfuscated token, made from the serial number and the year by a
//! ROT13-plus-ROT5 substitution.

use super::vpd::{FixedAscii, SerialNumber};
use core::fmt::{self, Write};

/// Everything in the download-finder URL before the token
pub const DOWNLOAD_FINDER_URL: &str = "https://apps1.seagate.com/downloads/request.html?userPreferredLocaleCookie=en_EN_&fryqrp=";

const TOKEN_PREFIX: &[u8] = b"DLFNDR";

/// An obfuscated download-finder token
///
/// "DLFNDR" (6) plus a serial (at most 20) plus a year (at most 5 digits).
pub type LocatorToken = FixedAscii<32>;

/// Substitute one character: ROT13 for letters, ROT5 for digits
///
/// Everything else is unchanged. Applying it twice gives back the
/// original byte.
pub const fn encode_char(c: u8) -> u8 {
    match c {
        b'A'..=b'M' | b'a'..=b'm' => c + 13,
        b'N'..=b'Z' | b'n'..=b'z' => c - 13,
        b'0'..=b'4' => c + 5,
        b'5'..=b'9' => c - 5,
        _ => c,
    }
}

/// Build the token for a serial number in a given year
pub fn build_locator_token(serial: &SerialNumber, year: u16) -> LocatorToken {
    let mut token = LocatorToken::new();
    // 6 + 20 + 5 always fits in 32
    let _ = token.push(TOKEN_PREFIX);
    let _ = token.push(serial.as_bytes());
    let _ = write!(token, "{year}");
    token.map_bytes(encode_char);
    token
}

/// The full download-finder URL, for display
pub struct DownloadFinderUrl<'a>(&'a LocatorToken);

impl fmt::Display for DownloadFinderUrl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DOWNLOAD_FINDER_URL}{}", self.0)
    }
}

/// Wrap a token in the download-finder URL
pub fn download_finder_url(token: &LocatorToken) -> DownloadFinderUrl<'_> {
    DownloadFinderUrl(token)
}

#[cfg(all(test, feature = "std"))]
#[path = "tests/locator.rs"]
mod tests;
