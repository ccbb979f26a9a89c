//! Human-readable names for VPD pages, features and interfaces
//!
//! These are cosmetic: an unknown code is not a protocol error, it just
//! gets an "Unknown ..." label.

/// Names of the VPD pages a Seagate enclosure may list in page 0x00
pub const VPD_PAGE_NAMES: &[(u8, &str)] = &[
    (0x00, "Standard Inquiry"),
    (0x80, "Serial Number"),
    (0x83, "Device Identification"),
    (0xC0, "Password Security Status"),
    (0xC1, "Features"),
    (0xC2, "Interfaces"),
    (0xC3, "Button Status"),
    (0xC4, "RAID Configuration"),
    (0xC5, "Tattoo Status"),
    (0xC6, "RAID Status"),
];

/// Names of the feature codes in VPD page 0xC1
pub const FEATURE_NAMES: &[(u8, &str)] = &[
    (1, "Button"),
    (8, "Power"),
    (9, "Acoustic"),
    (11, "Discrete Storage"),
    (12, "Security"),
    (16, "Raid 0 Only"),
    (17, "Raid 0/1"),
    (20, "ATA Pass Through"),
    (21, "SMART using LOG SENSE/SELECT"),
    (24, "Prolific Firmware"),
    (25, "Cypress FW Downloader"),
    (28, "Small Form Factor 2.5"),
    (29, "Mini Form Factor 1.8"),
    (30, "Micro Form Factor 1.0"),
    (32, "USB Power Supported"),
    (36, "FDE"),
    (40, "Tattoo Display"),
    (44, "Removable Cartridge"),
    (48, "T10 SAT Diag"),
    (49, "T10 SAT"),
    (50, "T10 SAT Limited SMART"),
    (55, "LED Control"),
    (56, "LED Capacity Control"),
];

/// Names of the interface type codes (low nibble) in VPD page 0xC2
pub const INTERFACE_NAMES: &[(u8, &str)] = &[
    (1, "1394A"),
    (2, "1394B"),
    (4, "USB"),
    (5, "eSATA1.5Gb"),
    (6, "eSATA3.0Gb"),
    (8, "USBMiniB"),
    (9, "eSATA6.0Gb"),
    (10, "USB3.0"),
];

fn lookup(table: &'static [(u8, &'static str)], code: u8) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// Label for a VPD page code
pub fn vpd_page_name(page: u8) -> &'static str {
    lookup(VPD_PAGE_NAMES, page).unwrap_or("Unknown VPD Page")
}

/// Label for a feature code
pub fn feature_name(feature: u8) -> &'static str {
    lookup(FEATURE_NAMES, feature).unwrap_or("Unknown Feature")
}

/// Label for an interface type code (already masked to the low nibble)
pub fn interface_name(interface: u8) -> &'static str {
    lookup(INTERFACE_NAMES, interface).unwrap_or("Unknown Interface")
}
