//! Sets of single-byte codes, as returned by the VPD pages

/// A set of byte values (VPD page codes, feature codes, ...)
///
/// Stored as a 256-bit bitmap, so it needs no allocator, duplicates
/// collapse for free, and iteration is always in ascending order.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeSet([u32; 8]);

impl CodeSet {
    /// An empty set
    pub const fn new() -> Self {
        Self([0; 8])
    }

    /// Add a code to the set
    pub fn insert(&mut self, code: u8) {
        self.0[(code >> 5) as usize] |= 1 << (code & 31);
    }

    /// Is this code in the set?
    pub fn contains(&self, code: u8) -> bool {
        (self.0[(code >> 5) as usize] & (1 << (code & 31))) != 0
    }

    /// Number of distinct codes in the set
    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    /// Iterate over the codes in ascending order
    pub fn iter(&self) -> CodeIterator {
        CodeIterator {
            words: self.0,
            index: 0,
        }
    }
}

impl FromIterator<u8> for CodeSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = CodeSet::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CodeSet {
    type Item = u8;
    type IntoIter = CodeIterator;

    fn into_iter(self) -> CodeIterator {
        self.iter()
    }
}

/// Ascending iterator over a [`CodeSet`]
pub struct CodeIterator {
    words: [u32; 8],
    index: usize,
}

impl Iterator for CodeIterator {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.words.len() {
            let w = self.words[self.index];
            if w != 0 {
                let n = w.trailing_zeros();
                self.words[self.index] &= !(1 << n);
                return Some(((self.index as u32) * 32 + n) as u8);
            }
            self.index += 1;
        }
        None
    }
}

/// One entry from the interfaces VPD page (0xC2)
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Interface {
    /// Interface type, the low nibble of the wire byte
    pub code: u8,
    /// Bit 6 of the wire byte: this is the interface in use
    pub active: bool,
}

impl Interface {
    /// Split a wire byte into type code and active flag
    pub const fn from_wire(b: u8) -> Self {
        Self {
            code: b & 0xF,
            active: (b & 0x40) != 0,
        }
    }
}

/// The set of interfaces an enclosure offers
///
/// Membership is by raw wire byte, so the same interface type may
/// appear twice if it is reported both active and inactive.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct InterfaceSet(pub CodeSet);

impl InterfaceSet {
    /// Iterate in ascending order of wire byte
    pub fn iter(&self) -> impl Iterator<Item = Interface> {
        self.0.iter().map(Interface::from_wire)
    }

    /// The interface currently in use, if any is flagged
    pub fn active(&self) -> Option<Interface> {
        self.iter().find(|i| i.active)
    }
}

#[cfg(all(test, feature = "std"))]
#[path = "tests/code_set.rs"]
mod tests;
