//! Bit layouts of the packed discriminants.
//!
//! Every Latin letter occupies a 5-bit field holding `letter - 'a'`.
//!
//! ```text
//! currency  31      27 26      22 21      17 16                     0
//!           [ ccy[2] ][ ccy[1] ][ ccy[0] ][ numeric code (17 bits) ]
//!
//! language  26      22 21      17  16  15      11 10       6 5        1  0
//! country   [ a2[1]  ][ a2[0]  ][ f ][ a3[2]  ][ a3[1]  ][ a3[0]  ][ 1 ]
//! ```
//!
//! `f` is set only when a 2-letter code is packed, so an absent 2-letter
//! code never reads back as `"aa"`.

/// Width of one letter field
pub const LETTER_BITS: u32 = 5;

/// Mask of one letter field
pub const LETTER_MASK: u32 = 0b11111;

/// Highest value a letter field may hold (`'z' - 'a'`)
pub const MAX_LETTER: u32 = 25;

/// Optional 2-letter section guarded by a presence flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alpha2Section {
    pub flag_bit: u32,
    pub offsets: [u32; 2],
}

/// Fixed bit positions used by one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLayout {
    /// Bit that is always set
    pub marker_bit: Option<u32>,
    pub alpha3: [u32; 3],
    pub alpha2: Option<Alpha2Section>,
    /// Width of the numeric field starting at bit 0 (0 = no numeric field)
    pub numeric_bits: u32,
}

pub const CURRENCY_LAYOUT: PackLayout = PackLayout {
    marker_bit: None,
    alpha3: [17, 22, 27],
    alpha2: None,
    numeric_bits: 17,
};

pub const LANGUAGE_LAYOUT: PackLayout = PackLayout {
    marker_bit: Some(0),
    alpha3: [1, 6, 11],
    alpha2: Some(Alpha2Section {
        flag_bit: 16,
        offsets: [17, 22],
    }),
    numeric_bits: 0,
};

/// Countries pack alpha-3 and alpha-2 exactly like languages.
pub const COUNTRY_LAYOUT: PackLayout = LANGUAGE_LAYOUT;

impl PackLayout {
    #[must_use]
    pub const fn has_numeric(&self) -> bool {
        self.numeric_bits > 0
    }

    #[must_use]
    pub const fn numeric_mask(&self) -> u32 {
        if self.numeric_bits == 0 {
            0
        } else {
            (1u32 << self.numeric_bits) - 1
        }
    }

    /// Largest numeric code the layout can hold
    #[must_use]
    pub const fn max_numeric(&self) -> u32 {
        self.numeric_mask()
    }

    /// Every bit the layout may set
    #[must_use]
    pub fn used_bits(&self) -> u32 {
        let mut bits = self.numeric_mask() | letters_mask(&self.alpha3);
        if let Some(bit) = self.marker_bit {
            bits |= 1 << bit;
        }
        if let Some(section) = self.alpha2 {
            bits |= (1 << section.flag_bit) | letters_mask(&section.offsets);
        }
        bits
    }
}

pub(crate) fn letters_mask(offsets: &[u32]) -> u32 {
    offsets
        .iter()
        .fold(0, |mask, &offset| mask | (LETTER_MASK << offset))
}
