//! `rgba` defines the 32 bit color value used by every palette parser along
//! with conversions to and from the CGB packed color format.
//!
//! A CGB packed color is a 16 bit little endian value holding 5 bits each
//! of red, green and blue (low to high). Bit 15 is unused by the hardware and
//! is borrowed here to mark a transparent entry.

use serde::Serialize;
use std::fmt::{self, Display};


/// `Rgba` is a single color with 8 bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha. 0xFF is fully opaque and 0x00 is the transparent sentinel.
    pub a: u8,
}

/// Alpha value for a fully opaque color.
pub const OPAQUE: u8 = 0xFF;

/// The packed value used for transparent entries.
pub const CGB_TRANSPARENT: u16 = 0x8000;

const CHANNEL_MASK: u16 = 0x1F;
const GREEN_SHIFT: u16 = 5;
const BLUE_SHIFT: u16 = 10;

impl Rgba {
    /// The transparent sentinel.
    pub const TRANSPARENT: Self = Self::new(0x00, 0x00, 0x00, 0x00);

    /// Construct a color from all 4 channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct a fully opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, OPAQUE)
    }

    /// Returns true if alpha is zero. Any partial alpha is packed as an
    /// opaque color.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Expand a CGB packed color into 8 bit channels.
    ///
    /// Each 5 bit channel `c` becomes `c << 3 | c >> 2` so 0x1F maps to 0xFF
    /// and 0x00 to 0x00. A value with bit 15 set decodes as `TRANSPARENT`.
    #[must_use]
    pub const fn from_cgb_color(cgb: u16) -> Self {
        if cgb & CGB_TRANSPARENT != 0 {
            return Self::TRANSPARENT;
        }
        Self::opaque(
            expand(cgb),
            expand(cgb >> GREEN_SHIFT),
            expand(cgb >> BLUE_SHIFT),
        )
    }

    /// Pack this color into the CGB format by truncating each channel to its
    /// top 5 bits. Transparent colors pack as `CGB_TRANSPARENT`.
    ///
    /// NOTE: This is lossy. Only colors whose channels are already of the
    ///       form `c << 3 | c >> 2` survive a round trip through
    ///       `from_cgb_color` unchanged.
    #[must_use]
    pub const fn cgb_color(&self) -> u16 {
        if self.is_transparent() {
            return CGB_TRANSPARENT;
        }
        (self.r >> 3) as u16
            | ((self.g >> 3) as u16) << GREEN_SHIFT
            | ((self.b >> 3) as u16) << BLUE_SHIFT
    }
}

const fn expand(channel: u16) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    let c = (channel & CHANNEL_MASK) as u8;
    c << 3 | c >> 2
}

impl Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::TRANSPARENT {
            write!(f, "transparent")
        } else if self.a == OPAQUE {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
