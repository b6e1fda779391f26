// Adobe Color Swatch (version 1). All values are big endian.
//
// u16 version (1)
// u16 number of colors
// Per color:
//   u16 color space
//   u16 x 4 components (meaning depends on color space)
//
// A version 2 section may follow. It repeats the colors with names and is
// not read.
//
// See https://www.adobe.com/devnet-apps/photoshop/fileformatashtml/#50577411_pgfId-1055819

use super::{check_capacity, read_chunk, RowFiller};
use crate::cursor::read_be;
use crate::error::{Error, Result};
use crate::{CapacityWarning, Format, PaletteSpecification};
use log::debug;
use rgba::Rgba;
use std::io::Read;
use strum_macros::Display;

const VERSION: u16 = 1;
const RECORD_SIZE: usize = 10;

/// `AcoColorSpace` lists the color spaces an ACO record can use. Only
/// `RGB` is supported.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum AcoColorSpace {
    /// 16 bits each of red, green and blue.
    RGB,
    /// Hue, saturation, brightness.
    HSB,
    /// Cyan, magenta, yellow, black.
    CMYK,
    /// CIE L*a*b*.
    Lab,
    /// A single gray value.
    #[strum(to_string = "grayscale")]
    Grayscale,
}

impl AcoColorSpace {
    /// Map the on disk tag to a color space.
    #[must_use]
    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            0 => Some(Self::RGB),
            1 => Some(Self::HSB),
            2 => Some(Self::CMYK),
            7 => Some(Self::Lab),
            8 => Some(Self::Grayscale),
            _ => None,
        }
    }
}

pub(crate) fn parse<R: Read>(
    mut reader: R,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let mut filler = RowFiller::new(spec);
    let mut buf = [0_u8; RECORD_SIZE];

    if read_chunk(&mut reader, &mut buf[..2], Format::ACO)? != 2 {
        return Err(Error::AcoVersionRead);
    }
    let version: u16 = read_be(&buf);
    if version != VERSION {
        return Err(Error::AcoVersion(version));
    }

    if read_chunk(&mut reader, &mut buf[..2], Format::ACO)? != 2 {
        return Err(Error::AcoCountRead);
    }
    let declared = usize::from(read_be::<u16>(&buf));
    debug!("ACO file declares {declared} colors");

    let warning = check_capacity(Format::ACO, declared, filler.capacity());

    // Records past the capacity aren't read.
    for i in 1..=declared.min(filler.capacity()) {
        if read_chunk(&mut reader, &mut buf, Format::ACO)? != RECORD_SIZE {
            return Err(Error::AcoColorRead(i));
        }

        let tag: u16 = read_be(&buf);
        match AcoColorSpace::from_tag(tag) {
            // Only the high byte of each 16 bit component is kept.
            Some(AcoColorSpace::RGB) => filler.push(Rgba::opaque(buf[2], buf[4], buf[6])),
            Some(space) => return Err(Error::AcoUnsupported(space)),
            None => return Err(Error::AcoUnknown(tag)),
        }
    }
    Ok(warning)
}
