use crate::cursor::{is_hex_digit, to_hex};
use crate::error::{Error, Result};
use serde::Serialize;

const SHADES: u8 = 4;
const INDEX_MASK: u8 = 0x03;

/// `DmgMapping` maps the 4 gray shades (0 lightest to 3 darkest) onto the
/// 2 bit DMG color indexes. The mapping is always a bijection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DmgMapping {
    spec: u8,
    // DMG color index -> gray shade.
    dmg_colors: [u8; SHADES as usize],
}

impl DmgMapping {
    /// The raw spec byte (same layout as the BGP register).
    #[must_use]
    pub fn spec(&self) -> u8 {
        self.spec
    }

    /// The DMG color index used for gray `shade` (0-3).
    #[must_use]
    pub fn dmg_value(&self, shade: u8) -> u8 {
        dmg_value(self.spec, shade)
    }

    /// The gray shade which maps to DMG color index `dmg` (0-3).
    #[must_use]
    pub fn gray_index(&self, dmg: u8) -> u8 {
        self.dmg_colors[usize::from(dmg & INDEX_MASK)]
    }
}

fn dmg_value(spec: u8, shade: u8) -> u8 {
    (spec >> (2 * (shade & INDEX_MASK))) & INDEX_MASK
}

/// Parse a 2 hex digit DMG palette spec such as `E4`.
///
/// # Errors
/// The input must be exactly 2 hex digits and no two shades may map to the
/// same DMG color index.
pub fn parse_dmg_pal_spec(arg: &str) -> Result<DmgMapping> {
    let &[hi, lo] = arg.as_bytes() else {
        return Err(Error::DmgSpec(arg.to_owned()));
    };
    if !is_hex_digit(hi) || !is_hex_digit(lo) {
        return Err(Error::DmgSpec(arg.to_owned()));
    }
    let spec = to_hex(hi, lo);

    let mut dmg_colors = [0; SHADES as usize];
    for shade in 0..SHADES {
        dmg_colors[usize::from(dmg_value(spec, shade))] = shade;
    }

    for first in 0..SHADES - 1 {
        for second in first + 1..SHADES {
            let index = dmg_value(spec, first);
            if index == dmg_value(spec, second) {
                return Err(Error::DmgConflict {
                    spec: arg.to_owned(),
                    first,
                    second,
                    index,
                });
            }
        }
    }
    Ok(DmgMapping { spec, dmg_colors })
}
