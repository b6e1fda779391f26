// Raw CGB palette dumps as written by `write_gbc_dump`: each palette is 4
// little endian packed colors (8 bytes) with no header.

use super::{check_capacity, read_chunk, RowFiller};
use crate::cursor::read_le;
use crate::error::{Error, Result};
use crate::{CapacityWarning, Format, PaletteSpecification, MAX_COLORS_PER_PAL};
use rgba::Rgba;
use std::io::{self, Read, Write};

const COLOR_SIZE: usize = 2;
const PALETTE_SIZE: usize = MAX_COLORS_PER_PAL * COLOR_SIZE;

// Written for slots with no color assigned.
const UNASSIGNED: u16 = 0xFFFF;

pub(crate) fn parse<R: Read>(
    mut reader: R,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let mut filler = RowFiller::new(spec);

    // Groups are read whole so a short tail is caught.
    let mut buf = [0_u8; PALETTE_SIZE];
    loop {
        match read_chunk(&mut reader, &mut buf, Format::GBC)? {
            0 => break,
            PALETTE_SIZE => {}
            stray => {
                return Err(Error::GbcStray {
                    palettes: filler.count() / MAX_COLORS_PER_PAL,
                    colors: filler.count(),
                    stray,
                })
            }
        }

        for packed in buf.chunks_exact(COLOR_SIZE) {
            filler.push(Rgba::from_cgb_color(read_le(packed)));
        }
    }
    Ok(check_capacity(
        Format::GBC,
        filler.count(),
        filler.capacity(),
    ))
}

/// Write `spec` as a CGB palette dump: 4 little endian packed colors per
/// palette. Unassigned slots are written as 0xFFFF.
///
/// Packing keeps only the top 5 bits of each channel so reading the dump
/// back only reproduces colors which were already on that grid.
///
/// # Errors
/// Any error from `writer`.
pub fn write_gbc_dump<W: Write>(spec: &PaletteSpecification, mut writer: W) -> io::Result<()> {
    for palette in spec.palettes() {
        for slot in palette {
            let packed = slot.map_or(UNASSIGNED, |c| c.cgb_color());
            writer.write_all(&packed.to_le_bytes())?;
        }
    }
    writer.flush()
}
