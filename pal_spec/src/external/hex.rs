// Plain hex palettes: one rrggbb per line, blank lines ignored.
//
// See https://lospec.com/palette-list/tag/gbc

use super::{check_capacity, LineReader, RowFiller};
use crate::cursor::{is_hex_digit, to_hex};
use crate::error::{ColorFault, Error, Result};
use crate::{CapacityWarning, Format, PaletteSpecification};
use rgba::Rgba;
use std::io::BufRead;

pub(crate) fn parse<R: BufRead>(
    mut lines: LineReader<R>,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let mut filler = RowFiller::new(spec);

    while let Some(line) = lines.next_line()? {
        if line.is_empty() {
            continue;
        }

        let color = match line.as_slice() {
            &[r1, r2, g1, g2, b1, b2] if line.iter().all(|&c| is_hex_digit(c)) => {
                Rgba::opaque(to_hex(r1, r2), to_hex(g1, g2), to_hex(b1, b2))
            }
            _ => {
                return Err(Error::Color {
                    index: filler.count() + 1,
                    line: String::from_utf8_lossy(&line).into_owned(),
                    fault: ColorFault::NotHexTriplet,
                })
            }
        };
        filler.push(color);
    }
    Ok(check_capacity(
        Format::HEX,
        filler.count(),
        filler.capacity(),
    ))
}
