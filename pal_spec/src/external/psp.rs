// Paint Shop Pro palettes:
//
// JASC-PAL
// 0100
// <number of colors>
// R G B
// ...
//
// See https://www.selapa.net/swatches/colors/fileformats.php#psp_pal

use super::{check_capacity, parse_color, LineReader, RowFiller};
use crate::cursor::Cursor;
use crate::error::{ColorFault, Error, Result};
use crate::{CapacityWarning, Format, PaletteSpecification};
use log::debug;
use std::io::BufRead;

const MAGIC: &[u8] = b"JASC-PAL";
const VERSION: &[u8] = b"0100";

pub(crate) fn parse<R: BufRead>(
    mut lines: LineReader<R>,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let mut filler = RowFiller::new(spec);

    if lines.next_line()?.as_deref() != Some(MAGIC) {
        return Err(Error::BadHeader(Format::PSP));
    }

    let version = lines.require_line()?;
    if version != VERSION {
        return Err(Error::PspVersion(
            String::from_utf8_lossy(&version).into_owned(),
        ));
    }

    let count_line = lines.require_line()?;
    let mut cur = Cursor::new(&count_line);
    let declared = match cur.parse_dec::<u16>() {
        Some(n) if cur.at_end() => usize::from(n),
        _ => {
            return Err(Error::PspCount(
                String::from_utf8_lossy(&count_line).into_owned(),
            ))
        }
    };
    debug!("PSP file declares {declared} colors");

    let capacity = filler.capacity();
    let warning = check_capacity(Format::PSP, declared, capacity);

    // Anything past the capacity isn't even read.
    for i in 1..=declared.min(capacity) {
        let line = lines.require_line()?;
        let mut cur = Cursor::new(&line);
        let color = parse_color(&mut cur, i, &line)?;
        if !cur.at_end() {
            return Err(Error::Color {
                index: i,
                line: String::from_utf8_lossy(&line).into_owned(),
                fault: ColorFault::Trailing,
            });
        }
        filler.push(color);
    }
    Ok(warning)
}
