// GIMP palettes:
//
// GIMP Palette
// Name: <name>
// Columns: <n>
// # comment
// R G B <anything>
//
// See app/core/gimppalette-load.c in GIMP.

use super::{check_capacity, parse_color, LineReader, RowFiller};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::{CapacityWarning, Format, PaletteSpecification};
use std::io::BufRead;

const MAGIC: &[u8] = b"GIMP Palette";
const NAME: &[u8] = b"Name:";
const COLUMNS: &[u8] = b"Columns:";

pub(crate) fn parse<R: BufRead>(
    mut lines: LineReader<R>,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let mut filler = RowFiller::new(spec);

    if !lines
        .next_line()?
        .is_some_and(|line| line.starts_with(MAGIC))
    {
        return Err(Error::BadHeader(Format::GPL));
    }

    // No color count is given so the palette simply ends at EOF.
    while let Some(line) = lines.next_line()? {
        if line.starts_with(NAME) || line.starts_with(COLUMNS) {
            continue;
        }

        let mut cur = Cursor::new(&line);
        cur.skip_whitespace();
        if matches!(cur.peek(), None | Some(b'#')) {
            continue;
        }

        // Whatever follows blue is ignored. It's often a name or a comment.
        let color = parse_color(&mut cur, filler.count() + 1, &line)?;
        filler.push(color);
    }
    Ok(check_capacity(
        Format::GPL,
        filler.count(),
        filler.capacity(),
    ))
}
