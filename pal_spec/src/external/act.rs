// Adobe Color Table: 256 RGB triples, optionally followed by a big endian
// u16 giving how many of them are actually used (and another u16 for the
// transparent index, which is ignored here).
//
// See https://www.adobe.com/devnet-apps/photoshop/fileformatashtml/#50577411_pgfId-1070626

use super::{check_capacity, RowFiller};
use crate::cursor::read_be;
use crate::error::{Error, Result};
use crate::{CapacityWarning, Format, PaletteSpecification};
use log::debug;
use rgba::Rgba;
use std::io::Read;

const ENTRIES: usize = 256;
const BYTES_PER_ENTRY: usize = 3;
const TABLE_SIZE: usize = ENTRIES * BYTES_PER_ENTRY;
const EXTENDED_SIZE: usize = TABLE_SIZE + 4;

pub(crate) fn parse<R: Read>(
    reader: R,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let mut filler = RowFiller::new(spec);

    // Read one past the largest valid size so oversized files are caught.
    let mut data = Vec::with_capacity(EXTENDED_SIZE + 1);
    reader
        .take(EXTENDED_SIZE as u64 + 1)
        .read_to_end(&mut data)
        .map_err(|source| Error::Read {
            format: Format::ACT,
            source,
        })?;

    let declared = match data.len() {
        TABLE_SIZE => ENTRIES,
        EXTENDED_SIZE => {
            let n: u16 = read_be(&data[TABLE_SIZE..]);
            if n == 0 || usize::from(n) > ENTRIES {
                return Err(Error::ActCount(n));
            }
            usize::from(n)
        }
        len => return Err(Error::ActSize(len)),
    };
    debug!("ACT file uses {declared} colors");

    let warning = check_capacity(Format::ACT, declared, filler.capacity());
    for entry in data[..TABLE_SIZE]
        .chunks_exact(BYTES_PER_ENTRY)
        .take(declared.min(filler.capacity()))
    {
        filler.push(Rgba::opaque(entry[0], entry[1], entry[2]));
    }
    Ok(warning)
}
