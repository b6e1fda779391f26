//! Decoders for third party palette files and the `FORMAT:path` dispatcher.

use crate::cursor::Cursor;
use crate::error::{ColorFault, Error, Result};
use crate::{CapacityWarning, PaletteSpecification};
use log::{debug, warn};
use rgba::Rgba;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

mod aco;
mod act;
mod gbc;
mod gpl;
mod hex;
mod psp;


pub use aco::AcoColorSpace;
pub use gbc::write_gbc_dump;

/// `Format` lists the supported palette file formats.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum Format {
    /// Paint Shop Pro (JASC-PAL) text palette.
    PSP,
    /// GIMP text palette.
    GPL,
    /// One `rrggbb` per line (as exported by lospec).
    HEX,
    /// Adobe Color Table.
    ACT,
    /// Adobe Color Swatch (version 1).
    ACO,
    /// Raw CGB palette dump (4 little endian packed colors per palette).
    GBC,
}

/// `Mode` is how a format's file is consumed.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Mode {
    /// Line oriented text.
    Text,
    /// Raw bytes.
    Binary,
}

impl Format {
    /// How files of this format are read.
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::PSP | Self::GPL | Self::HEX => Mode::Text,
            Self::ACT | Self::ACO | Self::GBC => Mode::Binary,
        }
    }

    /// Decode `reader` as this format into `spec`, replacing its contents.
    ///
    /// # Errors
    /// Any malformed record stops decoding and is returned. Colors decoded
    /// before that point remain in `spec`.
    pub fn decode<R: BufRead>(
        self,
        reader: R,
        spec: &mut PaletteSpecification,
    ) -> Result<Option<CapacityWarning>> {
        match self {
            Self::PSP => psp::parse(LineReader::new(reader, self), spec),
            Self::GPL => gpl::parse(LineReader::new(reader, self), spec),
            Self::HEX => hex::parse(LineReader::new(reader, self), spec),
            Self::ACT => act::parse(reader, spec),
            Self::ACO => aco::parse(reader, spec),
            Self::GBC => gbc::parse(reader, spec),
        }
    }
}

// Read from stdin instead of a file.
const STDIN_PATH: &str = "-";

/// Parse a `FORMAT:path` spec by loading the file and decoding it into
/// `spec`. The format name is case insensitive and a path of `-` reads
/// stdin.
///
/// # Errors
/// `Error::Open` (fatal, see `Error::is_fatal`) if the file can't be opened.
/// A reported error for a malformed spec or file.
pub fn parse_external_pal_spec(
    arg: &str,
    spec: &mut PaletteSpecification,
) -> Result<Option<CapacityWarning>> {
    let Some((name, path)) = arg.split_once(':') else {
        return Err(Error::MissingColon);
    };
    let format = Format::from_str(name).map_err(|_| Error::UnknownFormat(name.to_owned()))?;
    debug!("Loading {format} palette from {path} ({} mode)", format.mode());

    if path == STDIN_PATH {
        return format.decode(io::stdin().lock(), spec);
    }
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;
    format.decode(BufReader::new(file), spec)
}

// LineReader splits a text palette into lines. A trailing CR is dropped
// so CRLF files parse the same as LF ones and a final line without a
// newline still counts.
pub(crate) struct LineReader<R> {
    reader: R,
    format: Format,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R, format: Format) -> Self {
        Self { reader, format }
    }

    pub(crate) fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(|source| Error::Read {
                format: self.format,
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    // Same as next_line but running out is an error.
    pub(crate) fn require_line(&mut self) -> Result<Vec<u8>> {
        self.next_line()?.ok_or(Error::Truncated(self.format))
    }
}

// Read until buf is full or EOF. Returns how many bytes landed.
pub(crate) fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8], format: Format) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => return Err(Error::Read { format, source }),
        }
    }
    Ok(filled)
}

// Logs and returns a warning if declared is more than will fit.
pub(crate) fn check_capacity(
    format: Format,
    declared: usize,
    capacity: usize,
) -> Option<CapacityWarning> {
    if declared <= capacity {
        return None;
    }
    let warning = CapacityWarning {
        format,
        declared,
        capacity,
    };
    warn!("{warning}");
    Some(warning)
}

// RowFiller places colors left to right into palettes of
// colors_per_palette slots, starting a new palette as each fills up.
// Colors past the capacity are counted but dropped.
pub(crate) struct RowFiller<'a> {
    spec: &'a mut PaletteSpecification,
    count: usize,
}

impl<'a> RowFiller<'a> {
    // Clears spec before filling.
    pub(crate) fn new(spec: &'a mut PaletteSpecification) -> Self {
        spec.clear();
        Self { spec, count: 0 }
    }

    pub(crate) fn push(&mut self, color: Rgba) {
        let capacity = self.spec.capacity();
        let width = usize::from(capacity.colors_per_palette());
        if self.count < capacity.total() {
            if self.count % width == 0 {
                self.spec.push(crate::EMPTY_PALETTE);
            }
            self.spec.last_mut()[self.count % width] = Some(color);
        }
        self.count += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn capacity(&self) -> usize {
        self.spec.capacity().total()
    }
}

// Parse "R G B" decimal components for PSP and GPL. index is 1 based and
// only used for errors. The cursor is left just past blue.
pub(crate) fn parse_color(cur: &mut Cursor, index: usize, line: &[u8]) -> Result<Rgba> {
    let fault = |fault| Error::Color {
        index,
        line: String::from_utf8_lossy(line).into_owned(),
        fault,
    };

    let r = cur
        .parse_dec::<u8>()
        .ok_or_else(|| fault(ColorFault::InvalidRed))?;
    cur.skip_whitespace();
    if cur.at_end() {
        return Err(fault(ColorFault::MissingGreen));
    }
    let g = cur
        .parse_dec::<u8>()
        .ok_or_else(|| fault(ColorFault::InvalidGreen))?;
    cur.skip_whitespace();
    if cur.at_end() {
        return Err(fault(ColorFault::MissingBlue));
    }
    let b = cur
        .parse_dec::<u8>()
        .ok_or_else(|| fault(ColorFault::InvalidBlue))?;
    Ok(Rgba::opaque(r, g, b))
}
