use crate::external::{AcoColorSpace, Format};
use std::fmt::{self, Display};
use std::io;
use strum_macros::Display;
use thiserror::Error;

/// Result type for all palette spec parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// `Error` defines every way a palette spec can fail to parse.
///
/// Only `Open` is fatal (see `is_fatal`). Everything else is a reported error
/// which abandons the current parse. Whatever was already written into the
/// target `PaletteSpecification` stays there but must not be used.
#[derive(Error, Debug)]
pub enum Error {
    /// The palette file couldn't be opened at all.
    #[error("Failed to open palette file \"{path}\": {source}")]
    Open {
        /// Path as given after the format name.
        path: String,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A read failed part way through a file (other than a clean EOF).
    #[error("Failed to read {format} palette file: {source}")]
    Read {
        /// Format being decoded.
        format: Format,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The inline spec failed to parse at the given span.
    #[error("{0}")]
    Inline(SpanError),

    /// The external spec had no `:` separating format and path.
    #[error("External palette spec must have format `fmt:path` (missing colon)")]
    MissingColon,

    /// The external spec named a format that isn't supported.
    #[error("Unknown external palette format \"{0}\"")]
    UnknownFormat(String),

    /// The file started with something other than the expected header.
    #[error("Palette file does not appear to be a {0} palette file")]
    BadHeader(Format),

    /// A text file ended before all the required lines were read.
    #[error("{0} palette file is shorter than expected")]
    Truncated(Format),

    /// PSP version line wasn't `0100`.
    #[error("Unsupported PSP palette file version \"{0}\"")]
    PspVersion(String),

    /// PSP color count line wasn't a plain decimal number.
    #[error("Invalid \"number of colors\" line in PSP file ({0})")]
    PspCount(String),

    /// A color record in a text file failed to parse. `index` starts at 1.
    #[error("Failed to parse color #{index} (\"{line}\"): {fault}")]
    Color {
        /// 1 based color number within the file.
        index: usize,
        /// The offending line.
        line: String,
        /// What was wrong with it.
        fault: ColorFault,
    },

    /// ACT files are 768 or 772 bytes and nothing else.
    #[error("Invalid file size for ACT file (expected 768 or 772 bytes, got {0})")]
    ActSize(usize),

    /// The trailing ACT color count was 0 or above 256.
    #[error("Invalid number of colors in ACT file ({0})")]
    ActCount(u16),

    /// The ACO version word was missing.
    #[error("Failed to read ACO file version")]
    AcoVersionRead,

    /// The ACO version word wasn't 1.
    #[error("Palette file does not appear to be an ACO v1 file (version {0})")]
    AcoVersion(u16),

    /// The ACO color count word was missing.
    #[error("Failed to read number of colors in ACO file")]
    AcoCountRead,

    /// An ACO color record was cut short. The value starts at 1.
    #[error("Failed to read color #{0} from ACO file")]
    AcoColorRead(usize),

    /// An ACO record used a known but unsupported color space.
    #[error("Unsupported color type ({0}) for ACO file")]
    AcoUnsupported(AcoColorSpace),

    /// An ACO record used a color space tag that isn't defined.
    #[error("Unknown color type ({0}) for ACO file")]
    AcoUnknown(u16),

    /// A GBC dump didn't end on an 8 byte boundary.
    #[error(
        "GBC palette dump contains {palettes} 8-byte palette{} ({colors} colors), plus {stray} byte{}",
        plural(.palettes),
        plural(.stray)
    )]
    GbcStray {
        /// Complete palettes parsed before the stray bytes.
        palettes: usize,
        /// Colors held by those palettes.
        colors: usize,
        /// Number of trailing bytes.
        stray: usize,
    },

    /// The DMG spec wasn't exactly 2 hex digits.
    #[error("Unknown DMG palette specification \"{0}\"")]
    DmgSpec(String),

    /// Two gray shades decode to the same DMG color index.
    #[error(
        "DMG palette specification \"{spec}\" maps two gray shades to the same color index \
         (shades {first} and {second} both map to {index})"
    )]
    DmgConflict {
        /// The DMG argument as given.
        spec: String,
        /// First shade.
        first: u8,
        /// Second shade.
        second: u8,
        /// Shared DMG index.
        index: u8,
    },

    /// The background color didn't start with `#` and wasn't `transparent`.
    #[error("Background color specification must be `#rgb`, `#rrggbb`, or `transparent`")]
    BackgroundSyntax,

    /// The background color had the wrong number of hex digits.
    #[error("Unknown background color specification \"{0}\"")]
    BackgroundSpec(String),

    /// The background color had junk after the hex digits.
    #[error("Unexpected text \"{0}\" after background color specification")]
    BackgroundTrailing(String),

    /// A `Capacity` was requested outside of the supported range.
    #[error(
        "Invalid palette capacity {max_palettes} x {colors_per_palette} \
         (need at least 1 palette of 1 to 4 colors)"
    )]
    Capacity {
        /// Requested palette count.
        max_palettes: u16,
        /// Requested palette width.
        colors_per_palette: u8,
    },
}

impl Error {
    /// Returns true for errors that should end the process (the palette
    /// file couldn't be opened). All other errors are reported and the
    /// caller decides how to proceed.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

/// `ColorFault` describes what went wrong within a single color line.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ColorFault {
    /// Red didn't parse as a u8.
    #[strum(to_string = "invalid red component")]
    InvalidRed,
    /// Line ended after red.
    #[strum(to_string = "missing green component")]
    MissingGreen,
    /// Green didn't parse as a u8.
    #[strum(to_string = "invalid green component")]
    InvalidGreen,
    /// Line ended after green.
    #[strum(to_string = "missing blue component")]
    MissingBlue,
    /// Blue didn't parse as a u8.
    #[strum(to_string = "invalid blue component")]
    InvalidBlue,
    /// Something followed blue where nothing is allowed.
    #[strum(to_string = "trailing characters after blue component")]
    Trailing,
    /// A HEX line wasn't exactly 6 hex digits.
    #[strum(to_string = "invalid \"rrggbb\" line")]
    NotHexTriplet,
}

const INLINE_PREFIX: &str = "In inline palette spec: ";

/// `SpanError` is a parse failure tied to a byte range of an inline spec.
///
/// Display renders the message, the argument and a caret line pointing at
/// the offending bytes:
///
/// ```text
/// Unknown color specification
/// In inline palette spec: #ff00
///                          ^^^^
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanError {
    /// The full argument being parsed.
    pub arg: String,
    /// Byte offset of the problem within `arg`.
    pub offset: usize,
    /// Length in bytes of the problem.
    pub len: usize,
    /// What went wrong.
    pub message: String,
}

impl SpanError {
    pub(crate) fn new(arg: &str, offset: usize, len: usize, message: impl Into<String>) -> Self {
        debug_assert!(offset + len <= arg.len(), "span past end of {arg}");
        Self {
            arg: arg.to_owned(),
            offset,
            len,
            message: message.into(),
        }
    }

    /// The caret line on its own, aligned to the start of `arg`. Columns
    /// count characters rather than bytes.
    #[must_use]
    pub fn caret(&self) -> String {
        let lead = self
            .arg
            .get(..self.offset)
            .map_or(self.offset, |s| s.chars().count());
        let width = self.span().chars().count();
        format!("{}{}", " ".repeat(lead), "^".repeat(width))
    }

    /// The bytes of `arg` covered by the span.
    #[must_use]
    pub fn span(&self) -> &str {
        self.arg
            .get(self.offset..self.offset + self.len)
            .unwrap_or_default()
    }
}

impl Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f, "{INLINE_PREFIX}{}", self.arg)?;
        write!(f, "{}{}", " ".repeat(INLINE_PREFIX.len()), self.caret())
    }
}
