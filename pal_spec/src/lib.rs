//! `pal_spec` turns a user supplied palette description into a bounded list
//! of palettes for the Game Boy (Color).
//!
//! A description is one of:
//!
//! * An inline spec such as `#fff,#aaa,#555,#000;#f00,#none`
//!   (see `parse_inline_pal_spec`).
//! * A `FORMAT:path` reference to a palette file in one of the supported
//!   formats (see `Format` and `parse_external_pal_spec`).
//! * A 2 hex digit DMG shade mapping (see `parse_dmg_pal_spec`).
//!
//! `parse_background_pal_spec` handles the separate background color option
//! and `parse_pal_spec` picks between the forms above the same way the
//! command line does.
//!
//! Every parser writes into (or returns) an explicit value. Nothing is kept
//! between calls.

use log::debug;
use rgba::Rgba;
use serde::Serialize;
use std::fmt::{self, Display};

mod background;
mod cursor;
mod dmg;
mod error;
mod external;
mod inline;

#[cfg(test)]
mod tests;

pub use background::parse_background_pal_spec;
pub use cursor::{is_hex_digit, nibble, read_be, read_le, single_to_hex, to_hex, Cursor};
pub use dmg::{parse_dmg_pal_spec, DmgMapping};
pub use error::{ColorFault, Error, Result, SpanError};
pub use external::{parse_external_pal_spec, write_gbc_dump, AcoColorSpace, Format, Mode};
pub use inline::parse_inline_pal_spec;

/// Hardware limit on colors in a single palette.
pub const MAX_COLORS_PER_PAL: usize = 4;

/// `Palette` is a fixed set of slots. `None` means nothing was assigned
/// (or `#none` was given explicitly).
pub type Palette = [Option<Rgba>; MAX_COLORS_PER_PAL];

/// A palette with nothing assigned.
pub const EMPTY_PALETTE: Palette = [None; MAX_COLORS_PER_PAL];

/// `Capacity` bounds how many colors a spec may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Capacity {
    max_palettes: u16,
    colors_per_palette: u8,
}

impl Default for Capacity {
    fn default() -> Self {
        // The CGB has 8 background palettes of 4 colors.
        Self {
            max_palettes: 8,
            colors_per_palette: 4,
        }
    }
}

impl Capacity {
    /// Create a new capacity.
    ///
    /// # Errors
    /// `max_palettes` must be non zero and `colors_per_palette` must be
    /// between 1 and 4.
    pub fn new(max_palettes: u16, colors_per_palette: u8) -> Result<Self> {
        if max_palettes == 0
            || colors_per_palette == 0
            || usize::from(colors_per_palette) > MAX_COLORS_PER_PAL
        {
            return Err(Error::Capacity {
                max_palettes,
                colors_per_palette,
            });
        }
        Ok(Self {
            max_palettes,
            colors_per_palette,
        })
    }

    /// Maximum number of palettes.
    #[must_use]
    pub fn max_palettes(&self) -> u16 {
        self.max_palettes
    }

    /// Number of slots used in each palette.
    #[must_use]
    pub fn colors_per_palette(&self) -> u8 {
        self.colors_per_palette
    }

    /// Total number of colors which can be stored.
    #[must_use]
    pub fn total(&self) -> usize {
        usize::from(self.max_palettes) * usize::from(self.colors_per_palette)
    }
}

/// `PaletteSpecification` is the canonical output of every parser: an
/// ordered list of palettes bounded by a `Capacity`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaletteSpecification {
    capacity: Capacity,
    palettes: Vec<Palette>,
}

impl PaletteSpecification {
    /// An empty spec with the given capacity.
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            palettes: Vec::new(),
        }
    }

    /// The capacity this spec was created with.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// The palettes in order.
    #[must_use]
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True if there are no palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Every slot in row major order, limited to `colors_per_palette` slots
    /// per palette.
    pub fn slots(&self) -> impl Iterator<Item = Option<Rgba>> + '_ {
        let width = usize::from(self.capacity.colors_per_palette);
        self.palettes
            .iter()
            .flat_map(move |p| p.iter().take(width).copied())
    }

    /// Drop all palettes, keeping the capacity.
    pub fn clear(&mut self) {
        self.palettes.clear();
    }

    pub(crate) fn push(&mut self, palette: Palette) {
        self.palettes.push(palette);
    }

    // Starts an empty palette if there are none yet.
    pub(crate) fn last_mut(&mut self) -> &mut Palette {
        if self.palettes.is_empty() {
            self.palettes.push(EMPTY_PALETTE);
        }
        let last = self.palettes.len() - 1;
        &mut self.palettes[last]
    }
}

impl Display for PaletteSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::from(self.capacity.colors_per_palette);
        for (i, p) in self.palettes.iter().enumerate() {
            write!(f, "{i}:")?;
            for slot in p.iter().take(width) {
                match slot {
                    Some(c) => write!(f, " {c}")?,
                    None => write!(f, " none")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// `CapacityWarning` is returned (and logged) when a file holds more colors
/// than the capacity allows. The extra colors were dropped but the result is
/// otherwise usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityWarning {
    /// Format of the file.
    pub format: Format,
    /// Colors declared by (or found in) the file.
    pub declared: usize,
    /// Colors which could be stored.
    pub capacity: usize,
}

impl Display for CapacityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file contains {} colors, but there can only be {}; ignoring extra",
            self.format, self.declared, self.capacity
        )
    }
}

/// `PalSpec` is the result of interpreting a full color option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PalSpec {
    /// Palettes given inline or loaded from a file.
    Explicit(PaletteSpecification),
    /// Use the palettes embedded in the input image itself.
    Embedded,
    /// A DMG shade mapping.
    Dmg(DmgMapping),
}

const EMBEDDED: &str = "embedded";
const DMG_PREFIX: &str = "dmg=";

/// Interpret a color option:
///
/// * `#...` is an inline spec.
/// * `embedded` (any case) selects the image's own palettes.
/// * `dmg=XX` (any case prefix) is a DMG shade mapping.
/// * Anything else is taken as `FORMAT:path`.
///
/// Capacity warnings from files are logged and otherwise dropped. Call
/// `parse_external_pal_spec` directly to get at them.
///
/// # Errors
/// Whatever the selected parser returns.
pub fn parse_pal_spec(arg: &str, capacity: Capacity) -> Result<PalSpec> {
    if arg.starts_with('#') {
        let mut spec = PaletteSpecification::new(capacity);
        parse_inline_pal_spec(arg, &mut spec)?;
        return Ok(PalSpec::Explicit(spec));
    }
    if arg.eq_ignore_ascii_case(EMBEDDED) {
        return Ok(PalSpec::Embedded);
    }
    if let Some(prefix) = arg.get(..DMG_PREFIX.len()) {
        if prefix.eq_ignore_ascii_case(DMG_PREFIX) {
            return Ok(PalSpec::Dmg(parse_dmg_pal_spec(&arg[DMG_PREFIX.len()..])?));
        }
    }
    let mut spec = PaletteSpecification::new(capacity);
    if let Some(warning) = parse_external_pal_spec(arg, &mut spec)? {
        debug!("{arg}: {warning}");
    }
    Ok(PalSpec::Explicit(spec))
}
