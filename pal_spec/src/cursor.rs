//! Low level helpers shared by the inline parser and the file decoders.

use std::mem::size_of;
use std::ops::{BitOr, Shl};

/// Returns true if `c` is `0-9`, `a-f` or `A-F`.
#[must_use]
pub const fn is_hex_digit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

/// Decode a single hex digit. Callers must check `is_hex_digit` first.
#[must_use]
pub const fn nibble(c: u8) -> u8 {
    debug_assert!(is_hex_digit(c));
    match c {
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => c.wrapping_sub(b'0'),
    }
}

/// Combine 2 hex digits into a byte (high nibble first).
#[must_use]
pub const fn to_hex(c1: u8, c2: u8) -> u8 {
    nibble(c1) * 16 + nibble(c2)
}

/// Expand a single hex digit the way `#rgb` shorthand does (`a` -> 0xAA).
#[must_use]
pub const fn single_to_hex(c: u8) -> u8 {
    to_hex(c, c)
}

/// Read a big endian `T` from the start of `bytes`.
///
/// # Panics
/// If `bytes` is shorter than `T`.
pub fn read_be<T>(bytes: &[u8]) -> T
where
    T: Default + From<u8> + Shl<u32, Output = T> + BitOr<Output = T>,
{
    bytes[..size_of::<T>()]
        .iter()
        .fold(T::default(), |val, &b| val << 8 | T::from(b))
}

/// Read a little endian `T` from the start of `bytes`.
///
/// # Panics
/// If `bytes` is shorter than `T`.
pub fn read_le<T>(bytes: &[u8]) -> T
where
    T: Default + From<u8> + Shl<u32, Output = T> + BitOr<Output = T>,
{
    bytes[..size_of::<T>()]
        .iter()
        .zip((0..).step_by(8))
        .fold(T::default(), |val, (&b, shift)| val | T::from(b) << shift)
}

/// `Cursor` walks a byte string keeping track of the current offset so
/// errors can point back at where they happened.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Start a cursor at the beginning of `text`.
    #[must_use]
    pub fn new(text: &'a [u8]) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// True once everything has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The next byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    /// Everything not yet consumed.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.text[self.pos.min(self.text.len())..]
    }

    /// Move forward `n` bytes, stopping at the end.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// Consume and return the next `n` bytes (fewer at the end).
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let rest = self.rest();
        let out = &rest[..n.min(rest.len())];
        self.advance(out.len());
        out
    }

    /// Skip spaces and tabs. Newlines are left alone since they separate
    /// records and are handled by whoever splits lines.
    pub fn skip_whitespace(&mut self) {
        let n = self
            .rest()
            .iter()
            .take_while(|&&c| c == b' ' || c == b'\t')
            .count();
        self.advance(n);
    }

    /// Number of consecutive hex digits starting at the cursor.
    #[must_use]
    pub fn hex_run(&self) -> usize {
        self.rest().iter().take_while(|&&c| is_hex_digit(c)).count()
    }

    /// True if the unconsumed text starts with `lit` ignoring ASCII case.
    #[must_use]
    pub fn starts_with_ignore_case(&self, lit: &[u8]) -> bool {
        self.rest()
            .get(..lit.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(lit))
    }

    /// Parse the longest run of decimal digits as a `T`.
    ///
    /// Returns None and leaves the cursor alone if there are no digits or the
    /// value doesn't fit in `T`.
    pub fn parse_dec<T: TryFrom<u64>>(&mut self) -> Option<T> {
        let digits = self
            .rest()
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits == 0 {
            return None;
        }
        let val = self.rest()[..digits].iter().try_fold(0_u64, |acc, &c| {
            acc.checked_mul(10)?.checked_add(u64::from(c - b'0'))
        })?;
        let val = T::try_from(val).ok()?;
        self.advance(digits);
        Some(val)
    }
}
