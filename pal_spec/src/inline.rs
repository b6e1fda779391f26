use crate::cursor::{single_to_hex, to_hex, Cursor};
use crate::error::{Error, Result, SpanError};
use crate::{PaletteSpecification, EMPTY_PALETTE, MAX_COLORS_PER_PAL};
use rgba::Rgba;

const NONE: &[u8] = b"none";

const MISSING_COLOR: &str = "Missing color after '#'";
const UNKNOWN_COLOR: &str = "Unknown color specification";
const EXPECTED_SEPARATOR: &str = "Unexpected character, expected ',', ';', or end of argument";
const EXPECTED_HASH: &str = "Unexpected character, expected '#'";

/// Parse an inline palette spec into `spec`, replacing anything it held.
///
/// The grammar is a list of palettes separated by `;` or `:`, each being a
/// list of up to 4 colors separated by `,`. A color is `#` followed by
/// `none` (any case), 3 hex digits (`#rgb`, each doubled) or 6 hex digits
/// (`#rrggbb`). Spaces and tabs may surround any separator and a trailing
/// `,` or `;` is allowed.
///
/// Palettes hold at most `colors_per_palette` colors and there can be at
/// most `max_palettes` palettes.
///
/// # Errors
/// The first problem found is returned as `Error::Inline` with a span
/// pointing at the offending text. Parsing stops there.
pub fn parse_inline_pal_spec(arg: &str, spec: &mut PaletteSpecification) -> Result<()> {
    let fail = |offset: usize, len: usize, msg: &str| -> Result<()> {
        Err(Error::Inline(SpanError::new(arg, offset, len, msg)))
    };

    let capacity = spec.capacity();
    let limit = MAX_COLORS_PER_PAL.min(usize::from(capacity.colors_per_palette()));
    let max_palettes = usize::from(capacity.max_palettes());

    spec.clear();
    spec.push(EMPTY_PALETTE);

    let mut cur = Cursor::new(arg.as_bytes());
    if cur.peek() != Some(b'#') {
        return fail(0, char_len(arg, 0), EXPECTED_HASH);
    }

    // Slot in the current palette the next color lands in.
    let mut nb_colors = 0;
    loop {
        // Skip the '#' (checked on entry or at the bottom of the loop).
        cur.advance(1);

        let color = if cur.starts_with_ignore_case(NONE) {
            cur.advance(NONE.len());
            None
        } else {
            let start = cur.pos();
            let run = cur.hex_run();
            match cur.take(run) {
                &[r, g, b] => Some(Rgba::opaque(
                    single_to_hex(r),
                    single_to_hex(g),
                    single_to_hex(b),
                )),
                &[r1, r2, g1, g2, b1, b2] => {
                    Some(Rgba::opaque(to_hex(r1, r2), to_hex(g1, g2), to_hex(b1, b2)))
                }
                [] => return fail(start - 1, 1, MISSING_COLOR),
                digits => return fail(start, digits.len(), UNKNOWN_COLOR),
            }
        };
        spec.last_mut()[nb_colors] = color;

        cur.skip_whitespace();
        let Some(c) = cur.peek() else {
            break;
        };
        let new_palette = match c {
            b',' => {
                cur.advance(1);
                nb_colors += 1;

                // A trailing comma may be followed by a palette separator.
                cur.skip_whitespace();
                match cur.peek() {
                    Some(b';' | b':') => true,
                    Some(_) if nb_colors == limit => {
                        return fail(
                            cur.pos(),
                            char_len(arg, cur.pos()),
                            &format!("Each palette can only contain up to {limit} colors"),
                        );
                    }
                    _ => false,
                }
            }
            b';' | b':' => true,
            _ => return fail(cur.pos(), char_len(arg, cur.pos()), EXPECTED_SEPARATOR),
        };

        if new_palette {
            cur.advance(1);
            cur.skip_whitespace();
            nb_colors = 0;
            // Don't create an empty palette for a trailing separator.
            if !cur.at_end() {
                if spec.len() == max_palettes {
                    return fail(
                        cur.pos(),
                        char_len(arg, cur.pos()),
                        &format!("There can only be up to {max_palettes} palettes"),
                    );
                }
                spec.push(EMPTY_PALETTE);
            }
        }

        match cur.peek() {
            None => break,
            Some(b'#') => {}
            Some(_) => return fail(cur.pos(), char_len(arg, cur.pos()), EXPECTED_HASH),
        }
    }
    Ok(())
}

// Byte length of the character starting at offset (0 at the end) so a span
// never splits a multi byte character.
fn char_len(arg: &str, offset: usize) -> usize {
    arg.get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8)
}
