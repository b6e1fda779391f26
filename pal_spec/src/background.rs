use crate::cursor::{single_to_hex, to_hex, Cursor};
use crate::error::{Error, Result};
use rgba::Rgba;

const TRANSPARENT: &str = "transparent";

/// Parse a background color: `transparent` (any case), `#rgb` or `#rrggbb`.
///
/// Hex colors are always fully opaque. `transparent` gives
/// `Rgba::TRANSPARENT`.
///
/// # Errors
/// Anything else, including extra text after the hex digits.
pub fn parse_background_pal_spec(arg: &str) -> Result<Rgba> {
    if arg.eq_ignore_ascii_case(TRANSPARENT) {
        return Ok(Rgba::TRANSPARENT);
    }

    let mut cur = Cursor::new(arg.as_bytes());
    if cur.peek() != Some(b'#') {
        return Err(Error::BackgroundSyntax);
    }
    cur.advance(1);

    let run = cur.hex_run();
    let color = match cur.take(run) {
        &[r, g, b] => Rgba::opaque(single_to_hex(r), single_to_hex(g), single_to_hex(b)),
        &[r1, r2, g1, g2, b1, b2] => Rgba::opaque(to_hex(r1, r2), to_hex(g1, g2), to_hex(b1, b2)),
        _ => return Err(Error::BackgroundSpec(arg.to_owned())),
    };

    if !cur.at_end() {
        return Err(Error::BackgroundTrailing(
            String::from_utf8_lossy(cur.rest()).into_owned(),
        ));
    }
    Ok(color)
}
