use crate::*;
use color_eyre::eyre::Result;
use rgba::Rgba;
use std::path::Path;

#[test]
fn hex_helpers() {
    for (c, want) in [(b'0', 0), (b'9', 9), (b'a', 10), (b'F', 15)] {
        assert!(is_hex_digit(c), "{} should be hex", c as char);
        assert!(nibble(c) == want, "nibble({}) != {want}", c as char);
    }
    for c in [b'g', b'G', b' ', b'#', b'/', b':'] {
        assert!(!is_hex_digit(c), "{} shouldn't be hex", c as char);
    }
    assert!(to_hex(b'a', b'5') == 0xA5, "to_hex");
    assert!(single_to_hex(b'c') == 0xCC, "single_to_hex");
    assert!(read_be::<u16>(&[0x12, 0x34, 0x56]) == 0x1234, "read_be");
    assert!(read_le::<u16>(&[0x12, 0x34, 0x56]) == 0x3412, "read_le");
}

#[test]
fn cursor_dec() {
    let mut cur = Cursor::new(b"255 256x");
    assert!(cur.parse_dec::<u8>() == Some(255), "255");
    cur.skip_whitespace();
    // Out of range doesn't move.
    assert!(cur.parse_dec::<u8>().is_none(), "256 fits in u8?");
    assert!(cur.pos() == 4, "cursor moved to {}", cur.pos());
    assert!(cur.parse_dec::<u16>() == Some(256), "256 as u16");
    assert!(cur.parse_dec::<u16>().is_none(), "x parsed");
    assert!(cur.rest() == b"x", "rest is {:?}", cur.rest());

    let mut cur = Cursor::new(b"99999999999999999999999");
    assert!(cur.parse_dec::<u64>().is_none(), "overflow parsed");
    assert!(cur.pos() == 0, "overflow moved cursor");
}

#[test]
fn cursor_scanning() {
    let mut cur = Cursor::new(b" \t NoNe,abc12z");
    cur.skip_whitespace();
    assert!(cur.starts_with_ignore_case(b"none"), "none not found");
    assert!(!cur.starts_with_ignore_case(b"none,abc12z!"), "past end");
    cur.advance(5);
    assert!(cur.hex_run() == 5, "hex run {}", cur.hex_run());
    assert!(cur.take(5) == b"abc12", "take");
    assert!(cur.take(5) == b"z", "short take");
    assert!(cur.at_end() && cur.peek().is_none(), "not at end");
    cur.advance(3);
    assert!(cur.pos() == 14, "advanced past end");
}

#[test]
fn capacity() {
    let c = Capacity::default();
    assert!(c.max_palettes() == 8 && c.colors_per_palette() == 4, "{c:?}");
    assert!(c.total() == 32, "total {}", c.total());

    for (p, cpp) in [(1, 1), (1, 4), (u16::MAX, 4)] {
        assert!(Capacity::new(p, cpp).is_ok(), "{p}x{cpp} rejected");
    }
    for (p, cpp) in [(0, 4), (8, 0), (8, 5)] {
        let res = Capacity::new(p, cpp);
        assert!(
            matches!(res, Err(Error::Capacity { max_palettes, colors_per_palette }) if max_palettes == p && colors_per_palette == cpp),
            "{p}x{cpp} gave {res:?}"
        );
    }
}

fn new_spec(max_palettes: u16, colors_per_palette: u8) -> PaletteSpecification {
    PaletteSpecification::new(
        Capacity::new(max_palettes, colors_per_palette).expect("test capacity is valid"),
    )
}

const RED: Option<Rgba> = Some(Rgba::opaque(0xFF, 0x00, 0x00));
const GREEN: Option<Rgba> = Some(Rgba::opaque(0x00, 0xFF, 0x00));
const BLUE: Option<Rgba> = Some(Rgba::opaque(0x00, 0x00, 0xFF));

struct InlineTest<'a> {
    arg: &'a str,
    want: Vec<Palette>,
}

macro_rules! inline_test {
    ($suite:ident, $($name:ident: $inline_test:expr)*) => {
        mod $suite {
            use super::*;

            $(
                #[test]
                fn $name() -> Result<()> {
                    let t = $inline_test;
                    let mut spec = PaletteSpecification::default();
                    parse_inline_pal_spec(t.arg, &mut spec)?;
                    assert!(
                        spec.palettes() == t.want.as_slice(),
                        "{}: got\n{spec}want {:?}",
                        t.arg,
                        t.want
                    );
                    Ok(())
                }
            )*
        }
    }
}

inline_test!(
    inline_tests,
    one_palette: InlineTest {
        arg: "#f00,#0f0,#00f",
        want: vec![[RED, GREEN, BLUE, None]],
    }
    two_palettes: InlineTest {
        arg: "#f00:#0f0",
        want: vec![[RED, None, None, None], [GREEN, None, None, None]],
    }
    semicolon: InlineTest {
        arg: "#ff0000;#00FF00",
        want: vec![[RED, None, None, None], [GREEN, None, None, None]],
    }
    none_slot: InlineTest {
        arg: "#none,#f00",
        want: vec![[None, RED, None, None]],
    }
    none_any_case: InlineTest {
        arg: "#NoNe,#NONE,#00f",
        want: vec![[None, None, BLUE, None]],
    }
    full_palette: InlineTest {
        arg: "#f00,#0f0,#00f,#fff",
        want: vec![[RED, GREEN, BLUE, Some(Rgba::opaque(0xFF, 0xFF, 0xFF))]],
    }
    whitespace: InlineTest {
        arg: "#f00 ,\t#0f0 ; #00f",
        want: vec![[RED, GREEN, None, None], [BLUE, None, None, None]],
    }
    trailing_comma: InlineTest {
        arg: "#f00,",
        want: vec![[RED, None, None, None]],
    }
    trailing_semicolon: InlineTest {
        arg: "#f00;",
        want: vec![[RED, None, None, None]],
    }
    trailing_both: InlineTest {
        arg: "#f00,#0f0,#00f,#f00, ; ",
        want: vec![[RED, GREEN, BLUE, RED]],
    }
    comma_then_palette: InlineTest {
        arg: "#f00,;#0f0",
        want: vec![[RED, None, None, None], [GREEN, None, None, None]],
    }
    mixed_case_hex: InlineTest {
        arg: "#AbCdEf",
        want: vec![[Some(Rgba::opaque(0xAB, 0xCD, 0xEF)), None, None, None]],
    }
);

struct BadInlineTest<'a> {
    arg: &'a str,
    offset: usize,
    len: usize,
    message: &'a str,
}

macro_rules! bad_inline_test {
    ($suite:ident, $($name:ident: $bad_inline_test:expr)*) => {
        mod $suite {
            use super::*;

            $(
                #[test]
                fn $name() {
                    let t = $bad_inline_test;
                    let mut spec = PaletteSpecification::default();
                    let res = parse_inline_pal_spec(t.arg, &mut spec);
                    let Err(Error::Inline(e)) = res else {
                        panic!("{}: didn't get inline error - {res:?}", t.arg);
                    };
                    assert!(e.arg == t.arg, "wrong arg {}", e.arg);
                    assert!(
                        e.offset == t.offset && e.len == t.len,
                        "{}: span {}+{} should be {}+{}\n{e}",
                        t.arg, e.offset, e.len, t.offset, t.len
                    );
                    assert!(e.message == t.message, "{}: wrong message {}", t.arg, e.message);
                }
            )*
        }
    }
}

bad_inline_test!(
    bad_inline_tests,
    empty: BadInlineTest {
        arg: "",
        offset: 0,
        len: 0,
        message: "Unexpected character, expected '#'",
    }
    four_digits: BadInlineTest {
        arg: "#ff00",
        offset: 1,
        len: 4,
        message: "Unknown color specification",
    }
    seven_digits: BadInlineTest {
        arg: "#f00,#1234567",
        offset: 6,
        len: 7,
        message: "Unknown color specification",
    }
    missing_color: BadInlineTest {
        arg: "#f00,#,#0f0",
        offset: 5,
        len: 1,
        message: "Missing color after '#'",
    }
    missing_color_at_end: BadInlineTest {
        arg: "#",
        offset: 0,
        len: 1,
        message: "Missing color after '#'",
    }
    not_hex: BadInlineTest {
        arg: "#f0g",
        offset: 1,
        len: 2,
        message: "Unknown color specification",
    }
    bad_separator: BadInlineTest {
        arg: "#f00.#0f0",
        offset: 4,
        len: 1,
        message: "Unexpected character, expected ',', ';', or end of argument",
    }
    no_hash: BadInlineTest {
        arg: "#f00,f00",
        offset: 5,
        len: 1,
        message: "Unexpected character, expected '#'",
    }
    no_hash_after_palette: BadInlineTest {
        arg: "#f00; 0f0",
        offset: 6,
        len: 1,
        message: "Unexpected character, expected '#'",
    }
    five_colors: BadInlineTest {
        arg: "#f00,#0f0,#00f,#fff,#000",
        offset: 20,
        len: 1,
        message: "Each palette can only contain up to 4 colors",
    }
    wide_separator: BadInlineTest {
        arg: "#f00é",
        offset: 4,
        len: 2,
        message: "Unexpected character, expected ',', ';', or end of argument",
    }
    wide_start: BadInlineTest {
        arg: "é#f00",
        offset: 0,
        len: 2,
        message: "Unexpected character, expected '#'",
    }
    wide_after_comma: BadInlineTest {
        arg: "#f00,→",
        offset: 5,
        len: 3,
        message: "Unexpected character, expected '#'",
    }
    doubled_comma: BadInlineTest {
        arg: "#f00,,#0f0",
        offset: 5,
        len: 1,
        message: "Unexpected character, expected '#'",
    }
);

#[test]
fn inline_caret() {
    let mut spec = PaletteSpecification::default();
    let res = parse_inline_pal_spec("#f00,#ff00", &mut spec);
    let Err(e) = res else {
        panic!("no error for #ff00");
    };
    let want = format!(
        "Unknown color specification\nIn inline palette spec: #f00,#ff00\n{}^^^^",
        " ".repeat(30)
    );
    assert!(e.to_string() == want, "got\n{e}\nwant\n{want}");
    let Error::Inline(span) = e else {
        panic!("not an inline error");
    };
    assert!(span.span() == "ff00", "span {}", span.span());
    assert!(span.caret() == "      ^^^^", "caret {:?}", span.caret());
}

#[test]
fn inline_wide_char_span() {
    let mut spec = PaletteSpecification::default();
    let res = parse_inline_pal_spec("#f00é,#0f0", &mut spec);
    let Err(Error::Inline(e)) = res else {
        panic!("no inline error - {res:?}");
    };
    assert!(e.span() == "é", "span {:?}", e.span());
    assert!(e.caret() == "    ^", "caret {:?}", e.caret());
}

#[test]
fn inline_limited_width() -> Result<()> {
    let mut spec = new_spec(8, 2);
    parse_inline_pal_spec("#f00,#0f0;#00f,", &mut spec)?;
    assert!(
        spec.palettes() == [[RED, GREEN, None, None], [BLUE, None, None, None]],
        "got\n{spec}"
    );

    let res = parse_inline_pal_spec("#f00,#0f0,#00f", &mut spec);
    assert!(
        matches!(&res, Err(Error::Inline(e)) if e.offset == 10 && e.message == "Each palette can only contain up to 2 colors"),
        "{res:?}"
    );
    Ok(())
}

#[test]
fn inline_palette_limit() -> Result<()> {
    let mut spec = new_spec(2, 4);
    parse_inline_pal_spec("#f00;#0f0;", &mut spec)?;
    assert!(spec.len() == 2, "got\n{spec}");

    let res = parse_inline_pal_spec("#f00;#0f0;#00f", &mut spec);
    assert!(
        matches!(&res, Err(Error::Inline(e)) if e.offset == 10 && e.message == "There can only be up to 2 palettes"),
        "{res:?}"
    );
    Ok(())
}

#[test]
fn inline_replaces_previous() -> Result<()> {
    let mut spec = PaletteSpecification::default();
    parse_inline_pal_spec("#f00;#0f0;#00f", &mut spec)?;
    parse_inline_pal_spec("#0f0", &mut spec)?;
    assert!(
        spec.palettes() == [[GREEN, None, None, None]],
        "got\n{spec}"
    );
    Ok(())
}

#[test]
fn dmg() -> Result<()> {
    let m = parse_dmg_pal_spec("E4")?;
    assert!(m.spec() == 0xE4, "spec {:02X}", m.spec());
    for shade in 0..4 {
        assert!(m.dmg_value(shade) == shade, "E4 shade {shade}");
        assert!(m.gray_index(shade) == shade, "E4 index {shade}");
    }

    let m = parse_dmg_pal_spec("1b")?;
    for shade in 0..4 {
        assert!(m.dmg_value(shade) == 3 - shade, "1B shade {shade}");
        assert!(m.gray_index(m.dmg_value(shade)) == shade, "1B inverse {shade}");
    }
    Ok(())
}

#[test]
fn dmg_bad() {
    for arg in ["", "E", "E4E", "G4", "#E4", " E4"] {
        let res = parse_dmg_pal_spec(arg);
        assert!(
            matches!(&res, Err(Error::DmgSpec(s)) if s == arg),
            "{arg:?} gave {res:?}"
        );
    }

    let res = parse_dmg_pal_spec("00");
    assert!(
        matches!(
            res,
            Err(Error::DmgConflict {
                first: 0,
                second: 1,
                index: 0,
                ..
            })
        ),
        "{res:?}"
    );
    // Shades 1 and 3 both use index 1.
    let res = parse_dmg_pal_spec("64");
    assert!(
        matches!(
            res,
            Err(Error::DmgConflict {
                first: 1,
                second: 3,
                index: 1,
                ..
            })
        ),
        "{res:?}"
    );
}

#[test]
fn background() -> Result<()> {
    for (arg, want) in [
        ("transparent", Rgba::TRANSPARENT),
        ("TransParent", Rgba::TRANSPARENT),
        ("#f00", Rgba::opaque(0xFF, 0x00, 0x00)),
        ("#FF0000", Rgba::opaque(0xFF, 0x00, 0x00)),
        ("#123456", Rgba::opaque(0x12, 0x34, 0x56)),
        ("#abc", Rgba::opaque(0xAA, 0xBB, 0xCC)),
    ] {
        let got = parse_background_pal_spec(arg)?;
        assert!(got == want, "{arg}: {got} should be {want}");
    }
    Ok(())
}

#[test]
fn background_bad() {
    let res = parse_background_pal_spec("f00");
    assert!(matches!(res, Err(Error::BackgroundSyntax)), "{res:?}");
    let res = parse_background_pal_spec("");
    assert!(matches!(res, Err(Error::BackgroundSyntax)), "{res:?}");

    for arg in ["#f000", "#", "#ff", "#1234567"] {
        let res = parse_background_pal_spec(arg);
        assert!(
            matches!(&res, Err(Error::BackgroundSpec(s)) if s == arg),
            "{arg} gave {res:?}"
        );
    }

    let res = parse_background_pal_spec("#f00 ");
    assert!(
        matches!(&res, Err(Error::BackgroundTrailing(s)) if s == " "),
        "{res:?}"
    );
    let res = parse_background_pal_spec("#123456,#000");
    assert!(
        matches!(&res, Err(Error::BackgroundTrailing(s)) if s == ",#000"),
        "{res:?}"
    );
}

#[test]
fn pal_spec_selector() -> Result<()> {
    let capacity = Capacity::default();

    let got = parse_pal_spec("#f00", capacity)?;
    let PalSpec::Explicit(spec) = got else {
        panic!("inline gave {got:?}");
    };
    assert!(spec.palettes() == [[RED, None, None, None]], "{spec}");

    for arg in ["embedded", "EMBEDDED", "Embedded"] {
        let got = parse_pal_spec(arg, capacity)?;
        assert!(got == PalSpec::Embedded, "{arg} gave {got:?}");
    }

    for arg in ["dmg=E4", "DMG=e4", "Dmg=E4"] {
        let got = parse_pal_spec(arg, capacity)?;
        assert!(
            matches!(got, PalSpec::Dmg(m) if m.spec() == 0xE4),
            "{arg} gave {got:?}"
        );
    }

    let res = parse_pal_spec("dmg=zz", capacity);
    assert!(matches!(res, Err(Error::DmgSpec(_))), "{res:?}");

    // Not quite embedded so it's treated as a file.
    let res = parse_pal_spec("embeddedx", capacity);
    assert!(matches!(res, Err(Error::MissingColon)), "{res:?}");

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../testdata/greens.hex");
    let got = parse_pal_spec(&format!("hex:{}", path.display()), capacity)?;
    let PalSpec::Explicit(spec) = got else {
        panic!("external gave {got:?}");
    };
    assert!(
        spec.palettes()
            == [[
                Some(Rgba::opaque(224, 248, 208)),
                Some(Rgba::opaque(136, 192, 112)),
                Some(Rgba::opaque(52, 104, 86)),
                Some(Rgba::opaque(8, 24, 32)),
            ]],
        "{spec}"
    );
    Ok(())
}

#[test]
fn spec_display() -> Result<()> {
    let mut spec = new_spec(4, 3);
    assert!(
        parse_inline_pal_spec("#f00,#none,#00f;#transparent", &mut spec).is_err(),
        "#transparent isn't an inline color"
    );
    parse_inline_pal_spec("#f00,#none,#00f;#123456", &mut spec)?;
    let want = "0: #FF0000 none #0000FF\n1: #123456 none none\n";
    assert!(spec.to_string() == want, "got\n{spec}want\n{want}");
    assert!(spec.slots().count() == 6, "slots {}", spec.slots().count());
    Ok(())
}
