//! prelude exports the palette types and parsers used to build a palette
//! specification for the Game Boy (Color).

/// prelude exports common items for palette specification handling.
pub mod prelude {
    pub use pal_spec::*;
    pub use rgba::*;
}
