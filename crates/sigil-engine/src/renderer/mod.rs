//! Calligraphic glyph rendering onto any [`GlyphSurface`].

pub mod calligraphy;
pub mod color;
pub mod options;
pub mod surface;

pub use calligraphy::{render_glyph, render_glyph_animated, taper_profile, velocity_profile};
pub use color::VectorColor;
pub use options::RenderOptions;
pub use surface::{DrawList, FillCommand, GlyphSurface};
