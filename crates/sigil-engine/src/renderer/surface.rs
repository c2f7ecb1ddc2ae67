//! Drawing targets for glyph outlines.

use glam::Vec2;
use serde::Serialize;

use super::color::VectorColor;

/// A 2D target that can fill closed polygons.
///
/// The renderer only ever borrows a surface for the duration of one call.
pub trait GlyphSurface {
    /// Fill the closed polygon through `outline` (last point joins the first).
    fn fill_polygon(&mut self, outline: &[Vec2], color: VectorColor);
}

/// One recorded fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillCommand {
    pub outline: Vec<Vec2>,
    pub color: VectorColor,
}

/// A surface that records fills instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub commands: Vec<FillCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Total outline points across all commands.
    pub fn point_count(&self) -> usize {
        self.commands.iter().map(|c| c.outline.len()).sum()
    }

    /// Play the recorded fills onto another surface, in order.
    pub fn replay<S: GlyphSurface + ?Sized>(&self, surface: &mut S) {
        for cmd in &self.commands {
            surface.fill_polygon(&cmd.outline, cmd.color);
        }
    }
}

impl GlyphSurface for DrawList {
    fn fill_polygon(&mut self, outline: &[Vec2], color: VectorColor) {
        self.commands.push(FillCommand { outline: outline.to_vec(), color });
    }
}
