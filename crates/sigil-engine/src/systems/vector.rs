//! Lyon tessellation of glyph outlines into a flat triangle buffer.
//!
//! The browser copies the buffer straight into a GPU vertex array, so the
//! layout is fixed: six floats per vertex, three vertices per triangle.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

use crate::renderer::{GlyphSurface, VectorColor};

/// Per-vertex data. 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Triangle buffer filled by tessellating outlines.
///
/// Ribbon outlines of tight hooks and loops self-intersect, so fills use the
/// non-zero rule to keep overlapping lobes solid.
pub struct VectorState {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(4096 * VectorVertex::FLOATS),
        }
    }

    /// Drop all triangles. Called before each glyph render.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for the JS side to copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Typed view of the buffer.
    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(v)));
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5).with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("outline tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl GlyphSurface for VectorState {
    /// Closed automatically. Fewer than three points draw nothing.
    fn fill_polygon(&mut self, outline: &[Vec2], color: VectorColor) {
        if outline.len() < 3 {
            return;
        }
        let (first, rest) = (outline[0], &outline[1..]);

        let mut builder = Path::builder();
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, color);
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
