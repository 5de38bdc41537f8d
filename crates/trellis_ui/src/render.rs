//! UI rendering seam.
//!
//! Widgets append to a [`DrawList`] during the draw phase. The host then
//! either replays it into its own [`Renderer`] or tessellates it into
//! vertices for a GPU buffer. Every draw gets a strictly increasing depth, so
//! the list order is also the z-order.

use crate::content::TextureId;
use crate::geometry::{Rect, Vec2};
use crate::style::Color;

/// Full texture UV rectangle (u0, v0, u1, v1).
pub const FULL_UV: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Quad {
        /// Bounds.
        bounds: Rect,
        /// Rotation about the centre, in radians.
        rotation: f32,
        /// Fill color.
        tint: Color,
        /// Draw order.
        depth: u32,
    },
    /// Textured quad.
    Texture {
        /// Bounds.
        bounds: Rect,
        /// Texture handle from the content source.
        texture: TextureId,
        /// UV coordinates (u0, v0, u1, v1).
        uv: [f32; 4],
        /// Rotation about the centre, in radians.
        rotation: f32,
        /// Tint color.
        tint: Color,
        /// Draw order.
        depth: u32,
    },
    /// A run of text. Glyph layout is left to the renderer.
    Text {
        /// Text content.
        text: String,
        /// Top-left corner of the first glyph.
        origin: Vec2,
        /// Font size in pixels.
        font_size: f32,
        /// Text color.
        tint: Color,
        /// Draw order.
        depth: u32,
    },
    /// Scissor rect (clip children).
    PushClip {
        /// Clip bounds, already intersected with the enclosing clip.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

/// Backend that consumes a [`DrawList`].
pub trait Renderer {
    /// Restricts following draws to `clip`, or lifts the restriction.
    fn set_scissor(&mut self, clip: Option<Rect>);

    /// Draws a filled rectangle.
    fn draw_quad(&mut self, bounds: Rect, rotation: f32, tint: Color, depth: u32);

    /// Draws a textured rectangle.
    fn draw_texture(&mut self, texture: TextureId, bounds: Rect, uv: [f32; 4], rotation: f32, tint: Color, depth: u32);

    /// Draws a text run.
    fn draw_text(&mut self, text: &str, origin: Vec2, font_size: f32, tint: Color, depth: u32);
}

/// Commands collected for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    next_depth: u32,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            clip_stack: Vec::with_capacity(16),
            next_depth: 0,
        }
    }

    /// Clears everything recorded for the previous frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.next_depth = 0;
    }

    fn depth(&mut self) -> u32 {
        let depth = self.next_depth;
        self.next_depth += 1;
        depth
    }

    /// Records a filled, unrotated rectangle.
    pub fn quad(&mut self, bounds: Rect, tint: Color) {
        self.quad_rotated(bounds, 0.0, tint);
    }

    /// Records a filled rectangle rotated about its centre.
    pub fn quad_rotated(&mut self, bounds: Rect, rotation: f32, tint: Color) {
        let depth = self.depth();
        self.commands.push(DrawCommand::Quad {
            bounds,
            rotation,
            tint,
            depth,
        });
    }

    /// Records a textured rectangle.
    pub fn texture(&mut self, texture: TextureId, bounds: Rect, uv: [f32; 4], rotation: f32, tint: Color) {
        let depth = self.depth();
        self.commands.push(DrawCommand::Texture {
            bounds,
            texture,
            uv,
            rotation,
            tint,
            depth,
        });
    }

    /// Records a text run. Empty text records nothing.
    pub fn text(&mut self, text: &str, origin: Vec2, font_size: f32, tint: Color) {
        if text.is_empty() {
            return;
        }
        let depth = self.depth();
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            origin,
            font_size,
            tint,
            depth,
        });
    }

    /// Pushes a clip rect, intersected with the current one.
    pub fn push_clip(&mut self, bounds: Rect) {
        let actual_clip = match self.clip_stack.last() {
            Some(current) => current.intersection(&bounds).unwrap_or(Rect::ZERO),
            None => bounds,
        };

        self.clip_stack.push(actual_clip);
        self.commands.push(DrawCommand::PushClip { bounds: actual_clip });
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.commands.push(DrawCommand::PopClip);
        }
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Recorded commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Feeds every command to `renderer`, translating the clip stack into
    /// scissor changes.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        let mut clips: Vec<Rect> = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::Quad { bounds, rotation, tint, depth } => {
                    renderer.draw_quad(*bounds, *rotation, *tint, *depth);
                }
                DrawCommand::Texture { bounds, texture, uv, rotation, tint, depth } => {
                    renderer.draw_texture(*texture, *bounds, *uv, *rotation, *tint, *depth);
                }
                DrawCommand::Text { text, origin, font_size, tint, depth } => {
                    renderer.draw_text(text, *origin, *font_size, *tint, *depth);
                }
                DrawCommand::PushClip { bounds } => {
                    clips.push(*bounds);
                    renderer.set_scissor(Some(*bounds));
                }
                DrawCommand::PopClip => {
                    clips.pop();
                    renderer.set_scissor(clips.last().copied());
                }
            }
        }
    }

    /// Converts quads and textured quads into triangles (six vertices each).
    ///
    /// Quads entirely outside the active clip are dropped; partial clipping
    /// and text are left to the renderer.
    #[must_use]
    pub fn tessellate(&self) -> Vec<UiVertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 6);
        let mut clips: Vec<Rect> = Vec::new();
        for command in &self.commands {
            let (bounds, rotation, tint, uv) = match command {
                DrawCommand::Quad { bounds, rotation, tint, .. } => (*bounds, *rotation, *tint, FULL_UV),
                DrawCommand::Texture { bounds, rotation, tint, uv, .. } => (*bounds, *rotation, *tint, *uv),
                DrawCommand::PushClip { bounds } => {
                    clips.push(*bounds);
                    continue;
                }
                DrawCommand::PopClip => {
                    clips.pop();
                    continue;
                }
                DrawCommand::Text { .. } => continue,
            };
            if clips.last().is_some_and(|clip| !clip.intersects(&bounds)) {
                continue;
            }
            push_quad(&mut vertices, bounds, rotation, uv, tint.to_array());
        }
        vertices
    }
}

fn push_quad(vertices: &mut Vec<UiVertex>, bounds: Rect, rotation: f32, uv: [f32; 4], color: [f32; 4]) {
    let [u0, v0, u1, v1] = uv;
    let centre = Vec2::new(bounds.x + bounds.width * 0.5, bounds.y + bounds.height * 0.5);
    let (sin, cos) = rotation.sin_cos();
    let corner = |x: f32, y: f32, u: f32, v: f32| {
        let local = Vec2::new(x, y) - centre;
        let rotated = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos) + centre;
        UiVertex::new(rotated.x, rotated.y, u, v, color)
    };

    let top_left = corner(bounds.x, bounds.y, u0, v0);
    let top_right = corner(bounds.right(), bounds.y, u1, v0);
    let bottom_left = corner(bounds.x, bounds.bottom(), u0, v1);
    let bottom_right = corner(bounds.right(), bounds.bottom(), u1, v1);
    vertices.extend_from_slice(&[top_left, top_right, bottom_left, bottom_left, top_right, bottom_right]);
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UiVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        scissors: Vec<Option<Rect>>,
        depths: Vec<u32>,
    }

    impl Renderer for Recorder {
        fn set_scissor(&mut self, clip: Option<Rect>) {
            self.scissors.push(clip);
        }

        fn draw_quad(&mut self, _bounds: Rect, _rotation: f32, _tint: Color, depth: u32) {
            self.depths.push(depth);
        }

        fn draw_texture(&mut self, _texture: TextureId, _bounds: Rect, _uv: [f32; 4], _rotation: f32, _tint: Color, depth: u32) {
            self.depths.push(depth);
        }

        fn draw_text(&mut self, _text: &str, _origin: Vec2, _font_size: f32, _tint: Color, depth: u32) {
            self.depths.push(depth);
        }
    }

    #[test]
    fn test_clip_stack_intersects() {
        let mut list = DrawList::new();

        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(list.current_clip(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        list.pop_clip();
        list.pop_clip();
        list.pop_clip();
        assert!(list.current_clip().is_none());
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_replay_restores_outer_scissor() {
        let mut list = DrawList::new();
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        list.push_clip(outer);
        list.quad(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.push_clip(Rect::new(0.0, 0.0, 20.0, 20.0));
        list.text("hi", Vec2::ZERO, 12.0, Color::WHITE);
        list.text("", Vec2::ZERO, 12.0, Color::WHITE);
        list.pop_clip();
        list.pop_clip();

        let mut recorder = Recorder::default();
        list.replay(&mut recorder);

        assert_eq!(recorder.depths, vec![0, 1]);
        assert_eq!(recorder.scissors.len(), 4);
        assert_eq!(recorder.scissors[2], Some(outer));
        assert_eq!(recorder.scissors[3], None);
    }

    #[test]
    fn test_tessellate_skips_clipped_out_quads() {
        let mut list = DrawList::new();
        list.quad(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.quad(Rect::new(50.0, 50.0, 10.0, 10.0), Color::WHITE);
        list.pop_clip();

        let vertices = list.tessellate();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[5].position, [10.0, 10.0]);
        assert_eq!(bytemuck::cast_slice::<UiVertex, u8>(&vertices).len(), 6 * 32);
    }

    #[test]
    fn test_rotation_about_centre() {
        let mut list = DrawList::new();
        list.quad_rotated(Rect::new(0.0, 0.0, 2.0, 2.0), std::f32::consts::PI, Color::WHITE);

        let vertices = list.tessellate();
        assert!((vertices[0].position[0] - 2.0).abs() < 1e-5);
        assert!((vertices[0].position[1] - 2.0).abs() < 1e-5);
    }
}
