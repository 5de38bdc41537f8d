//! Textured rectangle backed by the content cache.

use crate::content::{ContentCache, TextureRef};
use crate::context::DrawContext;
use crate::error::UiResult;
use crate::geometry::Vec2;
use crate::render::FULL_UV;
use crate::style::{Color, Style};
use crate::tree::{ComponentId, ComponentTree};
use crate::widgets::{StyleTarget, Widget};

/// Draws a cached texture stretched over its component.
///
/// Holds a counted reference; destroying the component releases it.
#[derive(Debug, Clone)]
pub struct Image {
    texture: TextureRef,
    /// Multiplied with the texture.
    pub tint: Color,
    /// Source rectangle (u0, v0, u1, v1).
    pub uv: [f32; 4],
    /// Rotation about the centre, in radians.
    pub rotation: f32,
}

impl Image {
    /// Creates a child of `parent` showing the texture at `path`.
    ///
    /// With `keep_aspect`, the component's ratio is locked to the texture's.
    pub fn create(
        tree: &mut ComponentTree,
        parent: ComponentId,
        content: &ContentCache,
        path: &str,
        keep_aspect: bool,
    ) -> UiResult<ComponentId> {
        let texture = content.acquire(path)?;
        let id = tree.create_child(parent)?;
        let (width, height) = texture.dimensions();
        if keep_aspect && width > 0 && height > 0 {
            let ratio = Vec2::new(width as f32, height as f32);
            tree.transform_mut(id)?.set_ratio(Some(ratio))?;
        }
        tree.set_widget(
            id,
            Box::new(Self {
                texture,
                tint: Color::WHITE,
                uv: FULL_UV,
                rotation: 0.0,
            }),
        )?;
        Ok(id)
    }

    /// The texture handle.
    #[must_use]
    pub fn texture(&self) -> &TextureRef {
        &self.texture
    }
}

impl Widget for Image {
    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        let rect = cx.tree.resolve(id);
        cx.list.texture(self.texture.id(), rect, self.uv, self.rotation, self.tint);
    }

    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        Some(self)
    }
}

impl StyleTarget for Image {
    fn apply_style(&mut self, style: &Style) {
        if let Some(foreground) = style.foreground {
            self.tint = foreground;
        }
    }
}
