//! Flat colored rectangle.

use crate::context::DrawContext;
use crate::error::UiResult;
use crate::style::{Color, Style};
use crate::tree::{ComponentId, ComponentTree};
use crate::widgets::{StyleTarget, Widget};

/// Fills its component's rectangle with one color.
#[derive(Debug, Clone)]
pub struct SolidColor {
    /// Fill color.
    pub color: Color,
    /// Rotation about the centre, in radians.
    pub rotation: f32,
}

impl SolidColor {
    /// Creates a child of `parent` filled with `color`.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId, color: Color) -> UiResult<ComponentId> {
        let id = tree.create_child(parent)?;
        tree.set_widget(id, Box::new(Self { color, rotation: 0.0 }))?;
        Ok(id)
    }
}

impl Widget for SolidColor {
    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        let rect = cx.tree.resolve(id);
        cx.list.quad_rotated(rect, self.rotation, self.color);
    }

    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        Some(self)
    }
}

impl StyleTarget for SolidColor {
    fn apply_style(&mut self, style: &Style) {
        if let Some(background) = style.background {
            self.color = background;
        }
    }
}
