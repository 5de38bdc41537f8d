//! Bordered panel.

use crate::context::{DrawContext, UpdateContext};
use crate::error::{check_non_negative, UiResult};
use crate::geometry::Alignment;
use crate::style::{Color, Style};
use crate::tree::{ComponentId, ComponentTree};
use crate::widgets::{StyleTarget, Widget};

/// Background with a border, and a content container inset by the border.
///
/// The inset is re-applied on every update, so the content follows the
/// frame when it is resized.
#[derive(Debug, Clone)]
pub struct Frame {
    content: ComponentId,
    thickness: f32,
    /// Fill inside the border. Falls back to the theme surface.
    pub background: Option<Color>,
    /// Border color. Falls back to the theme.
    pub border: Option<Color>,
}

impl Frame {
    /// Creates a frame filling `parent` with a border `thickness` pixels wide.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId, thickness: f32) -> UiResult<ComponentId> {
        check_non_negative("border thickness", thickness)?;
        let id = tree.create_child(parent)?;
        let content = tree.create_child(id)?;
        tree.transform_mut(content)?.set_alignment(Alignment::Center);
        tree.set_widget(
            id,
            Box::new(Self {
                content,
                thickness,
                background: None,
                border: None,
            }),
        )?;
        Ok(id)
    }

    /// Container for the frame's children.
    #[must_use]
    pub fn content(&self) -> ComponentId {
        self.content
    }

    /// Border thickness in pixels.
    #[must_use]
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Changes the border thickness. Takes effect on the next update.
    pub fn set_thickness(&mut self, thickness: f32) -> UiResult<()> {
        check_non_negative("border thickness", thickness)?;
        self.thickness = thickness;
        Ok(())
    }
}

impl Widget for Frame {
    fn update(&mut self, id: ComponentId, cx: &mut UpdateContext<'_>) -> UiResult<()> {
        let outer = cx.tree.resolve(id);
        let inset = self.thickness * 2.0;
        let width = (outer.width - inset).max(0.0);
        let height = (outer.height - inset).max(0.0);
        cx.tree.set_relative_size_from_pixels(self.content, Some(width), Some(height))?;
        Ok(())
    }

    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        let theme = cx.theme();
        let outer = cx.tree.resolve(id);
        let inner = cx.tree.resolve(self.content);
        if self.thickness > 0.0 {
            cx.list.quad(outer, self.border.unwrap_or(theme.border));
        }
        cx.list.quad(inner, self.background.unwrap_or(theme.surface));
    }

    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        Some(self)
    }
}

impl StyleTarget for Frame {
    fn apply_style(&mut self, style: &Style) {
        self.background = style.background.or(self.background);
        self.border = style.border.or(self.border);
        if let Some(thickness) = style.border_thickness {
            self.thickness = thickness.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::content::{ContentCache, MemoryTextureSource};
    use crate::context::UiContext;
    use crate::geometry::{Rect, Vec2};
    use crate::input::InputState;
    use crate::render::DrawCommand;

    fn context() -> UiContext {
        let content = ContentCache::new(MemoryTextureSource::new());
        UiContext::new(UiConfig::default(), content, Vec2::new(100.0, 60.0)).unwrap()
    }

    #[test]
    fn test_content_is_inset_by_border() {
        let mut ui = context();
        let base = ui.base();
        let frame = Frame::create(ui.tree_mut(), base, 5.0).unwrap();
        ui.update(&InputState::new()).unwrap();

        let content = ui.tree().widget::<Frame>(frame).unwrap().content();
        assert_eq!(ui.tree_mut().resolve(content), Rect::new(5.0, 5.0, 90.0, 50.0));

        ui.tree_mut().widget_mut::<Frame>(frame).unwrap().set_thickness(10.0).unwrap();
        ui.update(&InputState::new()).unwrap();
        assert_eq!(ui.tree_mut().resolve(content), Rect::new(10.0, 10.0, 80.0, 40.0));
    }

    #[test]
    fn test_draws_border_then_background() {
        let mut ui = context();
        let base = ui.base();
        let frame = Frame::create(ui.tree_mut(), base, 2.0).unwrap();
        ui.tree_mut().widget_mut::<Frame>(frame).unwrap().border = Some(Color::WHITE);
        ui.update(&InputState::new()).unwrap();

        let commands = ui.draw().commands().to_vec();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            DrawCommand::Quad { bounds, tint, .. } if bounds == Rect::new(0.0, 0.0, 100.0, 60.0) && tint == Color::WHITE
        ));
        assert!(matches!(
            commands[1],
            DrawCommand::Quad { bounds, .. } if bounds == Rect::new(2.0, 2.0, 96.0, 56.0)
        ));
    }

    #[test]
    fn test_rejects_negative_thickness() {
        let mut ui = context();
        let base = ui.base();
        assert!(Frame::create(ui.tree_mut(), base, -1.0).is_err());
    }
}
