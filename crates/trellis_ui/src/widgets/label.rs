//! Single-line text.

use crate::context::DrawContext;
use crate::error::UiResult;
use crate::geometry::{Alignment, Vec2};
use crate::style::{Color, Style};
use crate::tree::{ComponentFlags, ComponentId, ComponentTree};
use crate::widgets::{StyleTarget, Widget};

/// Text placed inside its component's rectangle.
///
/// Width is estimated as a fixed advance per character; real glyph layout
/// happens in the renderer.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    /// Text color. Falls back to the theme's text color.
    pub color: Option<Color>,
    /// Font size in pixels. Falls back to the configured default.
    pub font_size: Option<f32>,
    /// Anchor of the text block inside the component.
    pub alignment: Alignment,
}

impl Label {
    /// Creates a child of `parent` showing `text`. Labels never take focus
    /// themselves, so the component underneath keeps it.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId, text: &str) -> UiResult<ComponentId> {
        let id = tree.create_child(parent)?;
        tree.set_flag(id, ComponentFlags::PASSTHROUGH, true)?;
        tree.set_widget(
            id,
            Box::new(Self {
                text: text.to_owned(),
                ..Self::default()
            }),
        )?;
        Ok(id)
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Monospace size estimate for `text`.
    #[must_use]
    pub fn measure(text: &str, char_width: f32, font_size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        Vec2::new(text.chars().count() as f32 * char_width, font_size)
    }
}

impl Widget for Label {
    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        if self.text.is_empty() {
            return;
        }
        let config = cx.config();
        let font_size = self.font_size.unwrap_or(config.font_size);
        let char_width = config.font_char_width * font_size / config.font_size.max(1.0);
        let size = Self::measure(&self.text, char_width, font_size);
        let rect = cx.tree.resolve(id);
        let origin = self.alignment.align(rect, size);
        let color = self.color.unwrap_or(cx.theme().text);
        cx.list.text(&self.text, origin, font_size, color);
    }

    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        Some(self)
    }
}

impl StyleTarget for Label {
    fn apply_style(&mut self, style: &Style) {
        if let Some(foreground) = style.foreground {
            self.color = Some(foreground);
        }
        if let Some(font_size) = style.font_size {
            self.font_size = Some(font_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure() {
        assert_eq!(Label::measure("abcd", 8.0, 16.0), Vec2::new(32.0, 16.0));
        assert_eq!(Label::measure("", 8.0, 16.0), Vec2::ZERO);
    }
}
