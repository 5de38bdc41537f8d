//! Clickable button.
//!
//! ```text
//!            pointer enters           press while hovered
//!   Idle ───────────────────► Hover ───────────────────► Armed
//!    ▲                          ▲                          │
//!    └──── pointer leaves ──────┴──── release ─────────────┘
//!                                     (Clicked if still hovered and
//!                                      no drag interfered this frame)
//! ```

use crate::context::{DrawContext, UiMessage, UpdateContext};
use crate::error::UiResult;
use crate::geometry::Alignment;
use crate::input::MouseButton;
use crate::style::{Color, Style};
use crate::tree::{ComponentId, ComponentTree};
use crate::widgets::{Label, StyleTarget, Widget};

/// Rectangle that reports hover transitions and clicks.
#[derive(Debug, Clone, Default)]
pub struct Button {
    hovered: bool,
    armed: bool,
    /// Fill at rest. Falls back to the theme.
    pub background: Option<Color>,
    /// Fill while hovered. Falls back to the theme.
    pub hover: Option<Color>,
    /// Fill while pressed. Falls back to the theme.
    pub pressed: Option<Color>,
}

impl Button {
    /// Creates a child of `parent` acting as a button.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId) -> UiResult<ComponentId> {
        let id = tree.create_child(parent)?;
        tree.set_widget(id, Box::new(Self::default()))?;
        Ok(id)
    }

    /// Creates a button with a centred caption. Returns the button id.
    pub fn create_with_label(tree: &mut ComponentTree, parent: ComponentId, text: &str) -> UiResult<ComponentId> {
        let id = Self::create(tree, parent)?;
        let label = Label::create(tree, id, text)?;
        if let Some(caption) = tree.widget_mut::<Label>(label) {
            caption.alignment = Alignment::Center;
        }
        Ok(id)
    }

    /// True while the pointer is over the button.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True between a press on the button and the next release.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Widget for Button {
    fn update(&mut self, id: ComponentId, cx: &mut UpdateContext<'_>) -> UiResult<()> {
        let hovered = cx.is_focused(id);
        if hovered != self.hovered {
            self.hovered = hovered;
            cx.emit(if hovered {
                UiMessage::HoverEntered(id)
            } else {
                UiMessage::HoverLeft(id)
            });
        }

        let input = cx.input();
        let focus = cx.focus();
        if input.was_pressed(MouseButton::Left) && hovered && !focus.dragged_by_other(id) {
            self.armed = true;
        }
        if input.was_released(MouseButton::Left) {
            let clean = !focus.drag_state_changed && !focus.dragged_by_other(id);
            if self.armed && hovered && clean {
                cx.emit(UiMessage::Clicked(id));
            }
            self.armed = false;
        }
        Ok(())
    }

    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        let theme = cx.theme();
        let color = if self.armed && self.hovered {
            self.pressed.unwrap_or(theme.pressed)
        } else if self.hovered {
            self.hover.unwrap_or(theme.hover)
        } else {
            self.background.unwrap_or(theme.primary)
        };
        let rect = cx.tree.resolve(id);
        cx.list.quad(rect, color);
    }

    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        Some(self)
    }
}

impl StyleTarget for Button {
    fn apply_style(&mut self, style: &Style) {
        self.background = style.background.or(self.background);
        self.hover = style.hover.or(self.hover);
        self.pressed = style.pressed.or(self.pressed);
    }
}
