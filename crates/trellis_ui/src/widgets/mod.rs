//! # Widgets
//!
//! Behaviour attached to components. A component carries at most one boxed
//! [`Widget`]; optional capabilities ([`Draggable`], [`StyleTarget`]) are
//! exposed through accessor methods instead of a class hierarchy.
//!
//! ```text
//!  ComponentTree ──owns──► Node ──► Transform
//!                                └─► Box<dyn Widget> ──► as_draggable()
//!                                                    └─► style_target()
//! ```
//!
//! Widgets are created with associated functions (`Button::create(tree, parent)`)
//! that build their component subtree and attach themselves.

use std::any::Any;

use crate::context::{DrawContext, UpdateContext};
use crate::error::UiResult;
use crate::notify::TreeEvent;
use crate::style::Style;
use crate::tree::{ComponentId, ComponentTree};

mod button;
mod frame;
mod image;
mod label;
mod list_box;
mod padding;
mod scroll_bar;
mod solid_color;

pub use button::Button;
pub use frame::Frame;
pub use image::Image;
pub use label::Label;
pub use list_box::{ListBox, ListBoxMode, ListBoxOptions};
pub use padding::Padding;
pub use scroll_bar::{ScrollBar, ScrollBarState};
pub use solid_color::SolidColor;

/// Upcasting support for typed widget lookups.
pub trait AsAny: Any {
    /// Returns self as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns self as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to a component.
///
/// During [`Widget::update`] and [`Widget::draw`] the widget is detached from
/// its node, so it may freely borrow the tree through the context.
pub trait Widget: AsAny {
    /// Short name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Per-frame logic. Runs after focus resolution, parents before children.
    fn update(&mut self, id: ComponentId, cx: &mut UpdateContext<'_>) -> UiResult<()> {
        let _ = (id, cx);
        Ok(())
    }

    /// Emits draw commands for this component only. Children are drawn by
    /// the tree walk afterwards (or by the widget through
    /// [`DrawContext::draw_subtree`] if it cleared their auto-draw flag).
    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        let _ = (id, cx);
    }

    /// Handles an event about a child of a component this widget observes.
    fn on_notification(
        &mut self,
        id: ComponentId,
        event: &TreeEvent,
        tree: &mut ComponentTree,
    ) -> UiResult<()> {
        let _ = (id, event, tree);
        Ok(())
    }

    /// Drag capability, if this widget can hold pointer capture.
    fn as_draggable(&self) -> Option<&dyn Draggable> {
        None
    }

    /// Styling capability, if this widget accepts [`Style`] values.
    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        None
    }
}

/// A widget that can own the pointer while dragging.
pub trait Draggable {
    /// True while a drag started by this widget is in progress.
    fn is_dragging(&self) -> bool;
}

/// A widget whose visuals can be set from a [`Style`].
///
/// Fields left `None` in the style keep their current value.
pub trait StyleTarget {
    /// Copies the set fields of `style` onto the widget.
    fn apply_style(&mut self, style: &Style);
}
