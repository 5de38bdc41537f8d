//! # Scroll Bar
//!
//! A track with a thumb child. The bar owns the scroll offset; containers
//! feed it the content and viewport lengths and read the offset back.
//!
//! ```text
//!            press on thumb                 release
//!   Idle ─────────────────────► ThumbDragging ─────────► Idle
//!    │
//!    │ press on track
//!    ▼
//!   ClickScrolling (one frame: page towards the click) ──► Idle
//! ```
//!
//! While dragging the bar keeps pointer capture: the pointer may leave the
//! thumb, and movement beyond the scroll range is remembered so the thumb
//! stays under the pointer when it comes back.

use crate::context::{DrawContext, UiMessage, UpdateContext};
use crate::error::{check_non_negative, UiResult};
use crate::geometry::{Alignment, Axis};
use crate::input::MouseButton;
use crate::style::{Color, Style};
use crate::tree::{ComponentFlags, ComponentId, ComponentTree};
use crate::widgets::{Draggable, StyleTarget, Widget};

/// Interaction state of a [`ScrollBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBarState {
    /// Waiting for input.
    #[default]
    Idle,
    /// The thumb follows the pointer until the button is released.
    ThumbDragging,
    /// A track click paged the content this frame.
    ClickScrolling,
}

/// Scroll position along one axis, with a draggable thumb.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    axis: Axis,
    thumb: ComponentId,
    total: f32,
    viewport: f32,
    offset: f32,
    overflow: f32,
    reported: f32,
    state: ScrollBarState,
    wheel_target: Option<ComponentId>,
    /// Track color. Falls back to the theme.
    pub track_color: Option<Color>,
    /// Thumb color. Falls back to the theme.
    pub thumb_color: Option<Color>,
}

impl ScrollBar {
    /// Creates a scrollbar filling `parent`, scrolling along `axis`.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId, axis: Axis) -> UiResult<ComponentId> {
        let id = tree.create_child(parent)?;
        let thumb = tree.create_child(id)?;
        tree.transform_mut(thumb)?.set_alignment(Alignment::TopLeft);
        tree.set_flag(thumb, ComponentFlags::AUTO_DRAW, false)?;
        tree.set_widget(
            id,
            Box::new(Self {
                axis,
                thumb,
                total: 0.0,
                viewport: 0.0,
                offset: 0.0,
                overflow: 0.0,
                reported: 0.0,
                state: ScrollBarState::Idle,
                wheel_target: None,
                track_color: None,
                thumb_color: None,
            }),
        )?;
        Ok(id)
    }

    /// Scroll axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The thumb component.
    #[must_use]
    pub fn thumb(&self) -> ComponentId {
        self.thumb
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> ScrollBarState {
        self.state
    }

    /// Scroll offset in pixels, in `[0, max_offset]`.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Length of the scrolled content.
    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.total
    }

    /// Length of the visible window onto the content.
    #[must_use]
    pub fn viewport_length(&self) -> f32 {
        self.viewport
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        (self.total - self.viewport).max(0.0)
    }

    /// Sets the content length, re-clamping the offset.
    pub fn set_total_length(&mut self, total: f32) -> UiResult<()> {
        check_non_negative("total length", total)?;
        self.total = total;
        self.clamp_offset();
        Ok(())
    }

    /// Sets the visible length, re-clamping the offset.
    pub fn set_viewport_length(&mut self, viewport: f32) -> UiResult<()> {
        check_non_negative("viewport length", viewport)?;
        self.viewport = viewport;
        self.clamp_offset();
        Ok(())
    }

    /// Moves to `offset`, clamped to the valid range.
    pub fn set_offset(&mut self, offset: f32) {
        if !offset.is_nan() {
            self.offset = offset;
            self.clamp_offset();
        }
    }

    /// Also react to the wheel while `target` (typically the scrolled
    /// container) is focused.
    pub fn set_wheel_target(&mut self, target: Option<ComponentId>) {
        self.wheel_target = target;
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Thumb size and position as fractions of the track.
    fn thumb_fractions(&self) -> (f32, f32) {
        if self.total <= 0.0 {
            return (1.0, 0.0);
        }
        ((self.viewport / self.total).clamp(0.0, 1.0), self.offset / self.total)
    }

    fn sync_thumb(&self, tree: &mut ComponentTree) -> UiResult<()> {
        let (size, position) = self.thumb_fractions();
        let thumb = tree.transform_mut(self.thumb)?;
        thumb.set_relative_size(self.axis.vec(size, 1.0))?;
        thumb.set_relative_offset(self.axis.vec(position, 0.0))
    }

    fn drag(&mut self, pointer_delta: f32, track_length: f32) {
        if track_length <= 0.0 || self.total <= 0.0 {
            return;
        }
        let desired = self.offset + self.overflow + pointer_delta / track_length * self.total;
        let clamped = desired.clamp(0.0, self.max_offset());
        self.overflow = desired - clamped;
        self.offset = clamped;
    }
}

impl Widget for ScrollBar {
    fn update(&mut self, id: ComponentId, cx: &mut UpdateContext<'_>) -> UiResult<()> {
        let input = cx.input();
        let focus = cx.focus();
        let track = cx.tree.resolve(id);

        if self.state == ScrollBarState::ClickScrolling {
            self.state = ScrollBarState::Idle;
        }

        match self.state {
            ScrollBarState::ThumbDragging => {
                if input.is_down(MouseButton::Left) {
                    self.drag(input.pointer_delta().along(self.axis), track.length(self.axis));
                } else {
                    self.state = ScrollBarState::Idle;
                    self.overflow = 0.0;
                }
            }
            ScrollBarState::Idle if input.was_pressed(MouseButton::Left) && !focus.dragged_by_other(id) => {
                if focus.focused == Some(self.thumb) {
                    self.state = ScrollBarState::ThumbDragging;
                    self.overflow = 0.0;
                } else if cx.is_focused(id) {
                    let thumb = cx.tree.resolve(self.thumb);
                    let pointer = input.pointer().along(self.axis);
                    let start = thumb.start(self.axis);
                    if pointer < start {
                        self.set_offset(self.offset - self.viewport);
                    } else if pointer >= start + thumb.length(self.axis) {
                        self.set_offset(self.offset + self.viewport);
                    }
                    self.state = ScrollBarState::ClickScrolling;
                }
            }
            _ => {}
        }

        let wheel = input.wheel_along(self.axis);
        if wheel != 0.0 {
            let over_target = self.wheel_target.is_some_and(|target| cx.is_focused(target));
            if cx.is_focused(id) || over_target {
                self.set_offset(self.offset - wheel * cx.config().wheel_scale);
            }
        }

        self.clamp_offset();
        self.sync_thumb(cx.tree)?;
        if self.offset != self.reported {
            self.reported = self.offset;
            cx.emit(UiMessage::Scrolled { id, offset: self.offset });
        }
        Ok(())
    }

    fn draw(&self, id: ComponentId, cx: &mut DrawContext<'_>) {
        let theme = cx.theme();
        let track = cx.tree.resolve(id);
        let thumb = cx.tree.resolve(self.thumb);
        cx.list.quad(track, self.track_color.unwrap_or(theme.track));
        cx.list.quad(thumb, self.thumb_color.unwrap_or(theme.thumb));
    }

    fn as_draggable(&self) -> Option<&dyn Draggable> {
        Some(self)
    }

    fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
        Some(self)
    }
}

impl Draggable for ScrollBar {
    fn is_dragging(&self) -> bool {
        self.state == ScrollBarState::ThumbDragging
    }
}

impl StyleTarget for ScrollBar {
    fn apply_style(&mut self, style: &Style) {
        self.track_color = style.background.or(self.track_color);
        self.thumb_color = style.foreground.or(self.thumb_color);
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

    fn setup(total: f32, viewport: f32) -> (UiContext, ComponentId) {
        let content = ContentCache::new(MemoryTextureSource::new());
        let mut ui = UiContext::new(UiConfig::default(), content, Vec2::new(20.0, 200.0)).unwrap();
        let base = ui.base();
        let bar = ScrollBar::create(ui.tree_mut(), base, Axis::Vertical).unwrap();
        let widget = ui.tree_mut().widget_mut::<ScrollBar>(bar).unwrap();
        widget.set_total_length(total).unwrap();
        widget.set_viewport_length(viewport).unwrap();
        (ui, bar)
    }

    fn offset(ui: &UiContext, bar: ComponentId) -> f32 {
        ui.tree().widget::<ScrollBar>(bar).unwrap().offset()
    }

    #[test]
    fn test_wheel_clamps_to_range() {
        let (mut ui, bar) = setup(1000.0, 200.0);
        let mut input = InputState::new();
        input.set_pointer(5.0, 5.0);

        input.scroll(0.0, 50.0);
        let messages = ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 0.0);
        assert!(messages.is_empty());

        input.begin_frame();
        input.scroll(0.0, -950.0);
        let messages = ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 800.0);
        assert_eq!(messages, vec![UiMessage::Scrolled { id: bar, offset: 800.0 }]);
    }

    #[test]
    fn test_thumb_tracks_offset() {
        let (mut ui, bar) = setup(1000.0, 200.0);
        ui.update(&InputState::new()).unwrap();
        let thumb = ui.tree().widget::<ScrollBar>(bar).unwrap().thumb();
        assert_eq!(ui.tree_mut().resolve(thumb), Rect::new(0.0, 0.0, 20.0, 40.0));

        ui.tree_mut().widget_mut::<ScrollBar>(bar).unwrap().set_offset(5000.0);
        ui.update(&InputState::new()).unwrap();
        assert_eq!(ui.tree_mut().resolve(thumb), Rect::new(0.0, 160.0, 20.0, 40.0));
    }

    #[test]
    fn test_thumb_drag_has_capture_and_overflow() {
        let (mut ui, bar) = setup(1000.0, 200.0);
        ui.update(&InputState::new()).unwrap();

        let mut input = InputState::new();
        input.set_pointer(5.0, 10.0);
        input.press(MouseButton::Left);
        ui.update(&input).unwrap();
        assert_eq!(ui.tree().widget::<ScrollBar>(bar).unwrap().state(), ScrollBarState::ThumbDragging);

        // 20 px of a 200 px track is a tenth of the content.
        input.begin_frame();
        input.set_pointer(50.0, 30.0);
        ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 100.0);
        assert_eq!(ui.focus().dragged, Some(bar));

        input.begin_frame();
        input.set_pointer(50.0, -10.0);
        ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 0.0);

        input.begin_frame();
        input.set_pointer(50.0, 10.0);
        ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 0.0);

        input.begin_frame();
        input.set_pointer(50.0, 30.0);
        ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 100.0);

        input.begin_frame();
        input.release(MouseButton::Left);
        ui.update(&input).unwrap();
        assert_eq!(ui.tree().widget::<ScrollBar>(bar).unwrap().state(), ScrollBarState::Idle);
    }

    #[test]
    fn test_track_click_pages() {
        let (mut ui, bar) = setup(1000.0, 200.0);
        ui.update(&InputState::new()).unwrap();

        let mut input = InputState::new();
        input.set_pointer(5.0, 150.0);
        input.press(MouseButton::Left);
        ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 200.0);
        assert_eq!(ui.tree().widget::<ScrollBar>(bar).unwrap().state(), ScrollBarState::ClickScrolling);

        input.begin_frame();
        ui.update(&input).unwrap();
        assert_eq!(offset(&ui, bar), 200.0);
        assert_eq!(ui.tree().widget::<ScrollBar>(bar).unwrap().state(), ScrollBarState::Idle);
    }

    #[test]
    fn test_empty_content_is_a_no_op() {
        let (mut ui, bar) = setup(0.0, 200.0);
        let mut input = InputState::new();
        input.set_pointer(5.0, 5.0);
        input.scroll(0.0, -30.0);
        ui.update(&input).unwrap();

        let thumb = ui.tree().widget::<ScrollBar>(bar).unwrap().thumb();
        assert_eq!(offset(&ui, bar), 0.0);
        assert_eq!(ui.tree_mut().resolve(thumb).height, 200.0);
    }
}
