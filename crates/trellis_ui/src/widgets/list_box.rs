//! # List Box
//!
//! Stacks children along one axis with fixed spacing.
//!
//! ```text
//!   list ─┬─ content (clips, holds the items)
//!         │    ├─ item 0   ── offset 0 - scroll
//!         │    ├─ item 1   ── offset len0 + spacing - scroll
//!         │    └─ ...
//!         └─ scrollbar (Scroll mode, shown only when content overflows)
//! ```
//!
//! Items added to the content container are queued and spliced into the
//! layout at the start of the list's next update. The total length is kept
//! up to date from hierarchy notifications rather than recomputed. Items
//! have their auto-update and auto-draw flags cleared; the list updates and
//! draws only the ones intersecting the visible area.

use std::collections::HashMap;
use std::mem;

use tracing::debug;

use crate::config::UiConfig;
use crate::context::{DrawContext, UpdateContext};
use crate::error::{check_non_negative, UiResult};
use crate::geometry::{Alignment, Axis, Vec2};
use crate::notify::{TreeEvent, TreeEventKind};
use crate::transform::TransformKind;
use crate::tree::{ComponentFlags, ComponentId, ComponentTree};
use crate::widgets::{ScrollBar, Widget};

/// What a [`ListBox`] does when its content is longer than itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListBoxMode {
    /// Show a scrollbar.
    #[default]
    Scroll,
    /// Grow or shrink the list along its axis to fit the content.
    ResizeToFit,
    /// Keep the size; overflowing items are clipped.
    Fixed,
}

/// Construction parameters for a [`ListBox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListBoxOptions {
    /// Stacking axis.
    pub axis: Axis,
    /// Overflow behaviour.
    pub mode: ListBoxMode,
    /// Gap between consecutive items, in pixels.
    pub spacing: f32,
    /// Scrollbar extent across the stacking axis, in pixels.
    pub scrollbar_thickness: f32,
}

impl Default for ListBoxOptions {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl ListBoxOptions {
    /// Vertical scrolling list using the configured spacing and thickness.
    #[must_use]
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            axis: Axis::Vertical,
            mode: ListBoxMode::Scroll,
            spacing: config.list_spacing,
            scrollbar_thickness: config.scrollbar_thickness,
        }
    }

    /// Same options along `axis`.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Same options with `mode`.
    #[must_use]
    pub fn with_mode(mut self, mode: ListBoxMode) -> Self {
        self.mode = mode;
        self
    }

    /// Same options with `spacing`.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Sequential layout container.
#[derive(Debug, Clone)]
pub struct ListBox {
    options: ListBoxOptions,
    content: ComponentId,
    scrollbar: Option<ComponentId>,
    items: Vec<ComponentId>,
    pending: Vec<ComponentId>,
    lengths: HashMap<ComponentId, f32>,
    visible: Vec<ComponentId>,
    total: f32,
}

impl ListBox {
    /// Creates an empty list filling `parent`.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId, options: ListBoxOptions) -> UiResult<ComponentId> {
        check_non_negative("list spacing", options.spacing)?;
        check_non_negative("scrollbar thickness", options.scrollbar_thickness)?;

        let id = tree.create_child(parent)?;
        let content = tree.create_child(id)?;
        tree.set_flag(content, ComponentFlags::CLIP_CHILDREN, true)?;
        tree.set_auto(content, false, false)?;
        tree.observe_children(content, id)?;

        let scrollbar = match options.mode {
            ListBoxMode::Scroll => Some(Self::create_scrollbar(tree, id, options)?),
            ListBoxMode::ResizeToFit | ListBoxMode::Fixed => None,
        };

        tree.set_widget(
            id,
            Box::new(Self {
                options,
                content,
                scrollbar,
                items: Vec::new(),
                pending: Vec::new(),
                lengths: HashMap::new(),
                visible: Vec::new(),
                total: 0.0,
            }),
        )?;
        Ok(id)
    }

    fn create_scrollbar(tree: &mut ComponentTree, list: ComponentId, options: ListBoxOptions) -> UiResult<ComponentId> {
        let axis = options.axis;
        let thickness = options.scrollbar_thickness;
        let bar = ScrollBar::create(tree, list, axis)?;
        tree.set_auto(bar, false, true)?;
        tree.set_enabled(bar, false)?;

        let transform = tree.transform_mut(bar)?;
        transform.set_relative_size(axis.vec(1.0, 0.0))?;
        transform.set_min_size(axis.vec(0.0, thickness))?;
        transform.set_max_size(axis.vec(f32::INFINITY, thickness))?;
        transform.set_alignment(match axis {
            Axis::Vertical => Alignment::TopRight,
            Axis::Horizontal => Alignment::BottomLeft,
        });
        tree.expect_widget_mut::<ScrollBar>(bar)?.set_wheel_target(Some(list));
        Ok(bar)
    }

    /// Moves `item` into the list. It joins the layout on the list's next
    /// update.
    pub fn push(tree: &mut ComponentTree, list: ComponentId, item: ComponentId) -> UiResult<()> {
        let content = tree.expect_widget_mut::<Self>(list)?.content;
        tree.set_parent(item, content)
    }

    /// Container the items live in. Children created here join the list.
    #[must_use]
    pub fn content(&self) -> ComponentId {
        self.content
    }

    /// The scrollbar, in [`ListBoxMode::Scroll`].
    #[must_use]
    pub fn scrollbar(&self) -> Option<ComponentId> {
        self.scrollbar
    }

    /// Items in layout order, excluding ones not yet spliced in.
    #[must_use]
    pub fn items(&self) -> &[ComponentId] {
        &self.items
    }

    /// Items that intersected the visible area at the last update.
    #[must_use]
    pub fn visible(&self) -> &[ComponentId] {
        &self.visible
    }

    /// Sum of item lengths plus one spacing between each pair.
    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.total
    }

    /// Construction options.
    #[must_use]
    pub fn options(&self) -> ListBoxOptions {
        self.options
    }

    fn splice_pending(&mut self, tree: &mut ComponentTree) -> UiResult<()> {
        let axis = self.options.axis;
        for item in mem::take(&mut self.pending) {
            if tree.parent(item) != Some(self.content) || self.lengths.contains_key(&item) {
                continue;
            }
            if tree.transform(item).is_some_and(|t| t.kind() == TransformKind::Absolute) {
                tree.set_transform_kind(item, TransformKind::Relative)?;
            }
            tree.transform_mut(item)?.set_alignment(Alignment::TopLeft);

            let length = tree.resolve(item).length(axis);
            if !self.items.is_empty() {
                self.total += self.options.spacing;
            }
            self.total += length;
            self.lengths.insert(item, length);
            self.items.push(item);
        }
        Ok(())
    }

    /// Shows or hides the scrollbar, makes room for it, and returns the
    /// scroll offset for this frame.
    fn update_scroll(&mut self, id: ComponentId, bar: ComponentId, cx: &mut UpdateContext<'_>) -> UiResult<f32> {
        let axis = self.options.axis;
        let outer = cx.tree.resolve(id);
        let show = self.total > outer.length(axis);
        if cx.tree.is_enabled(bar) != show {
            cx.tree.set_enabled(bar, show)?;
            debug!(list = %id, total = self.total, show, "scrollbar visibility changed");
        }

        let cross = outer.length(axis.cross());
        let thickness = if show { self.options.scrollbar_thickness.min(cross) } else { 0.0 };
        let (x, y) = along_cross(axis, cross - thickness);
        cx.tree.set_relative_size_from_pixels(self.content, x, y)?;

        let viewport = cx.tree.resolve(self.content).length(axis);
        let scrollbar = cx.tree.expect_widget_mut::<ScrollBar>(bar)?;
        scrollbar.set_total_length(self.total)?;
        scrollbar.set_viewport_length(viewport)?;
        cx.update_subtree(bar)?;
        Ok(cx.tree.widget::<ScrollBar>(bar).map_or(0.0, ScrollBar::offset))
    }

    fn resize_to_fit(&self, id: ComponentId, tree: &mut ComponentTree) -> UiResult<()> {
        let axis = self.options.axis;
        let Some(transform) = tree.transform(id) else {
            return Ok(());
        };
        match transform.kind() {
            TransformKind::Relative => {
                let (x, y) = along_main(axis, self.total);
                tree.set_relative_size_from_pixels(id, x, y)?;
            }
            TransformKind::Absolute => {
                let size = transform.size();
                let fitted = match axis {
                    Axis::Horizontal => Vec2::new(self.total, size.y),
                    Axis::Vertical => Vec2::new(size.x, self.total),
                };
                tree.transform_mut(id)?.set_size(fitted)?;
            }
        }
        Ok(())
    }

    fn layout(&self, tree: &mut ComponentTree, offset: f32) -> UiResult<()> {
        let mut cursor = -offset;
        for &item in &self.items {
            let (x, y) = along_main(self.options.axis, cursor);
            tree.set_relative_offset_from_pixels(item, x, y)?;
            cursor += self.lengths.get(&item).copied().unwrap_or(0.0) + self.options.spacing;
        }
        Ok(())
    }

    fn cull(&mut self, tree: &mut ComponentTree) {
        let area = tree.resolve(self.content);
        self.visible.clear();
        for &item in &self.items {
            if tree.resolve(item).intersects(&area) {
                self.visible.push(item);
            }
        }
    }

    /// Drops `item` from the layout. Returns whether it was tracked.
    fn forget(&mut self, item: ComponentId) -> bool {
        let was_pending = self.pending.contains(&item);
        self.pending.retain(|&p| p != item);
        self.visible.retain(|&v| v != item);
        let Some(length) = self.lengths.remove(&item) else {
            return was_pending;
        };
        self.items.retain(|&i| i != item);
        if self.items.is_empty() {
            self.total = 0.0;
        } else {
            self.total = (self.total - length - self.options.spacing).max(0.0);
        }
        true
    }
}

impl Widget for ListBox {
    fn update(&mut self, id: ComponentId, cx: &mut UpdateContext<'_>) -> UiResult<()> {
        self.splice_pending(cx.tree)?;

        let offset = match (self.options.mode, self.scrollbar) {
            (ListBoxMode::Scroll, Some(bar)) => self.update_scroll(id, bar, cx)?,
            (ListBoxMode::ResizeToFit, _) => {
                self.resize_to_fit(id, cx.tree)?;
                0.0
            }
            _ => 0.0,
        };

        self.layout(cx.tree, offset)?;
        self.cull(cx.tree);
        for item in self.visible.clone() {
            cx.update_subtree(item)?;
        }
        Ok(())
    }

    fn draw(&self, _id: ComponentId, cx: &mut DrawContext<'_>) {
        let area = cx.tree.resolve(self.content);
        cx.list.push_clip(area);
        for &item in &self.visible {
            cx.draw_subtree(item);
        }
        cx.list.pop_clip();
    }

    fn on_notification(&mut self, _id: ComponentId, event: &TreeEvent, tree: &mut ComponentTree) -> UiResult<()> {
        if event.parent != self.content {
            return Ok(());
        }
        let item = event.subject;
        match event.kind {
            TreeEventKind::ChildAdded => {
                if tree.parent(item) == Some(self.content)
                    && !self.lengths.contains_key(&item)
                    && !self.pending.contains(&item)
                {
                    tree.set_auto(item, false, false)?;
                    self.pending.push(item);
                }
            }
            TreeEventKind::ChildRemoved => {
                // Hand a moved item back to its new parent's walk.
                if self.forget(item) && tree.contains(item) && tree.parent(item) != Some(self.content) {
                    tree.set_auto(item, true, true)?;
                }
            }
            TreeEventKind::Resized { to, .. } => {
                if let Some(length) = self.lengths.get_mut(&item) {
                    let new = to.along(self.options.axis);
                    self.total = (self.total + new - *length).max(0.0);
                    *length = new;
                }
            }
            TreeEventKind::Recalculated | TreeEventKind::Moved { .. } => {}
        }
        Ok(())
    }
}

fn along_main(axis: Axis, value: f32) -> (Option<f32>, Option<f32>) {
    match axis {
        Axis::Horizontal => (Some(value), None),
        Axis::Vertical => (None, Some(value)),
    }
}

fn along_cross(axis: Axis, value: f32) -> (Option<f32>, Option<f32>) {
    along_main(axis.cross(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentCache, MemoryTextureSource};
    use crate::context::UiContext;
    use crate::geometry::Rect;
    use crate::input::InputState;
    use crate::render::DrawCommand;
    use crate::style::Color;
    use crate::widgets::SolidColor;

    fn context() -> UiContext {
        let content = ContentCache::new(MemoryTextureSource::new());
        UiContext::new(UiConfig::default(), content, Vec2::new(100.0, 100.0)).unwrap()
    }

    fn list(ui: &mut UiContext, options: ListBoxOptions) -> ComponentId {
        let base = ui.base();
        ListBox::create(ui.tree_mut(), base, options).unwrap()
    }

    fn item(ui: &mut UiContext, list: ComponentId, length: f32) -> ComponentId {
        let content = ui.tree().widget::<ListBox>(list).unwrap().content();
        let item = SolidColor::create(ui.tree_mut(), content, Color::WHITE).unwrap();
        ui.tree_mut().transform_mut(item).unwrap().set_max_size(Vec2::new(f32::INFINITY, length)).unwrap();
        item
    }

    fn widget(ui: &UiContext, list: ComponentId) -> &ListBox {
        ui.tree().widget::<ListBox>(list).unwrap()
    }

    #[test]
    fn test_total_length_tracks_adds_and_removes() {
        let mut ui = context();
        let list = list(&mut ui, ListBoxOptions::default().with_spacing(5.0));
        let items: Vec<_> = (0..3).map(|_| item(&mut ui, list, 10.0)).collect();

        ui.update(&InputState::new()).unwrap();
        assert_eq!(widget(&ui, list).total_length(), 40.0);
        assert_eq!(widget(&ui, list).items(), items.as_slice());

        ui.tree_mut().destroy(items[1]).unwrap();
        ui.update(&InputState::new()).unwrap();
        assert_eq!(widget(&ui, list).total_length(), 25.0);
        assert_eq!(ui.tree_mut().resolve(items[2]).y, 15.0);

        ui.tree_mut().destroy(items[0]).unwrap();
        ui.tree_mut().destroy(items[2]).unwrap();
        ui.update(&InputState::new()).unwrap();
        assert_eq!(widget(&ui, list).total_length(), 0.0);
    }

    #[test]
    fn test_item_resize_adjusts_total() {
        let mut ui = context();
        let list = list(&mut ui, ListBoxOptions::default().with_spacing(5.0));
        let first = item(&mut ui, list, 10.0);
        item(&mut ui, list, 10.0);
        ui.update(&InputState::new()).unwrap();

        ui.tree_mut().transform_mut(first).unwrap().set_max_size(Vec2::new(f32::INFINITY, 20.0)).unwrap();
        ui.update(&InputState::new()).unwrap();
        assert_eq!(widget(&ui, list).total_length(), 35.0);
    }

    #[test]
    fn test_items_are_queued_until_update() {
        let mut ui = context();
        let list = list(&mut ui, ListBoxOptions::default());
        let base = ui.base();
        let loose = SolidColor::create(ui.tree_mut(), base, Color::BLACK).unwrap();
        ListBox::push(ui.tree_mut(), list, loose).unwrap();
        assert!(widget(&ui, list).items().is_empty());

        ui.update(&InputState::new()).unwrap();
        assert_eq!(widget(&ui, list).items(), &[loose]);
        assert!(!ui.tree().has_flag(loose, ComponentFlags::AUTO_UPDATE));
        assert!(!ui.tree().has_flag(loose, ComponentFlags::AUTO_DRAW));
    }

    #[test]
    fn test_moved_item_is_drawn_by_new_parent() {
        let mut ui = context();
        let list = list(&mut ui, ListBoxOptions::default());
        let marker = Color::rgb(0.25, 0.5, 0.75);
        let content = widget(&ui, list).content();
        let moved = SolidColor::create(ui.tree_mut(), content, marker).unwrap();
        ui.update(&InputState::new()).unwrap();
        assert_eq!(widget(&ui, list).items(), &[moved]);

        let base = ui.base();
        ui.tree_mut().set_parent(moved, base).unwrap();
        ui.update(&InputState::new()).unwrap();

        assert!(widget(&ui, list).items().is_empty());
        assert!(ui.tree().has_flag(moved, ComponentFlags::AUTO_UPDATE));
        assert!(ui.tree().has_flag(moved, ComponentFlags::AUTO_DRAW));
        let drawn = ui
            .draw()
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Quad { tint, .. } if *tint == marker));
        assert!(drawn);
    }

    #[test]
    fn test_scrollbar_appears_and_culls() {
        let mut ui = context();
        let list = list(&mut ui, ListBoxOptions::default().with_spacing(0.0));
        for _ in 0..20 {
            item(&mut ui, list, 10.0);
        }
        ui.update(&InputState::new()).unwrap();

        let listbox = widget(&ui, list);
        let bar = listbox.scrollbar().unwrap();
        let content = listbox.content();
        assert_eq!(listbox.visible().len(), 10);
        assert!(ui.tree().is_enabled(bar));
        assert_eq!(ui.tree_mut().resolve(content), Rect::new(0.0, 0.0, 88.0, 100.0));
        assert_eq!(ui.tree_mut().resolve(bar), Rect::new(88.0, 0.0, 12.0, 100.0));

        let mut input = InputState::new();
        input.set_pointer(10.0, 10.0);
        input.scroll(0.0, -50.0);
        ui.update(&input).unwrap();

        let listbox = widget(&ui, list);
        let first_visible = listbox.visible()[0];
        assert_eq!(listbox.visible().len(), 10);
        assert_eq!(first_visible, listbox.items()[5]);
        assert_eq!(ui.tree_mut().resolve(first_visible).y, 0.0);
    }

    #[test]
    fn test_scrollbar_hidden_when_content_fits() {
        let mut ui = context();
        let list = list(&mut ui, ListBoxOptions::default());
        item(&mut ui, list, 10.0);
        ui.update(&InputState::new()).unwrap();

        let listbox = widget(&ui, list);
        let bar = listbox.scrollbar().unwrap();
        let content = listbox.content();
        assert!(!ui.tree().is_enabled(bar));
        assert_eq!(ui.tree_mut().resolve(content).width, 100.0);
    }

    #[test]
    fn test_resize_to_fit() {
        let mut ui = context();
        let options = ListBoxOptions::default().with_mode(ListBoxMode::ResizeToFit).with_spacing(5.0);
        let list = list(&mut ui, options);
        for _ in 0..3 {
            item(&mut ui, list, 10.0);
        }
        ui.update(&InputState::new()).unwrap();

        assert!(widget(&ui, list).scrollbar().is_none());
        assert_eq!(ui.tree_mut().resolve(list).height, 40.0);
    }

    #[test]
    fn test_horizontal_fixed_layout() {
        let mut ui = context();
        let options = ListBoxOptions::default()
            .with_axis(Axis::Horizontal)
            .with_mode(ListBoxMode::Fixed)
            .with_spacing(10.0);
        let list = list(&mut ui, options);
        let content = widget(&ui, list).content();
        let items: Vec<_> = (0..3)
            .map(|_| {
                let item = SolidColor::create(ui.tree_mut(), content, Color::WHITE).unwrap();
                ui.tree_mut().transform_mut(item).unwrap().set_relative_size(Vec2::new(0.5, 1.0)).unwrap();
                item
            })
            .collect();
        ui.update(&InputState::new()).unwrap();

        assert_eq!(ui.tree_mut().resolve(items[1]).x, 60.0);
        assert_eq!(widget(&ui, list).visible(), &items[..2]);
        assert_eq!(ui.tree_mut().resolve(list).width, 100.0);
    }
}
