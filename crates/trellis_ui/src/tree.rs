//! Component tree for hierarchical UI management.
//!
//! Every component owns one [`Transform`] and, optionally, one widget. The
//! child list order is the z-order: later siblings are drawn on top and win
//! hit-testing ties.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use crate::error::{UiError, UiResult};
use crate::geometry::{Rect, Vec2};
use crate::notify::{Notification, NotificationQueue, TreeEvent, TreeEventKind};
use crate::transform::{ParentFrame, Transform, TransformKind};
use crate::widgets::Widget;

/// Unique identifier for a component, increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Component state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentFlags(u32);

impl ComponentFlags {
    /// Component and subtree take part in update, draw and hit-testing.
    pub const ENABLED: u32 = 1 << 0;
    /// The tree walk updates this component. Containers clear it to drive
    /// children themselves.
    pub const AUTO_UPDATE: u32 = 1 << 1;
    /// The tree walk draws this component.
    pub const AUTO_DRAW: u32 = 1 << 2;
    /// Drawn and hit-tested after non-priority siblings (overlays, popups).
    pub const PRIORITY: u32 = 1 << 3;
    /// Children are scissored to this component's rectangle.
    pub const CLIP_CHILDREN: u32 = 1 << 4;
    /// The component itself never becomes the focus target.
    pub const PASSTHROUGH: u32 = 1 << 5;

    /// Default flags for a new component.
    pub const DEFAULT: Self = Self(Self::ENABLED | Self::AUTO_UPDATE | Self::AUTO_DRAW);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }
}

impl Default for ComponentFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

struct Node {
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    flags: ComponentFlags,
    transform: Transform,
    widget: Option<Box<dyn Widget>>,
    observers: Vec<ComponentId>,
}

impl Node {
    fn new(parent: Option<ComponentId>, transform: Transform) -> Self {
        Self {
            parent,
            children: Vec::new(),
            flags: ComponentFlags::DEFAULT,
            transform,
            widget: None,
            observers: Vec::new(),
        }
    }
}

/// Owns every component, its geometry and its widget.
pub struct ComponentTree {
    nodes: HashMap<ComponentId, Node>,
    next_id: u64,
    queue: NotificationQueue,
}

impl ComponentTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::with_capacity(256),
            next_id: 1,
            queue: NotificationQueue::default(),
        }
    }

    /// Number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` names a live component.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Creates a parentless component with an absolute transform.
    pub fn create_root(&mut self, location: Vec2, size: Vec2) -> UiResult<ComponentId> {
        let transform = Transform::absolute(location, size)?;
        Ok(self.insert(None, transform))
    }

    /// Creates a relative child that fills `parent`.
    pub fn create_child(&mut self, parent: ComponentId) -> UiResult<ComponentId> {
        self.node(parent)?;
        Ok(self.insert(Some(parent), Transform::relative()))
    }

    /// Creates a child of `parent` with an absolute screen-space transform.
    pub fn create_absolute(
        &mut self,
        parent: ComponentId,
        location: Vec2,
        size: Vec2,
    ) -> UiResult<ComponentId> {
        self.node(parent)?;
        let transform = Transform::absolute(location, size)?;
        Ok(self.insert(Some(parent), transform))
    }

    fn insert(&mut self, parent: Option<ComponentId>, transform: Transform) -> ComponentId {
        let id = ComponentId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(parent, transform));

        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.push(id);
            }
            self.post(parent, id, TreeEventKind::ChildAdded);
        }
        debug!(component = %id, parent = ?parent, "component created");
        id
    }

    /// Moves `child` under `new_parent`, appending it on top of its new siblings.
    ///
    /// The old parent's observers hear `ChildRemoved` before the new
    /// parent's observers hear `ChildAdded`.
    pub fn set_parent(&mut self, child: ComponentId, new_parent: ComponentId) -> UiResult<()> {
        self.node(new_parent)?;
        let old_parent = self.node(child)?.parent;
        if old_parent == Some(new_parent) {
            return Ok(());
        }
        if child == new_parent || self.is_ancestor(child, new_parent) {
            return Err(UiError::WouldCreateCycle { child, parent: new_parent });
        }

        if let Some(old) = old_parent {
            self.unlink(old, child);
            self.post(old, child, TreeEventKind::ChildRemoved);
        }
        if let Some(node) = self.nodes.get_mut(&new_parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(new_parent);
            node.transform.mark_dirty();
        }
        self.post(new_parent, child, TreeEventKind::ChildAdded);
        debug!(component = %child, from = ?old_parent, to = %new_parent, "component reparented");
        Ok(())
    }

    /// Detaches `child` from `parent` and destroys its subtree.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) -> UiResult<()> {
        self.node(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(UiError::NotAChild { parent, child });
        }
        self.destroy(child)
    }

    /// Destroys a component and everything below it, dropping their widgets.
    pub fn destroy(&mut self, id: ComponentId) -> UiResult<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.unlink(parent, id);
            self.post(parent, id, TreeEventKind::ChildRemoved);
        }

        let mut stack = vec![id];
        let mut removed = HashSet::new();
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed.insert(current);
            }
        }

        // Dead observers neither receive new events nor keep queued ones.
        for node in self.nodes.values_mut() {
            node.observers.retain(|observer| !removed.contains(observer));
        }
        if !self.queue.is_empty() {
            self.queue.discard_for(&removed);
        }
        debug!(component = %id, removed = removed.len(), "subtree destroyed");
        Ok(())
    }

    fn unlink(&mut self, parent: ComponentId, child: ComponentId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&c| c != child);
        }
    }

    /// Parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Children of `id` in insertion (z) order.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes.get(&id).map_or(&[], |node| node.children.as_slice())
    }

    /// Snapshot of the children in draw order: non-priority siblings first,
    /// then priority siblings, each group in insertion order.
    #[must_use]
    pub fn children_in_draw_order(&self, id: ComponentId) -> Vec<ComponentId> {
        let children = self.children(id);
        let mut ordered = Vec::with_capacity(children.len());
        ordered.extend(children.iter().copied().filter(|&c| !self.has_flag(c, ComponentFlags::PRIORITY)));
        ordered.extend(children.iter().copied().filter(|&c| self.has_flag(c, ComponentFlags::PRIORITY)));
        ordered
    }

    /// Returns true if `ancestor` lies strictly above `descendant`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ComponentId, descendant: ComponentId) -> bool {
        let mut cursor = self.parent(descendant);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Flags of `id` (all clear for unknown ids).
    #[must_use]
    pub fn flags(&self, id: ComponentId) -> ComponentFlags {
        self.nodes.get(&id).map_or(ComponentFlags(0), |node| node.flags)
    }

    /// Returns true if `id` has `flag` set.
    #[must_use]
    pub fn has_flag(&self, id: ComponentId, flag: u32) -> bool {
        self.flags(id).has(flag)
    }

    /// Sets or clears a flag.
    pub fn set_flag(&mut self, id: ComponentId, flag: u32, on: bool) -> UiResult<()> {
        self.node_mut(id)?.flags.assign(flag, on);
        Ok(())
    }

    /// Returns true if the component itself is enabled.
    #[must_use]
    pub fn is_enabled(&self, id: ComponentId) -> bool {
        self.has_flag(id, ComponentFlags::ENABLED)
    }

    /// Enables or disables a component and its subtree.
    pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> UiResult<()> {
        self.set_flag(id, ComponentFlags::ENABLED, enabled)
    }

    /// Marks a component as priority (overlay) content.
    pub fn set_priority(&mut self, id: ComponentId, priority: bool) -> UiResult<()> {
        self.set_flag(id, ComponentFlags::PRIORITY, priority)
    }

    /// Lets or stops the tree walk updating and drawing this component.
    pub fn set_auto(&mut self, id: ComponentId, update: bool, draw: bool) -> UiResult<()> {
        let node = self.node_mut(id)?;
        node.flags.assign(ComponentFlags::AUTO_UPDATE, update);
        node.flags.assign(ComponentFlags::AUTO_DRAW, draw);
        Ok(())
    }

    /// The component's transform.
    #[must_use]
    pub fn transform(&self, id: ComponentId) -> Option<&Transform> {
        self.nodes.get(&id).map(|node| &node.transform)
    }

    /// Mutable access to the component's transform. Setters mark it dirty.
    pub fn transform_mut(&mut self, id: ComponentId) -> UiResult<&mut Transform> {
        Ok(&mut self.node_mut(id)?.transform)
    }

    /// Switches between absolute and relative geometry.
    pub fn set_transform_kind(&mut self, id: ComponentId, kind: TransformKind) -> UiResult<()> {
        let node = self.node_mut(id)?;
        if kind == TransformKind::Relative && node.parent.is_none() {
            return Err(UiError::RelativeWithoutParent(id));
        }
        node.transform.set_kind(kind);
        Ok(())
    }

    /// Marks every transform dirty, e.g. after the viewport changed size.
    pub fn mark_all_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.transform.mark_dirty();
        }
    }

    /// Returns the resolved rectangle of `id`, recomputing lazily.
    ///
    /// If any ancestor is dirty, the topmost dirty ancestor is recalculated
    /// first, which cascades down through this component. Unknown ids
    /// resolve to [`Rect::ZERO`].
    pub fn resolve(&mut self, id: ComponentId) -> Rect {
        // The cascade stops at disabled nodes, so repeat until the whole
        // path down to `id` is clean.
        loop {
            let mut topmost_dirty = None;
            let mut cursor = Some(id);
            while let Some(current) = cursor {
                let Some(node) = self.nodes.get(&current) else {
                    return Rect::ZERO;
                };
                if node.transform.is_dirty() {
                    topmost_dirty = Some(current);
                }
                cursor = node.parent;
            }

            match topmost_dirty {
                Some(start) => self.recalculate(start),
                None => break,
            }
        }
        self.nodes.get(&id).map_or(Rect::ZERO, |node| node.transform.cached_rect())
    }

    /// Recomputes `start` and every enabled descendant, parents first.
    ///
    /// Disabled children are marked dirty instead, deferring their work
    /// until something reads them.
    fn recalculate(&mut self, start: ComponentId) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let frame = self.parent_frame(id);
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            let rect = node.transform.compute(frame);
            let old = node.transform.store(rect);
            let parent = node.parent;
            let children = node.children.clone();
            trace!(component = %id, ?rect, "transform recalculated");

            for &child in children.iter().rev() {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    if child_node.flags.has(ComponentFlags::ENABLED) {
                        stack.push(child);
                    } else {
                        child_node.transform.mark_dirty();
                    }
                }
            }

            if let Some(parent) = parent {
                self.post(parent, id, TreeEventKind::Recalculated);
                if old.location() != rect.location() {
                    self.post(parent, id, TreeEventKind::Moved { from: old.location(), to: rect.location() });
                }
                if old.size() != rect.size() {
                    self.post(parent, id, TreeEventKind::Resized { from: old.size(), to: rect.size() });
                }
            }
        }
    }

    fn parent_frame(&self, id: ComponentId) -> Option<ParentFrame> {
        let parent = self.nodes.get(&id)?.parent?;
        self.nodes.get(&parent).map(|node| node.transform.frame_for_children())
    }

    /// Sets the relative offset so the component lands `x`/`y` pixels from
    /// where alignment alone would put it. `None` leaves an axis untouched.
    ///
    /// Returns `false` if the parent has zero size along a requested axis;
    /// that axis keeps its previous fraction.
    pub fn set_relative_offset_from_pixels(
        &mut self,
        id: ComponentId,
        x: Option<f32>,
        y: Option<f32>,
    ) -> UiResult<bool> {
        let parent = self.relative_parent(id)?;
        let parent_size = self.resolve(parent).size();
        let transform = self.transform_mut(id)?;
        let (offset, complete) = Transform::fraction_of(transform.relative_offset(), (x, y), parent_size);
        transform.set_relative_offset(offset)?;
        Ok(complete)
    }

    /// Sets the relative size so the component resolves to `x`/`y` pixels.
    /// `None` leaves an axis untouched.
    ///
    /// Returns `false` if the padded parent has zero size along a requested
    /// axis; that axis keeps its previous fraction.
    pub fn set_relative_size_from_pixels(
        &mut self,
        id: ComponentId,
        x: Option<f32>,
        y: Option<f32>,
    ) -> UiResult<bool> {
        let parent = self.relative_parent(id)?;
        self.resolve(parent);
        let frame = self.parent_frame(id).unwrap_or_default();
        let transform = self.transform_mut(id)?;
        let reference = frame.reference(transform.ignores_parent_padding()).size();
        let (size, complete) = Transform::fraction_of(transform.relative_size(), (x, y), reference);
        transform.set_relative_size(size)?;
        Ok(complete)
    }

    fn relative_parent(&self, id: ComponentId) -> UiResult<ComponentId> {
        let node = self.node(id)?;
        if node.transform.kind() != TransformKind::Relative {
            return Err(UiError::NotRelative(id));
        }
        node.parent.ok_or(UiError::RelativeWithoutParent(id))
    }

    // =====================================================================
    // Widgets
    // =====================================================================

    /// Attaches a widget to a component, replacing any previous one.
    pub fn set_widget(&mut self, id: ComponentId, widget: Box<dyn Widget>) -> UiResult<()> {
        self.node_mut(id)?.widget = Some(widget);
        Ok(())
    }

    /// The widget attached to `id`, as a trait object.
    #[must_use]
    pub fn widget_dyn(&self, id: ComponentId) -> Option<&dyn Widget> {
        self.nodes.get(&id)?.widget.as_deref()
    }

    /// The widget attached to `id`, if it is a `T`.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: ComponentId) -> Option<&T> {
        self.widget_dyn(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutable access to the widget attached to `id`, if it is a `T`.
    pub fn widget_mut<T: Widget>(&mut self, id: ComponentId) -> Option<&mut T> {
        let widget = self.nodes.get_mut(&id)?.widget.as_deref_mut()?;
        widget.as_any_mut().downcast_mut::<T>()
    }

    /// Like [`Self::widget_mut`] but reports why the lookup failed.
    pub fn expect_widget_mut<T: Widget>(&mut self, id: ComponentId) -> UiResult<&mut T> {
        self.node(id)?;
        self.widget_mut::<T>(id).ok_or(UiError::WidgetMismatch {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    /// Detaches the widget so it can run with mutable access to the tree.
    pub(crate) fn take_widget(&mut self, id: ComponentId) -> Option<Box<dyn Widget>> {
        self.nodes.get_mut(&id)?.widget.take()
    }

    /// Puts back a widget taken with [`Self::take_widget`]. Dropped if the
    /// component was destroyed in the meantime.
    pub(crate) fn restore_widget(&mut self, id: ComponentId, widget: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.widget.is_none() {
                node.widget = Some(widget);
            }
        }
    }

    // =====================================================================
    // Notifications
    // =====================================================================

    /// Registers `observer` for events about the children of `subject`.
    pub fn observe_children(&mut self, subject: ComponentId, observer: ComponentId) -> UiResult<()> {
        self.node(observer)?;
        let node = self.node_mut(subject)?;
        if !node.observers.contains(&observer) {
            node.observers.push(observer);
        }
        Ok(())
    }

    /// Takes every queued notification, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.queue.drain()
    }

    /// Number of notifications waiting to be drained.
    #[must_use]
    pub fn pending_notifications(&self) -> usize {
        self.queue.len()
    }

    fn post(&mut self, parent: ComponentId, subject: ComponentId, kind: TreeEventKind) {
        let Some(node) = self.nodes.get(&parent) else {
            return;
        };
        if node.observers.is_empty() {
            return;
        }
        let event = TreeEvent { parent, subject, kind };
        self.queue.post(&node.observers, event);
    }

    fn node(&self, id: ComponentId) -> UiResult<&Node> {
        self.nodes.get(&id).ok_or(UiError::UnknownComponent(id))
    }

    fn node_mut(&mut self, id: ComponentId) -> UiResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(UiError::UnknownComponent(id))
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Alignment;

    fn tree_with_root(width: f32, height: f32) -> (ComponentTree, ComponentId) {
        let mut tree = ComponentTree::new();
        let root = tree.create_root(Vec2::ZERO, Vec2::new(width, height)).unwrap();
        (tree, root)
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let (mut tree, root) = tree_with_root(100.0, 100.0);
        let a = tree.create_child(root).unwrap();
        let b = tree.create_child(root).unwrap();

        assert!(root < a && a < b);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (mut tree, root) = tree_with_root(200.0, 100.0);
        let child = tree.create_child(root).unwrap();
        tree.transform_mut(child).unwrap().set_relative_size(Vec2::new(0.5, 0.5)).unwrap();
        tree.transform_mut(child).unwrap().set_alignment(Alignment::Center);

        let first = tree.resolve(child);
        assert!(!tree.transform(child).unwrap().is_dirty());
        let second = tree.resolve(child);

        assert_eq!(first, Rect::new(50.0, 25.0, 100.0, 50.0));
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.width.to_bits(), second.width.to_bits());
    }

    #[test]
    fn test_parent_change_cascades_to_descendants() {
        let (mut tree, root) = tree_with_root(400.0, 400.0);
        let panel = tree.create_child(root).unwrap();
        let inner = tree.create_child(panel).unwrap();
        let leaf = tree.create_child(inner).unwrap();
        tree.transform_mut(leaf).unwrap().set_relative_size(Vec2::new(0.5, 0.5)).unwrap();

        assert_eq!(tree.resolve(leaf).size(), Vec2::new(200.0, 200.0));

        tree.transform_mut(panel).unwrap().set_relative_size(Vec2::new(0.5, 1.0)).unwrap();
        assert!(!tree.transform(leaf).unwrap().is_dirty());
        assert_eq!(tree.resolve(leaf).size(), Vec2::new(100.0, 200.0));
        assert_eq!(tree.transform(inner).unwrap().cached_rect().width, 200.0);
    }

    #[test]
    fn test_disabled_child_is_deferred() {
        let (mut tree, root) = tree_with_root(100.0, 100.0);
        let hidden = tree.create_child(root).unwrap();
        tree.resolve(root);
        tree.set_enabled(hidden, false).unwrap();

        tree.transform_mut(root).unwrap().set_size(Vec2::new(50.0, 50.0)).unwrap();
        tree.resolve(root);
        assert!(tree.transform(hidden).unwrap().is_dirty());
        assert_eq!(tree.resolve(hidden).size(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_resolve_below_disabled_node_is_fresh() {
        let (mut tree, root) = tree_with_root(100.0, 100.0);
        let hidden = tree.create_child(root).unwrap();
        let leaf = tree.create_child(hidden).unwrap();
        tree.transform_mut(leaf).unwrap().set_relative_size(Vec2::new(0.5, 0.5)).unwrap();
        tree.resolve(leaf);
        tree.set_enabled(hidden, false).unwrap();

        tree.transform_mut(root).unwrap().set_size(Vec2::new(50.0, 50.0)).unwrap();
        assert_eq!(tree.resolve(hidden).size(), Vec2::new(50.0, 50.0));
        assert!(!tree.transform(hidden).unwrap().is_dirty());

        tree.transform_mut(root).unwrap().set_size(Vec2::new(80.0, 40.0)).unwrap();
        assert_eq!(tree.resolve(leaf).size(), Vec2::new(40.0, 20.0));
        assert!(!tree.transform(leaf).unwrap().is_dirty());
        assert!(!tree.transform(hidden).unwrap().is_dirty());
    }

    #[test]
    fn test_pixel_helper_sees_fresh_disabled_parent() {
        let (mut tree, root) = tree_with_root(200.0, 200.0);
        let hidden = tree.create_child(root).unwrap();
        let child = tree.create_child(hidden).unwrap();
        tree.resolve(child);
        tree.set_enabled(hidden, false).unwrap();

        tree.transform_mut(root).unwrap().set_size(Vec2::new(100.0, 100.0)).unwrap();
        tree.set_relative_size_from_pixels(child, Some(50.0), None).unwrap();
        assert_eq!(tree.transform(child).unwrap().relative_size().x, 0.5);
    }

    #[test]
    fn test_relative_requires_parent() {
        let (mut tree, root) = tree_with_root(10.0, 10.0);
        assert_eq!(
            tree.set_transform_kind(root, TransformKind::Relative),
            Err(UiError::RelativeWithoutParent(root))
        );
    }

    #[test]
    fn test_pixel_helpers() {
        let (mut tree, root) = tree_with_root(300.0, 120.0);
        let child = tree.create_child(root).unwrap();

        assert!(tree.set_relative_size_from_pixels(child, Some(100.0), None).unwrap());
        assert!(tree.set_relative_offset_from_pixels(child, None, Some(30.0)).unwrap());

        assert_eq!(tree.resolve(child), Rect::new(0.0, 30.0, 100.0, 120.0));
    }

    #[test]
    fn test_pixel_helpers_on_zero_parent_are_noops() {
        let (mut tree, root) = tree_with_root(0.0, 80.0);
        let child = tree.create_child(root).unwrap();

        let applied = tree.set_relative_size_from_pixels(child, Some(40.0), Some(40.0)).unwrap();
        assert!(!applied);
        assert_eq!(tree.transform(child).unwrap().relative_size(), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_remove_child_rejects_strangers() {
        let (mut tree, root) = tree_with_root(10.0, 10.0);
        let a = tree.create_child(root).unwrap();
        let b = tree.create_child(a).unwrap();

        assert_eq!(tree.remove_child(root, b), Err(UiError::NotAChild { parent: root, child: b }));
        tree.remove_child(root, a).unwrap();
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
    }

    #[test]
    fn test_destroyed_observer_is_pruned() {
        let (mut tree, root) = tree_with_root(10.0, 10.0);
        let subject = tree.create_child(root).unwrap();
        let watcher = tree.create_child(root).unwrap();
        tree.observe_children(subject, watcher).unwrap();
        tree.create_child(subject).unwrap();
        assert_eq!(tree.pending_notifications(), 1);

        tree.destroy(watcher).unwrap();
        assert_eq!(tree.pending_notifications(), 0);

        tree.create_child(subject).unwrap();
        assert_eq!(tree.pending_notifications(), 0);
        assert!(tree.observe_children(subject, watcher).is_err());
    }

    #[test]
    fn test_reparent_notifies_old_then_new() {
        let (mut tree, root) = tree_with_root(10.0, 10.0);
        let left = tree.create_child(root).unwrap();
        let right = tree.create_child(root).unwrap();
        let item = tree.create_child(left).unwrap();
        tree.observe_children(left, left).unwrap();
        tree.observe_children(right, right).unwrap();

        tree.set_parent(item, right).unwrap();

        let kinds: Vec<_> = tree
            .take_notifications()
            .into_iter()
            .map(|n| (n.observer, n.event.kind))
            .collect();
        assert_eq!(kinds, vec![(left, TreeEventKind::ChildRemoved), (right, TreeEventKind::ChildAdded)]);
        assert_eq!(tree.set_parent(right, item), Err(UiError::WouldCreateCycle { child: right, parent: item }));
    }

    #[test]
    fn test_resize_event_only_on_change() {
        let (mut tree, root) = tree_with_root(100.0, 100.0);
        let child = tree.create_child(root).unwrap();
        tree.observe_children(root, root).unwrap();
        tree.resolve(child);
        tree.take_notifications();

        tree.transform_mut(child).unwrap().set_relative_offset(Vec2::new(0.1, 0.0)).unwrap();
        tree.resolve(child);
        let kinds: Vec<_> = tree.take_notifications().into_iter().map(|n| n.event.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0], TreeEventKind::Recalculated);
        assert!(matches!(kinds[1], TreeEventKind::Moved { .. }));
    }

    #[test]
    fn test_draw_order_puts_priority_last() {
        let (mut tree, root) = tree_with_root(10.0, 10.0);
        let popup = tree.create_child(root).unwrap();
        let body = tree.create_child(root).unwrap();
        tree.set_priority(popup, true).unwrap();

        assert_eq!(tree.children_in_draw_order(root), vec![body, popup]);
    }
}
