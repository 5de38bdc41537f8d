//! # Mouse Controller
//!
//! Per-frame focus and drag resolution from a single pointer sample.
//!
//! ## Focus search
//!
//! ```text
//! pass 1: for root in focus_roots      ── priority branches only ──► hit? done
//! pass 2: for root in focus_roots      ── every enabled branch   ──► hit? done
//! ```
//!
//! Both passes walk depth-first in draw order and overwrite the hit on
//! every containing node, so the deepest, topmost node wins. A clipping
//! node is only descended while the pointer lies inside it.

use tracing::debug;

use crate::geometry::Vec2;
use crate::input::InputState;
use crate::scene::SceneStack;
use crate::tree::{ComponentFlags, ComponentId, ComponentTree};

/// Focus and drag result for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FocusState {
    /// Pointer sample the state was computed from.
    pub pointer: Vec2,
    /// Deepest component under the pointer.
    pub focused: Option<ComponentId>,
    /// Component holding pointer capture.
    pub dragged: Option<ComponentId>,
    /// Drag ownership differs from the previous frame.
    pub drag_state_changed: bool,
}

impl FocusState {
    /// True if `id` is the focused component, or an ancestor of it whose
    /// own rectangle contains the pointer.
    ///
    /// Rectangles are read from the cache filled during resolution.
    #[must_use]
    pub fn is_focused(&self, tree: &ComponentTree, id: ComponentId) -> bool {
        let Some(focused) = self.focused else {
            return false;
        };
        if focused == id {
            return true;
        }
        tree.is_ancestor(id, focused)
            && tree
                .transform(id)
                .is_some_and(|transform| transform.cached_rect().contains(self.pointer))
    }

    /// True if some component other than `id` holds the drag.
    #[must_use]
    pub fn dragged_by_other(&self, id: ComponentId) -> bool {
        self.dragged.is_some_and(|dragged| dragged != id)
    }
}

/// Resolves focus and drag ownership once per frame.
#[derive(Debug, Default)]
pub struct MouseController {
    state: FocusState,
}

impl MouseController {
    /// Creates a controller with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the last resolution.
    #[must_use]
    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Recomputes focus and drag ownership from `input`.
    pub fn resolve_frame(
        &mut self,
        tree: &mut ComponentTree,
        scenes: &SceneStack,
        input: &InputState,
    ) -> FocusState {
        let pointer = input.pointer();
        let roots = scenes.focus_roots();

        let focused = roots
            .iter()
            .find_map(|&root| search(tree, root, pointer, true))
            .or_else(|| roots.iter().find_map(|&root| search(tree, root, pointer, false)));
        let dragged = scenes.drag_roots().into_iter().find_map(|root| find_dragged(&*tree, root));

        let previous = self.state;
        if previous.focused != focused {
            debug!(from = ?previous.focused, to = ?focused, "focus changed");
        }
        if previous.dragged != dragged {
            debug!(from = ?previous.dragged, to = ?dragged, "drag owner changed");
        }

        self.state = FocusState {
            pointer,
            focused,
            dragged,
            drag_state_changed: previous.dragged != dragged,
        };
        self.state
    }
}

/// Depth-first hit test below `root`.
///
/// With `priority_only`, only nodes that are priority-flagged (or sit under
/// a priority-flagged ancestor) can record a hit.
fn search(tree: &mut ComponentTree, root: ComponentId, pointer: Vec2, priority_only: bool) -> Option<ComponentId> {
    let mut hit = None;
    let mut stack = vec![(root, false)];

    while let Some((id, inherited_priority)) = stack.pop() {
        if !tree.is_enabled(id) {
            continue;
        }
        let rect = tree.resolve(id);
        let flags = tree.flags(id);
        let priority = inherited_priority || flags.has(ComponentFlags::PRIORITY);
        let inside = rect.contains(pointer);

        if inside && !flags.has(ComponentFlags::PASSTHROUGH) && (priority || !priority_only) {
            hit = Some(id);
        }
        if flags.has(ComponentFlags::CLIP_CHILDREN) && !inside {
            continue;
        }
        // Reversed so the first child in draw order is visited first.
        for child in tree.children_in_draw_order(id).into_iter().rev() {
            stack.push((child, priority));
        }
    }
    hit
}

/// First component below `root`, in depth-first order, whose widget reports
/// an active drag.
fn find_dragged(tree: &ComponentTree, root: ComponentId) -> Option<ComponentId> {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !tree.is_enabled(id) {
            continue;
        }
        let dragging = tree
            .widget_dyn(id)
            .and_then(|widget| widget.as_draggable())
            .is_some_and(|draggable| draggable.is_dragging());
        if dragging {
            return Some(id);
        }
        stack.extend(tree.children(id).iter().rev().copied());
    }
    None
}
