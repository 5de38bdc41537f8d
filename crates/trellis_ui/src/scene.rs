//! Scene and overlay stacking.
//!
//! ```text
//!   overlay 2 (topmost)      ◄── focus search starts here
//!   overlay 1 [blocks]       ◄── ...and stops after this one
//!   overlay 0
//!   base scene               ◄── drawn first
//! ```

use crate::tree::ComponentId;

/// One overlay layer above the base scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// Root component of the overlay.
    pub root: ComponentId,
    /// Hide every layer below from focus resolution.
    pub blocks_underlying: bool,
}

/// Base scene root plus overlays, bottom to top.
#[derive(Debug, Clone)]
pub struct SceneStack {
    base: ComponentId,
    overlays: Vec<Overlay>,
}

impl SceneStack {
    /// Creates a stack holding only the base scene.
    #[must_use]
    pub fn new(base: ComponentId) -> Self {
        Self {
            base,
            overlays: Vec::new(),
        }
    }

    /// Root of the base scene.
    #[must_use]
    pub fn base(&self) -> ComponentId {
        self.base
    }

    /// Overlays, bottom to top.
    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Pushes an overlay on top.
    pub fn push(&mut self, root: ComponentId, blocks_underlying: bool) {
        self.overlays.push(Overlay {
            root,
            blocks_underlying,
        });
    }

    /// Removes the overlay rooted at `root`, wherever it sits.
    pub fn remove(&mut self, root: ComponentId) -> Option<Overlay> {
        let index = self.overlays.iter().position(|overlay| overlay.root == root)?;
        Some(self.overlays.remove(index))
    }

    /// Roots searched for focus: topmost first, stopping after the first
    /// blocking overlay.
    #[must_use]
    pub fn focus_roots(&self) -> Vec<ComponentId> {
        let mut roots = Vec::with_capacity(self.overlays.len() + 1);
        for overlay in self.overlays.iter().rev() {
            roots.push(overlay.root);
            if overlay.blocks_underlying {
                return roots;
            }
        }
        roots.push(self.base);
        roots
    }

    /// Every root, topmost first.
    #[must_use]
    pub fn drag_roots(&self) -> Vec<ComponentId> {
        let mut roots: Vec<_> = self.overlays.iter().rev().map(|overlay| overlay.root).collect();
        roots.push(self.base);
        roots
    }

    /// Every root in draw order: base first, then overlays bottom-up.
    #[must_use]
    pub fn draw_roots(&self) -> Vec<ComponentId> {
        std::iter::once(self.base)
            .chain(self.overlays.iter().map(|overlay| overlay.root))
            .collect()
    }
}
