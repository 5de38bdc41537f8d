//! Relative padding.

use crate::error::UiResult;
use crate::geometry::Insets;
use crate::tree::{ComponentId, ComponentTree};
use crate::widgets::Widget;

/// Pads its node by fractions of its own size and exposes a content
/// container filling what is left.
///
/// Direct children of the padding node that set `ignore_parent_padding`
/// still span its full area.
#[derive(Debug, Clone, Copy)]
pub struct Padding {
    content: ComponentId,
}

impl Padding {
    /// Creates a padding node filling `parent`. `insets` are fractions of
    /// the padding node's size.
    pub fn create(tree: &mut ComponentTree, parent: ComponentId, insets: Insets) -> UiResult<ComponentId> {
        let id = tree.create_child(parent)?;
        tree.transform_mut(id)?.set_padding(insets)?;
        let content = tree.create_child(id)?;
        tree.set_widget(id, Box::new(Self { content }))?;
        Ok(id)
    }

    /// Changes the insets of the padding node `id`.
    pub fn set_insets(tree: &mut ComponentTree, id: ComponentId, insets: Insets) -> UiResult<()> {
        tree.expect_widget_mut::<Self>(id)?;
        tree.transform_mut(id)?.set_padding(insets)
    }

    /// Container for the padded children.
    #[must_use]
    pub fn content(&self) -> ComponentId {
        self.content
    }
}

impl Widget for Padding {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Vec2};

    #[test]
    fn test_content_fills_padded_area() {
        let mut tree = ComponentTree::new();
        let root = tree.create_root(Vec2::ZERO, Vec2::new(200.0, 100.0)).unwrap();
        let padding = Padding::create(&mut tree, root, Insets::uniform(0.1)).unwrap();
        let content = tree.widget::<Padding>(padding).unwrap().content();

        assert_eq!(tree.resolve(content), Rect::new(20.0, 10.0, 160.0, 80.0));

        Padding::set_insets(&mut tree, padding, Insets::new(0.5, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(tree.resolve(content), Rect::new(100.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_set_insets_checks_widget() {
        let mut tree = ComponentTree::new();
        let root = tree.create_root(Vec2::ZERO, Vec2::new(10.0, 10.0)).unwrap();
        assert!(Padding::set_insets(&mut tree, root, Insets::ZERO).is_err());
    }
}
