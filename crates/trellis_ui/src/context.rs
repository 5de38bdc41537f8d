//! # UI Context
//!
//! Explicit owner of everything one UI instance needs: the component tree,
//! the scene stack, focus state, configuration and the content cache. The
//! host constructs it, feeds it one input snapshot per frame and tears it
//! down; nothing lives in process-wide statics.
//!
//! ## Frame step
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ update(input)                                                      │
//! │   snapshot ─► focus/drag ─► drain events ─► walk roots ─► drain    │
//! │                                              │                     │
//! │                         resolve, widget.update, auto-update kids   │
//! ├────────────────────────────────────────────────────────────────────┤
//! │ draw()                                                             │
//! │   walk draw roots ─► widget.draw ─► clip ─► auto-draw kids ─► pop  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::config::UiConfig;
use crate::content::ContentCache;
use crate::error::{UiError, UiResult};
use crate::geometry::Vec2;
use crate::input::InputState;
use crate::mouse::{FocusState, MouseController};
use crate::render::DrawList;
use crate::scene::SceneStack;
use crate::style::Theme;
use crate::tree::{ComponentFlags, ComponentId, ComponentTree};

/// Something a widget wants the host to know about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiMessage {
    /// A button was clicked.
    Clicked(ComponentId),
    /// The pointer moved onto a button.
    HoverEntered(ComponentId),
    /// The pointer left a button.
    HoverLeft(ComponentId),
    /// A scrollbar changed its offset.
    Scrolled {
        /// The scrollbar.
        id: ComponentId,
        /// New offset in pixels.
        offset: f32,
    },
}

/// State handed to [`crate::Widget::update`].
pub struct UpdateContext<'a> {
    /// The tree, with the updating widget detached from its node.
    pub tree: &'a mut ComponentTree,
    input: &'a InputState,
    focus: &'a FocusState,
    config: &'a UiConfig,
    messages: &'a mut Vec<UiMessage>,
}

impl<'a> UpdateContext<'a> {
    /// This frame's input snapshot.
    #[must_use]
    pub fn input(&self) -> &'a InputState {
        self.input
    }

    /// This frame's focus and drag result.
    #[must_use]
    pub fn focus(&self) -> &'a FocusState {
        self.focus
    }

    /// Context configuration.
    #[must_use]
    pub fn config(&self) -> &'a UiConfig {
        self.config
    }

    /// Focus test with the ancestor rule.
    #[must_use]
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus.is_focused(&*self.tree, id)
    }

    /// Queues a message for the host.
    pub fn emit(&mut self, message: UiMessage) {
        self.messages.push(message);
    }

    /// Updates `id` and its auto-updating descendants, regardless of
    /// whether `id` itself has its auto-update flag set.
    pub fn update_subtree(&mut self, id: ComponentId) -> UiResult<()> {
        if !self.tree.is_enabled(id) {
            return Ok(());
        }
        self.tree.resolve(id);

        if let Some(mut widget) = self.tree.take_widget(id) {
            let result = widget.update(id, self);
            self.tree.restore_widget(id, widget);
            result?;
        }

        for child in self.tree.children_in_draw_order(id) {
            if self.tree.has_flag(child, ComponentFlags::AUTO_UPDATE) {
                self.update_subtree(child)?;
            }
        }
        Ok(())
    }
}

/// State handed to [`crate::Widget::draw`].
pub struct DrawContext<'a> {
    /// The tree, with the drawing widget detached from its node.
    pub tree: &'a mut ComponentTree,
    /// Output for this frame.
    pub list: &'a mut DrawList,
    config: &'a UiConfig,
}

impl<'a> DrawContext<'a> {
    /// Context configuration.
    #[must_use]
    pub fn config(&self) -> &'a UiConfig {
        self.config
    }

    /// Default palette.
    #[must_use]
    pub fn theme(&self) -> &'a Theme {
        &self.config.theme
    }

    /// Draws `id` and its auto-drawing descendants, clipping children when
    /// the component asks for it.
    pub fn draw_subtree(&mut self, id: ComponentId) {
        if !self.tree.is_enabled(id) {
            return;
        }
        let rect = self.tree.resolve(id);

        if let Some(widget) = self.tree.take_widget(id) {
            widget.draw(id, self);
            self.tree.restore_widget(id, widget);
        }

        let clip = self.tree.has_flag(id, ComponentFlags::CLIP_CHILDREN);
        if clip {
            self.list.push_clip(rect);
        }
        for child in self.tree.children_in_draw_order(id) {
            if self.tree.has_flag(child, ComponentFlags::AUTO_DRAW) {
                self.draw_subtree(child);
            }
        }
        if clip {
            self.list.pop_clip();
        }
    }
}

/// One UI instance.
pub struct UiContext {
    tree: ComponentTree,
    scenes: SceneStack,
    mouse: MouseController,
    config: UiConfig,
    content: ContentCache,
    input: InputState,
    draw_list: DrawList,
    viewport: Vec2,
}

impl UiContext {
    /// Creates a context whose base scene fills `viewport`.
    pub fn new(config: UiConfig, content: ContentCache, viewport: Vec2) -> UiResult<Self> {
        config.validate()?;
        let mut tree = ComponentTree::new();
        let base = tree.create_root(Vec2::ZERO, viewport)?;
        info!(width = viewport.x, height = viewport.y, "ui context created");

        Ok(Self {
            tree,
            scenes: SceneStack::new(base),
            mouse: MouseController::new(),
            config,
            content,
            input: InputState::new(),
            draw_list: DrawList::new(),
            viewport,
        })
    }

    /// The component tree.
    #[must_use]
    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Mutable access to the component tree.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    /// Root of the base scene.
    #[must_use]
    pub fn base(&self) -> ComponentId {
        self.scenes.base()
    }

    /// The scene stack.
    #[must_use]
    pub fn scenes(&self) -> &SceneStack {
        &self.scenes
    }

    /// Context configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Default palette.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Shared texture cache.
    #[must_use]
    pub fn content(&self) -> &ContentCache {
        &self.content
    }

    /// Focus and drag state from the last update.
    #[must_use]
    pub fn focus(&self) -> &FocusState {
        self.mouse.state()
    }

    /// Input snapshot from the last update.
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Adds an overlay root filling the viewport on top of the stack.
    pub fn push_overlay(&mut self, blocks_underlying: bool) -> UiResult<ComponentId> {
        let root = self.tree.create_root(Vec2::ZERO, self.viewport)?;
        self.scenes.push(root, blocks_underlying);
        Ok(root)
    }

    /// Removes an overlay and destroys its components.
    pub fn remove_overlay(&mut self, root: ComponentId) -> UiResult<()> {
        if self.scenes.remove(root).is_none() {
            return Err(UiError::UnknownComponent(root));
        }
        self.tree.destroy(root)
    }

    /// Host notification that the viewport changed size. Resizes every scene
    /// root and invalidates all geometry.
    pub fn set_viewport_size(&mut self, size: Vec2) -> UiResult<()> {
        for root in self.scenes.draw_roots() {
            self.tree.transform_mut(root)?.set_size(size)?;
        }
        self.tree.mark_all_dirty();
        info!(width = size.x, height = size.y, "viewport resized");
        self.viewport = size;
        Ok(())
    }

    /// Applies the named style from the configuration to the widget on `id`.
    ///
    /// Returns `false` if the widget does not accept styles.
    pub fn apply_style(&mut self, id: ComponentId, name: &str) -> UiResult<bool> {
        let style = self
            .config
            .style(name)
            .ok_or_else(|| UiError::Config(format!("unknown style '{name}'")))?;
        if !self.tree.contains(id) {
            return Err(UiError::UnknownComponent(id));
        }
        let Some(mut widget) = self.tree.take_widget(id) else {
            return Ok(false);
        };
        let applied = match widget.style_target() {
            Some(target) => {
                target.apply_style(style);
                true
            }
            None => false,
        };
        self.tree.restore_widget(id, widget);
        Ok(applied)
    }

    /// Runs the update phase for one frame.
    pub fn update(&mut self, input: &InputState) -> UiResult<Vec<UiMessage>> {
        self.input.clone_from(input);
        let focus = self.mouse.resolve_frame(&mut self.tree, &self.scenes, &self.input);
        let passes = self.config.notification_passes;
        let mut messages = Vec::new();

        dispatch_notifications(&mut self.tree, passes)?;
        {
            let mut cx = UpdateContext {
                tree: &mut self.tree,
                input: &self.input,
                focus: &focus,
                config: &self.config,
                messages: &mut messages,
            };
            for root in self.scenes.draw_roots() {
                cx.update_subtree(root)?;
            }
        }
        dispatch_notifications(&mut self.tree, passes)?;

        Ok(messages)
    }

    /// Runs the draw phase and returns the frame's commands.
    pub fn draw(&mut self) -> &DrawList {
        self.draw_list.begin_frame();
        let mut cx = DrawContext {
            tree: &mut self.tree,
            list: &mut self.draw_list,
            config: &self.config,
        };
        for root in self.scenes.draw_roots() {
            cx.draw_subtree(root);
        }
        &self.draw_list
    }
}

/// Hands queued tree events to their observers' widgets.
///
/// Handlers may cause further events; those are drained in later passes.
/// Whatever is left after `passes` stays queued for the next drain.
fn dispatch_notifications(tree: &mut ComponentTree, passes: usize) -> UiResult<()> {
    for _ in 0..passes {
        let batch = tree.take_notifications();
        if batch.is_empty() {
            return Ok(());
        }
        for notification in batch {
            let observer = notification.observer;
            if let Some(mut widget) = tree.take_widget(observer) {
                let result = widget.on_notification(observer, &notification.event, tree);
                tree.restore_widget(observer, widget);
                result?;
            }
        }
    }

    let remaining = tree.pending_notifications();
    if remaining > 0 {
        warn!(remaining, passes, "notification drain did not settle, deferring the rest");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryTextureSource;
    use crate::input::MouseButton;
    use crate::notify::{TreeEvent, TreeEventKind};
    use crate::render::DrawCommand;
    use crate::style::{Color, Style};
    use crate::widgets::{SolidColor, StyleTarget, Widget};

    fn context() -> UiContext {
        let content = ContentCache::new(MemoryTextureSource::new());
        UiContext::new(UiConfig::default(), content, Vec2::new(200.0, 100.0)).unwrap()
    }

    /// Re-adds a child every time one is added, forever.
    struct Echo;

    impl Widget for Echo {
        fn on_notification(&mut self, id: ComponentId, event: &TreeEvent, tree: &mut ComponentTree) -> UiResult<()> {
            if event.kind == TreeEventKind::ChildAdded {
                tree.create_child(id)?;
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Counter {
        updates: usize,
        tint: Option<Color>,
    }

    impl Widget for Counter {
        fn update(&mut self, _id: ComponentId, _cx: &mut UpdateContext<'_>) -> UiResult<()> {
            self.updates += 1;
            Ok(())
        }

        fn style_target(&mut self) -> Option<&mut dyn StyleTarget> {
            Some(self)
        }
    }

    impl StyleTarget for Counter {
        fn apply_style(&mut self, style: &Style) {
            self.tint = style.background.or(self.tint);
        }
    }

    #[test]
    fn test_viewport_resize_cascades() {
        let mut ui = context();
        let base = ui.base();
        let half = ui.tree_mut().create_child(base).unwrap();
        ui.tree_mut().transform_mut(half).unwrap().set_relative_size(Vec2::new(0.5, 1.0)).unwrap();
        assert_eq!(ui.tree_mut().resolve(half).width, 100.0);

        ui.set_viewport_size(Vec2::new(400.0, 100.0)).unwrap();
        assert_eq!(ui.tree_mut().resolve(half).width, 200.0);
    }

    #[test]
    fn test_auto_update_flag_skips_subtree() {
        let mut ui = context();
        let base = ui.base();
        let driven = ui.tree_mut().create_child(base).unwrap();
        let manual = ui.tree_mut().create_child(base).unwrap();
        ui.tree_mut().set_widget(driven, Box::new(Counter::default())).unwrap();
        ui.tree_mut().set_widget(manual, Box::new(Counter::default())).unwrap();
        ui.tree_mut().set_auto(manual, false, true).unwrap();

        ui.update(&InputState::new()).unwrap();
        ui.update(&InputState::new()).unwrap();

        assert_eq!(ui.tree().widget::<Counter>(driven).unwrap().updates, 2);
        assert_eq!(ui.tree().widget::<Counter>(manual).unwrap().updates, 0);
    }

    #[test]
    fn test_runaway_notifications_are_deferred() {
        let mut ui = context();
        let base = ui.base();
        let echo = ui.tree_mut().create_child(base).unwrap();
        ui.tree_mut().set_widget(echo, Box::new(Echo)).unwrap();
        ui.tree_mut().observe_children(echo, echo).unwrap();
        ui.tree_mut().create_child(echo).unwrap();

        ui.update(&InputState::new()).unwrap();

        assert!(ui.tree().pending_notifications() > 0);
        assert!(ui.tree().children(echo).len() > 1);
    }

    #[test]
    fn test_apply_named_style() {
        let mut config = UiConfig::default();
        config.styles.insert(
            "accent".to_owned(),
            Style {
                background: Some(Color::BLACK),
                ..Style::default()
            },
        );
        let mut ui = UiContext::new(config, ContentCache::new(MemoryTextureSource::new()), Vec2::new(10.0, 10.0)).unwrap();
        let base = ui.base();
        let styled = ui.tree_mut().create_child(base).unwrap();
        ui.tree_mut().set_widget(styled, Box::new(Counter::default())).unwrap();

        assert!(ui.apply_style(styled, "accent").unwrap());
        assert_eq!(ui.tree().widget::<Counter>(styled).unwrap().tint, Some(Color::BLACK));
        assert!(matches!(ui.apply_style(styled, "missing"), Err(UiError::Config(_))));
        assert!(!ui.apply_style(base, "accent").unwrap());
    }

    #[test]
    fn test_draw_clips_children() {
        let mut ui = context();
        let base = ui.base();
        let panel = SolidColor::create(ui.tree_mut(), base, Color::WHITE).unwrap();
        ui.tree_mut().set_flag(panel, ComponentFlags::CLIP_CHILDREN, true).unwrap();
        SolidColor::create(ui.tree_mut(), panel, Color::BLACK).unwrap();

        let commands = ui.draw().commands().to_vec();
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::Quad { depth: 0, .. }));
        assert!(matches!(commands[1], DrawCommand::PushClip { .. }));
        assert!(matches!(commands[2], DrawCommand::Quad { depth: 1, .. }));
        assert_eq!(commands[3], DrawCommand::PopClip);
    }

    #[test]
    fn test_overlay_takes_focus() {
        let mut ui = context();
        let overlay = ui.push_overlay(false).unwrap();
        let mut input = InputState::new();
        input.set_pointer(10.0, 10.0);
        input.press(MouseButton::Left);

        ui.update(&input).unwrap();
        assert_eq!(ui.focus().focused, Some(overlay));

        ui.remove_overlay(overlay).unwrap();
        ui.update(&input).unwrap();
        assert_eq!(ui.focus().focused, Some(ui.base()));
        assert!(ui.remove_overlay(overlay).is_err());
    }
}
