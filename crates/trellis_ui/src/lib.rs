//! # Trellis UI
//!
//! Retained-mode UI toolkit for games and tools that draw their own frames.
//! Components form a tree; each carries a transform resolved lazily against
//! its parent, optional flags, and an optional widget.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           UiContext                              │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  InputState ─► MouseController ─► ComponentTree ─► DrawList      │
//! │      │              │                  │              │          │
//! │  one snapshot   focus + drag     update / notify   Renderer      │
//! │  per frame      per frame        lazy transforms   (host side)   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame loop
//!
//! ```no_run
//! use trellis_ui::{ContentCache, InputState, MemoryTextureSource, UiConfig, UiContext, Vec2};
//!
//! let content = ContentCache::new(MemoryTextureSource::new());
//! let mut ui = UiContext::new(UiConfig::default(), content, Vec2::new(1280.0, 720.0))?;
//! let mut input = InputState::new();
//! loop {
//!     input.begin_frame();
//!     // feed pointer, buttons and keys from the window here
//!     for message in ui.update(&input)? {
//!         println!("{message:?}");
//!     }
//!     let _commands = ui.draw();
//! }
//! # Ok::<(), trellis_ui::UiError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mouse;
pub mod notify;
pub mod render;
pub mod scene;
pub mod style;
pub mod transform;
pub mod tree;
pub mod widgets;

pub use config::UiConfig;
pub use content::{ContentCache, MemoryTextureSource, TextureId, TextureInfo, TextureRef, TextureSource};
pub use context::{DrawContext, UiContext, UiMessage, UpdateContext};
pub use error::{UiError, UiResult};
pub use geometry::{Alignment, Axis, Insets, Rect, Vec2};
pub use input::{InputState, Key, Modifiers, MouseButton};
pub use mouse::{FocusState, MouseController};
pub use notify::{TreeEvent, TreeEventKind};
pub use render::{DrawCommand, DrawList, Renderer, UiVertex};
pub use scene::{Overlay, SceneStack};
pub use style::{Color, Style, Theme};
pub use transform::{Transform, TransformKind};
pub use tree::{ComponentFlags, ComponentId, ComponentTree};
pub use widgets::{Draggable, StyleTarget, Widget};
