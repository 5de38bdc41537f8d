//! # Content Cache
//!
//! Textures are shared by path. The first acquisition loads the texture
//! through a [`TextureSource`]; later acquisitions of the same path only bump
//! a reference count. [`TextureRef`] handles release their reference on drop
//! and the texture is unloaded exactly once, when the last handle goes.
//!
//! ```text
//!  Image A ──► TextureRef ─┐
//!                          ├──► ContentCache { "ui/panel.png" → refs: 2 } ──► TextureSource
//!  Image B ──► TextureRef ─┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{UiError, UiResult};

/// Handle to a texture owned by a [`TextureSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Metadata returned by a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Source-assigned handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Loads and releases textures on behalf of the cache.
pub trait TextureSource: Send {
    /// Loads the texture at `path`. The error string becomes
    /// [`UiError::Content`]'s reason.
    fn load(&mut self, path: &str) -> Result<TextureInfo, String>;

    /// Releases a texture previously returned by [`TextureSource::load`].
    fn unload(&mut self, texture: TextureId);
}

/// In-memory source that knows a fixed set of paths and their sizes.
#[derive(Debug, Default)]
pub struct MemoryTextureSource {
    sizes: HashMap<String, (u32, u32)>,
    next_id: u32,
    live: usize,
}

impl MemoryTextureSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `path` loadable with the given dimensions.
    #[must_use]
    pub fn with_texture(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(path.to_owned(), (width, height));
        self
    }

    /// Number of textures currently loaded.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live
    }
}

impl TextureSource for MemoryTextureSource {
    fn load(&mut self, path: &str) -> Result<TextureInfo, String> {
        let &(width, height) = self.sizes.get(path).ok_or_else(|| "no such texture".to_owned())?;
        self.next_id += 1;
        self.live += 1;
        Ok(TextureInfo {
            id: TextureId(self.next_id),
            width,
            height,
        })
    }

    fn unload(&mut self, _texture: TextureId) {
        self.live = self.live.saturating_sub(1);
    }
}

struct Entry {
    info: TextureInfo,
    refs: usize,
}

struct Inner {
    source: Box<dyn TextureSource>,
    entries: HashMap<String, Entry>,
}

/// Shared, reference-counted texture cache. Cloning shares the same cache.
#[derive(Clone)]
pub struct ContentCache {
    inner: Arc<Mutex<Inner>>,
}

impl ContentCache {
    /// Creates a cache over `source`.
    #[must_use]
    pub fn new(source: impl TextureSource + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                source: Box::new(source),
                entries: HashMap::new(),
            })),
        }
    }

    /// Returns a handle to the texture at `path`, loading it on first use.
    pub fn acquire(&self, path: &str) -> UiResult<TextureRef> {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.get_mut(path) {
            entry.refs += 1;
            return Ok(self.handle(path, entry.info));
        }

        let info = inner.source.load(path).map_err(|reason| UiError::Content {
            path: path.to_owned(),
            reason,
        })?;
        inner.entries.insert(path.to_owned(), Entry { info, refs: 1 });
        debug!(path, id = info.id.0, width = info.width, height = info.height, "texture loaded");
        Ok(self.handle(path, info))
    }

    /// Live references to `path` (0 if not loaded).
    #[must_use]
    pub fn ref_count(&self, path: &str) -> usize {
        self.inner.lock().entries.get(path).map_or(0, |entry| entry.refs)
    }

    /// Number of distinct textures currently loaded.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.inner.lock().entries.len()
    }

    fn handle(&self, path: &str, info: TextureInfo) -> TextureRef {
        TextureRef {
            cache: self.clone(),
            path: Arc::from(path),
            info,
        }
    }

    fn retain(&self, path: &str) {
        if let Some(entry) = self.inner.lock().entries.get_mut(path) {
            entry.refs += 1;
        }
    }

    fn release(&self, path: &str) {
        let mut inner = self.inner.lock();
        let Some(entry) = inner.entries.get_mut(path) else {
            return;
        };
        entry.refs -= 1;
        if entry.refs > 0 {
            return;
        }
        let id = entry.info.id;
        inner.entries.remove(path);
        inner.source.unload(id);
        debug!(path, id = id.0, "texture unloaded");
    }
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCache").field("loaded", &self.loaded()).finish()
    }
}

/// Counted reference to a cached texture.
pub struct TextureRef {
    cache: ContentCache,
    path: Arc<str>,
    info: TextureInfo,
}

impl TextureRef {
    /// Path the texture was loaded from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Source handle for draw commands.
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.info.id
    }

    /// Width and height in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }
}

impl Clone for TextureRef {
    fn clone(&self) -> Self {
        self.cache.retain(&self.path);
        Self {
            cache: self.cache.clone(),
            path: Arc::clone(&self.path),
            info: self.info,
        }
    }
}

impl Drop for TextureRef {
    fn drop(&mut self) {
        self.cache.release(&self.path);
    }
}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureRef").field("path", &self.path).field("info", &self.info).finish()
    }
}
