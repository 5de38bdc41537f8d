//! # UI Error Types
//!
//! Configuration errors are programmer mistakes and are reported the moment
//! the bad value is supplied, before any state changes. Degenerate runtime
//! states (zero-size parents, empty lists, empty text) are not errors.

use thiserror::Error;

use crate::tree::ComponentId;

/// Errors that can occur while building or driving a UI tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// A relative transform was requested on a component without a parent.
    #[error("component {0} has no parent and cannot use a relative transform")]
    RelativeWithoutParent(ComponentId),

    /// A size-like value was negative, NaN, or otherwise out of range.
    #[error("invalid {what}: {value}")]
    InvalidSize {
        /// Which property was being set.
        what: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Max size would end up smaller than min size.
    #[error("max size ({max_x}, {max_y}) is below min size ({min_x}, {min_y})")]
    MaxBelowMin {
        /// Minimum width.
        min_x: f32,
        /// Minimum height.
        min_y: f32,
        /// Maximum width.
        max_x: f32,
        /// Maximum height.
        max_y: f32,
    },

    /// The component is not a child of the given parent.
    #[error("component {child} is not a child of {parent}")]
    NotAChild {
        /// The supposed parent.
        parent: ComponentId,
        /// The component that was not found among its children.
        child: ComponentId,
    },

    /// The id does not name a live component.
    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),

    /// Reparenting would make a component its own ancestor.
    #[error("cannot move {child} under {parent}: it would become its own ancestor")]
    WouldCreateCycle {
        /// The component being moved.
        child: ComponentId,
        /// The requested new parent.
        parent: ComponentId,
    },

    /// A relative-only operation was called on an absolute transform.
    #[error("component {0} does not use a relative transform")]
    NotRelative(ComponentId),

    /// A typed widget lookup found a different widget (or none).
    #[error("component {id} does not carry a {expected} widget")]
    WidgetMismatch {
        /// The component that was queried.
        id: ComponentId,
        /// The widget type that was expected.
        expected: &'static str,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A texture could not be loaded.
    #[error("failed to load content '{path}': {reason}")]
    Content {
        /// The requested resource path.
        path: String,
        /// Why the source refused it.
        reason: String,
    },
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;

/// Rejects negative or NaN size-like values.
pub(crate) fn check_non_negative(what: &'static str, value: f32) -> UiResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(UiError::InvalidSize { what, value });
    }
    Ok(())
}

/// Rejects zero, negative, infinite or NaN values.
pub(crate) fn check_positive(what: &'static str, value: f32) -> UiResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(UiError::InvalidSize { what, value });
    }
    Ok(())
}
