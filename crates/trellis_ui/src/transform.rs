//! # Transform
//!
//! Per-component geometry. A transform stores a declarative description
//! (absolute pixels, or fractions of the parent plus an anchor) and caches
//! the resolved screen rectangle behind a dirty flag.
//!
//! Resolution is pulled, not pushed: setters only mark the transform dirty
//! and [`crate::ComponentTree::resolve`] recomputes on the next read. The
//! tree owns the cascade to descendants because a transform cannot see its
//! parent.
//!
//! ## Relative resolution
//!
//! ```text
//! parent rect P ──► shrink by parent padding ──► size = floor(P'.size * relative_size)
//!                                                 │
//!                      clamp [min, max] ◄─────────┘
//!                              │
//!                      aspect ratio ──► align inside P' ──► + relative_offset * P.size
//! ```

use crate::error::{check_non_negative, check_positive, UiError, UiResult};
use crate::geometry::{snap, Alignment, Insets, Rect, Vec2};

/// How a transform derives its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformKind {
    /// Explicit screen-space pixel location and size.
    Absolute,
    /// Fractions of the parent's resolved rectangle.
    #[default]
    Relative,
}

/// What a parent contributes to a relative child's resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ParentFrame {
    /// The parent's resolved rectangle.
    pub rect: Rect,
    /// The parent's padding, already converted to pixels.
    pub padding: Insets,
}

impl ParentFrame {
    /// Reference rectangle for sizing and alignment.
    pub(crate) fn reference(&self, ignore_padding: bool) -> Rect {
        if ignore_padding {
            self.rect
        } else {
            self.rect.shrink_by(self.padding)
        }
    }
}

/// Geometry description plus cached resolution for one component.
#[derive(Debug, Clone)]
pub struct Transform {
    kind: TransformKind,
    location: Vec2,
    size: Vec2,
    relative_offset: Vec2,
    relative_size: Vec2,
    alignment: Alignment,
    ratio: Option<Vec2>,
    min_size: Vec2,
    max_size: Vec2,
    ignore_parent_padding: bool,
    padding: Insets,
    rect: Rect,
    dirty: bool,
}

impl Transform {
    /// A relative transform filling its parent.
    #[must_use]
    pub(crate) fn relative() -> Self {
        Self {
            kind: TransformKind::Relative,
            location: Vec2::ZERO,
            size: Vec2::ZERO,
            relative_offset: Vec2::ZERO,
            relative_size: Vec2::ONE,
            alignment: Alignment::TopLeft,
            ratio: None,
            min_size: Vec2::ZERO,
            max_size: Vec2::INFINITY,
            ignore_parent_padding: false,
            padding: Insets::ZERO,
            rect: Rect::ZERO,
            dirty: true,
        }
    }

    /// An absolute transform at `location` with `size`.
    pub(crate) fn absolute(location: Vec2, size: Vec2) -> UiResult<Self> {
        check_vec_non_negative("size", size)?;
        Ok(Self {
            kind: TransformKind::Absolute,
            location,
            size,
            ..Self::relative()
        })
    }

    /// How this transform derives its rectangle.
    #[must_use]
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// Explicit location (absolute transforms).
    #[must_use]
    pub fn location(&self) -> Vec2 {
        self.location
    }

    /// Explicit size (absolute transforms).
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Offset as a fraction of the parent's full size.
    #[must_use]
    pub fn relative_offset(&self) -> Vec2 {
        self.relative_offset
    }

    /// Size as a fraction of the parent's padded size.
    #[must_use]
    pub fn relative_size(&self) -> Vec2 {
        self.relative_size
    }

    /// Anchor inside the parent.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Locked aspect ratio (width : height), if any.
    #[must_use]
    pub fn ratio(&self) -> Option<Vec2> {
        self.ratio
    }

    /// Lower clamp of the resolved size.
    #[must_use]
    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    /// Upper clamp of the resolved size.
    #[must_use]
    pub fn max_size(&self) -> Vec2 {
        self.max_size
    }

    /// Whether the parent's padding is skipped for this transform.
    #[must_use]
    pub fn ignores_parent_padding(&self) -> bool {
        self.ignore_parent_padding
    }

    /// Padding (fractions of this component's size) applied to relative children.
    #[must_use]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Last resolved rectangle. Stale while [`Self::is_dirty`] is true.
    #[must_use]
    pub fn cached_rect(&self) -> Rect {
        self.rect
    }

    /// True when an input changed since the last resolution.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the explicit location used by absolute transforms.
    pub fn set_location(&mut self, location: Vec2) -> UiResult<()> {
        if location.is_nan() {
            return Err(UiError::InvalidSize { what: "location", value: f32::NAN });
        }
        if self.location != location {
            self.location = location;
            self.dirty = true;
        }
        Ok(())
    }

    /// Sets the explicit size used by absolute transforms.
    pub fn set_size(&mut self, size: Vec2) -> UiResult<()> {
        check_vec_non_negative("size", size)?;
        if self.size != size {
            self.size = size;
            self.dirty = true;
        }
        Ok(())
    }

    /// Sets the offset as a fraction of the parent's full size. May be negative.
    pub fn set_relative_offset(&mut self, offset: Vec2) -> UiResult<()> {
        if offset.is_nan() {
            return Err(UiError::InvalidSize { what: "relative offset", value: f32::NAN });
        }
        if self.relative_offset != offset {
            self.relative_offset = offset;
            self.dirty = true;
        }
        Ok(())
    }

    /// Sets the size as a fraction of the parent's padded size.
    pub fn set_relative_size(&mut self, size: Vec2) -> UiResult<()> {
        check_vec_non_negative("relative size", size)?;
        if self.relative_size != size {
            self.relative_size = size;
            self.dirty = true;
        }
        Ok(())
    }

    /// Sets the anchor inside the parent.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        if self.alignment != alignment {
            self.alignment = alignment;
            self.dirty = true;
        }
    }

    /// Locks (or unlocks) the aspect ratio. Both components must be positive.
    pub fn set_ratio(&mut self, ratio: Option<Vec2>) -> UiResult<()> {
        if let Some(ratio) = ratio {
            check_positive("ratio", ratio.x)?;
            check_positive("ratio", ratio.y)?;
        }
        if self.ratio != ratio {
            self.ratio = ratio;
            self.dirty = true;
        }
        Ok(())
    }

    /// Sets the lower size clamp. Fails if it would exceed the max size.
    pub fn set_min_size(&mut self, min: Vec2) -> UiResult<()> {
        check_vec_non_negative("min size", min)?;
        check_order(min, self.max_size)?;
        if self.min_size != min {
            self.min_size = min;
            self.dirty = true;
        }
        Ok(())
    }

    /// Sets the upper size clamp. Fails if it would drop below the min size.
    pub fn set_max_size(&mut self, max: Vec2) -> UiResult<()> {
        check_vec_non_negative("max size", max)?;
        check_order(self.min_size, max)?;
        if self.max_size != max {
            self.max_size = max;
            self.dirty = true;
        }
        Ok(())
    }

    /// Opts this transform out of its parent's padding.
    pub fn set_ignore_parent_padding(&mut self, ignore: bool) {
        if self.ignore_parent_padding != ignore {
            self.ignore_parent_padding = ignore;
            self.dirty = true;
        }
    }

    /// Sets the padding this component imposes on its relative children.
    ///
    /// Marks this transform dirty so the next resolution cascades the new
    /// reference rectangle to the children.
    pub fn set_padding(&mut self, padding: Insets) -> UiResult<()> {
        for edge in [padding.left, padding.top, padding.right, padding.bottom] {
            check_non_negative("padding", edge)?;
        }
        if self.padding != padding {
            self.padding = padding;
            self.dirty = true;
        }
        Ok(())
    }

    pub(crate) fn set_kind(&mut self, kind: TransformKind) {
        if self.kind != kind {
            self.kind = kind;
            self.dirty = true;
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Stores a freshly computed rectangle, returning the previous one.
    pub(crate) fn store(&mut self, rect: Rect) -> Rect {
        self.dirty = false;
        std::mem::replace(&mut self.rect, rect)
    }

    /// Frame handed to relative children of this transform.
    pub(crate) fn frame_for_children(&self) -> ParentFrame {
        ParentFrame {
            rect: self.rect,
            padding: self.padding.to_pixels(self.rect.size()),
        }
    }

    /// Computes the rectangle for this transform given its parent's frame.
    pub(crate) fn compute(&self, parent: Option<ParentFrame>) -> Rect {
        match self.kind {
            TransformKind::Absolute => {
                let size = self.constrain(self.size);
                Rect::from_parts(self.location, size)
            }
            TransformKind::Relative => {
                let parent = parent.unwrap_or_default();
                let reference = parent.reference(self.ignore_parent_padding);
                let size = self.constrain(reference.size().scale(self.relative_size).snapped());
                let aligned = self.alignment.align(reference, size);
                let offset = self.relative_offset.scale(parent.rect.size()).snapped();
                Rect::from_parts(aligned + offset, size)
            }
        }
    }

    /// Clamps to [min, max] then applies the aspect ratio.
    fn constrain(&self, size: Vec2) -> Vec2 {
        let clamped = size.clamp(self.min_size, self.max_size);
        match self.ratio {
            Some(ratio) => apply_ratio(clamped, ratio),
            None => clamped,
        }
    }

    /// Converts a pixel size to a fraction of `reference`, axis by axis.
    ///
    /// Axes with no request, or with a zero reference, keep `current`. The
    /// flag reports whether every requested axis was converted.
    pub(crate) fn fraction_of(
        current: Vec2,
        pixels: (Option<f32>, Option<f32>),
        reference: Vec2,
    ) -> (Vec2, bool) {
        let mut result = current;
        let mut complete = true;
        if let Some(x) = pixels.0 {
            if reference.x > 0.0 {
                result.x = x / reference.x;
            } else {
                complete = false;
            }
        }
        if let Some(y) = pixels.1 {
            if reference.y > 0.0 {
                result.y = y / reference.y;
            } else {
                complete = false;
            }
        }
        (result, complete)
    }
}

/// Shrinks the oversized axis of `size` so it matches `ratio` (width : height).
///
/// The result never exceeds `size` on either axis.
#[must_use]
pub fn apply_ratio(size: Vec2, ratio: Vec2) -> Vec2 {
    // Cross-multiplied so a zero height never divides.
    let current = size.x * ratio.y;
    let target = size.y * ratio.x;
    if current < target {
        Vec2::new(size.x, snap(size.x * ratio.y / ratio.x))
    } else if current > target {
        Vec2::new(snap(size.y * ratio.x / ratio.y), size.y)
    } else {
        size
    }
}

fn check_vec_non_negative(what: &'static str, value: Vec2) -> UiResult<()> {
    check_non_negative(what, value.x)?;
    check_non_negative(what, value.y)
}

fn check_order(min: Vec2, max: Vec2) -> UiResult<()> {
    if max.x < min.x || max.y < min.y {
        return Err(UiError::MaxBelowMin {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: f32, height: f32) -> Option<ParentFrame> {
        Some(ParentFrame {
            rect: Rect::new(0.0, 0.0, width, height),
            padding: Insets::ZERO,
        })
    }

    fn half() -> Transform {
        let mut transform = Transform::relative();
        transform.set_relative_size(Vec2::new(0.5, 0.5)).unwrap();
        transform
    }

    #[test]
    fn test_alignment_anchors() {
        let mut transform = half();

        assert_eq!(transform.compute(frame(200.0, 100.0)), Rect::new(0.0, 0.0, 100.0, 50.0));

        transform.set_alignment(Alignment::Center);
        assert_eq!(transform.compute(frame(200.0, 100.0)), Rect::new(50.0, 25.0, 100.0, 50.0));

        transform.set_alignment(Alignment::BottomRight);
        assert_eq!(transform.compute(frame(200.0, 100.0)), Rect::new(100.0, 50.0, 100.0, 50.0));
    }

    #[test]
    fn test_ratio_shrinks_oversized_axis() {
        let mut transform = Transform::relative();
        transform.set_ratio(Some(Vec2::new(1.0, 1.0))).unwrap();

        let rect = transform.compute(frame(200.0, 50.0));
        assert_eq!(rect.size(), Vec2::new(50.0, 50.0));

        let rect = transform.compute(frame(50.0, 200.0));
        assert_eq!(rect.size(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_ratio_on_absolute() {
        let mut transform = Transform::absolute(Vec2::new(5.0, 5.0), Vec2::new(160.0, 40.0)).unwrap();
        transform.set_ratio(Some(Vec2::new(2.0, 1.0))).unwrap();

        assert_eq!(transform.compute(None), Rect::new(5.0, 5.0, 80.0, 40.0));
    }

    #[test]
    fn test_min_max_clamp() {
        let mut transform = half();
        transform.set_min_size(Vec2::new(120.0, 0.0)).unwrap();
        transform.set_max_size(Vec2::new(500.0, 20.0)).unwrap();

        let rect = transform.compute(frame(200.0, 100.0));
        assert_eq!(rect.size(), Vec2::new(120.0, 20.0));
    }

    #[test]
    fn test_offset_uses_full_parent_size() {
        let mut transform = half();
        transform.set_relative_offset(Vec2::new(0.1, 0.0)).unwrap();
        let parent = ParentFrame {
            rect: Rect::new(0.0, 0.0, 200.0, 100.0),
            padding: Insets::new(20.0, 10.0, 20.0, 10.0),
        };

        let rect = transform.compute(Some(parent));
        // Padded reference is (20, 10, 160, 80); offset is 10% of 200.
        assert_eq!(rect, Rect::new(40.0, 10.0, 80.0, 40.0));

        transform.set_ignore_parent_padding(true);
        assert_eq!(transform.compute(Some(parent)), Rect::new(20.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_zero_parent_yields_zero_size() {
        let transform = half();
        assert_eq!(transform.compute(frame(0.0, 0.0)).size(), Vec2::ZERO);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        let mut transform = Transform::relative();

        assert!(transform.set_relative_size(Vec2::new(-0.5, 1.0)).is_err());
        assert!(transform.set_ratio(Some(Vec2::new(0.0, 1.0))).is_err());

        transform.set_min_size(Vec2::new(10.0, 10.0)).unwrap();
        assert!(matches!(
            transform.set_max_size(Vec2::new(5.0, 50.0)),
            Err(UiError::MaxBelowMin { .. })
        ));
        assert_eq!(transform.max_size(), Vec2::INFINITY);
    }

    #[test]
    fn test_unchanged_setter_keeps_clean() {
        let mut transform = half();
        transform.store(Rect::ZERO);

        transform.set_relative_size(Vec2::new(0.5, 0.5)).unwrap();
        assert!(!transform.is_dirty());

        transform.set_relative_size(Vec2::new(0.25, 0.5)).unwrap();
        assert!(transform.is_dirty());
    }

    #[test]
    fn test_fraction_of_guards_zero_reference() {
        let (fraction, complete) =
            Transform::fraction_of(Vec2::new(0.3, 0.3), (Some(50.0), Some(10.0)), Vec2::new(200.0, 0.0));

        assert!(!complete);
        assert_eq!(fraction, Vec2::new(0.25, 0.3));
    }
}
