//! Placement geometry for the foreground layer
//!
//! Caller-facing offsets are expressed as four directional magnitudes and
//! two scale deltas. They collapse into a single uniform-scale affine
//! transform, applied about the page origin and then translated.

use crate::types::{OverlayError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Uniform scale followed by a translation, in PDF points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub fn new(scale: f32, dx: f32, dy: f32) -> Self {
        Self { scale, dx, dy }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// A scale that is zero, negative or not a number cannot be rendered
    pub fn is_degenerate(&self) -> bool {
        !(self.scale.is_finite() && self.scale > 0.0)
    }

    /// Offsets end up as `cm` operands, which must be real numbers
    pub fn has_finite_offset(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(OverlayError::DegenerateTransform { scale: self.scale });
        }
        if !self.has_finite_offset() {
            return Err(OverlayError::NonFiniteOffset {
                dx: self.dx,
                dy: self.dy,
            });
        }
        Ok(())
    }

    /// Operands of the `cm` operator: `[a b c d e f]`
    pub fn to_matrix(&self) -> [f32; 6] {
        [self.scale, 0.0, 0.0, self.scale, self.dx, self.dy]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Resolve directional offsets and scale deltas into a transform.
///
/// `right` and `up` are the positive directions. Nothing is clamped; a
/// non-positive scale is rejected later, at composition time.
pub fn resolve(
    up: f32,
    down: f32,
    left: f32,
    right: f32,
    scale_increase: f32,
    scale_decrease: f32,
) -> Transform {
    Transform {
        scale: 1.0 + scale_increase - scale_decrease,
        dx: right - left,
        dy: up - down,
    }
}

/// Caller-supplied placement parameters, in points and scale fractions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Adjustment {
    /// Move up (points)
    pub up: f32,
    /// Move down (points)
    pub down: f32,
    /// Move left (points)
    pub left: f32,
    /// Move right (points)
    pub right: f32,
    /// Grow by this fraction (0.1 = 10%)
    pub scale_increase: f32,
    /// Shrink by this fraction (0.1 = 10%)
    pub scale_decrease: f32,
}

impl Adjustment {
    pub fn resolve(&self) -> Transform {
        resolve(
            self.up,
            self.down,
            self.left,
            self.right,
            self.scale_increase,
            self.scale_decrease,
        )
    }

    pub(crate) fn all_finite(&self) -> bool {
        [
            self.up,
            self.down,
            self.left,
            self.right,
            self.scale_increase,
            self.scale_decrease,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
