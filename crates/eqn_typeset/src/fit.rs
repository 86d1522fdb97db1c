//! Box fitting: grow text to fill a container, then trim the container.

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ScalerError;

pub const DEFAULT_TARGET_FRACTION: f64 = 0.95;

/// Upper bound on growth steps; a linear renderer needs one.
pub const MAX_GROW_ITERATIONS: usize = 32;

// Each step overshoots the exact ratio by a few ulps so float rounding can
// never leave the loop one hair short of the target forever.
const STEP_OVERSHOOT: f64 = 1.0 + 4.0 * f64::EPSILON;

/// A rectangle in absolute units (points), origin at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Container {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Something whose extent inside a container grows with a size attribute.
///
/// Scaling must be monotonic: a factor above 1 never shrinks the extent.
pub trait Scalable {
    /// Width and height as fractions of the container's width and height.
    fn fraction_of(&self, container: &Container) -> (f64, f64);

    /// Multiply the size attribute (font size) by `factor`.
    fn scale_by(&mut self, factor: f64);
}

fn measured_size<T: Scalable + ?Sized>(
    block: &T,
    container: &Container,
) -> Result<f64, ScalerError> {
    let (width, height) = block.fraction_of(container);
    let size = width.max(height);
    if !(size.is_finite() && size > 0.0) {
        return Err(ScalerError::DegenerateRender { width, height });
    }
    Ok(size)
}

/// Grow `block` until its larger relative dimension reaches `target`.
///
/// A block already at or beyond the target is returned unchanged.
pub fn grow_to_fill<T: Scalable>(
    mut block: T,
    container: &Container,
    target: f64,
) -> Result<T, ScalerError> {
    if !(target > 0.0 && target <= 1.0) {
        return Err(ScalerError::InvalidTarget(target));
    }

    let mut size = measured_size(&block, container)?;
    let mut iterations = 0;
    while size < target {
        if iterations == MAX_GROW_ITERATIONS {
            return Err(ScalerError::ScalingDidNotConverge {
                iterations,
                size,
                target,
            });
        }

        block.scale_by(target / size * STEP_OVERSHOOT);
        let next = measured_size(&block, container)?;
        iterations += 1;
        trace!(iteration = iterations, size = next, "grew block");

        if next <= size {
            return Err(ScalerError::ScalingDidNotConverge {
                iterations,
                size: next,
                target,
            });
        }
        size = next;
    }

    debug!(iterations, size, target, "block fills container");
    Ok(block)
}

/// Shrink the non-dominant dimension of `container` by the block's aspect.
///
/// With `w`, `h` the block's fractions of the container: a wide block
/// (`w > h`) scales the height by `h / w`, otherwise the width is scaled by
/// `w / h`. The origin is kept and no dimension ever grows. The resulting
/// container has the same aspect as the block itself.
pub fn shrink_container_to_aspect<T: Scalable + ?Sized>(
    container: Container,
    block: &T,
) -> Result<Container, ScalerError> {
    let (w, h) = block.fraction_of(&container);
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(ScalerError::DegenerateRender {
            width: w,
            height: h,
        });
    }

    let mut shrunk = container;
    if w > h {
        shrunk.height = container.height * h / w;
    } else {
        shrunk.width = container.width * w / h;
    }
    debug!(
        from_width = container.width,
        from_height = container.height,
        to_width = shrunk.width,
        to_height = shrunk.height,
        "trimmed container"
    );
    Ok(shrunk)
}
