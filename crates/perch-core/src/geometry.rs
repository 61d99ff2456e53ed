//! Discrete overlay sizes and bounds clamping.
//!
//! Overlay sizes are snapped to a grid of resolutions whose width and
//! height are both multiples of 5 pixels and which match the configured
//! aspect ratio exactly. Snapping keeps repeated grow/shrink steps from
//! drifting by sub-pixel amounts.

use serde::Serialize;

use crate::{GeometryError, Rect};

const GRID: u64 = 5;

/// A window size matching an aspect ratio on the 5px grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Lazily walks widths from `aspect_w` up to `max_width`, yielding every
/// width whose derived height is exact and both sides sit on the grid.
///
/// The iterator is finite and `Clone`, so callers can restart it.
#[derive(Debug, Clone)]
pub struct ResolutionIter {
    aspect_w: u64,
    aspect_h: u64,
    next: u64,
    max_width: u64,
}

impl Iterator for ResolutionIter {
    type Item = Resolution;

    fn next(&mut self) -> Option<Resolution> {
        if self.aspect_w == 0 || self.aspect_h == 0 {
            return None;
        }
        while self.next <= self.max_width {
            let width = self.next;
            self.next += 1;
            if width % GRID != 0 {
                continue;
            }
            let scaled = width * self.aspect_h;
            if scaled % self.aspect_w != 0 {
                continue;
            }
            let height = scaled / self.aspect_w;
            if height % GRID == 0 {
                return Some(Resolution {
                    width: width as u32,
                    height: height as u32,
                });
            }
        }
        None
    }
}

/// Enumerates resolutions for `aspect_w:aspect_h` in ascending width order.
pub fn enumerate_resolutions(aspect_w: u32, aspect_h: u32, max_width: u32) -> ResolutionIter {
    ResolutionIter {
        aspect_w: u64::from(aspect_w),
        aspect_h: u64::from(aspect_h),
        next: u64::from(aspect_w).max(1),
        max_width: u64::from(max_width),
    }
}

/// Bounds `value` to `[min, max]`.
///
/// Unlike `Ord::clamp` this never panics: when `min > max` the lower
/// bound wins, so an overlay larger than the screen pins to offset 0.
pub fn clamp<T: PartialOrd>(min: T, max: T, value: T) -> T {
    let upper = if value > max { max } else { value };
    if upper < min { min } else { upper }
}

/// The resolution table for one aspect ratio, built once at setup.
#[derive(Debug, Clone)]
pub struct Resolutions {
    list: Vec<Resolution>,
}

impl Resolutions {
    /// Collects the table, rejecting aspect ratios with no grid sizes.
    pub fn new(aspect_w: u32, aspect_h: u32, max_width: u32) -> Result<Self, GeometryError> {
        if aspect_w == 0 || aspect_h == 0 {
            return Err(GeometryError::ZeroAspect { aspect_w, aspect_h });
        }
        let list: Vec<_> = enumerate_resolutions(aspect_w, aspect_h, max_width).collect();
        if list.is_empty() {
            return Err(GeometryError::NoResolutions {
                aspect_w,
                aspect_h,
                max_width,
            });
        }
        Ok(Self { list })
    }

    pub fn as_slice(&self) -> &[Resolution] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Picks the largest resolution no wider than `ratio` of the screen
    /// width that also fits the screen height.
    ///
    /// Falls back to the smallest resolution when nothing fits.
    pub fn fit(&self, ratio: f64, screen: &Rect) -> Resolution {
        // Absorb float error so e.g. 1/3 of 1920 still admits 640.
        let target = (ratio * f64::from(screen.width.max(0)) + 1e-6).floor();
        let max_height = i64::from(screen.height.max(0));
        self.list
            .iter()
            .rev()
            .find(|r| f64::from(r.width) <= target && i64::from(r.height) <= max_height)
            .or_else(|| self.list.first())
            .copied()
            .unwrap_or(Resolution {
                width: 0,
                height: 0,
            })
    }
}
