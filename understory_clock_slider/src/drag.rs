// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angular drag state: which handle is captured and how far it has turned.
//!
//! Raw pointer angles from [`pointer_to_angle`](crate::angle::pointer_to_angle)
//! jump between ~2π and ~0 when the pointer crosses 12 o'clock. [`AngularDrag`]
//! remembers the previous reading and unwraps that jump so a handle follows
//! the pointer continuously around the ring.
//!
//! ## Usage
//!
//! 1) Call [`AngularDrag::start`] with the captured [`Handle`] and the pointer angle at press.
//! 2) On each move, call [`AngularDrag::update`] with the handle's current angle and the new
//!    pointer angle; it returns the handle's next angle.
//! 3) End the drag with [`AngularDrag::end`], which reports the handle that was released.
//!
//! ## Minimal example
//!
//! ```
//! use understory_clock_slider::drag::{AngularDrag, Handle};
//!
//! let mut drag = AngularDrag::default();
//! let deg = f64::to_radians;
//!
//! assert!(drag.start(Handle::Start, deg(358.0)));
//!
//! // Crossing 12 o'clock moves the handle 4° forward instead of 356° back.
//! let next = drag.update(deg(358.0), deg(2.0)).unwrap();
//! assert!((next - deg(2.0)).abs() < 1e-12);
//!
//! assert_eq!(drag.end(), Some(Handle::Start));
//! assert!(!drag.is_dragging());
//! ```

use core::f64::consts::{FRAC_PI_2, TAU};

use crate::angle::wrap_angle;

/// Pointer readings above this angle are "just left of 12 o'clock".
const UPPER_LEFT: f64 = 3.0 * FRAC_PI_2;
/// Pointer readings below this angle are "just right of 12 o'clock".
const UPPER_RIGHT: f64 = FRAC_PI_2;

/// One of the two draggable markers on the ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The handle marking the start of the selected interval.
    Start,
    /// The handle marking the end of the selected interval.
    End,
}

/// Tracks the captured handle and the last sampled pointer angle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AngularDrag {
    /// Handle captured by the active drag, if any.
    pub captured: Option<Handle>,
    /// Pointer angle sampled by the previous press or move. Meaningless while idle.
    pub previous_angle: f64,
}

impl AngularDrag {
    /// Capture `handle` with the pointer at `pointer_angle`.
    ///
    /// Only one handle may be captured at a time: returns `false` and leaves
    /// the state untouched if a drag is already active.
    pub fn start(&mut self, handle: Handle, pointer_angle: f64) -> bool {
        if self.captured.is_some() {
            return false;
        }
        self.captured = Some(handle);
        self.previous_angle = pointer_angle;
        true
    }

    /// Advance the captured handle from `current` toward the pointer at `pointer_angle`.
    ///
    /// Returns the handle's next angle in `[0, 2π)`, or `None` when nothing is captured.
    pub fn update(&mut self, current: f64, pointer_angle: f64) -> Option<f64> {
        self.captured?;
        let next = advance_angle(current, self.previous_angle, pointer_angle);
        self.previous_angle = pointer_angle;
        Some(next)
    }

    /// End the drag and report which handle was released, if any.
    pub fn end(&mut self) -> Option<Handle> {
        self.captured.take()
    }

    /// The captured handle, if a drag is active.
    #[inline]
    pub fn captured(&self) -> Option<Handle> {
        self.captured
    }

    /// Returns `true` while a handle is captured.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.captured.is_some()
    }
}

/// Apply the pointer movement from `previous` to `pointer` to `current`.
///
/// A pointer that crosses 12 o'clock produces readings on opposite sides of
/// the 0/2π seam; `previous` is shifted by one revolution in the direction
/// of travel before taking the difference. The result is brought back into
/// `[0, 2π)` with a single wrap.
pub fn advance_angle(current: f64, previous: f64, pointer: f64) -> f64 {
    let previous = if previous > UPPER_LEFT && pointer < UPPER_RIGHT {
        // Clockwise through 12 o'clock.
        previous - TAU
    } else if previous < UPPER_RIGHT && pointer > UPPER_LEFT {
        // Counter-clockwise through 12 o'clock.
        previous + TAU
    } else {
        previous
    };
    wrap_angle(current + (pointer - previous))
}
