// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between pointer angles, hour values, and drawing angles.
//!
//! Three conventions meet on the clock face:
//!
//! - **Pointer angles** are radians in `[0, 2π)`, measured clockwise from
//!   12 o'clock in screen space (y grows downward).
//! - **Hour values** are in `[0, modulus)`, where the modulus is 12 or 24 as
//!   selected by [`HourCycle`].
//! - **Drawing angles** are degrees in the math convention (counter-clockwise,
//!   y up) and place ticks and icons on the 12-division face. A point at radius
//!   `r` sits at `(cx + r·cos a, cy − r·sin a)`.
//!
//! ## Minimal example
//!
//! ```
//! use understory_clock_slider::angle::{HourCycle, angle_to_hours, hours_to_angle, minute_bucket};
//!
//! let angle = hours_to_angle(3.0, HourCycle::Twelve);
//! assert!((angle - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! assert!((angle_to_hours(angle, HourCycle::Twelve) - 3.0).abs() < 1e-12);
//!
//! // Minutes are floored to a 5-minute bucket: 1.98h is 58.8 minutes past the hour.
//! assert_eq!(minute_bucket(1.98), 55);
//! ```

use core::f64::consts::TAU;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `atan2`
use kurbo::Point;

/// Drawing angle of hour `0` on the face, in degrees.
pub const MIN_DRAW_ANGLE: f64 = 90.0;
/// Drawing angle of hour [`MAX_SCALE`] on the face, in degrees.
pub const MAX_DRAW_ANGLE: f64 = -240.0;
/// Lowest labelled value on the 12-division face.
pub const MIN_SCALE: f64 = 0.0;
/// Highest labelled value on the 12-division face.
pub const MAX_SCALE: f64 = 11.0;

/// Width of a minute bucket reported for handle positions.
pub const MINUTE_BUCKET: u32 = 5;

/// Selects between a 12-hour and a 24-hour dial.
///
/// The ring is always drawn with 12 divisions; a 24-hour cycle halves the
/// angular size of an hour and doubles the major tick labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HourCycle {
    /// Hours in `[0, 12)`, 30° per hour.
    #[default]
    Twelve,
    /// Hours in `[0, 24)`, 15° per hour.
    TwentyFour,
}

impl HourCycle {
    /// Returns the cycle for an `is_24_hour` flag.
    #[inline]
    pub const fn from_is_24_hour(is_24_hour: bool) -> Self {
        if is_24_hour {
            Self::TwentyFour
        } else {
            Self::Twelve
        }
    }

    /// Returns `true` for [`HourCycle::TwentyFour`].
    #[inline]
    pub const fn is_24_hour(self) -> bool {
        matches!(self, Self::TwentyFour)
    }

    /// Number of hours in one revolution of the ring.
    #[inline]
    pub const fn hours(self) -> u32 {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }

    /// Number of minutes in one revolution of the ring.
    #[inline]
    pub const fn minutes(self) -> u32 {
        self.hours() * 60
    }

    /// The modulus applied to hour values, as a float.
    #[inline]
    pub fn modulus(self) -> f64 {
        f64::from(self.hours())
    }

    /// Angular size of one hour on the ring, in degrees.
    #[inline]
    pub const fn degrees_per_hour(self) -> f64 {
        match self {
            Self::Twelve => 30.0,
            Self::TwentyFour => 15.0,
        }
    }
}

/// Angle of `pos` around `center`, clockwise from 12 o'clock, in `[0, 2π)`.
///
/// The reading jumps from just under 2π back to 0 when the pointer crosses
/// 12 o'clock; [`crate::drag`] unwraps that discontinuity during a drag.
pub fn pointer_to_angle(pos: Point, center: Point) -> f64 {
    // atan2(dx, up) is atan(dx / up) with the quadrant corrections applied:
    // +π for both lower quadrants and +2π for the upper-left one.
    let angle = (pos.x - center.x).atan2(center.y - pos.y);
    if angle < 0.0 {
        wrap_angle(angle + TAU)
    } else {
        angle
    }
}

/// Pointer angle (radians) of an hour value.
#[inline]
pub fn hours_to_angle(hours: f64, cycle: HourCycle) -> f64 {
    (hours * cycle.degrees_per_hour()).to_radians()
}

/// Hour value of a pointer angle (radians).
#[inline]
pub fn angle_to_hours(angle: f64, cycle: HourCycle) -> f64 {
    (angle.to_degrees() % 360.0) / cycle.degrees_per_hour()
}

/// Drawing angle, in degrees, of a value on the 12-division face.
///
/// Maps `0..=11` linearly onto `90°..=-240°`, i.e. 30° clockwise per step
/// starting at 12 o'clock.
#[inline]
pub fn draw_angle(value: f64) -> f64 {
    MIN_DRAW_ANGLE + ((MAX_DRAW_ANGLE - MIN_DRAW_ANGLE) / (MAX_SCALE - MIN_SCALE)) * (value - MIN_SCALE)
}

/// Reduce `hours` into `[0, modulus)`.
pub fn normalize_hours(hours: f64, cycle: HourCycle) -> f64 {
    let modulus = cycle.modulus();
    let reduced = hours % modulus;
    if reduced < 0.0 {
        let lifted = reduced + modulus;
        // A tiny negative remainder can round up to the modulus itself.
        if lifted < modulus { lifted } else { 0.0 }
    } else {
        reduced
    }
}

/// Bring an angle that is at most one revolution out of range back into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = if angle >= TAU {
        angle - TAU
    } else if angle < 0.0 {
        angle + TAU
    } else {
        angle
    };
    if wrapped < TAU { wrapped } else { 0.0 }
}

/// Minutes past the hour of `hours`, floored to a multiple of [`MINUTE_BUCKET`].
///
/// This floors rather than rounds: `1.98` (58.8 minutes) reports `55`.
pub fn minute_bucket(hours: f64) -> u32 {
    let minute = truncate_to_u32(hours * 60.0 % 60.0);
    minute - minute % MINUTE_BUCKET
}

/// Sweep of the selected arc from `start` to `end`, in degrees.
///
/// When `end` is before `start` the selection crosses noon/midnight and a
/// full cycle is added.
pub fn fill_sweep_degrees(start: f64, end: f64, cycle: HourCycle) -> f64 {
    let hours = if end >= start {
        end - start
    } else {
        end + cycle.modulus() - start
    };
    hours * cycle.degrees_per_hour()
}

/// Length of the selection from `start` to `end`, in whole bucketed minutes.
pub fn duration_minutes(start: f64, end: f64, cycle: HourCycle) -> u32 {
    let start = ClockTime::from_hours(start).total_minutes();
    let end = ClockTime::from_hours(end).total_minutes();
    if end >= start {
        end - start
    } else {
        end + cycle.minutes() - start
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "hour values are normalized to a small non-negative range before truncation"
)]
fn truncate_to_u32(value: f64) -> u32 {
    value as u32
}

/// A handle position reported as whole hours and a bucketed minute.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClockTime {
    /// Whole hours, truncated.
    pub hour: u32,
    /// Minutes past the hour, floored to a multiple of [`MINUTE_BUCKET`].
    pub minute: u32,
}

impl ClockTime {
    /// Split a normalized hour value into hour and bucketed minute.
    pub fn from_hours(hours: f64) -> Self {
        Self {
            hour: truncate_to_u32(hours),
            minute: minute_bucket(hours),
        }
    }

    /// Minutes since the start of the cycle.
    #[inline]
    pub const fn total_minutes(self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use core::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn center() -> Point {
        Point::new(100.0, 100.0)
    }

    #[test]
    fn pointer_angle_is_clockwise_from_top() {
        let c = center();
        assert!(pointer_to_angle(Point::new(100.0, 0.0), c).abs() < EPS);
        assert!((pointer_to_angle(Point::new(200.0, 100.0), c) - FRAC_PI_2).abs() < EPS);
        assert!((pointer_to_angle(Point::new(100.0, 200.0), c) - PI).abs() < EPS);
        assert!((pointer_to_angle(Point::new(0.0, 100.0), c) - 3.0 * FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn pointer_angle_quadrants() {
        let c = center();
        // Upper right, lower right, lower left, upper left.
        let cases = [
            (Point::new(150.0, 50.0), 45.0),
            (Point::new(150.0, 150.0), 135.0),
            (Point::new(50.0, 150.0), 225.0),
            (Point::new(50.0, 50.0), 315.0),
        ];
        for (pos, degrees) in cases {
            let angle = pointer_to_angle(pos, c);
            assert!(
                (angle.to_degrees() - degrees).abs() < EPS,
                "{pos:?} gave {} degrees",
                angle.to_degrees()
            );
        }
    }

    #[test]
    fn pointer_angle_stays_in_range_near_top() {
        let c = center();
        let just_left = pointer_to_angle(Point::new(100.0 - 1e-12, 0.0), c);
        assert!((0.0..TAU).contains(&just_left));
        let just_right = pointer_to_angle(Point::new(100.0 + 1e-12, 0.0), c);
        assert!((0.0..TAU).contains(&just_right));
    }

    #[test]
    fn hours_round_trip_through_angle() {
        for cycle in [HourCycle::Twelve, HourCycle::TwentyFour] {
            for raw in [0.0, 0.25, 3.0, 7.5, 11.99, 13.0, 23.5, -1.0, 30.0] {
                let hours = normalize_hours(raw, cycle);
                let back = angle_to_hours(hours_to_angle(hours, cycle), cycle);
                assert!(
                    (back - hours).abs() < EPS,
                    "{raw} in {cycle:?}: {hours} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn degrees_per_hour_follow_cycle() {
        assert!((hours_to_angle(1.0, HourCycle::Twelve).to_degrees() - 30.0).abs() < EPS);
        assert!((hours_to_angle(1.0, HourCycle::TwentyFour).to_degrees() - 15.0).abs() < EPS);
        assert!((angle_to_hours(PI, HourCycle::TwentyFour) - 12.0).abs() < EPS);
    }

    #[test]
    fn draw_angle_steps_thirty_degrees_clockwise() {
        assert!((draw_angle(0.0) - 90.0).abs() < EPS);
        assert!(draw_angle(3.0).abs() < EPS);
        assert!((draw_angle(6.0) + 90.0).abs() < EPS);
        assert!((draw_angle(11.0) + 240.0).abs() < EPS);
        assert!((draw_angle(0.2) - 84.0).abs() < EPS);
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert!((normalize_hours(13.0, HourCycle::Twelve) - 1.0).abs() < EPS);
        assert!((normalize_hours(13.0, HourCycle::TwentyFour) - 13.0).abs() < EPS);
        assert!((normalize_hours(-1.0, HourCycle::Twelve) - 11.0).abs() < EPS);
        assert!(normalize_hours(24.0, HourCycle::TwentyFour).abs() < EPS);
        assert!(normalize_hours(-1e-18, HourCycle::Twelve) < 12.0);
    }

    #[test]
    fn wrap_angle_applies_one_revolution() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < EPS);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < EPS);
        assert!(wrap_angle(-1e-18) < TAU);
        assert!((wrap_angle(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn minute_bucket_floors_to_five() {
        assert_eq!(minute_bucket(1.98), 55);
        assert_eq!(minute_bucket(0.0), 0);
        assert_eq!(minute_bucket(2.5), 30);
        assert_eq!(minute_bucket(3.07), 0);
        assert_eq!(minute_bucket(10.99), 55);
    }

    #[test]
    fn clock_time_truncates_hour() {
        let time = ClockTime::from_hours(1.98);
        assert_eq!(time, ClockTime { hour: 1, minute: 55 });
        assert_eq!(time.total_minutes(), 115);
        assert_eq!(time.to_string(), "01:55");
    }

    #[test]
    fn fill_sweep_handles_wraparound() {
        assert!(fill_sweep_degrees(0.0, 0.0, HourCycle::Twelve).abs() < EPS);
        assert!((fill_sweep_degrees(10.0, 2.0, HourCycle::Twelve) - 120.0).abs() < EPS);
        assert!((fill_sweep_degrees(23.0, 1.0, HourCycle::TwentyFour) - 30.0).abs() < EPS);
        assert!((fill_sweep_degrees(2.0, 5.0, HourCycle::Twelve) - 90.0).abs() < EPS);
    }

    #[test]
    fn duration_uses_bucketed_minutes() {
        assert_eq!(duration_minutes(0.0, 1.5, HourCycle::Twelve), 90);
        assert_eq!(duration_minutes(11.0, 1.0, HourCycle::Twelve), 120);
        assert_eq!(duration_minutes(22.5, 0.5, HourCycle::TwentyFour), 120);
        // 1.98h buckets down to 1:55.
        assert_eq!(duration_minutes(0.0, 1.98, HourCycle::Twelve), 115);
        assert_eq!(duration_minutes(4.0, 4.0, HourCycle::Twelve), 0);
    }

    #[test]
    fn hour_cycle_flags() {
        assert_eq!(HourCycle::from_is_24_hour(true), HourCycle::TwentyFour);
        assert_eq!(HourCycle::from_is_24_hour(false), HourCycle::Twelve);
        assert!(HourCycle::TwentyFour.is_24_hour());
        assert_eq!(HourCycle::Twelve.minutes(), 720);
        assert_eq!(HourCycle::default(), HourCycle::Twelve);
    }
}
