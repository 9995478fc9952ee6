// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing operations emitted by the slider and the backend trait that consumes them.
//!
//! The slider never talks to a concrete renderer. Each frame is expressed as a
//! short sequence of plain-data [`DrawOp`]s pushed into a [`Canvas`]; hosts
//! implement the trait on top of whatever 2D API they have. Images and fonts
//! stay on the host side: icons are referenced by opaque [`IconId`] and text
//! is measured through [`Canvas::measure_text`].
//!
//! [`RecordingCanvas`] is a small implementation that only logs ops, for tests
//! and debugging that want to assert on what a frame drew.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Arc, Line, Point, Rect, Stroke};
use peniko::Color;

/// Advance of one character as a fraction of the font size, for [`approximate_text_bounds`].
pub const APPROX_ADVANCE: f64 = 0.6;
/// Height above the baseline as a fraction of the font size, for [`approximate_text_bounds`].
pub const APPROX_ASCENT: f64 = 0.72;

/// Identifier for an externally loaded icon image.
///
/// The slider does not load or decode images; the host maps ids to whatever
/// image resource its renderer uses.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconId(pub u32);

impl IconId {
    /// Placeholder id used for the start handle when no icon is configured.
    pub const DEFAULT_START: Self = Self(0);
    /// Placeholder id used for the end handle when no icon is configured.
    pub const DEFAULT_END: Self = Self(1);
}

/// Size and color of a run of text.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in local units.
    pub size: f64,
    /// Fill color.
    pub color: Color,
}

/// A single drawing operation.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Stroke an elliptical arc.
    StrokeArc {
        /// Arc geometry; angles are in radians, clockwise in y-down space.
        arc: Arc,
        /// Stroke parameters.
        stroke: Stroke,
        /// Stroke color.
        color: Color,
    },
    /// Stroke a straight segment.
    StrokeLine {
        /// Segment geometry.
        line: Line,
        /// Stroke parameters.
        stroke: Stroke,
        /// Stroke color.
        color: Color,
    },
    /// Draw an icon scaled into `bounds`.
    Icon {
        /// Icon to draw.
        icon: IconId,
        /// Destination rectangle.
        bounds: Rect,
    },
    /// Fill a run of text.
    Text {
        /// Text content.
        text: String,
        /// Left end of the baseline.
        origin: Point,
        /// Size and color.
        style: TextStyle,
    },
}

/// A backend that accepts slider drawing operations.
pub trait Canvas {
    /// Bounds of `text` relative to a baseline origin at `(0, 0)`.
    ///
    /// Like most text APIs, glyphs above the baseline have negative y.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Rect;

    /// Apply a drawing operation.
    fn draw(&mut self, op: DrawOp);
}

/// Convenience helpers layered over [`Canvas`].
pub trait CanvasExt: Canvas {
    /// Stroke `arc` with `stroke` in `color`.
    fn stroke_arc(&mut self, arc: Arc, stroke: Stroke, color: Color) {
        self.draw(DrawOp::StrokeArc { arc, stroke, color });
    }

    /// Stroke `line` with `stroke` in `color`.
    fn stroke_line(&mut self, line: Line, stroke: Stroke, color: Color) {
        self.draw(DrawOp::StrokeLine {
            line,
            stroke,
            color,
        });
    }

    /// Draw `icon` into `bounds`.
    fn draw_icon(&mut self, icon: IconId, bounds: Rect) {
        self.draw(DrawOp::Icon { icon, bounds });
    }

    /// Draw `text` so the center of its measured bounds lands on `center`.
    fn draw_text_centered(&mut self, text: &str, center: Point, style: TextStyle) {
        let bounds = self.measure_text(text, &style);
        let origin = center - bounds.center().to_vec2();
        self.draw(DrawOp::Text {
            text: text.into(),
            origin,
            style,
        });
    }
}

impl<C: Canvas + ?Sized> CanvasExt for C {}

/// Fixed-advance estimate of text bounds, for backends without font metrics.
pub fn approximate_text_bounds(text: &str, size: f64) -> Rect {
    let width = text.chars().count() as f64 * size * APPROX_ADVANCE;
    Rect::new(0.0, -size * APPROX_ASCENT, width, 0.0)
}

/// A [`Canvas`] that records every op in order.
///
/// Text is measured with [`approximate_text_bounds`].
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded ops.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Removes and returns the recorded ops.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        core::mem::take(&mut self.ops)
    }

    /// Clears the recorded ops.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Recorded text runs, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Rect {
        approximate_text_bounds(text, style.size)
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Cap, Vec2};

    fn style() -> TextStyle {
        TextStyle {
            size: 40.0,
            color: Color::BLACK,
        }
    }

    #[test]
    fn records_ops_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.stroke_line(
            Line::new((0.0, 0.0), (10.0, 0.0)),
            Stroke::new(3.0),
            Color::WHITE,
        );
        canvas.draw_icon(IconId(7), Rect::new(0.0, 0.0, 4.0, 4.0));

        assert_eq!(canvas.ops().len(), 2);
        assert!(matches!(canvas.ops()[0], DrawOp::StrokeLine { .. }));
        assert!(matches!(
            canvas.ops()[1],
            DrawOp::Icon {
                icon: IconId(7),
                ..
            }
        ));
    }

    #[test]
    fn centered_text_offsets_by_measured_bounds() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_text_centered("12", Point::new(100.0, 100.0), style());

        // "12" at size 40 measures 48 wide and 28.8 tall above the baseline.
        let DrawOp::Text { text, origin, .. } = &canvas.ops()[0] else {
            panic!("expected a text op");
        };
        assert_eq!(text, "12");
        assert!((origin.x - 76.0).abs() < 1e-9);
        assert!((origin.y - 114.4).abs() < 1e-9);
    }

    #[test]
    fn approximate_bounds_scale_with_length() {
        let one = approximate_text_bounds("8", 10.0);
        let four = approximate_text_bounds("8888", 10.0);
        assert!((four.width() - 4.0 * one.width()).abs() < 1e-9);
        assert_eq!(one.y1, 0.0);
        assert!(one.y0 < 0.0);
        assert_eq!(approximate_text_bounds("", 10.0).width(), 0.0);
    }

    #[test]
    fn take_ops_empties_recording() {
        let mut canvas = RecordingCanvas::new();
        canvas.stroke_arc(
            Arc::new((5.0, 5.0), Vec2::new(5.0, 5.0), 0.0, 1.0, 0.0),
            Stroke::new(2.0).with_caps(Cap::Round),
            Color::BLACK,
        );
        canvas.draw_text_centered("x", Point::ORIGIN, style());

        let ops = canvas.take_ops();
        assert_eq!(ops.len(), 2);
        assert!(canvas.ops().is_empty());
        assert_eq!(canvas.texts().count(), 0);

        let mut again = RecordingCanvas::new();
        for op in ops {
            again.draw(op);
        }
        assert_eq!(again.texts().collect::<alloc::vec::Vec<_>>(), vec!["x"]);
        again.clear();
        assert!(again.ops().is_empty());
    }
}
