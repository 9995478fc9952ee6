// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_clock_slider_svg --heading-base-level=0

//! SVG export canvas for Understory clock slider frames.
//!
//! [`SvgCanvas`] implements [`Canvas`] by recording draw ops and can export
//! them as an SVG document.
//!
//! This is intended for debugging and snapshots, not pixel-perfect rendering:
//! - Text is measured with a fixed-advance estimate, so centering is approximate.
//! - Icons are drawn as `<image>` placeholders whose `href` is `icon-{id}`.
//!
//! ```
//! use understory_clock_slider::{ClockSlider, SliderConfig};
//! use understory_clock_slider_svg::SvgCanvas;
//!
//! let mut slider = ClockSlider::new(SliderConfig::default().with_end_hours(2.0));
//! let mut canvas = SvgCanvas::new();
//! slider.render(&mut canvas, 400.0, 400.0);
//!
//! let svg = canvas.to_svg(400, 400);
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains(">2.0hr</text>"));
//! ```

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use kurbo::{Cap, PathEl, Shape, Stroke};
use peniko::Color;
use understory_clock_slider::canvas::approximate_text_bounds;
use understory_clock_slider::{Canvas, DrawOp, TextStyle};

/// Flattening tolerance for arcs converted to cubic Béziers.
const ARC_TOLERANCE: f64 = 0.1;

/// A recording canvas that exports SVG.
#[derive(Clone, Debug, Default)]
pub struct SvgCanvas {
    ops: Vec<DrawOp>,
}

impl SvgCanvas {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the recorded ops.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Returns the recorded draw ops.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Export the currently recorded ops as an SVG document.
    ///
    /// `width`/`height` are used both as the SVG `width`/`height` attributes and to set
    /// `viewBox="0 0 width height"`.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        for op in &self.ops {
            write_draw_op(&mut svg, op);
        }
        svg.push_str("</svg>");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> kurbo::Rect {
        approximate_text_bounds(text, style.size)
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

fn write_draw_op(out: &mut String, op: &DrawOp) {
    match op {
        DrawOp::StrokeArc { arc, stroke, color } => {
            let d = path_to_svg_d(arc.path_elements(ARC_TOLERANCE));
            let _ = write!(out, "<path d=\"{d}\" fill=\"none\"");
            write_stroke_attrs(out, stroke, *color);
            out.push_str("/>");
        }
        DrawOp::StrokeLine {
            line,
            stroke,
            color,
        } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                fmt_num(line.p0.x),
                fmt_num(line.p0.y),
                fmt_num(line.p1.x),
                fmt_num(line.p1.y),
            );
            write_stroke_attrs(out, stroke, *color);
            out.push_str("/>");
        }
        DrawOp::Icon { icon, bounds } => {
            let _ = write!(
                out,
                "<image href=\"icon-{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
                icon.0,
                fmt_num(bounds.x0),
                fmt_num(bounds.y0),
                fmt_num(bounds.width()),
                fmt_num(bounds.height()),
            );
        }
        DrawOp::Text {
            text,
            origin,
            style,
        } => {
            let (fill, alpha) = color_to_svg(style.color);
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{fill}\"",
                fmt_num(origin.x),
                fmt_num(origin.y),
                fmt_num(style.size),
            );
            if alpha < 1.0 {
                let _ = write!(out, " fill-opacity=\"{}\"", fmt_num(alpha));
            }
            out.push('>');
            escape_text(out, text);
            out.push_str("</text>");
        }
    }
}

fn write_stroke_attrs(out: &mut String, stroke: &Stroke, color: Color) {
    let (hex, alpha) = color_to_svg(color);
    let _ = write!(
        out,
        " stroke=\"{hex}\" stroke-width=\"{}\" stroke-linecap=\"{}\"",
        fmt_num(stroke.width),
        stroke_cap_svg(stroke.start_cap),
    );
    if alpha < 1.0 {
        let _ = write!(out, " stroke-opacity=\"{}\"", fmt_num(alpha));
    }
}

fn path_to_svg_d(elements: impl Iterator<Item = PathEl>) -> String {
    let mut d = String::new();
    for el in elements {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q{} {} {} {}",
                    fmt_num(p1.x),
                    fmt_num(p1.y),
                    fmt_num(p2.x),
                    fmt_num(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_num(p1.x),
                    fmt_num(p1.y),
                    fmt_num(p2.x),
                    fmt_num(p2.y),
                    fmt_num(p3.x),
                    fmt_num(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn stroke_cap_svg(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn color_to_svg(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    let a = f64::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn fmt_num(v: f64) -> String {
    // Keep output readable and stable enough for snapshots.
    if !v.is_finite() {
        return format!("{v}");
    }
    let rounded = format!("{v:.3}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => String::from("0"),
        _ => String::from(trimmed),
    }
}
