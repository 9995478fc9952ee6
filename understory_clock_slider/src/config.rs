// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration.
//!
//! A [`SliderConfig`] is read when the slider is built and can only be replaced
//! as a whole. Sizes are preconditions rather than checked inputs: widths and
//! text sizes are expected to be positive.

use kurbo::{Cap, Stroke};
use peniko::Color;

use crate::angle::HourCycle;
use crate::canvas::IconId;

/// How the selected duration is shown in the center of the dial.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricMode {
    /// Decimal hours with one decimal place, e.g. `2.5hr`.
    #[default]
    Counter,
    /// Hours and minutes, e.g. `02:30`.
    Clock,
}

impl MetricMode {
    /// Look up a mode by declaration index, falling back to [`MetricMode::Counter`].
    pub const fn from_ordinal(ordinal: u32) -> Self {
        match ordinal {
            1 => Self::Clock,
            _ => Self::Counter,
        }
    }
}

/// Appearance and initial state of a [`ClockSlider`](crate::ClockSlider).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SliderConfig {
    /// Stroke width of the ring; also sets the icon size and handle hit radius.
    pub border_width: f64,
    /// Font size of the duration readout.
    pub metric_text_size: f64,
    /// Color of the ring and the tick marks.
    pub border_color: Color,
    /// Color of the selected arc and the duration readout.
    pub fill_color: Color,
    /// Color of the hour labels.
    pub tick_text_color: Color,
    /// Icon drawn on the start handle; `None` draws nothing.
    pub start_icon: Option<IconId>,
    /// Icon drawn on the end handle; `None` draws nothing.
    pub end_icon: Option<IconId>,
    /// 12- or 24-hour dial.
    pub hour_cycle: HourCycle,
    /// Initial start of the selection, in hours.
    pub start_hours: f64,
    /// Initial end of the selection, in hours.
    pub end_hours: f64,
    /// Format of the duration readout.
    pub metric_mode: MetricMode,
}

impl SliderConfig {
    /// Default [`SliderConfig::border_width`].
    pub const DEFAULT_BORDER_WIDTH: f64 = 72.0;
    /// Default [`SliderConfig::metric_text_size`].
    pub const DEFAULT_METRIC_TEXT_SIZE: f64 = 130.0;
    /// Default [`SliderConfig::border_color`].
    pub const DEFAULT_BORDER_COLOR: Color = Color::from_rgba8(0xcc, 0xcc, 0xcc, 0xff);
    /// Default [`SliderConfig::fill_color`].
    pub const DEFAULT_FILL_COLOR: Color = Color::from_rgba8(0xff, 0xff, 0x00, 0xff);
    /// Default [`SliderConfig::tick_text_color`].
    pub const DEFAULT_TICK_TEXT_COLOR: Color = Color::from_rgba8(0x00, 0x00, 0x00, 0xff);

    /// Builder-style method to set the ring stroke width.
    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = width;
        self
    }

    /// Builder-style method to set the readout font size.
    pub fn with_metric_text_size(mut self, size: f64) -> Self {
        self.metric_text_size = size;
        self
    }

    /// Builder-style method to set the ring and tick color.
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Builder-style method to set the selection and readout color.
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Builder-style method to set the hour label color.
    pub fn with_tick_text_color(mut self, color: Color) -> Self {
        self.tick_text_color = color;
        self
    }

    /// Builder-style method to set the start handle icon.
    pub fn with_start_icon(mut self, icon: Option<IconId>) -> Self {
        self.start_icon = icon;
        self
    }

    /// Builder-style method to set the end handle icon.
    pub fn with_end_icon(mut self, icon: Option<IconId>) -> Self {
        self.end_icon = icon;
        self
    }

    /// Builder-style method to choose a 12- or 24-hour dial.
    pub fn with_hour_cycle(mut self, cycle: HourCycle) -> Self {
        self.hour_cycle = cycle;
        self
    }

    /// Builder-style method to set the initial selection start.
    pub fn with_start_hours(mut self, hours: f64) -> Self {
        self.start_hours = hours;
        self
    }

    /// Builder-style method to set the initial selection end.
    pub fn with_end_hours(mut self, hours: f64) -> Self {
        self.end_hours = hours;
        self
    }

    /// Builder-style method to set the readout format.
    pub fn with_metric_mode(mut self, mode: MetricMode) -> Self {
        self.metric_mode = mode;
        self
    }

    /// Half the side of the square an icon is drawn into.
    #[inline]
    pub fn icon_half_width(&self) -> f64 {
        self.border_width / 2.0
    }

    /// Stroke shared by the ring and the selected arc.
    pub fn ring_stroke(&self) -> Stroke {
        Stroke::new(self.border_width).with_caps(Cap::Round)
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            border_width: Self::DEFAULT_BORDER_WIDTH,
            metric_text_size: Self::DEFAULT_METRIC_TEXT_SIZE,
            border_color: Self::DEFAULT_BORDER_COLOR,
            fill_color: Self::DEFAULT_FILL_COLOR,
            tick_text_color: Self::DEFAULT_TICK_TEXT_COLOR,
            start_icon: Some(IconId::DEFAULT_START),
            end_icon: Some(IconId::DEFAULT_END),
            hour_cycle: HourCycle::Twelve,
            start_hours: 0.0,
            end_hours: 0.0,
            metric_mode: MetricMode::Counter,
        }
    }
}
