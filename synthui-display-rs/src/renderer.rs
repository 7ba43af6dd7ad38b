//! Stateless drawing helpers: text with an explicit style, sliders and
//! gauge clusters.
//!
//! Nothing here retains state between calls. Every helper draws through a
//! [`DrawingSurface`] and returns the surface's own error type.
//!
//! # Slider geometry
//!
//! ```text
//! vertical (x, y = top-left)     horizontal (x, y = bottom-left)
//!  ┌─┐ ← y                        ┌────┬──┬──────────┐ ← y − h
//!  │ │                            │    │██│          │
//!  ├─┤ ← y + offset               └────┴──┴──────────┘ ← y
//!  │█│   thumb                         ↑ x + offset
//!  ├─┤
//!  │ │
//!  └─┘ ← y + h
//! ```
//!
//! The vertical thumb offset depends on [`ThumbPolicy`]: under
//! [`Overrun`](ThumbPolicy::Overrun) a position of `1.0` puts the thumb
//! *below* the track (`offset = h`), under
//! [`ClampToTrack`](ThumbPolicy::ClampToTrack) it sits on the bottom edge
//! (`offset = h − thumb_h`). The horizontal slider keeps the thumb inside
//! the track for any position in `[0, 1]`. Pixel offsets truncate toward
//! zero.
//!
//! # Gauge clusters
//!
//! ```text
//!   ━━━━━━━━━━━━  ← select line (y − 3), pair 0 selected
//!   ┌───┐ ┌───┐      ┌───┐ ┌───┐   ← y
//!   │   │ │   │      │   │ │   │
//!   │   │ │███│      │███│ │   │
//!   │███│ │███│      │███│ │   │
//!   └───┘ └───┘      └───┘ └───┘   ← y + h
//!   ◄─ pair 0 ─►     ◄─ pair 1 ─►
//!   ◄──── pair_stride ───►
//! ```
//!
//! Gauges come in pairs sharing one select line. Each bar fills from the
//! bottom with `trunc(v * (h − 2) / 255)` pixels for a 0–255 reading `v`.

use core::fmt::{self, Write};

use heapless::String;
use synthui::patch::Param;

use crate::surface::{DrawingSurface, Font};

/// Capacity of the [`print_textf`] formatting buffer in bytes.
pub const PRINTF_BUFFER_LEN: usize = 80;

// ── Text ─────────────────────────────────────────────────────────────────

/// Font and colors for one text draw.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<C> {
    /// `None` keeps whatever font the surface currently has.
    pub font: Option<Font>,
    pub foreground: C,
    pub background: C,
}

impl<C> TextStyle<C> {
    pub const fn new(font: Option<Font>, foreground: C, background: C) -> Self {
        Self {
            font,
            foreground,
            background,
        }
    }
}

/// Print `text` with its left edge at `x` and baseline at `y`.
///
/// A font in `style` is selected on the surface first and stays selected
/// afterwards.
pub fn print_text<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    style: &TextStyle<S::Color>,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    if let Some(font) = style.font {
        surface.set_font(Some(font));
    }
    surface.set_text_color(style.foreground, style.background);
    surface.set_cursor(x, y);
    surface.print(text)
}

/// Like [`print_text`] with `format_args!` input. Output longer than
/// [`PRINTF_BUFFER_LEN`] bytes is cut at the last whole character that fits.
///
/// ```
/// # use synthui_display::renderer::{print_textf, TextStyle};
/// # use synthui_display::surface::GfxSurface;
/// # use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor};
/// let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
/// let mut surface = GfxSurface::monochrome(&mut display);
/// let style = TextStyle::new(None, BinaryColor::On, BinaryColor::Off);
/// print_textf(&mut surface, 0, 8, format_args!("{}/{}", 3, 8), &style).unwrap();
/// ```
pub fn print_textf<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    args: fmt::Arguments<'_>,
    style: &TextStyle<S::Color>,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    let mut buffer = TruncatingWriter::default();
    let _ = buffer.write_fmt(args);
    print_text(surface, x, y, &buffer.text, style)
}

/// `fmt::Write` sink that keeps what fits and silently drops the rest.
#[derive(Default)]
struct TruncatingWriter {
    text: String<PRINTF_BUFFER_LEN>,
}

impl Write for TruncatingWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// ── Sliders ──────────────────────────────────────────────────────────────

/// How far the vertical slider's thumb may travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThumbPolicy {
    /// `offset = trunc(pos * h)`; the thumb overruns the track at `pos = 1`.
    #[default]
    Overrun,
    /// `offset = trunc(pos * (h - thumb_h))` with `pos` clamped to `[0, 1]`.
    ClampToTrack,
}

/// Track and thumb dimensions of a slider.
///
/// A thumb dimension of `0` means "same as the track".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderStyle {
    pub width: u32,
    pub height: u32,
    pub thumb_width: u32,
    pub thumb_height: u32,
    pub policy: ThumbPolicy,
}

impl SliderStyle {
    /// Full-height scrollbar on a 64 px tall panel.
    pub const VERTICAL: Self = Self {
        width: 5,
        height: 63,
        thumb_width: 0,
        thumb_height: 10,
        policy: ThumbPolicy::Overrun,
    };

    /// Full-width bar on a 128 px wide panel.
    pub const HORIZONTAL: Self = Self {
        width: 127,
        height: 5,
        thumb_width: 10,
        thumb_height: 0,
        policy: ThumbPolicy::Overrun,
    };

    pub const fn with_policy(self, policy: ThumbPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn thumb_size(&self) -> (u32, u32) {
        let w = if self.thumb_width == 0 { self.width } else { self.thumb_width };
        let h = if self.thumb_height == 0 { self.height } else { self.thumb_height };
        (w, h)
    }

    /// Thumb offset from the top of a vertical track.
    pub fn vertical_thumb_offset(&self, pos: f32) -> i32 {
        let (_, thumb_h) = self.thumb_size();
        match self.policy {
            ThumbPolicy::Overrun => (pos * self.height as f32) as i32,
            ThumbPolicy::ClampToTrack => {
                let travel = self.height.saturating_sub(thumb_h);
                (clamp_unit(pos) * travel as f32) as i32
            }
        }
    }

    /// Thumb offset from the left of a horizontal track.
    pub fn horizontal_thumb_offset(&self, pos: f32) -> i32 {
        let (thumb_w, _) = self.thumb_size();
        let pos = match self.policy {
            ThumbPolicy::Overrun => pos,
            ThumbPolicy::ClampToTrack => clamp_unit(pos),
        };
        (pos * self.width.saturating_sub(thumb_w) as f32) as i32
    }
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self::VERTICAL
    }
}

fn clamp_unit(pos: f32) -> f32 {
    if pos.is_nan() {
        0.0
    } else {
        pos.clamp(0.0, 1.0)
    }
}

/// Vertical slider with its track's top-left corner at `(x, y)`.
pub fn draw_vertical_slider<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    pos: f32,
    style: &SliderStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    let (thumb_w, thumb_h) = style.thumb_size();
    surface.draw_rect(x, y, style.width, style.height, color)?;
    surface.fill_rect(x, y + style.vertical_thumb_offset(pos), thumb_w, thumb_h, color)
}

/// Horizontal slider with its track's bottom-left corner at `(x, y)`.
pub fn draw_horizontal_slider<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    pos: f32,
    style: &SliderStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    let (thumb_w, thumb_h) = style.thumb_size();
    let top = y - style.height as i32;
    surface.draw_rect(x, top, style.width, style.height, color)?;
    surface.fill_rect(x + style.horizontal_thumb_offset(pos), top, thumb_w, thumb_h, color)
}

/// [`draw_vertical_slider`] at the parameter's normalized position.
pub fn draw_param_vertical_slider<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    param: &Param,
    style: &SliderStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    draw_vertical_slider(surface, x, y, param.normalized_position(), style, color)
}

/// [`draw_horizontal_slider`] at the parameter's normalized position.
pub fn draw_param_horizontal_slider<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    param: &Param,
    style: &SliderStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    draw_horizontal_slider(surface, x, y, param.normalized_position(), style, color)
}

// ── Gauge clusters ───────────────────────────────────────────────────────

/// Geometry of a [`draw_gauge_cluster`] bar group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeStyle {
    /// Outline width of one bar.
    pub width: u32,
    /// Outline height of one bar.
    pub height: u32,
    /// Distance from one pair's left edge to the next pair's.
    pub pair_stride: u32,
}

impl GaugeStyle {
    /// 5×40 bars, three bar-spacings per pair.
    pub const DEFAULT: Self = Self {
        width: 5,
        height: 40,
        pair_stride: 21,
    };

    /// Left edge of gauge `index` relative to the cluster origin.
    pub fn gauge_x(&self, index: usize) -> i32 {
        let pair = (index / 2) as i32;
        let side = (index % 2) as i32;
        pair * self.pair_stride as i32 + side * (self.width as i32 + 2)
    }

    /// Filled pixel rows inside the outline for a 0–255 reading.
    pub fn fill_height(&self, gauge: u8) -> u32 {
        gauge as u32 * self.height.saturating_sub(2) / 255
    }
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bar gauges for 0–255 `readings` with the cluster's top-left corner at
/// `(x, y)`, plus a select line above pair `selected`.
///
/// An odd count leaves the last pair half filled.
pub fn draw_gauge_cluster<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    readings: &[u8],
    selected: Option<usize>,
    style: &GaugeStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    draw_gauges(surface, x, y, readings.iter().copied(), selected, style, color)
}

/// [`draw_gauge_cluster`] reading each parameter's
/// [`gauge_value`](Param::gauge_value).
pub fn draw_param_gauge_cluster<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    params: &[Param],
    selected: Option<usize>,
    style: &GaugeStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    draw_gauges(surface, x, y, params.iter().map(Param::gauge_value), selected, style, color)
}

fn draw_gauges<S>(
    surface: &mut S,
    x: i32,
    y: i32,
    readings: impl Iterator<Item = u8>,
    selected: Option<usize>,
    style: &GaugeStyle,
    color: S::Color,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
{
    let mut count = 0;
    for (index, gauge) in readings.enumerate() {
        let left = x + style.gauge_x(index);
        surface.draw_rect(left, y, style.width, style.height, color)?;

        let fill = style.fill_height(gauge);
        if fill > 0 {
            let top = y + style.height as i32 - 1 - fill as i32;
            surface.fill_rect(left + 1, top, style.width.saturating_sub(2), fill, color)?;
        }
        count = index + 1;
    }

    match selected {
        Some(pair) if pair < count.div_ceil(2) => surface.fill_rect(
            x + style.gauge_x(pair * 2),
            y - 3,
            style.width * 2 + 2,
            2,
            color,
        ),
        _ => Ok(()),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
