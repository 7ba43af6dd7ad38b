//! Screen layout: the [`Screen`] snapshot and the [`render_screen`] pass.
//!
//! A [`Screen`] is built from the [`Navigator`] while its mutex is held
//! and then rendered without it. Comparing two snapshots is how the UI
//! task decides whether a frame needs to be redrawn at all.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┬─┐
//! │ Lead                                     │ │  ← title_y
//! ├──────────────────────────────────────────┤█│  ← header_rule_y
//! │   Octave         0                       │ │  ← first_row_y
//! │   Filter         LP                      │ │
//! │ > Cutoff       [8000Hz]                  │ │  ← value inverted while editing
//! │                                          └─┘
//! │ ├──────────────────██───────────────────┤     ← value slider (editing only)
//! └───────────────────────────────────────────────┘
//! ```

use embedded_graphics::{
    mono_font::ascii::{FONT_6X10, FONT_6X13_BOLD},
    pixelcolor::BinaryColor,
};
use heapless::{String, Vec};
use synthui::nav::{NavState, Navigator};
use synthui::patch::{copy_truncated, ValueText, MAX_PATCH_NAME_LEN};

use crate::renderer::{
    draw_horizontal_slider, draw_vertical_slider, print_text, SliderStyle, TextStyle, ThumbPolicy,
};
use crate::surface::{DrawingSurface, Font};

/// Most list rows a [`Screen`] can hold.
pub const MAX_ROWS: usize = 6;

/// Row labels are cut to this many bytes so they never reach the value
/// column.
pub const MAX_LABEL_LEN: usize = 10;

/// Title shown above the patch list.
pub const PATCH_LIST_TITLE: &str = "Patches";

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Layout geometry and frame pacing.
///
/// [`DisplayConfig::default()`] fits a 128×64 SSD1306. Override single
/// fields with struct-update syntax:
///
/// ```
/// use synthui_display::DisplayConfig;
///
/// let config = DisplayConfig { visible_rows: 3, ..DisplayConfig::default() };
/// assert_eq!(config.row_height, 10);
/// ```
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Upper bound on flushes per second. Default: 30.
    pub update_frequency_hz: u32,

    pub display_width: u32,
    pub display_height: u32,

    pub title_font: Font,
    /// Baseline of the title text. Default: 10.
    pub title_y: i32,
    /// One pixel rule under the title. Default: 13.
    pub header_rule_y: i32,

    pub row_font: Font,
    /// Baseline of the first list row. Default: 24.
    pub first_row_y: i32,
    pub row_height: i32,
    /// Rows shown while browsing; one fewer while editing. Capped at
    /// [`MAX_ROWS`].
    pub visible_rows: usize,
    pub marker_x: i32,
    pub label_x: i32,
    pub value_x: i32,

    /// Top-left corner of the list scrollbar.
    pub scrollbar_x: i32,
    pub scrollbar_y: i32,
    pub scrollbar: SliderStyle,

    /// Bottom-left corner of the value slider shown while editing.
    pub value_slider_x: i32,
    pub value_slider_y: i32,
    pub value_slider: SliderStyle,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            display_width: 128,
            display_height: 64,
            title_font: &FONT_6X13_BOLD,
            title_y: 10,
            header_rule_y: 13,
            row_font: &FONT_6X10,
            first_row_y: 24,
            row_height: 10,
            visible_rows: 4,
            marker_x: 0,
            label_x: 8,
            value_x: 72,
            scrollbar_x: 123,
            scrollbar_y: 14,
            scrollbar: SliderStyle {
                width: 5,
                height: 50,
                thumb_width: 0,
                thumb_height: 8,
                policy: ThumbPolicy::ClampToTrack,
            },
            value_slider_x: 0,
            value_slider_y: 63,
            value_slider: SliderStyle {
                width: 120,
                height: 5,
                thumb_width: 8,
                thumb_height: 0,
                policy: ThumbPolicy::ClampToTrack,
            },
        }
    }
}

impl DisplayConfig {
    /// Minimum time between two flushes, `1000 / update_frequency_hz`.
    pub fn frame_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }

    fn rows_shown(&self, editing: bool) -> usize {
        let rows = self.visible_rows.min(MAX_ROWS);
        if editing {
            rows.saturating_sub(1).max(1)
        } else {
            rows.max(1)
        }
    }
}

// ── Screen ───────────────────────────────────────────────────────────────

/// One visible list entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub label: String<MAX_LABEL_LEN>,
    /// Formatted parameter value, or `"*"` next to the loaded patch.
    pub value: ValueText,
}

/// Immutable snapshot of everything one frame shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Screen {
    pub title: String<MAX_PATCH_NAME_LEN>,
    pub rows: Vec<Row, MAX_ROWS>,
    /// Index into `rows` of the cursor row.
    pub selected: Option<usize>,
    pub editing: bool,
    /// Cursor position within the whole list, `0.0..=1.0`.
    pub scroll: f32,
    /// Normalized position of the parameter being edited.
    pub value_position: Option<f32>,
}

impl Screen {
    /// Snapshot the navigator's current view.
    ///
    /// The visible window keeps the cursor on screen by scrolling just far
    /// enough that it sits on the last visible row.
    pub fn from_navigator(nav: &Navigator, config: &DisplayConfig) -> Self {
        let editing = nav.is_editing();
        let len = nav.list_len();
        let cursor = nav.cursor();
        let shown = config.rows_shown(editing);
        let first = cursor.saturating_sub(shown - 1);
        let last = (first + shown).min(len);

        let mut screen = Screen {
            editing,
            selected: (len > 0).then_some(cursor - first),
            scroll: if len > 1 {
                cursor as f32 / (len - 1) as f32
            } else {
                0.0
            },
            ..Screen::default()
        };

        match nav.state() {
            NavState::PatchList { .. } => {
                screen.title = copy_truncated(PATCH_LIST_TITLE);
                for (i, template) in nav.bank()[first..last].iter().enumerate() {
                    let value = if first + i == nav.loaded_index() { "*" } else { "" };
                    let _ = screen.rows.push(Row {
                        label: copy_truncated(template.name),
                        value: copy_truncated(value),
                    });
                }
            }
            NavState::ParamList { .. } | NavState::Editing { .. } => {
                let patch = nav.patch();
                screen.title = copy_truncated(patch.name());
                for param in &patch.params()[first..last] {
                    let _ = screen.rows.push(Row {
                        label: copy_truncated(param.name),
                        value: param.format_value(),
                    });
                }
                if editing {
                    screen.value_position = nav.selected_param().map(|p| p.normalized_position());
                }
            }
        }

        screen
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Draw `screen` onto a cleared monochrome surface.
///
/// # Example
///
/// ```
/// # use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor};
/// use synthui::{nav::Navigator, patch::PRESETS};
/// use synthui_display::{render_screen, surface::GfxSurface, DisplayConfig, Screen};
///
/// let nav = Navigator::new(&PRESETS).unwrap();
/// let config = DisplayConfig::default();
/// let screen = Screen::from_navigator(&nav, &config);
///
/// let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
/// display.set_allow_overdraw(true);
/// display.set_allow_out_of_bounds_drawing(true);
/// render_screen(&mut GfxSurface::monochrome(&mut display), &screen, &config).unwrap();
/// ```
pub fn render_screen<S>(
    surface: &mut S,
    screen: &Screen,
    config: &DisplayConfig,
) -> Result<(), S::Error>
where
    S: DrawingSurface<Color = BinaryColor>,
{
    let title_style = TextStyle::new(Some(config.title_font), BinaryColor::On, BinaryColor::Off);
    let row_style = TextStyle::new(Some(config.row_font), BinaryColor::On, BinaryColor::Off);
    let inverted = TextStyle::new(Some(config.row_font), BinaryColor::Off, BinaryColor::On);

    // ── Header ───────────────────────────────────────────────────────
    print_text(surface, 0, config.title_y, &screen.title, &title_style)?;
    surface.fill_rect(0, config.header_rule_y, config.display_width, 1, BinaryColor::On)?;

    // ── Rows ─────────────────────────────────────────────────────────
    for (i, row) in screen.rows.iter().enumerate() {
        let y = config.first_row_y + i as i32 * config.row_height;
        let selected = screen.selected == Some(i);

        if selected {
            print_text(surface, config.marker_x, y, ">", &row_style)?;
        }
        print_text(surface, config.label_x, y, &row.label, &row_style)?;
        if !row.value.is_empty() {
            let style = if selected && screen.editing { &inverted } else { &row_style };
            print_text(surface, config.value_x, y, &row.value, style)?;
        }
    }

    // ── Sliders ──────────────────────────────────────────────────────
    draw_vertical_slider(
        surface,
        config.scrollbar_x,
        config.scrollbar_y,
        screen.scroll,
        &config.scrollbar,
        BinaryColor::On,
    )?;

    if let Some(pos) = screen.value_position {
        draw_horizontal_slider(
            surface,
            config.value_slider_x,
            config.value_slider_y,
            pos,
            &config.value_slider,
            BinaryColor::On,
        )?;
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────
