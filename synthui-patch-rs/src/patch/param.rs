use core::fmt::Write;

use heapless::String;

use super::error::ParamError;
use super::{copy_truncated, ValueText, OVERFLOW_TEXT, VALUE_TEXT_LEN};

/// How a range parameter's value is turned into text.
///
/// Renders the value with a fixed number of decimals followed by an
/// optional unit suffix, e.g. `ValueFormat::new(1, "s")` renders `0.25`
/// as `"0.2s"` (ties round to even).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueFormat {
    /// Digits after the decimal point.
    pub decimals: u8,
    /// Text appended after the number (may be empty).
    pub suffix: &'static str,
}

impl ValueFormat {
    /// Whole numbers, no suffix: `128.0` → `"128"`.
    pub const INTEGER: Self = Self::new(0, "");

    pub const fn new(decimals: u8, suffix: &'static str) -> Self {
        Self { decimals, suffix }
    }

    /// Text that does not fit in a [`ValueText`] saturates to
    /// [`OVERFLOW_TEXT`] rather than showing a misleading prefix.
    fn write(&self, value: f32) -> ValueText {
        let mut scratch: String<VALUE_TEXT_LEN> = String::new();
        match write!(
            scratch,
            "{:.*}{}",
            self.decimals as usize,
            value,
            self.suffix
        ) {
            Ok(()) => scratch,
            Err(_) => copy_truncated(OVERFLOW_TEXT),
        }
    }
}

/// Distinguishes numeric parameters from parameters that pick one label
/// out of a fixed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamKind {
    /// Numeric value rendered through `format`.
    Range { format: ValueFormat },
    /// Value indexes into `labels` (truncated to an integer).
    Choice { labels: &'static [&'static str] },
}

/// A single named, typed, bounded synthesizer setting.
///
/// The value is stored as `f32` even when the setting is semantically a
/// byte or a list index. All mutators keep
/// `min_value() <= value() <= max_value()`.
///
/// For a [`Choice`](ParamKind::Choice) parameter `min_value` is always 0
/// and `max_value` is the number of labels.
///
/// `Param` is `Copy`: a [`Patch`](super::Patch) owns independent copies of
/// its template's parameters.
///
/// # Examples
///
/// ```
/// use synthui::patch::{Param, ValueFormat};
///
/// let mut cutoff = Param::range("Cutoff", 128.0, 0.0, 255.0, ValueFormat::INTEGER);
/// assert_eq!(cutoff.format_value().as_str(), "128");
///
/// cutoff.set_from_normalized_position(1.5); // clamped to 1.0
/// assert_eq!(cutoff.value(), 255.0);
///
/// let wave = Param::choice("Wave", 1, &["Sine", "Square", "Saw"]);
/// assert_eq!(wave.format_value().as_str(), "Square");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Param {
    /// Short display label.
    pub name: &'static str,
    /// Optional longer label.
    pub description: Option<&'static str>,
    kind: ParamKind,
    value: f32,
    min_value: f32,
    max_value: f32,
    /// Increment applied by one [`step_by`](Self::step_by) step on a range.
    step: f32,
}

impl Param {
    /// A numeric parameter in `[min_value, max_value]` with a step of 1.
    pub const fn range(
        name: &'static str,
        value: f32,
        min_value: f32,
        max_value: f32,
        format: ValueFormat,
    ) -> Self {
        Self {
            name,
            description: None,
            kind: ParamKind::Range { format },
            value,
            min_value,
            max_value,
            step: 1.0,
        }
    }

    /// A parameter selecting one of `labels`, starting at `index`.
    pub const fn choice(name: &'static str, index: usize, labels: &'static [&'static str]) -> Self {
        Self {
            name,
            description: None,
            kind: ParamKind::Choice { labels },
            value: index as f32,
            min_value: 0.0,
            max_value: labels.len() as f32,
            step: 1.0,
        }
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Override the per-step increment of a range parameter.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Range or choice, fixed at construction.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, ParamKind::Choice { .. })
    }

    /// The label list of a choice parameter, `None` for ranges.
    pub fn labels(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            ParamKind::Choice { labels } => Some(labels),
            ParamKind::Range { .. } => None,
        }
    }

    /// Current label index of a choice parameter, clamped into the label
    /// list. `None` for ranges and for a choice without labels.
    pub fn choice_index(&self) -> Option<usize> {
        let labels = self.labels()?;
        if labels.is_empty() {
            return None;
        }
        let last = labels.len() as i32 - 1;
        Some((self.value as i32).clamp(0, last) as usize)
    }

    /// `true` for a two-label choice such as `["Off", "On"]`.
    pub fn is_toggle(&self) -> bool {
        matches!(self.labels(), Some(labels) if labels.len() == 2)
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Assign a new value, clamped into `[min_value, max_value]`.
    ///
    /// NaN is ignored and leaves the value unchanged.
    pub fn set_value(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.value = clamp(value, self.min_value, self.max_value);
    }

    /// Move by `steps` increments: `steps * step()` for ranges, whole
    /// labels for choices (stopping at the first and last label).
    pub fn step_by(&mut self, steps: i32) {
        match self.kind {
            ParamKind::Range { .. } => self.set_value(self.value + steps as f32 * self.step),
            ParamKind::Choice { labels } => {
                if let Some(index) = self.choice_index() {
                    let last = labels.len() as i32 - 1;
                    let next = (index as i32).saturating_add(steps).clamp(0, last);
                    self.value = next as f32;
                }
            }
        }
    }

    /// Flip a two-label choice. Returns `false` (and does nothing) for any
    /// other parameter.
    pub fn toggle(&mut self) -> bool {
        if !self.is_toggle() {
            return false;
        }
        self.value = match self.choice_index() {
            Some(0) => 1.0,
            _ => 0.0,
        };
        true
    }

    // ── Normalized position ──────────────────────────────────────────

    /// Where the value sits between the bounds, in `[0, 1]`.
    ///
    /// Debug builds assert that the bounds differ; release builds return
    /// `0.0` for an empty range instead of a NaN.
    pub fn normalized_position(&self) -> f32 {
        debug_assert!(
            self.max_value != self.min_value,
            "parameter {} has an empty range",
            self.name
        );
        position_in(self.value, self.min_value, self.max_value)
    }

    /// Set the value from a position in `[0, 1]`.
    ///
    /// `pos` is clamped to `[0, 1]` first (NaN counts as 0), so the value
    /// invariant holds for any input. An empty range pins the value to
    /// `min_value`.
    pub fn set_from_normalized_position(&mut self, pos: f32) {
        debug_assert!(
            self.max_value != self.min_value,
            "parameter {} has an empty range",
            self.name
        );
        self.value = value_at(pos, self.min_value, self.max_value);
    }

    // ── Gauge (0–255) mapping ────────────────────────────────────────

    /// The value as a 0–255 gauge reading, for knob and bar displays.
    ///
    /// Choice parameters spread their labels evenly over the gauge, so the
    /// last label reads 255.
    pub fn gauge_value(&self) -> u8 {
        match self.kind {
            ParamKind::Choice { labels } => {
                let index = self.choice_index().unwrap_or(0) as u32;
                match labels.len() as u32 {
                    0 | 1 => 0,
                    n => (index * 255 / (n - 1)) as u8,
                }
            }
            ParamKind::Range { .. } => {
                let pos = clamp(self.normalized_position(), 0.0, 1.0);
                (pos * 255.0 + 0.5) as u8
            }
        }
    }

    /// Inverse of [`gauge_value`](Self::gauge_value). Choice parameters
    /// snap to a whole label index.
    pub fn set_from_gauge_value(&mut self, gauge: u8) {
        match self.kind {
            ParamKind::Choice { labels } => {
                let n = labels.len() as u32;
                if n == 0 {
                    return;
                }
                let index = gauge as u32 * (n - 1) / 255;
                self.value = index as f32;
            }
            ParamKind::Range { .. } => {
                self.set_from_normalized_position(gauge as f32 / 255.0);
            }
        }
    }

    // ── Formatting ───────────────────────────────────────────────────

    /// Render the value for display.
    ///
    /// Choice parameters return the label at the (clamped) truncated value,
    /// cut to [`VALUE_TEXT_LEN`](super::VALUE_TEXT_LEN) bytes. Range
    /// parameters apply their [`ValueFormat`]; a number too wide to fit
    /// renders as [`OVERFLOW_TEXT`](super::OVERFLOW_TEXT).
    pub fn format_value(&self) -> ValueText {
        match self.kind {
            ParamKind::Choice { labels } => match self.choice_index() {
                Some(index) => copy_truncated(labels[index]),
                None => ValueText::new(),
            },
            ParamKind::Range { format } => format.write(self.value),
        }
    }

    // ── Validation ───────────────────────────────────────────────────

    /// Check the construction-time invariants.
    pub fn validate(&self) -> Result<(), ParamError> {
        // Written so that NaN bounds fail too.
        if !(self.min_value < self.max_value) {
            return Err(ParamError::EmptyRange);
        }
        if let ParamKind::Choice { labels } = self.kind {
            if labels.is_empty()
                || self.min_value != 0.0
                || self.max_value != labels.len() as f32
            {
                return Err(ParamError::ChoiceCountMismatch);
            }
        }
        if !(self.min_value <= self.value && self.value <= self.max_value) {
            return Err(ParamError::ValueOutOfRange);
        }
        Ok(())
    }
}

/// Position of `value` in `[lo, hi]`; `0.0` when the range is empty.
fn position_in(value: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span == 0.0 {
        return 0.0;
    }
    (value - lo) / span
}

/// Value at `pos` in `[lo, hi]`. `pos` is clamped to `[0, 1]` (NaN counts
/// as 0) and an empty range yields `lo`.
fn value_at(pos: f32, lo: f32, hi: f32) -> f32 {
    let pos = if pos.is_nan() { 0.0 } else { clamp(pos, 0.0, 1.0) };
    let span = hi - lo;
    if span == 0.0 {
        return lo;
    }
    clamp(pos * span + lo, lo, hi)
}

/// `f32::clamp` panics on inverted bounds; this never does.
fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
