//! Absolute knobs driving a sliding window of parameters.
//!
//! A device with `KNOBS` potentiometers and a patch with more parameters
//! than knobs maps the knobs onto consecutive windows ("knob sets") of
//! the patch. After switching windows a knob's physical position usually
//! disagrees with the parameter it now controls. [`KnobMode`] picks how
//! that mismatch is resolved:
//!
//! - [`KnobMode::Pickup`]: the knob only takes over once it has been
//!   turned to within `min_change` of the parameter's normalized position.
//!   Until then the parameter keeps its value.
//! - [`KnobMode::Scale`]: the parameter moves at once, in the knob's
//!   direction, scaled by how much travel each side has left, so that knob
//!   and value reach an end stop together. Once they meet the knob tracks
//!   directly.
//!
//! ```text
//!   Scale, knob turned up from k to k':
//!
//!   value  v ──────────►  v + (k' − k) · (1 − v) / (1 − k')
//!   knob   k ──► k'
//! ```

use crate::patch::Patch;

/// Default pickup window, in normalized units.
pub const DEFAULT_MIN_CHANGE: f32 = 0.1;

/// How a knob that disagrees with its parameter catches up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KnobMode {
    /// Ignore the knob until it passes the parameter's position.
    #[default]
    Pickup,
    /// Move the parameter proportionally to the remaining travel.
    Scale,
}

/// Catch-up tracking for `KNOBS` absolute knobs.
///
/// # Examples
///
/// ```
/// use synthui::knobs::KnobSet;
/// use synthui::patch::{Param, Patch, ValueFormat};
///
/// let params = [
///     Param::range("A", 0.0, 0.0, 100.0, ValueFormat::INTEGER),
///     Param::range("B", 50.0, 0.0, 100.0, ValueFormat::INTEGER),
/// ];
/// let mut patch = Patch::new("Knobs", &params).unwrap();
/// let mut knobs: KnobSet<2> = KnobSet::new(0.1);
///
/// // Knob 1 is far from B's value: no pickup yet.
/// knobs.update(&mut patch, &[0.0625, 0.9]);
/// assert_eq!(patch.param(0).unwrap().value(), 6.25);
/// assert_eq!(patch.param(1).unwrap().value(), 50.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobSet<const KNOBS: usize> {
    window: usize,
    mode: KnobMode,
    tracking: [bool; KNOBS],
    /// Previous reading per knob, `None` until the first update after a
    /// reset.
    last: [Option<f32>; KNOBS],
    min_change: f32,
}

impl<const KNOBS: usize> Default for KnobSet<KNOBS> {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CHANGE)
    }
}

impl<const KNOBS: usize> KnobSet<KNOBS> {
    /// Pickup-mode knobs on window 0.
    pub const fn new(min_change: f32) -> Self {
        Self {
            window: 0,
            mode: KnobMode::Pickup,
            tracking: [false; KNOBS],
            last: [None; KNOBS],
            min_change,
        }
    }

    pub const fn with_mode(mut self, mode: KnobMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> KnobMode {
        self.mode
    }

    /// Change the catch-up mode. Every knob has to catch up again.
    pub fn set_mode(&mut self, mode: KnobMode) {
        if mode != self.mode {
            self.mode = mode;
            self.reset();
        }
    }

    /// Index of the active knob set.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Whether knob `knob` has caught up with its parameter.
    pub fn is_tracking(&self, knob: usize) -> bool {
        self.tracking.get(knob).copied().unwrap_or(false)
    }

    /// Number of knob sets needed to reach every parameter of `patch`.
    pub fn window_count(&self, patch: &Patch) -> usize {
        if KNOBS == 0 {
            return 0;
        }
        patch.len().div_ceil(KNOBS)
    }

    /// Select knob set `window`; switching resets tracking for every knob.
    /// Out-of-range windows are ignored.
    pub fn set_window(&mut self, patch: &Patch, window: usize) {
        if window >= self.window_count(patch) {
            #[cfg(feature = "defmt")]
            defmt::warn!("knob set {} out of range", window);
            return;
        }
        if window != self.window {
            self.reset();
            self.window = window;
        }
    }

    /// Advance to the next knob set, wrapping to the first. Returns the
    /// new window index.
    pub fn next_window(&mut self, patch: &Patch) -> usize {
        let count = self.window_count(patch);
        if count > 0 {
            self.set_window(patch, (self.window + 1) % count);
        }
        self.window
    }

    /// Feed fresh knob positions (each `0.0..=1.0`). Returns how many
    /// parameters changed value.
    pub fn update(&mut self, patch: &mut Patch, positions: &[f32; KNOBS]) -> usize {
        let mut changed = 0;

        for (knob, &position) in positions.iter().enumerate() {
            let index = self.window * KNOBS + knob;
            let Some(current) = patch.param(index).map(|p| p.normalized_position()) else {
                continue;
            };

            let target = match self.mode {
                KnobMode::Pickup => self.pickup(knob, current, position),
                KnobMode::Scale => self.scale(knob, current, position),
            };
            self.last[knob] = Some(position);

            if let Some(target) = target {
                if patch.set_from_normalized_position(index, target) {
                    changed += 1;
                }
            }
        }

        changed
    }

    fn reset(&mut self) {
        self.tracking = [false; KNOBS];
        self.last = [None; KNOBS];
    }

    /// Catch up when the knob is within `min_change` of `current`.
    fn catch_up(&mut self, knob: usize, current: f32, position: f32) -> bool {
        if !self.tracking[knob] {
            let delta = current - position;
            self.tracking[knob] = delta > -self.min_change && delta < self.min_change;
        }
        self.tracking[knob]
    }

    fn pickup(&mut self, knob: usize, current: f32, position: f32) -> Option<f32> {
        self.catch_up(knob, current, position).then_some(position)
    }

    fn scale(&mut self, knob: usize, current: f32, position: f32) -> Option<f32> {
        let last = self.last[knob];
        if self.catch_up(knob, current, position) {
            return Some(position);
        }
        let moved = position - last?;

        // Travel left on the knob's side of the move, measured after it.
        let step = if moved > 0.0 && position < 1.0 {
            moved * (1.0 - current) / (1.0 - position)
        } else if moved < 0.0 && position > 0.0 {
            moved * current / position
        } else {
            return None;
        };
        Some(current + step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{Param, ValueFormat};

    fn five_param_patch() -> Patch {
        let p = Param::range("P", 50.0, 0.0, 100.0, ValueFormat::INTEGER);
        Patch::new("Five", &[p; 5]).unwrap()
    }

    #[test]
    fn window_count_rounds_up() {
        let patch = five_param_patch();
        let knobs: KnobSet<2> = KnobSet::default();
        assert_eq!(knobs.window_count(&patch), 3);
    }

    #[test]
    fn knob_picks_up_when_close() {
        let mut patch = five_param_patch();
        let mut knobs: KnobSet<2> = KnobSet::new(0.1);

        assert_eq!(knobs.update(&mut patch, &[0.0, 1.0]), 0);
        assert!(!knobs.is_tracking(0));

        // Sweep knob 0 through the parameter's position.
        knobs.update(&mut patch, &[0.4375, 1.0]);
        assert!(knobs.is_tracking(0));
        assert_eq!(patch.param(0).unwrap().value(), 43.75);

        // Once tracking, large jumps follow the knob.
        assert_eq!(knobs.update(&mut patch, &[1.0, 1.0]), 1);
        assert_eq!(patch.param(0).unwrap().value(), 100.0);
        assert_eq!(patch.param(1).unwrap().value(), 50.0);
    }

    #[test]
    fn switching_window_resets_tracking() {
        let mut patch = five_param_patch();
        let mut knobs: KnobSet<2> = KnobSet::new(0.1);
        knobs.update(&mut patch, &[0.5, 0.5]);
        assert!(knobs.is_tracking(0) && knobs.is_tracking(1));

        assert_eq!(knobs.next_window(&patch), 1);
        assert!(!knobs.is_tracking(0));

        // Window 1 drives parameters 2 and 3.
        knobs.update(&mut patch, &[0.5625, 0.0]);
        assert_eq!(patch.param(2).unwrap().value(), 56.25);
        assert_eq!(patch.param(3).unwrap().value(), 50.0);
    }

    #[test]
    fn last_window_skips_missing_params() {
        let mut patch = five_param_patch();
        let mut knobs: KnobSet<2> = KnobSet::new(0.1);
        knobs.set_window(&patch, 2);
        assert_eq!(knobs.update(&mut patch, &[0.546875, 0.5]), 1);
        assert_eq!(patch.param(4).unwrap().value(), 54.6875);
        assert_eq!(knobs.next_window(&patch), 0);
    }

    #[test]
    fn out_of_range_window_ignored() {
        let patch = five_param_patch();
        let mut knobs: KnobSet<2> = KnobSet::default();
        knobs.set_window(&patch, 7);
        assert_eq!(knobs.window(), 0);
    }

    // ── Scale mode ───────────────────────────────────────────────────

    fn scale_patch(value: f32) -> Patch {
        let p = Param::range("P", value, 0.0, 100.0, ValueFormat::INTEGER);
        Patch::new("Scale", &[p; 2]).unwrap()
    }

    #[test]
    fn default_mode_is_pickup() {
        let knobs: KnobSet<2> = KnobSet::default();
        assert_eq!(knobs.mode(), KnobMode::Pickup);
        let scaled = KnobSet::<2>::default().with_mode(KnobMode::Scale);
        assert_eq!(scaled.mode(), KnobMode::Scale);
    }

    #[test]
    fn scale_first_reading_only_records_position() {
        let mut patch = scale_patch(25.0);
        let mut knobs: KnobSet<2> = KnobSet::new(0.1).with_mode(KnobMode::Scale);
        assert_eq!(knobs.update(&mut patch, &[0.5, 0.875]), 0);
        assert_eq!(patch.param(0).unwrap().value(), 25.0);
        assert!(!knobs.is_tracking(0));
    }

    #[test]
    fn scale_moves_value_with_knob_direction() {
        let mut patch = scale_patch(25.0);
        let mut knobs: KnobSet<2> = KnobSet::new(0.1).with_mode(KnobMode::Scale);
        knobs.update(&mut patch, &[0.5, 0.25]);

        // Up by 0.125 with 0.375 knob travel and 0.75 value travel left.
        assert_eq!(knobs.update(&mut patch, &[0.625, 0.25]), 1);
        assert_eq!(patch.param(0).unwrap().value(), 50.0);
        assert!(!knobs.is_tracking(0));

        // Down by 0.375 with 0.25 knob travel left: clamps at the bottom.
        knobs.update(&mut patch, &[0.25, 0.25]);
        assert_eq!(patch.param(0).unwrap().value(), 0.0);
        assert!(!knobs.is_tracking(0));

        // Knob meets the value and then tracks it directly.
        knobs.update(&mut patch, &[0.0, 0.25]);
        assert!(knobs.is_tracking(0));
        knobs.update(&mut patch, &[0.5, 0.25]);
        assert_eq!(patch.param(0).unwrap().value(), 50.0);
    }

    #[test]
    fn scale_at_end_stop_holds_value() {
        let mut patch = scale_patch(25.0);
        let mut knobs: KnobSet<2> = KnobSet::new(0.1).with_mode(KnobMode::Scale);
        knobs.update(&mut patch, &[0.75, 0.5]);
        // No knob travel left above 1.0, so the value cannot be scaled.
        assert_eq!(knobs.update(&mut patch, &[1.0, 0.5]), 0);
        assert_eq!(patch.param(0).unwrap().value(), 25.0);
    }

    #[test]
    fn changing_mode_resets_tracking() {
        let mut patch = scale_patch(50.0);
        let mut knobs: KnobSet<2> = KnobSet::new(0.1);
        knobs.update(&mut patch, &[0.5, 0.5]);
        assert!(knobs.is_tracking(0));

        knobs.set_mode(KnobMode::Scale);
        assert!(!knobs.is_tracking(0) && !knobs.is_tracking(1));

        // Same mode again keeps state.
        knobs.update(&mut patch, &[0.5, 0.5]);
        knobs.set_mode(KnobMode::Scale);
        assert!(knobs.is_tracking(0));
    }
}
