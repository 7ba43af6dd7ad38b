//! Menu navigation state machine driven by [`InputEvent`]s.
//!
//! The [`Navigator`] owns the currently loaded [`Patch`] and a cursor into
//! either the patch list or the loaded patch's parameters. Each call to
//! [`Navigator::handle()`] applies one event and mutates at most one
//! parameter.
//!
//! ```text
//!              Right/Ok                 Right, Ok (non-toggle)
//! PatchList ─────────────► ParamList ─────────────────────────► Editing
//!     ▲      Left/Cancel       │  ▲          Ok (commit)           │
//!     └────────────────────────┘  └────────────────────────────────┘
//!                                            Cancel (revert)
//! ```

use crate::input::InputEvent;
use crate::knobs::KnobSet;
use crate::patch::{Param, Patch, PatchError, PatchTemplate};

/// Steps applied by `Left`/`Right` while editing a range parameter.
pub const COARSE_STEPS: i32 = 10;

/// Where the cursor is and what it is pointing at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavState {
    /// Choosing a patch from the bank.
    PatchList { cursor: usize },
    /// Browsing the loaded patch's parameters.
    ParamList { cursor: usize },
    /// Changing the value of parameter `cursor`; `saved` is restored on
    /// `Cancel`.
    Editing { cursor: usize, saved: f32 },
}

/// What a call to [`Navigator::handle()`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// The event had no effect.
    Unchanged,
    /// The list cursor moved.
    CursorMoved,
    /// A fresh copy of bank entry `n` replaced the loaded patch.
    PatchLoaded(usize),
    /// Went from the patch list into the already loaded patch.
    EnteredPatch,
    /// Went back from the parameter list to the patch list.
    ExitedPatch,
    /// Started editing the selected parameter.
    EditStarted,
    /// The value of parameter `index` changed.
    ValueChanged { index: usize },
    /// The edit was accepted.
    Committed,
    /// The edit was aborted and the previous value restored.
    Reverted,
}

impl Transition {
    /// `true` if the screen has to be redrawn.
    pub fn needs_redraw(self) -> bool {
        self != Transition::Unchanged
    }
}

/// Errors from building a [`Navigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavError {
    /// The patch bank has no entries.
    EmptyBank,
    /// A bank entry does not produce a valid patch.
    Patch(PatchError),
}

impl From<PatchError> for NavError {
    fn from(e: PatchError) -> Self {
        NavError::Patch(e)
    }
}

/// Menu state: a bank of preset templates, one loaded patch, and a cursor.
///
/// The first bank entry is loaded at construction and the navigator starts
/// on the patch list.
///
/// # Examples
///
/// ```
/// use synthui::input::InputEvent;
/// use synthui::nav::{Navigator, NavState};
/// use synthui::patch::PRESETS;
///
/// let mut nav = Navigator::new(&PRESETS).unwrap();
/// nav.handle(InputEvent::Ok); // enter "Lead"
/// nav.handle(InputEvent::Ok); // edit its first parameter
/// assert!(matches!(nav.state(), NavState::Editing { cursor: 0, .. }));
///
/// nav.handle(InputEvent::Up);
/// nav.handle(InputEvent::Cancel);
/// assert_eq!(nav.patch().param(0).unwrap().format_value().as_str(), "Saw");
/// ```
pub struct Navigator {
    bank: &'static [PatchTemplate],
    patch: Patch,
    loaded: usize,
    state: NavState,
}

impl Navigator {
    /// Validate every template in `bank` and load the first one.
    ///
    /// # Errors
    ///
    /// [`NavError::EmptyBank`] for an empty bank, [`NavError::Patch`] if a
    /// template holds an invalid parameter.
    pub fn new(bank: &'static [PatchTemplate]) -> Result<Self, NavError> {
        let first = bank.first().ok_or(NavError::EmptyBank)?;
        for template in bank {
            template.instantiate()?;
        }

        Ok(Self {
            bank,
            patch: first.instantiate()?,
            loaded: 0,
            state: NavState::PatchList { cursor: 0 },
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn bank(&self) -> &'static [PatchTemplate] {
        self.bank
    }

    /// The loaded patch.
    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// Feed absolute knob positions into the loaded patch. Returns how many
    /// parameters changed value.
    pub fn apply_knobs<const KNOBS: usize>(
        &mut self,
        knobs: &mut KnobSet<KNOBS>,
        positions: &[f32; KNOBS],
    ) -> usize {
        knobs.update(&mut self.patch, positions)
    }

    /// Bank index of the loaded patch.
    pub fn loaded_index(&self) -> usize {
        self.loaded
    }

    /// Cursor position within the current list.
    pub fn cursor(&self) -> usize {
        match self.state {
            NavState::PatchList { cursor }
            | NavState::ParamList { cursor }
            | NavState::Editing { cursor, .. } => cursor,
        }
    }

    /// Length of the list the cursor moves in.
    pub fn list_len(&self) -> usize {
        match self.state {
            NavState::PatchList { .. } => self.bank.len(),
            NavState::ParamList { .. } | NavState::Editing { .. } => self.patch.len(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, NavState::Editing { .. })
    }

    /// The parameter under the cursor, `None` on the patch list.
    pub fn selected_param(&self) -> Option<&Param> {
        match self.state {
            NavState::PatchList { .. } => None,
            NavState::ParamList { cursor } | NavState::Editing { cursor, .. } => {
                self.patch.param(cursor)
            }
        }
    }

    // ── Event handling ───────────────────────────────────────────────

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) -> Transition {
        let transition = match self.state {
            NavState::PatchList { cursor } => self.on_patch_list(cursor, event),
            NavState::ParamList { cursor } => self.on_param_list(cursor, event),
            NavState::Editing { cursor, saved } => self.on_editing(cursor, saved, event),
        };

        #[cfg(feature = "defmt")]
        if transition.needs_redraw() {
            defmt::debug!("nav: {} -> {}", event, transition);
        }

        transition
    }

    fn on_patch_list(&mut self, cursor: usize, event: InputEvent) -> Transition {
        match event {
            InputEvent::Up | InputEvent::Down => {
                match moved_cursor(cursor, self.bank.len(), event) {
                    Some(next) => {
                        self.state = NavState::PatchList { cursor: next };
                        Transition::CursorMoved
                    }
                    None => Transition::Unchanged,
                }
            }
            InputEvent::Right | InputEvent::Ok => {
                if cursor == self.loaded {
                    self.state = NavState::ParamList { cursor: 0 };
                    return Transition::EnteredPatch;
                }
                match self.bank.get(cursor).map(PatchTemplate::instantiate) {
                    Some(Ok(patch)) => {
                        self.patch = patch;
                        self.loaded = cursor;
                        self.state = NavState::ParamList { cursor: 0 };
                        Transition::PatchLoaded(cursor)
                    }
                    _ => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("nav: bank entry {} could not be loaded", cursor);
                        Transition::Unchanged
                    }
                }
            }
            InputEvent::Left | InputEvent::Cancel | InputEvent::None => Transition::Unchanged,
        }
    }

    fn on_param_list(&mut self, cursor: usize, event: InputEvent) -> Transition {
        match event {
            InputEvent::Up | InputEvent::Down => {
                match moved_cursor(cursor, self.patch.len(), event) {
                    Some(next) => {
                        self.state = NavState::ParamList { cursor: next };
                        Transition::CursorMoved
                    }
                    None => Transition::Unchanged,
                }
            }
            InputEvent::Ok => {
                if self.patch.toggle(cursor) {
                    return Transition::ValueChanged { index: cursor };
                }
                let Some(param) = self.patch.param(cursor) else {
                    return Transition::Unchanged;
                };
                self.state = NavState::Editing {
                    cursor,
                    saved: param.value(),
                };
                Transition::EditStarted
            }
            InputEvent::Right => match self.patch.param(cursor) {
                Some(param) => {
                    self.state = NavState::Editing {
                        cursor,
                        saved: param.value(),
                    };
                    Transition::EditStarted
                }
                None => Transition::Unchanged,
            },
            InputEvent::Left | InputEvent::Cancel => {
                self.state = NavState::PatchList {
                    cursor: self.loaded,
                };
                Transition::ExitedPatch
            }
            InputEvent::None => Transition::Unchanged,
        }
    }

    fn on_editing(&mut self, cursor: usize, saved: f32, event: InputEvent) -> Transition {
        let Some(is_choice) = self.patch.param(cursor).map(Param::is_choice) else {
            // The patch cannot shrink, so this only guards a corrupt cursor.
            self.state = NavState::ParamList { cursor: 0 };
            return Transition::CursorMoved;
        };

        let steps = match event {
            InputEvent::Up | InputEvent::Down => event.direction(),
            InputEvent::Right | InputEvent::Left if is_choice => event.direction(),
            InputEvent::Right | InputEvent::Left => event.direction() * COARSE_STEPS,
            InputEvent::Ok => {
                self.state = NavState::ParamList { cursor };
                return Transition::Committed;
            }
            InputEvent::Cancel => {
                self.patch.set_value(cursor, saved);
                self.state = NavState::ParamList { cursor };
                return Transition::Reverted;
            }
            InputEvent::None => return Transition::Unchanged,
        };

        if self.patch.step_by(cursor, steps) {
            Transition::ValueChanged { index: cursor }
        } else {
            Transition::Unchanged
        }
    }
}

/// `Up` moves towards index 0, `Down` towards the end; stops at both ends.
fn moved_cursor(cursor: usize, len: usize, event: InputEvent) -> Option<usize> {
    let next = match event {
        InputEvent::Up => cursor.checked_sub(1)?,
        InputEvent::Down => cursor + 1,
        _ => return None,
    };
    (next < len).then_some(next)
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{ParamError, ValueFormat};

    static FIRST: [Param; 3] = [
        Param::range("Cutoff", 100.0, 0.0, 255.0, ValueFormat::INTEGER),
        Param::choice("Wave", 0, &["Sine", "Square", "Saw"]),
        Param::choice("Glide", 0, &["Off", "On"]),
    ];
    static SECOND: [Param; 1] = [Param::range("Volume", 50.0, 0.0, 127.0, ValueFormat::INTEGER)];
    static BANK: [PatchTemplate; 2] = [
        PatchTemplate::new("First", &FIRST),
        PatchTemplate::new("Second", &SECOND),
    ];

    fn nav_in_first_patch() -> Navigator {
        let mut nav = Navigator::new(&BANK).unwrap();
        assert_eq!(nav.handle(InputEvent::Ok), Transition::EnteredPatch);
        nav
    }

    fn value(nav: &Navigator, index: usize) -> f32 {
        nav.patch().param(index).unwrap().value()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn starts_on_patch_list_with_first_patch_loaded() {
        let nav = Navigator::new(&BANK).unwrap();
        assert_eq!(nav.state(), NavState::PatchList { cursor: 0 });
        assert_eq!(nav.patch().name(), "First");
        assert_eq!(nav.loaded_index(), 0);
        assert_eq!(nav.list_len(), 2);
        assert!(nav.selected_param().is_none());
    }

    #[test]
    fn empty_bank_rejected() {
        static EMPTY: [PatchTemplate; 0] = [];
        assert_eq!(Navigator::new(&EMPTY).err(), Some(NavError::EmptyBank));
    }

    #[test]
    fn invalid_template_rejected() {
        static BAD_PARAMS: [Param; 1] = [Param::range("Flat", 0.0, 0.0, 0.0, ValueFormat::INTEGER)];
        static BAD: [PatchTemplate; 1] = [PatchTemplate::new("Bad", &BAD_PARAMS)];
        assert_eq!(
            Navigator::new(&BAD).err(),
            Some(NavError::Patch(PatchError::InvalidParam {
                index: 0,
                error: ParamError::EmptyRange
            }))
        );
    }

    // ── Patch list ───────────────────────────────────────────────────

    #[test]
    fn cursor_stops_at_list_ends() {
        let mut nav = Navigator::new(&BANK).unwrap();
        assert_eq!(nav.handle(InputEvent::Up), Transition::Unchanged);
        assert_eq!(nav.handle(InputEvent::Down), Transition::CursorMoved);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(nav.handle(InputEvent::Down), Transition::Unchanged);
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn selecting_other_patch_loads_fresh_copy() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Right);
        nav.handle(InputEvent::Up);
        nav.handle(InputEvent::Ok);
        assert_eq!(value(&nav, 0), 101.0);

        nav.handle(InputEvent::Cancel);
        nav.handle(InputEvent::Down);
        assert_eq!(nav.handle(InputEvent::Right), Transition::PatchLoaded(1));
        assert_eq!(nav.patch().name(), "Second");

        // Going back to the first patch discards the edit.
        nav.handle(InputEvent::Left);
        nav.handle(InputEvent::Up);
        assert_eq!(nav.handle(InputEvent::Ok), Transition::PatchLoaded(0));
        assert_eq!(value(&nav, 0), 100.0);
    }

    #[test]
    fn reentering_loaded_patch_keeps_edits() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Right);
        nav.handle(InputEvent::Up);
        nav.handle(InputEvent::Ok);

        assert_eq!(nav.handle(InputEvent::Cancel), Transition::ExitedPatch);
        assert_eq!(nav.state(), NavState::PatchList { cursor: 0 });
        assert_eq!(nav.handle(InputEvent::Ok), Transition::EnteredPatch);
        assert_eq!(value(&nav, 0), 101.0);
    }

    #[test]
    fn left_on_patch_list_is_ignored() {
        let mut nav = Navigator::new(&BANK).unwrap();
        assert_eq!(nav.handle(InputEvent::Left), Transition::Unchanged);
        assert_eq!(nav.handle(InputEvent::Cancel), Transition::Unchanged);
        assert_eq!(nav.handle(InputEvent::None), Transition::Unchanged);
    }

    // ── Parameter list ───────────────────────────────────────────────

    #[test]
    fn param_cursor_walks_parameters() {
        let mut nav = nav_in_first_patch();
        assert_eq!(nav.list_len(), 3);
        nav.handle(InputEvent::Down);
        nav.handle(InputEvent::Down);
        assert_eq!(nav.selected_param().unwrap().name, "Glide");
        assert_eq!(nav.handle(InputEvent::Down), Transition::Unchanged);
    }

    #[test]
    fn ok_toggles_two_label_choice_in_place() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Down);
        nav.handle(InputEvent::Down);
        assert_eq!(nav.handle(InputEvent::Ok), Transition::ValueChanged { index: 2 });
        assert_eq!(nav.state(), NavState::ParamList { cursor: 2 });
        assert_eq!(nav.selected_param().unwrap().format_value().as_str(), "On");
    }

    #[test]
    fn right_edits_even_a_toggle() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Down);
        nav.handle(InputEvent::Down);
        assert_eq!(nav.handle(InputEvent::Right), Transition::EditStarted);
        assert!(nav.is_editing());
    }

    // ── Editing ──────────────────────────────────────────────────────

    #[test]
    fn up_down_step_value() {
        let mut nav = nav_in_first_patch();
        assert_eq!(nav.handle(InputEvent::Ok), Transition::EditStarted);
        assert_eq!(nav.handle(InputEvent::Up), Transition::ValueChanged { index: 0 });
        assert_eq!(nav.handle(InputEvent::Up), Transition::ValueChanged { index: 0 });
        assert_eq!(nav.handle(InputEvent::Down), Transition::ValueChanged { index: 0 });
        assert_eq!(value(&nav, 0), 101.0);
    }

    #[test]
    fn left_right_coarse_step_on_range() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Right);
        nav.handle(InputEvent::Right);
        assert_eq!(value(&nav, 0), 100.0 + COARSE_STEPS as f32);
        nav.handle(InputEvent::Left);
        nav.handle(InputEvent::Left);
        assert_eq!(value(&nav, 0), 100.0 - COARSE_STEPS as f32);
    }

    #[test]
    fn left_right_single_step_on_choice() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Down);
        nav.handle(InputEvent::Ok);
        nav.handle(InputEvent::Right);
        assert_eq!(nav.selected_param().unwrap().format_value().as_str(), "Square");
        nav.handle(InputEvent::Right);
        assert_eq!(nav.handle(InputEvent::Right), Transition::Unchanged);
        assert_eq!(nav.selected_param().unwrap().format_value().as_str(), "Saw");
    }

    #[test]
    fn step_past_bound_is_unchanged() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Down);
        nav.handle(InputEvent::Ok);
        assert_eq!(nav.handle(InputEvent::Down), Transition::Unchanged);
        assert_eq!(value(&nav, 1), 0.0);
    }

    #[test]
    fn ok_commits_edit() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Ok);
        nav.handle(InputEvent::Up);
        assert_eq!(nav.handle(InputEvent::Ok), Transition::Committed);
        assert_eq!(nav.state(), NavState::ParamList { cursor: 0 });
        assert_eq!(value(&nav, 0), 101.0);
    }

    #[test]
    fn cancel_reverts_edit() {
        let mut nav = nav_in_first_patch();
        nav.handle(InputEvent::Ok);
        nav.handle(InputEvent::Right);
        nav.handle(InputEvent::Up);
        assert_eq!(nav.handle(InputEvent::Cancel), Transition::Reverted);
        assert_eq!(nav.state(), NavState::ParamList { cursor: 0 });
        assert_eq!(value(&nav, 0), 100.0);
    }

    #[test]
    fn redraw_flag() {
        assert!(!Transition::Unchanged.needs_redraw());
        assert!(Transition::CursorMoved.needs_redraw());
        assert!(Transition::ValueChanged { index: 0 }.needs_redraw());
    }

    #[test]
    fn knobs_edit_loaded_patch() {
        let mut nav = nav_in_first_patch();
        let mut knobs: KnobSet<3> = KnobSet::default();

        // Cutoff sits at 100/255, far from a knob at 1.0.
        assert_eq!(nav.apply_knobs(&mut knobs, &[1.0, 0.0, 0.0]), 0);
        assert_eq!(value(&nav, 0), 100.0);

        assert_eq!(nav.apply_knobs(&mut knobs, &[0.375, 0.0, 1.0]), 2);
        assert_eq!(value(&nav, 0), 95.625);
        assert_eq!(nav.patch().param(2).unwrap().format_value().as_str(), "On");
        assert_eq!(nav.patch().params().len(), FIRST.len());
    }
}
