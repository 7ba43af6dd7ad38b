use heapless::{String, Vec};

use super::error::PatchError;
use super::param::Param;
use super::{copy_truncated, MAX_PARAMS, MAX_PATCH_NAME_LEN};

/// A named, ordered, fixed-size set of parameters.
///
/// Built by deep-copying a template slice, so a preset table can stamp out
/// any number of patches without aliasing: editing one patch never touches
/// the template or another patch. Parameter order is the editing order used
/// by the [`Navigator`](crate::nav::Navigator).
///
/// The parameter set cannot grow or shrink after construction, and no
/// parameter can be replaced or redefined: the only writes are the value
/// mutators below, each of which keeps the value inside its bounds. A patch
/// that passed [`Patch::new`] therefore stays valid forever.
///
/// # Examples
///
/// ```
/// use synthui::patch::{Param, Patch, ValueFormat};
///
/// let template = [
///     Param::range("Attack", 10.0, 0.0, 255.0, ValueFormat::INTEGER),
///     Param::choice("Wave", 0, &["Sine", "Square", "Saw"]),
/// ];
/// let mut patch = Patch::new("Lead Synth 1 Extra Long Name", &template).unwrap();
/// assert_eq!(patch.name(), "Lead Synth 1 Extra L");
///
/// assert!(patch.set_value(0, 99.0));
/// assert_eq!(template[0].value(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    name: String<MAX_PATCH_NAME_LEN>,
    params: Vec<Param, MAX_PARAMS>,
}

impl Patch {
    /// Deep-copy `template` into a new patch called `name`.
    ///
    /// Names longer than [`MAX_PATCH_NAME_LEN`] are silently truncated.
    ///
    /// # Errors
    ///
    /// - [`PatchError::TooManyParams`] if `template` exceeds [`MAX_PARAMS`].
    /// - [`PatchError::InvalidParam`] if a parameter fails
    ///   [`Param::validate()`].
    pub fn new(name: &str, template: &[Param]) -> Result<Self, PatchError> {
        if template.len() > MAX_PARAMS {
            return Err(PatchError::TooManyParams);
        }

        let mut params = Vec::new();
        for (index, param) in template.iter().enumerate() {
            param
                .validate()
                .map_err(|error| PatchError::InvalidParam { index, error })?;
            params
                .push(*param)
                .map_err(|_| PatchError::TooManyParams)?;
        }

        Ok(Self {
            name: copy_truncated(name),
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter at `index` (0-based), or `None` when out of range.
    pub fn param(&self, index: usize) -> Option<&Param> {
        self.params.get(index)
    }

    /// All parameters in editing order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    // ── Value mutators ───────────────────────────────────────────────
    //
    // Each returns `true` when the value at `index` changed. An index past
    // the end is ignored and returns `false`.

    /// See [`Param::set_value`].
    pub fn set_value(&mut self, index: usize, value: f32) -> bool {
        self.update(index, |param| param.set_value(value))
    }

    /// See [`Param::step_by`].
    pub fn step_by(&mut self, index: usize, steps: i32) -> bool {
        self.update(index, |param| param.step_by(steps))
    }

    /// See [`Param::toggle`]. `false` for anything but a two-label choice.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.update(index, |param| {
            param.toggle();
        })
    }

    /// See [`Param::set_from_normalized_position`].
    pub fn set_from_normalized_position(&mut self, index: usize, pos: f32) -> bool {
        self.update(index, |param| param.set_from_normalized_position(pos))
    }

    /// See [`Param::set_from_gauge_value`].
    pub fn set_from_gauge_value(&mut self, index: usize, gauge: u8) -> bool {
        self.update(index, |param| param.set_from_gauge_value(gauge))
    }

    fn update(&mut self, index: usize, apply: impl FnOnce(&mut Param)) -> bool {
        let Some(param) = self.params.get_mut(index) else {
            return false;
        };
        let before = param.value();
        apply(param);
        param.value() != before
    }
}

/// A static preset: a name plus a parameter table to copy from.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatchTemplate {
    pub name: &'static str,
    pub params: &'static [Param],
}

impl PatchTemplate {
    pub const fn new(name: &'static str, params: &'static [Param]) -> Self {
        Self { name, params }
    }

    /// Build an independent [`Patch`] from this template.
    pub fn instantiate(&self) -> Result<Patch, PatchError> {
        Patch::new(self.name, self.params)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{ParamError, ValueFormat};

    fn template() -> [Param; 2] {
        [
            Param::range("Attack", 10.0, 0.0, 255.0, ValueFormat::INTEGER),
            Param::choice("Wave", 1, &["Sine", "Square", "Saw"]),
        ]
    }

    #[test]
    fn long_name_is_truncated() {
        let patch = Patch::new("Lead Synth 1 Extra Long Name", &template()).unwrap();
        assert_eq!(patch.name(), "Lead Synth 1 Extra L");
        assert_eq!(patch.name().len(), MAX_PATCH_NAME_LEN);
        assert_eq!(patch.len(), 2);
    }

    #[test]
    fn short_name_is_kept() {
        let patch = Patch::new("Bass", &template()).unwrap();
        assert_eq!(patch.name(), "Bass");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 19 ASCII bytes followed by a 2-byte character.
        let patch = Patch::new("ABCDEFGHIJKLMNOPQRSé", &template()).unwrap();
        assert_eq!(patch.name(), "ABCDEFGHIJKLMNOPQRS");
    }

    #[test]
    fn params_are_independent_copies() {
        let template = template();
        let mut a = Patch::new("A", &template).unwrap();
        let b = Patch::new("B", &template).unwrap();

        assert!(a.set_value(0, 200.0));
        assert!(a.step_by(1, 1));

        assert_eq!(a.param(0).unwrap().value(), 200.0);
        assert_eq!(b.param(0).unwrap().value(), 10.0);
        assert_eq!(template[0].value(), 10.0);
        assert_eq!(template[1].value(), 1.0);
    }

    #[test]
    fn index_access_is_range_checked() {
        let mut patch = Patch::new("P", &template()).unwrap();
        assert!(patch.param(1).is_some());
        assert!(patch.param(2).is_none());
        assert!(!patch.set_value(99, 1.0));
        assert!(!patch.step_by(99, 1));
        assert!(!patch.toggle(99));
        assert!(!patch.set_from_normalized_position(99, 0.5));
        assert!(!patch.set_from_gauge_value(99, 7));
        assert_eq!(patch.params().len(), 2);
    }

    #[test]
    fn empty_template_builds_empty_patch() {
        let patch = Patch::new("Init", &[]).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn too_many_params_rejected() {
        let params = [Param::range("X", 0.0, 0.0, 1.0, ValueFormat::INTEGER); MAX_PARAMS + 1];
        assert_eq!(Patch::new("Big", &params), Err(PatchError::TooManyParams));
    }

    #[test]
    fn invalid_param_reports_index() {
        let params = [
            Param::range("Ok", 0.0, 0.0, 1.0, ValueFormat::INTEGER),
            Param::range("Flat", 3.0, 3.0, 3.0, ValueFormat::INTEGER),
        ];
        assert_eq!(
            Patch::new("Bad", &params),
            Err(PatchError::InvalidParam {
                index: 1,
                error: ParamError::EmptyRange
            })
        );
    }

    #[test]
    fn template_instantiates_fresh_patch() {
        static PARAMS: [Param; 1] = [Param::range("Vol", 100.0, 0.0, 127.0, ValueFormat::INTEGER)];
        let preset = PatchTemplate::new("Pad", &PARAMS);

        let mut first = preset.instantiate().unwrap();
        first.set_value(0, 0.0);

        let second = preset.instantiate().unwrap();
        assert_eq!(second.param(0).unwrap().value(), 100.0);
        assert_eq!(second.name(), "Pad");
    }

    // ── Value mutators ───────────────────────────────────────────────

    #[test]
    fn mutators_report_whether_value_changed() {
        let mut patch = Patch::new("P", &template()).unwrap();
        assert!(!patch.set_value(0, 10.0));
        assert!(patch.set_value(0, 300.0));
        assert_eq!(patch.param(0).unwrap().value(), 255.0);
        assert!(!patch.step_by(0, 1));
        assert!(patch.step_by(0, -5));
        assert_eq!(patch.param(0).unwrap().value(), 250.0);
        assert!(patch.set_from_gauge_value(0, 0));
        assert_eq!(patch.param(0).unwrap().value(), 0.0);

        // "Wave" has three labels, so it does not toggle.
        assert!(!patch.toggle(1));
        assert_eq!(patch.param(1).unwrap().value(), 1.0);
    }

    #[test]
    fn toggle_flips_two_label_choice() {
        let params = [Param::choice("Glide", 0, &["Off", "On"])];
        let mut patch = Patch::new("P", &params).unwrap();
        assert!(patch.toggle(0));
        assert_eq!(patch.param(0).unwrap().format_value().as_str(), "On");
        assert!(patch.toggle(0));
        assert_eq!(patch.param(0).unwrap().format_value().as_str(), "Off");
    }

    #[test]
    fn patch_stays_valid_under_any_value_write() {
        let params = [
            Param::range("Flat-ish", 5.0, 5.0, 6.0, ValueFormat::INTEGER),
            Param::choice("Wave", 0, &["Sine", "Square", "Saw"]),
            Param::choice("Glide", 1, &["Off", "On"]),
        ];
        let mut patch = Patch::new("P", &params).unwrap();

        for index in 0..patch.len() {
            patch.set_value(index, 1e30);
            patch.set_value(index, f32::NAN);
            patch.set_value(index, f32::NEG_INFINITY);
            patch.step_by(index, i32::MAX);
            patch.step_by(index, i32::MIN);
            patch.set_from_normalized_position(index, 7.5);
            patch.set_from_normalized_position(index, f32::NAN);
            patch.set_from_gauge_value(index, 255);
            patch.toggle(index);

            let param = patch.param(index).unwrap();
            assert_eq!(param.validate(), Ok(()), "{} after writes", param.name);
            assert_eq!(param.min_value(), params[index].min_value());
            assert_eq!(param.max_value(), params[index].max_value());
            assert_eq!(param.kind(), params[index].kind());
        }
    }
}
