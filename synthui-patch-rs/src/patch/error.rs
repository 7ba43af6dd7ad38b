/// Reasons a [`Param`](super::Param) definition is rejected by
/// [`Param::validate()`](super::Param::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamError {
    /// `min_value` is not strictly below `max_value`, so the normalized
    /// position would divide by zero.
    EmptyRange,
    /// A choice parameter has no labels, or `max_value` differs from the
    /// number of labels.
    ChoiceCountMismatch,
    /// The initial value lies outside `[min_value, max_value]`.
    ValueOutOfRange,
}

/// Errors that can occur when building a [`Patch`](super::Patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatchError {
    /// The template holds more than [`MAX_PARAMS`](super::MAX_PARAMS) parameters.
    TooManyParams,
    /// The template parameter at `index` failed validation.
    InvalidParam {
        /// Position of the offending parameter in the template.
        index: usize,
        /// Why it was rejected.
        error: ParamError,
    },
}
