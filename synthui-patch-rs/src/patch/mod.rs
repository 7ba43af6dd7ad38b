//! Synthesizer parameter and patch value model.
//!
//! A [`Param`] is one named, bounded setting: either a numeric
//! [`Range`](ParamKind::Range) or a [`Choice`](ParamKind::Choice) among
//! fixed labels. A [`Patch`] is a named, ordered, fixed-size collection of
//! independently owned parameters, deep-copied from a static
//! [`PatchTemplate`].
//!
//! ```text
//! PRESETS (static)        loaded Patch (owned copy)
//! ┌──────────────┐  copy  ┌──────────────┐
//! │ "Lead"       │ ─────► │ "Lead"       │  ← Navigator edits values here
//! │  Wave  Saw   │        │  Wave  Square│
//! │  Cutoff 8000 │        │  Cutoff 6500 │
//! └──────────────┘        └──────────────┘
//! ```
//!
//! Every parameter exposes a **normalized position** in `[0, 1]`, which is
//! what the renderer draws sliders from and what absolute knobs write to.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation: names and formatted values live in
//! [`heapless::String`] buffers, parameter lists in [`heapless::Vec`] sized
//! by [`MAX_PARAMS`].

mod error;
mod instance;
mod param;
mod presets;

pub use error::{ParamError, PatchError};
pub use instance::{Patch, PatchTemplate};
pub use param::{Param, ParamKind, ValueFormat};
pub use presets::PRESETS;

use heapless::String;

/// Maximum length of a patch name in bytes; longer names are truncated.
pub const MAX_PATCH_NAME_LEN: usize = 20;

/// Maximum number of parameters in one patch.
pub const MAX_PARAMS: usize = 16;

/// Capacity of a formatted parameter value.
pub const VALUE_TEXT_LEN: usize = 16;

/// Shown in place of a formatted number too wide for [`VALUE_TEXT_LEN`].
pub const OVERFLOW_TEXT: &str = "###";

/// Text produced by [`Param::format_value()`].
pub type ValueText = String<VALUE_TEXT_LEN>;

/// Copy as much of `src` as fits into a fixed-capacity string, stopping at
/// a character boundary. This is how every over-long name or label is
/// shortened for display.
pub fn copy_truncated<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
