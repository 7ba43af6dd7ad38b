//! Parameterized synthesizer patches and their navigation model.
//!
//! This crate holds the display-independent half of the synth UI:
//!
//! - [`patch`]: [`Param`](patch::Param) and [`Patch`](patch::Patch), the
//!   typed, bounded, normalizable value model, plus the factory
//!   [`PRESETS`](patch::PRESETS).
//! - [`input`]: the closed [`InputEvent`](input::InputEvent) key vocabulary.
//! - [`nav`]: the [`Navigator`](nav::Navigator) menu state machine that
//!   turns key events into value edits.
//! - [`knobs`]: pickup and scale catch-up for absolute knobs.
//!
//! Rendering lives in the `synthui-display` crate.
//!
//! # Crate Features
//!
//! - **`defmt`**: [`defmt::Format`] implementations and debug logging for
//!   embedded targets.

#![no_std]

pub mod input;
pub mod knobs;
pub mod nav;
pub mod patch;
