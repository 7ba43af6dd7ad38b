//! Factory patches, instantiated by the navigator when the user picks one.

use super::{Param, PatchTemplate, ValueFormat};

const WAVES: &[&str] = &["Saw", "Square", "Sine", "Tri"];
const FILTER_TYPES: &[&str] = &["LP", "BP", "HP"];
const OFF_ON: &[&str] = &["Off", "On"];
const OCTAVES: &[&str] = &["-2", "-1", "0", "+1", "+2"];

const SECONDS: ValueFormat = ValueFormat::new(2, "s");
const HERTZ: ValueFormat = ValueFormat::new(0, "Hz");

static LEAD: [Param; 10] = [
    Param::choice("Wave", 0, WAVES).with_description("Oscillator waveform"),
    Param::range("Detune", 1.01, 1.0, 1.1, ValueFormat::new(3, ""))
        .with_description("Second oscillator ratio")
        .with_step(0.001),
    Param::choice("Octave", 2, OCTAVES),
    Param::choice("Filter", 0, FILTER_TYPES).with_description("Filter type"),
    Param::range("Cutoff", 8000.0, 100.0, 9000.0, HERTZ)
        .with_description("Filter cutoff frequency")
        .with_step(50.0),
    Param::range("Reso", 1.2, 0.5, 4.0, ValueFormat::new(1, ""))
        .with_description("Filter resonance")
        .with_step(0.1),
    Param::range("Attack", 0.1, 0.0, 2.0, SECONDS).with_step(0.01),
    Param::range("Release", 0.2, 0.0, 4.0, SECONDS).with_step(0.01),
    Param::range("Volume", 200.0, 0.0, 255.0, ValueFormat::INTEGER),
    Param::choice("Glide", 0, OFF_ON).with_description("Portamento"),
];

static BASS: [Param; 8] = [
    Param::choice("Wave", 1, WAVES).with_description("Oscillator waveform"),
    Param::choice("Octave", 1, OCTAVES),
    Param::range("Cutoff", 1200.0, 100.0, 9000.0, HERTZ)
        .with_description("Filter cutoff frequency")
        .with_step(50.0),
    Param::range("Reso", 2.5, 0.5, 4.0, ValueFormat::new(1, ""))
        .with_description("Filter resonance")
        .with_step(0.1),
    Param::range("EnvMod", 128.0, 0.0, 255.0, ValueFormat::INTEGER)
        .with_description("Filter envelope amount"),
    Param::range("Decay", 0.3, 0.0, 2.0, SECONDS).with_step(0.01),
    Param::choice("Accent", 1, OFF_ON),
    Param::range("Volume", 220.0, 0.0, 255.0, ValueFormat::INTEGER),
];

static PAD: [Param; 6] = [
    Param::choice("Wave", 3, WAVES).with_description("Oscillator waveform"),
    Param::range("Detune", 1.02, 1.0, 1.1, ValueFormat::new(3, ""))
        .with_description("Second oscillator ratio")
        .with_step(0.001),
    Param::range("Cutoff", 3000.0, 100.0, 9000.0, HERTZ).with_step(50.0),
    Param::range("Attack", 1.5, 0.0, 4.0, SECONDS).with_step(0.05),
    Param::range("Release", 3.0, 0.0, 8.0, SECONDS).with_step(0.05),
    Param::range("Volume", 160.0, 0.0, 255.0, ValueFormat::INTEGER),
];

/// The patches offered on the patch list, in display order.
pub static PRESETS: [PatchTemplate; 3] = [
    PatchTemplate::new("Lead", &LEAD),
    PatchTemplate::new("Bass", &BASS),
    PatchTemplate::new("Pad", &PAD),
];
