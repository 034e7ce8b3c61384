//! Unit scaling between form units and SI.
//!
//! Forms take resistance in kΩ (or Ω), capacitance in nF, inductance in mH
//! and time in ms. Everything is scaled to SI before a formula is evaluated.

use std::f64::consts::PI;

/// kilo (kΩ → Ω)
pub const KILO: f64 = 1e3;
/// milli (mH → H, ms → s)
pub const MILLI: f64 = 1e-3;
/// nano (nF → F)
pub const NANO: f64 = 1e-9;

/// Kilo-ohms to ohms.
pub fn kilo_ohms(value: f64) -> f64 {
    value * KILO
}

/// Nanofarads to farads.
pub fn nano_farads(value: f64) -> f64 {
    value * NANO
}

/// Millihenries to henries.
pub fn milli_henries(value: f64) -> f64 {
    value * MILLI
}

/// Milliseconds to seconds.
pub fn milli_seconds(value: f64) -> f64 {
    value * MILLI
}

/// Angular frequency ω = 2πf.
pub fn angular_frequency(frequency_hz: f64) -> f64 {
    2.0 * PI * frequency_hz
}

/// Format a value with an SI prefix, e.g. `15.92k` or `10.00u`.
pub fn format_si(value: f64) -> String {
    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 || abs_value == 0.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else {
        (value * 1e12, "p")
    };

    format!("{:.2}{}", scaled, suffix)
}
