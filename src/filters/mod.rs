//! Passive filter frequency response.
//!
//! Three filter topologies are supported:
//! - RC low-pass (output across C)
//! - RC high-pass (output across R)
//! - Series RLC band-pass (output across R)
//!
//! [`analyze_filter`] sweeps the transfer-function magnitude over a
//! logarithmic window centred on the characteristic frequency, and
//! [`calculate_characteristics`] evaluates only the closed-form values.

mod characteristics;
mod sweep;

pub use characteristics::{calculate_characteristics, FilterCharacteristics};
pub use sweep::{
    analyze_filter, logspace, FilterAnalysis, FilterSummary, FrequencySample, FrequencySweep,
    SweepConfig,
};

use std::f64::consts::PI;
use std::fmt;

use crate::error::Result;
use crate::units::{kilo_ohms, milli_henries, nano_farads};
use crate::validate::{require_positive, Field};

/// Number of samples in a frequency sweep.
pub const DEFAULT_SWEEP_SAMPLES: usize = 81;

/// The sweep runs from `f_char / span` to `f_char * span`.
pub const DEFAULT_SWEEP_SPAN: f64 = 20.0;

/// Filter topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    LowPass,
    HighPass,
    BandPass,
}

impl FilterKind {
    /// Parse the short tag used by the forms (`lpf`, `hpf`, `bpf`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "lpf" => Some(FilterKind::LowPass),
            "hpf" => Some(FilterKind::HighPass),
            "bpf" => Some(FilterKind::BandPass),
            _ => None,
        }
    }

    /// Short tag (`lpf`, `hpf`, `bpf`).
    pub fn tag(&self) -> &'static str {
        match self {
            FilterKind::LowPass => "lpf",
            FilterKind::HighPass => "hpf",
            FilterKind::BandPass => "bpf",
        }
    }

    /// Human-readable name, e.g. "Low-Pass".
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::LowPass => "Low-Pass",
            FilterKind::HighPass => "High-Pass",
            FilterKind::BandPass => "Band-Pass",
        }
    }

    /// Dataset label used when the sweep is charted.
    pub fn chart_label(&self) -> String {
        format!("{} |H(jω)|", self.name())
    }

    /// One-line description shown above the input form.
    pub fn hint(&self) -> &'static str {
        match self {
            FilterKind::LowPass => {
                "RC low-pass filter. It passes low frequencies and attenuates high frequencies."
            }
            FilterKind::HighPass => {
                "RC high-pass filter. It passes high frequencies and blocks low frequencies."
            }
            FilterKind::BandPass => {
                "Series RLC band-pass filter. It passes a band around the resonant frequency and \
                 attenuates frequencies away from it."
            }
        }
    }

    /// Qualitative description of the response shown with the analysis.
    pub fn narrative(&self) -> &'static str {
        match self {
            FilterKind::LowPass => {
                "At frequencies well below f_c, the output is almost equal to the input. \
                 At frequencies well above f_c, the output amplitude tends to zero."
            }
            FilterKind::HighPass => {
                "At frequencies well below f_c, the capacitor blocks the signal and the output is \
                 nearly zero. At frequencies well above f_c, the output approaches the input \
                 amplitude."
            }
            FilterKind::BandPass => {
                "Around f0, the filter passes signals with relatively high gain. \
                 Far away from f0, the gain drops and the signal is attenuated."
            }
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filter component values as entered in the form.
///
/// RC filters take R in kΩ; the band-pass takes R in Ω. Capacitance is in
/// nF and inductance in mH throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterCircuit {
    LowPass { r_kohm: f64, c_nf: f64 },
    HighPass { r_kohm: f64, c_nf: f64 },
    BandPass { r_ohm: f64, l_mh: f64, c_nf: f64 },
}

impl FilterCircuit {
    /// Get the filter topology.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterCircuit::LowPass { .. } => FilterKind::LowPass,
            FilterCircuit::HighPass { .. } => FilterKind::HighPass,
            FilterCircuit::BandPass { .. } => FilterKind::BandPass,
        }
    }

    /// Default component values for a topology.
    pub fn default_for(kind: FilterKind) -> Self {
        match kind {
            FilterKind::LowPass => FilterCircuit::LowPass {
                r_kohm: 10.0,
                c_nf: 1.0,
            },
            FilterKind::HighPass => FilterCircuit::HighPass {
                r_kohm: 10.0,
                c_nf: 1.0,
            },
            FilterKind::BandPass => FilterCircuit::BandPass {
                r_ohm: 100.0,
                l_mh: 10.0,
                c_nf: 1.0,
            },
        }
    }

    /// The named form values, in form order.
    pub fn fields(&self) -> Vec<Field> {
        match *self {
            FilterCircuit::LowPass { r_kohm, c_nf } | FilterCircuit::HighPass { r_kohm, c_nf } => {
                vec![("R", r_kohm), ("C", c_nf)]
            }
            FilterCircuit::BandPass { r_ohm, l_mh, c_nf } => {
                vec![("R", r_ohm), ("L", l_mh), ("C", c_nf)]
            }
        }
    }

    /// Validate the form values and scale them to SI.
    pub fn to_si(&self) -> Result<FilterComponents> {
        require_positive(&self.fields())?;
        match *self {
            FilterCircuit::LowPass { r_kohm, c_nf } | FilterCircuit::HighPass { r_kohm, c_nf } => {
                let components = RcComponents {
                    r: kilo_ohms(r_kohm),
                    c: nano_farads(c_nf),
                };
                Ok(if self.kind() == FilterKind::LowPass {
                    FilterComponents::LowPass(components)
                } else {
                    FilterComponents::HighPass(components)
                })
            }
            FilterCircuit::BandPass { r_ohm, l_mh, c_nf } => {
                Ok(FilterComponents::BandPass(RlcComponents {
                    r: r_ohm,
                    l: milli_henries(l_mh),
                    c: nano_farads(c_nf),
                }))
            }
        }
    }
}

/// RC section in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcComponents {
    /// Resistance (Ω)
    pub r: f64,
    /// Capacitance (F)
    pub c: f64,
}

impl RcComponents {
    /// Time constant τ = RC (s).
    pub fn tau(&self) -> f64 {
        self.r * self.c
    }

    /// Cutoff frequency 1/(2πRC) (Hz).
    pub fn cutoff_hz(&self) -> f64 {
        1.0 / (2.0 * PI * self.tau())
    }
}

/// Series RLC section in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RlcComponents {
    /// Resistance (Ω)
    pub r: f64,
    /// Inductance (H)
    pub l: f64,
    /// Capacitance (F)
    pub c: f64,
}

impl RlcComponents {
    /// Resonant frequency 1/(2π√(LC)) (Hz).
    pub fn resonant_hz(&self) -> f64 {
        1.0 / (2.0 * PI * (self.l * self.c).sqrt())
    }

    /// Bandwidth R/(2πL) (Hz).
    pub fn bandwidth_hz(&self) -> f64 {
        self.r / (2.0 * PI * self.l)
    }

    /// Quality factor (1/R)√(L/C).
    pub fn quality_factor(&self) -> f64 {
        (1.0 / self.r) * (self.l / self.c).sqrt()
    }
}

/// Validated filter components in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterComponents {
    LowPass(RcComponents),
    HighPass(RcComponents),
    BandPass(RlcComponents),
}

impl FilterComponents {
    /// Cutoff frequency for RC filters, resonant frequency for the band-pass.
    pub fn characteristic_hz(&self) -> f64 {
        match self {
            FilterComponents::LowPass(rc) | FilterComponents::HighPass(rc) => rc.cutoff_hz(),
            FilterComponents::BandPass(rlc) => rlc.resonant_hz(),
        }
    }

    /// Transfer-function magnitude |H(jω)| at angular frequency `w`.
    pub fn magnitude(&self, w: f64) -> f64 {
        match self {
            FilterComponents::LowPass(rc) => {
                let wt = w * rc.tau();
                1.0 / (1.0 + wt * wt).sqrt()
            }
            FilterComponents::HighPass(rc) => {
                let wt = w * rc.tau();
                wt / (1.0 + wt * wt).sqrt()
            }
            FilterComponents::BandPass(rlc) => {
                let x = w * rlc.l / rlc.r;
                let detune = 1.0 - w * w * rlc.l * rlc.c;
                x / (detune * detune + x * x).sqrt()
            }
        }
    }
}

/// Every default circuit with one field replaced by an unusable value.
#[cfg(test)]
pub(crate) fn circuits_with_invalid_field() -> Vec<FilterCircuit> {
    let mut circuits = Vec::new();
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        circuits.extend([
            FilterCircuit::LowPass { r_kohm: bad, c_nf: 1.0 },
            FilterCircuit::LowPass { r_kohm: 10.0, c_nf: bad },
            FilterCircuit::HighPass { r_kohm: bad, c_nf: 1.0 },
            FilterCircuit::HighPass { r_kohm: 10.0, c_nf: bad },
            FilterCircuit::BandPass { r_ohm: bad, l_mh: 10.0, c_nf: 1.0 },
            FilterCircuit::BandPass { r_ohm: 100.0, l_mh: bad, c_nf: 1.0 },
            FilterCircuit::BandPass { r_ohm: 100.0, l_mh: 10.0, c_nf: bad },
        ]);
    }
    circuits
}
