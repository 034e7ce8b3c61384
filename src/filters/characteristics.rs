//! Closed-form filter characteristics, without a sweep.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::validate::require_positive_or;

use super::{FilterCircuit, FilterComponents, FilterKind};

/// Characteristic values of a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterCharacteristics {
    /// RC low-pass or high-pass
    Rc {
        kind: FilterKind,
        /// Time constant τ = RC (s)
        tau_s: f64,
        /// Cutoff frequency 1/(2πRC) (Hz)
        cutoff_hz: f64,
    },
    /// Series RLC band-pass
    ///
    /// The half-power edges are the symmetric approximation `f0 ± BW/2`,
    /// which is only accurate for high-Q circuits. For Q < 0.5 the lower
    /// edge comes out negative.
    BandPass {
        f0_hz: f64,
        bandwidth_hz: f64,
        q: f64,
        /// Lower half-power frequency f0 - BW/2 (Hz)
        f_lower_hz: f64,
        /// Upper half-power frequency f0 + BW/2 (Hz)
        f_upper_hz: f64,
    },
}

/// Evaluate the closed-form characteristics of a filter.
pub fn calculate_characteristics(circuit: &FilterCircuit) -> Result<FilterCharacteristics> {
    let message = match circuit.kind() {
        FilterKind::LowPass | FilterKind::HighPass => "Enter valid R and C.",
        FilterKind::BandPass => "Enter valid R, L, C.",
    };
    require_positive_or(&circuit.fields(), message)?;

    let characteristics = match circuit.to_si()? {
        FilterComponents::LowPass(rc) | FilterComponents::HighPass(rc) => {
            FilterCharacteristics::Rc {
                kind: circuit.kind(),
                tau_s: rc.tau(),
                cutoff_hz: rc.cutoff_hz(),
            }
        }
        FilterComponents::BandPass(rlc) => {
            let f0_hz = rlc.resonant_hz();
            let bandwidth_hz = rlc.bandwidth_hz();
            FilterCharacteristics::BandPass {
                f0_hz,
                bandwidth_hz,
                q: rlc.quality_factor(),
                f_lower_hz: f0_hz - bandwidth_hz / 2.0,
                f_upper_hz: f0_hz + bandwidth_hz / 2.0,
            }
        }
    };

    debug!(kind = circuit.kind().tag(), ?characteristics, "calculated filter characteristics");

    Ok(characteristics)
}

impl fmt::Display for FilterCharacteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FilterCharacteristics::Rc {
                kind,
                tau_s,
                cutoff_hz,
            } => {
                writeln!(f, "{} Frequency Calculator", kind)?;
                writeln!(f, "  Time constant (τ):      {:.3} ms", tau_s * 1e3)?;
                write!(f, "  Cutoff frequency (f_c): {:.3} Hz", cutoff_hz)
            }
            FilterCharacteristics::BandPass {
                f0_hz,
                bandwidth_hz,
                q,
                f_lower_hz,
                f_upper_hz,
            } => {
                writeln!(f, "Band-Pass Filter Frequency Calculator")?;
                writeln!(f, "  Resonant frequency (f0): {:.3} Hz", f0_hz)?;
                writeln!(f, "  Bandwidth (BW):          {:.3} Hz", bandwidth_hz)?;
                writeln!(f, "  Quality factor (Q):      {:.3}", q)?;
                writeln!(f, "  Lower cutoff (f1):       {:.3} Hz", f_lower_hz)?;
                write!(f, "  Upper cutoff (f2):       {:.3} Hz", f_upper_hz)
            }
        }
    }
}
