//! Qualitative interpretation of an operating point.
//!
//! An operating point is mapped onto one of a few canned explanations by
//! comparing the operating frequency (RC) or observation time (RL) against
//! the circuit's characteristic value using fixed ratio thresholds.

use std::fmt;

/// Below `f_c * RC_BELOW_CUTOFF_RATIO` the RC operating point is "well below cutoff".
pub const RC_BELOW_CUTOFF_RATIO: f64 = 1.0 / 5.0;

/// Above `f_c * RC_ABOVE_CUTOFF_RATIO` the RC operating point is "well above cutoff".
pub const RC_ABOVE_CUTOFF_RATIO: f64 = 5.0;

/// Before `RL_EARLY_RATIO * τ` the RL step response is still in its early phase.
pub const RL_EARLY_RATIO: f64 = 0.2;

/// After `RL_SETTLED_RATIO * τ` the RL step response is near steady state.
pub const RL_SETTLED_RATIO: f64 = 3.0;

/// Where an RC test frequency sits relative to the cutoff frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RcRegion {
    WellBelowCutoff,
    NearCutoff,
    WellAboveCutoff,
}

impl RcRegion {
    /// Classify a test frequency against the cutoff frequency.
    pub fn classify(frequency_hz: f64, cutoff_hz: f64) -> Self {
        if frequency_hz < cutoff_hz * RC_BELOW_CUTOFF_RATIO {
            RcRegion::WellBelowCutoff
        } else if frequency_hz > cutoff_hz * RC_ABOVE_CUTOFF_RATIO {
            RcRegion::WellAboveCutoff
        } else {
            RcRegion::NearCutoff
        }
    }

    /// Plain-language explanation of this region.
    pub fn explanation(&self) -> &'static str {
        match self {
            RcRegion::WellBelowCutoff => {
                "The test frequency is much lower than the cutoff, so the capacitor is almost \
                 open for AC and the output follows the input with little attenuation."
            }
            RcRegion::NearCutoff => {
                "The test frequency lies around the cutoff region, so the output amplitude is \
                 roughly 0.7 times the input (about -3 dB), and the phase shift is significant."
            }
            RcRegion::WellAboveCutoff => {
                "The test frequency is much higher than the cutoff, so the capacitor effectively \
                 shorts AC to ground and the output is strongly attenuated."
            }
        }
    }
}

impl fmt::Display for RcRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RcRegion::WellBelowCutoff => "well below cutoff",
            RcRegion::NearCutoff => "near cutoff",
            RcRegion::WellAboveCutoff => "well above cutoff",
        };
        f.write_str(name)
    }
}

/// Where an RL observation instant sits relative to the time constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RlRegion {
    EarlyTransient,
    Transient,
    NearSteadyState,
}

impl RlRegion {
    /// Classify an observation time against the time constant (both in seconds).
    pub fn classify(time_s: f64, tau_s: f64) -> Self {
        if time_s < RL_EARLY_RATIO * tau_s {
            RlRegion::EarlyTransient
        } else if time_s > RL_SETTLED_RATIO * tau_s {
            RlRegion::NearSteadyState
        } else {
            RlRegion::Transient
        }
    }

    /// Plain-language explanation of this region.
    pub fn explanation(&self) -> &'static str {
        match self {
            RlRegion::EarlyTransient => {
                "The observation instant is very early compared to τ, so the inductor is \
                 strongly opposing the change in current. The current is still small and the \
                 inductor voltage is close to the supply."
            }
            RlRegion::Transient => {
                "The instant falls within the transient region. The current is rising and the \
                 inductor is partially opposing the change, so both resistor and inductor share \
                 the applied voltage."
            }
            RlRegion::NearSteadyState => {
                "The instant is many time constants after the step, so the current is almost at \
                 its steady-state value and the inductor voltage has nearly decayed to zero."
            }
        }
    }
}

impl fmt::Display for RlRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RlRegion::EarlyTransient => "early transient",
            RlRegion::Transient => "transient",
            RlRegion::NearSteadyState => "near steady state",
        };
        f.write_str(name)
    }
}

/// Fixed explanation for an ideal LC circuit at resonance.
pub const LC_EXPLANATION: &str = "At resonance, the reactive effects of L and C cancel each \
     other, so the circuit behaves as if it were purely resistive (limited only by series \
     resistance). Energy oscillates back and forth between the inductor's magnetic field and \
     the capacitor's electric field.";
