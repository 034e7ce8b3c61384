//! RC, RL and LC operating-point solvers.
//!
//! - RC: low-pass driven by a sinusoid, evaluated at one test frequency
//! - RL: series circuit excited by a DC step, evaluated at one instant
//! - LC: ideal resonant tank

use std::f64::consts::PI;
use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::interpret::{RcRegion, RlRegion, LC_EXPLANATION};
use crate::units::{angular_frequency, kilo_ohms, milli_henries, milli_seconds, nano_farads};
use crate::validate::require_positive;

/// Inputs for the RC low-pass operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcInputs {
    /// Input amplitude (V peak)
    pub vs: f64,
    /// Test frequency (Hz)
    pub frequency_hz: f64,
    /// Resistance (kΩ)
    pub r_kohm: f64,
    /// Capacitance (nF)
    pub c_nf: f64,
}

impl Default for RcInputs {
    fn default() -> Self {
        Self {
            vs: 5.0,
            frequency_hz: 1000.0,
            r_kohm: 10.0,
            c_nf: 1.0,
        }
    }
}

/// RC low-pass results at the test frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcResult {
    pub inputs: RcInputs,
    /// Time constant τ = RC (s)
    pub tau_s: f64,
    /// Cutoff frequency 1/(2πτ) (Hz)
    pub cutoff_hz: f64,
    /// Gain magnitude |H(jω)| at the test frequency
    pub gain: f64,
    /// Output amplitude (V peak)
    pub v_out: f64,
    pub region: RcRegion,
}

/// Solve an RC low-pass in sinusoidal steady state.
pub fn solve_rc(inputs: &RcInputs) -> Result<RcResult> {
    require_positive(&[
        ("Vs", inputs.vs),
        ("f", inputs.frequency_hz),
        ("R", inputs.r_kohm),
        ("C", inputs.c_nf),
    ])?;

    let r = kilo_ohms(inputs.r_kohm);
    let c = nano_farads(inputs.c_nf);
    let tau_s = r * c;
    let cutoff_hz = 1.0 / (2.0 * PI * tau_s);
    let w = angular_frequency(inputs.frequency_hz);
    let gain = 1.0 / (1.0 + (w * tau_s).powi(2)).sqrt();
    let v_out = inputs.vs * gain;
    let region = RcRegion::classify(inputs.frequency_hz, cutoff_hz);

    debug!(tau_s, cutoff_hz, gain, v_out, %region, "solved RC operating point");

    Ok(RcResult {
        inputs: *inputs,
        tau_s,
        cutoff_hz,
        gain,
        v_out,
        region,
    })
}

impl RcResult {
    pub fn explanation(&self) -> &'static str {
        self.region.explanation()
    }
}

impl fmt::Display for RcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RC Low-Pass Numerical Results")?;
        writeln!(f, "  R:                    {:.3} kΩ", self.inputs.r_kohm)?;
        writeln!(f, "  C:                    {:.3} nF", self.inputs.c_nf)?;
        writeln!(f, "  Time constant τ:      {:.3} ms", self.tau_s * 1e3)?;
        writeln!(f, "  Cutoff frequency f_c: {:.2} Hz", self.cutoff_hz)?;
        writeln!(f, "  Test frequency f:     {:.2} Hz", self.inputs.frequency_hz)?;
        writeln!(f, "  Gain |H(jω)|:         {:.3}", self.gain)?;
        writeln!(f, "  Output amplitude:     {:.3} V (peak)", self.v_out)?;
        writeln!(f)?;
        write!(f, "Interpretation ({}): {}", self.region, self.explanation())
    }
}

/// Inputs for the RL step response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RlInputs {
    /// Step voltage (V)
    pub vs: f64,
    /// Resistance (Ω)
    pub r_ohm: f64,
    /// Inductance (mH)
    pub l_mh: f64,
    /// Observation time (ms)
    pub t_ms: f64,
}

impl Default for RlInputs {
    fn default() -> Self {
        Self {
            vs: 12.0,
            r_ohm: 100.0,
            l_mh: 10.0,
            t_ms: 5.0,
        }
    }
}

/// RL step response at the observation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RlResult {
    pub inputs: RlInputs,
    /// Time constant τ = L/R (s)
    pub tau_s: f64,
    /// Final current Vs/R (A)
    pub i_final: f64,
    /// Current at the observation time (A)
    pub i_t: f64,
    /// Inductor voltage at the observation time (V)
    pub v_l: f64,
    pub region: RlRegion,
}

/// Solve a series RL circuit excited by a DC step.
pub fn solve_rl(inputs: &RlInputs) -> Result<RlResult> {
    require_positive(&[
        ("Vs", inputs.vs),
        ("R", inputs.r_ohm),
        ("L", inputs.l_mh),
        ("t", inputs.t_ms),
    ])?;

    let l = milli_henries(inputs.l_mh);
    let t = milli_seconds(inputs.t_ms);
    let tau_s = l / inputs.r_ohm;
    let i_final = inputs.vs / inputs.r_ohm;
    let decay = (-t / tau_s).exp();
    let i_t = i_final * (1.0 - decay);
    let v_l = inputs.vs * decay;
    let region = RlRegion::classify(t, tau_s);

    debug!(tau_s, i_final, i_t, v_l, %region, "solved RL step response");

    Ok(RlResult {
        inputs: *inputs,
        tau_s,
        i_final,
        i_t,
        v_l,
        region,
    })
}

impl RlResult {
    pub fn explanation(&self) -> &'static str {
        self.region.explanation()
    }
}

impl fmt::Display for RlResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RL Step Response")?;
        writeln!(f, "  R:                      {:.2} Ω", self.inputs.r_ohm)?;
        writeln!(f, "  L:                      {:.3} mH", self.inputs.l_mh)?;
        writeln!(f, "  Time constant τ:        {:.3} ms", self.tau_s * 1e3)?;
        writeln!(f, "  Final current I(∞):     {:.3} A", self.i_final)?;
        writeln!(f, "  Observation time t:     {:.3} ms", self.inputs.t_ms)?;
        writeln!(f, "  Current I(t):           {:.3} A", self.i_t)?;
        writeln!(f, "  Inductor voltage V_L(t): {:.3} V", self.v_l)?;
        writeln!(f)?;
        write!(f, "Interpretation ({}): {}", self.region, self.explanation())
    }
}

/// Inputs for the ideal LC resonator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcInputs {
    /// Inductance (mH)
    pub l_mh: f64,
    /// Capacitance (nF)
    pub c_nf: f64,
}

impl Default for LcInputs {
    fn default() -> Self {
        Self {
            l_mh: 10.0,
            c_nf: 1.0,
        }
    }
}

/// Resonance of an ideal LC circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcResult {
    pub inputs: LcInputs,
    /// Resonant angular frequency (rad/s)
    pub omega0: f64,
    /// Resonant frequency (Hz)
    pub f0_hz: f64,
}

/// Solve an ideal LC resonant circuit.
pub fn solve_lc(inputs: &LcInputs) -> Result<LcResult> {
    require_positive(&[("L", inputs.l_mh), ("C", inputs.c_nf)])?;

    let l = milli_henries(inputs.l_mh);
    let c = nano_farads(inputs.c_nf);
    let omega0 = 1.0 / (l * c).sqrt();
    let f0_hz = omega0 / (2.0 * PI);

    debug!(omega0, f0_hz, "solved LC resonance");

    Ok(LcResult {
        inputs: *inputs,
        omega0,
        f0_hz,
    })
}

impl LcResult {
    pub fn explanation(&self) -> &'static str {
        LC_EXPLANATION
    }
}

impl fmt::Display for LcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LC Resonant Circuit")?;
        writeln!(f, "  L:                                {:.3} mH", self.inputs.l_mh)?;
        writeln!(f, "  C:                                {:.3} nF", self.inputs.c_nf)?;
        writeln!(f, "  Resonant angular frequency ω0:    {:.2} rad/s", self.omega0)?;
        writeln!(f, "  Resonant frequency f0:            {:.2} Hz", self.f0_hz)?;
        writeln!(f)?;
        write!(f, "Interpretation: {}", self.explanation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rc_reference_point() {
        let result = solve_rc(&RcInputs::default()).unwrap();

        assert_relative_eq!(result.tau_s, 1e-5, max_relative = 1e-12);
        assert_relative_eq!(result.cutoff_hz, 15915.494, epsilon = 1e-3);
        assert_eq!(result.region, RcRegion::WellBelowCutoff);
        assert_relative_eq!(result.gain, 0.998032, epsilon = 1e-6);
        assert_relative_eq!(result.v_out, 4.990160, epsilon = 1e-6);
    }

    #[test]
    fn test_rc_gain_at_cutoff_is_half_power() {
        let cutoff = solve_rc(&RcInputs::default()).unwrap().cutoff_hz;
        let at_cutoff = solve_rc(&RcInputs {
            frequency_hz: cutoff,
            ..RcInputs::default()
        })
        .unwrap();

        assert_relative_eq!(at_cutoff.gain, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_eq!(at_cutoff.region, RcRegion::NearCutoff);
    }

    #[test]
    fn test_rc_well_above_cutoff() {
        let result = solve_rc(&RcInputs {
            frequency_hz: 1e6,
            ..RcInputs::default()
        })
        .unwrap();
        assert_eq!(result.region, RcRegion::WellAboveCutoff);
        assert!(result.gain < 0.05);
    }

    #[test]
    fn test_rl_reference_point() {
        let result = solve_rl(&RlInputs::default()).unwrap();

        // τ = 10 mH / 100 Ω = 0.1 ms, t = 5 ms = 50τ
        assert_relative_eq!(result.tau_s, 1e-4, max_relative = 1e-12);
        assert_relative_eq!(result.i_final, 0.12);
        assert_relative_eq!(result.i_t, 0.12, epsilon = 1e-12);
        assert!(result.v_l < 1e-12);
        assert_eq!(result.region, RlRegion::NearSteadyState);
    }

    #[test]
    fn test_rl_early_instant() {
        let result = solve_rl(&RlInputs {
            t_ms: 0.01,
            ..RlInputs::default()
        })
        .unwrap();

        assert_eq!(result.region, RlRegion::EarlyTransient);
        assert_relative_eq!(result.i_t, 0.12 * (1.0 - (-0.1f64).exp()), epsilon = 1e-12);
        assert_relative_eq!(result.v_l, 12.0 * (-0.1f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_lc_reference_point() {
        let result = solve_lc(&LcInputs::default()).unwrap();

        assert_relative_eq!(result.omega0, 316227.766, epsilon = 1e-3);
        assert_relative_eq!(result.f0_hz, 50329.212, epsilon = 1e-3);
    }

    const BAD_VALUES: [f64; 5] = [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

    #[test]
    fn test_rc_rejects_every_invalid_field() {
        let setters: [fn(&mut RcInputs, f64); 4] = [
            |i, v| i.vs = v,
            |i, v| i.frequency_hz = v,
            |i, v| i.r_kohm = v,
            |i, v| i.c_nf = v,
        ];
        for (field, set) in setters.iter().enumerate() {
            for bad in BAD_VALUES {
                let mut inputs = RcInputs::default();
                set(&mut inputs, bad);
                let err = solve_rc(&inputs).unwrap_err();
                assert!(err.is_input_error(), "RC field {} = {} accepted", field, bad);
                assert_eq!(
                    err.to_string(),
                    "Please enter positive values for Vs, f, R and C."
                );
            }
        }
    }

    #[test]
    fn test_rl_rejects_every_invalid_field() {
        let setters: [fn(&mut RlInputs, f64); 4] = [
            |i, v| i.vs = v,
            |i, v| i.r_ohm = v,
            |i, v| i.l_mh = v,
            |i, v| i.t_ms = v,
        ];
        for (field, set) in setters.iter().enumerate() {
            for bad in BAD_VALUES {
                let mut inputs = RlInputs::default();
                set(&mut inputs, bad);
                let err = solve_rl(&inputs).unwrap_err();
                assert!(err.is_input_error(), "RL field {} = {} accepted", field, bad);
                assert_eq!(
                    err.to_string(),
                    "Please enter positive values for Vs, R, L and t."
                );
            }
        }
    }

    #[test]
    fn test_lc_rejects_every_invalid_field() {
        let setters: [fn(&mut LcInputs, f64); 2] = [|i, v| i.l_mh = v, |i, v| i.c_nf = v];
        for (field, set) in setters.iter().enumerate() {
            for bad in BAD_VALUES {
                let mut inputs = LcInputs::default();
                set(&mut inputs, bad);
                let err = solve_lc(&inputs).unwrap_err();
                assert!(err.is_input_error(), "LC field {} = {} accepted", field, bad);
                assert_eq!(err.to_string(), "Please enter positive values for L and C.");
            }
        }
    }

    #[test]
    fn test_solvers_are_idempotent() {
        let inputs = RcInputs {
            frequency_hz: 12345.0,
            ..RcInputs::default()
        };
        assert_eq!(solve_rc(&inputs).unwrap(), solve_rc(&inputs).unwrap());
        assert_eq!(
            solve_rl(&RlInputs::default()).unwrap(),
            solve_rl(&RlInputs::default()).unwrap()
        );
    }

    #[test]
    fn test_report_contains_interpretation() {
        let text = solve_rc(&RcInputs::default()).unwrap().to_string();
        assert!(text.contains("15915.49 Hz"));
        assert!(text.contains("well below cutoff"));
    }

    proptest! {
        #[test]
        fn rc_cutoff_matches_closed_form(r in 1e-3_f64..1e4, c in 1e-3_f64..1e4) {
            let result = solve_rc(&RcInputs { vs: 1.0, frequency_hz: 1.0, r_kohm: r, c_nf: c }).unwrap();
            let expected = 1.0 / (2.0 * PI * r * 1e3 * c * 1e-9);
            prop_assert!((result.cutoff_hz - expected).abs() <= 1e-9 * expected);
        }

        #[test]
        fn rl_current_and_voltage_limits(vs in 0.1_f64..100.0, r in 1.0_f64..1e4, l in 0.01_f64..100.0) {
            let tau_ms = l / r;
            let early = solve_rl(&RlInputs { vs, r_ohm: r, l_mh: l, t_ms: tau_ms * 1e-9 }).unwrap();
            prop_assert!(early.i_t.abs() <= 1e-6 * early.i_final);
            prop_assert!((early.v_l - vs).abs() <= 1e-6 * vs);

            let late = solve_rl(&RlInputs { vs, r_ohm: r, l_mh: l, t_ms: tau_ms * 50.0 }).unwrap();
            prop_assert!((late.i_t - late.i_final).abs() <= 1e-9 * late.i_final);
            prop_assert!(late.v_l <= 1e-9 * vs);
        }

        #[test]
        fn lc_angular_frequency_is_two_pi_f0(l in 1e-3_f64..1e3, c in 1e-3_f64..1e3) {
            let result = solve_lc(&LcInputs { l_mh: l, c_nf: c }).unwrap();
            prop_assert!((result.omega0 - 2.0 * PI * result.f0_hz).abs() <= 1e-9 * result.omega0);
        }
    }
}
