//! Logarithmic frequency sweep of a filter's magnitude response.
//!
//! The sweep window always spans `[f_char / span, f_char * span]`, so the
//! curve shows both asymptotes and the transition region whatever the
//! absolute component values are. Samples are geometrically spaced, which
//! puts them evenly on a log-frequency axis.

use std::fmt;

use tracing::debug;

use crate::error::{LabError, Result};
use crate::units::angular_frequency;

use super::{FilterCircuit, FilterComponents, FilterKind, DEFAULT_SWEEP_SAMPLES, DEFAULT_SWEEP_SPAN};

/// Configuration for the frequency sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Number of samples, including both window edges.
    pub samples: usize,
    /// Window half-width as a ratio of the characteristic frequency.
    pub span: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SWEEP_SAMPLES,
            span: DEFAULT_SWEEP_SPAN,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the window span ratio.
    ///
    /// A span of 20 sweeps from f_char/20 to 20·f_char.
    pub fn with_span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }

    /// Check that the configuration can produce a strictly increasing sweep.
    pub fn validate(&self) -> Result<()> {
        if self.samples < 2 {
            return Err(LabError::sweep_config(format!(
                "at least 2 samples are required (got {})",
                self.samples
            )));
        }
        if !(self.span.is_finite() && self.span > 1.0) {
            return Err(LabError::sweep_config(format!(
                "span must be a finite ratio greater than 1 (got {})",
                self.span
            )));
        }
        Ok(())
    }
}

/// `n` geometrically spaced values from `start` to `stop` inclusive.
///
/// `f_i = start * (stop / start)^(i / (n - 1))`
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let ratio = stop / start;
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| start * ratio.powf(i as f64 / last))
                .collect()
        }
    }
}

/// One point of a magnitude response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySample {
    /// Sample frequency (Hz), full precision
    pub frequency_hz: f64,
    /// Sample frequency rounded to the nearest hertz, for display
    pub display_frequency_hz: f64,
    /// |H(jω)| at the sample frequency
    pub magnitude: f64,
}

/// A magnitude response sampled over a frequency window.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySweep {
    pub label: String,
    pub samples: Vec<FrequencySample>,
}

impl FrequencySweep {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Full-precision sample frequencies.
    pub fn frequencies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.frequency_hz).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.magnitude).collect()
    }

    /// `(x, y)` pairs as handed to a chart: rounded frequency and magnitude.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.display_frequency_hz, s.magnitude))
            .collect()
    }
}

/// Closed-form values annotating a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterSummary {
    /// RC low-pass or high-pass
    Rc {
        /// Time constant τ = RC (s)
        tau_s: f64,
        /// Cutoff frequency (Hz)
        cutoff_hz: f64,
    },
    /// Series RLC band-pass
    BandPass {
        /// Resonant frequency (Hz)
        f0_hz: f64,
        /// Bandwidth (Hz)
        bandwidth_hz: f64,
        /// Quality factor
        q: f64,
    },
}

impl FilterSummary {
    fn from_components(components: &FilterComponents) -> Self {
        match components {
            FilterComponents::LowPass(rc) | FilterComponents::HighPass(rc) => FilterSummary::Rc {
                tau_s: rc.tau(),
                cutoff_hz: rc.cutoff_hz(),
            },
            FilterComponents::BandPass(rlc) => FilterSummary::BandPass {
                f0_hz: rlc.resonant_hz(),
                bandwidth_hz: rlc.bandwidth_hz(),
                q: rlc.quality_factor(),
            },
        }
    }
}

/// Sweep plus summary for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterAnalysis {
    pub circuit: FilterCircuit,
    pub sweep: FrequencySweep,
    pub summary: FilterSummary,
}

impl FilterAnalysis {
    pub fn kind(&self) -> FilterKind {
        self.circuit.kind()
    }

    pub fn narrative(&self) -> &'static str {
        self.kind().narrative()
    }
}

/// Sweep a filter's magnitude response around its characteristic frequency.
pub fn analyze_filter(circuit: &FilterCircuit, config: &SweepConfig) -> Result<FilterAnalysis> {
    let components = circuit.to_si()?;
    config.validate()?;

    let f_char = components.characteristic_hz();
    let f_min = f_char / config.span;
    let f_max = f_char * config.span;

    let samples: Vec<FrequencySample> = logspace(f_min, f_max, config.samples)
        .into_iter()
        .map(|f| FrequencySample {
            frequency_hz: f,
            display_frequency_hz: f.round(),
            magnitude: components.magnitude(angular_frequency(f)),
        })
        .collect();

    debug!(
        kind = circuit.kind().tag(),
        f_char,
        f_min,
        f_max,
        samples = samples.len(),
        "generated filter sweep"
    );

    Ok(FilterAnalysis {
        circuit: *circuit,
        sweep: FrequencySweep {
            label: circuit.kind().chart_label(),
            samples,
        },
        summary: FilterSummary::from_components(&components),
    })
}

impl fmt::Display for FilterAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Filter", self.kind())?;
        match self.circuit {
            FilterCircuit::LowPass { r_kohm, c_nf } | FilterCircuit::HighPass { r_kohm, c_nf } => {
                writeln!(f, "  R: {:.3} kΩ", r_kohm)?;
                writeln!(f, "  C: {:.3} nF", c_nf)?;
            }
            FilterCircuit::BandPass { r_ohm, l_mh, c_nf } => {
                writeln!(f, "  R: {:.2} Ω", r_ohm)?;
                writeln!(f, "  L: {:.3} mH", l_mh)?;
                writeln!(f, "  C: {:.3} nF", c_nf)?;
            }
        }
        match self.summary {
            FilterSummary::Rc { tau_s, cutoff_hz } => {
                writeln!(f, "  Time constant τ:      {:.3} ms", tau_s * 1e3)?;
                writeln!(f, "  Cutoff frequency f_c: {:.2} Hz", cutoff_hz)?;
            }
            FilterSummary::BandPass {
                f0_hz,
                bandwidth_hz,
                q,
            } => {
                writeln!(f, "  Resonant frequency f0:  {:.2} Hz", f0_hz)?;
                writeln!(f, "  Approximate bandwidth:  {:.2} Hz", bandwidth_hz)?;
                writeln!(f, "  Approximate Q-factor:   {:.2}", q)?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.narrative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn lpf() -> FilterCircuit {
        FilterCircuit::default_for(FilterKind::LowPass)
    }

    #[test]
    fn test_default_sweep_shape() {
        let analysis = analyze_filter(&lpf(), &SweepConfig::default()).unwrap();
        let sweep = &analysis.sweep;
        let fc = 15915.494309189533;

        assert_eq!(sweep.len(), 81);
        assert_relative_eq!(sweep.samples[0].frequency_hz, fc / 20.0, max_relative = 1e-12);
        assert_relative_eq!(sweep.samples[80].frequency_hz, fc * 20.0, max_relative = 1e-12);
        assert_relative_eq!(sweep.samples[40].frequency_hz, fc, max_relative = 1e-12);
        assert_eq!(sweep.label, "Low-Pass |H(jω)|");
    }

    #[test]
    fn test_sweep_is_geometric_not_arithmetic() {
        let analysis = analyze_filter(&lpf(), &SweepConfig::default()).unwrap();
        let f = analysis.sweep.frequencies();
        let ratio = f[1] / f[0];

        for pair in f.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_relative_eq!(pair[1] / pair[0], ratio, max_relative = 1e-9);
        }
        // 400^(1/80)
        assert_relative_eq!(ratio, 400f64.powf(1.0 / 80.0), max_relative = 1e-9);
    }

    #[test]
    fn test_display_frequency_is_rounded_but_magnitude_is_not() {
        let analysis = analyze_filter(&lpf(), &SweepConfig::default()).unwrap();
        let first = analysis.sweep.samples[0];

        assert_eq!(first.display_frequency_hz, 796.0);
        let w = angular_frequency(first.frequency_hz);
        let tau = 1e-5;
        assert_relative_eq!(
            first.magnitude,
            1.0 / (1.0 + (w * tau).powi(2)).sqrt(),
            max_relative = 1e-12
        );
        assert_eq!(analysis.sweep.points()[0], (796.0, first.magnitude));
    }

    #[test]
    fn test_low_and_high_pass_asymptotes() {
        let lp = analyze_filter(&lpf(), &SweepConfig::default()).unwrap();
        let hp = analyze_filter(
            &FilterCircuit::default_for(FilterKind::HighPass),
            &SweepConfig::default(),
        )
        .unwrap();

        let lp_mag = lp.sweep.magnitudes();
        let hp_mag = hp.sweep.magnitudes();
        assert!(lp_mag[0] > 0.99 && lp_mag[80] < 0.06);
        assert!(hp_mag[0] < 0.06 && hp_mag[80] > 0.99);
        assert_relative_eq!(lp_mag[40], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_relative_eq!(hp_mag[40], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_band_pass_peak_at_resonance() {
        let analysis = analyze_filter(
            &FilterCircuit::default_for(FilterKind::BandPass),
            &SweepConfig::default(),
        )
        .unwrap();

        match analysis.summary {
            FilterSummary::BandPass {
                f0_hz,
                bandwidth_hz,
                q,
            } => {
                assert_relative_eq!(f0_hz, 50329.212, epsilon = 1e-3);
                assert_relative_eq!(bandwidth_hz, 1591.549, epsilon = 1e-3);
                assert_relative_eq!(q, 31.623, epsilon = 1e-3);
                assert_relative_eq!(analysis.sweep.samples[40].frequency_hz, f0_hz, max_relative = 1e-12);
            }
            other => panic!("unexpected summary {:?}", other),
        }
        assert_relative_eq!(analysis.sweep.samples[40].magnitude, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_config() {
        let config = SweepConfig::new().with_samples(5).with_span(10.0);
        let analysis = analyze_filter(&lpf(), &config).unwrap();
        assert_eq!(analysis.sweep.len(), 5);
        assert_relative_eq!(
            analysis.sweep.samples[4].frequency_hz / analysis.sweep.samples[0].frequency_hz,
            100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        for config in [
            SweepConfig::new().with_samples(1),
            SweepConfig::new().with_span(1.0),
            SweepConfig::new().with_span(f64::NAN),
        ] {
            assert!(matches!(
                analyze_filter(&lpf(), &config),
                Err(LabError::InvalidSweepConfig { .. })
            ));
        }
    }

    #[test]
    fn test_input_error_takes_precedence() {
        let circuit = FilterCircuit::LowPass {
            r_kohm: -1.0,
            c_nf: 1.0,
        };
        let err = analyze_filter(&circuit, &SweepConfig::new().with_samples(0)).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_every_field_is_validated() {
        for circuit in crate::filters::circuits_with_invalid_field() {
            let err = analyze_filter(&circuit, &SweepConfig::default()).unwrap_err();
            assert!(err.is_input_error(), "{:?} accepted", circuit);
        }
    }

    #[test]
    fn test_logspace_edges() {
        assert!(logspace(1.0, 10.0, 0).is_empty());
        assert_eq!(logspace(3.0, 10.0, 1), vec![3.0]);
        let v = logspace(1.0, 100.0, 3);
        assert_relative_eq!(v[1], 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_report_mentions_summary() {
        let analysis = analyze_filter(
            &FilterCircuit::default_for(FilterKind::BandPass),
            &SweepConfig::default(),
        )
        .unwrap();
        let text = analysis.to_string();
        assert!(text.starts_with("Band-Pass Filter"));
        assert!(text.contains("50329.21 Hz"));
        assert!(text.contains("Around f0"));
    }

    proptest! {
        #[test]
        fn sweep_is_strictly_increasing_and_spans_window(r in 1e-3_f64..1e3, c in 1e-3_f64..1e3) {
            let analysis = analyze_filter(
                &FilterCircuit::HighPass { r_kohm: r, c_nf: c },
                &SweepConfig::default(),
            ).unwrap();
            let f = analysis.sweep.frequencies();
            let fc = match analysis.summary {
                FilterSummary::Rc { cutoff_hz, .. } => cutoff_hz,
                _ => unreachable!(),
            };

            prop_assert_eq!(f.len(), 81);
            prop_assert!(f.windows(2).all(|w| w[1] > w[0]));
            prop_assert!((f[0] - fc / 20.0).abs() <= 1e-9 * fc);
            prop_assert!((f[80] - fc * 20.0).abs() <= 1e-9 * fc * 20.0);
            prop_assert!(analysis.sweep.magnitudes().iter().all(|m| (0.0..=1.0).contains(m)));
        }
    }
}
