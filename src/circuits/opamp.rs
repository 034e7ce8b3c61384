//! Ideal operational amplifier gain stages.
//!
//! Closed-loop gain for the two classic single op-amp configurations:
//! - Inverting: A_v = -R2 / R1
//! - Non-inverting: A_v = 1 + R2 / R1
//!
//! The op-amp is assumed ideal (infinite open-loop gain, no rails).

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::units::kilo_ohms;
use crate::validate::require_positive_or;

/// Op-amp feedback configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OpAmpMode {
    #[default]
    Inverting,
    NonInverting,
}

impl OpAmpMode {
    /// Parse a mode name as used by the form (`inverting` / `non-inverting`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "inverting" => Some(OpAmpMode::Inverting),
            "non-inverting" | "noninverting" | "non_inverting" => Some(OpAmpMode::NonInverting),
            _ => None,
        }
    }

    /// Closed-loop gain for a feedback ratio R2/R1.
    pub fn closed_loop_gain(&self, r1: f64, r2: f64) -> f64 {
        match self {
            OpAmpMode::Inverting => -r2 / r1,
            OpAmpMode::NonInverting => 1.0 + r2 / r1,
        }
    }
}

impl fmt::Display for OpAmpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpAmpMode::Inverting => f.write_str("Inverting"),
            OpAmpMode::NonInverting => f.write_str("Non-Inverting"),
        }
    }
}

/// Inputs for the op-amp gain stage.
///
/// `vin` must be positive like every other field, even though the gain
/// relation itself holds for any input voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpAmpInputs {
    pub mode: OpAmpMode,
    /// Input voltage (V)
    pub vin: f64,
    /// Input resistor R1 (kΩ)
    pub r1_kohm: f64,
    /// Feedback resistor R2 (kΩ)
    pub r2_kohm: f64,
}

impl Default for OpAmpInputs {
    fn default() -> Self {
        Self {
            mode: OpAmpMode::Inverting,
            vin: 1.0,
            r1_kohm: 10.0,
            r2_kohm: 100.0,
        }
    }
}

/// Ideal closed-loop results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpAmpResult {
    pub inputs: OpAmpInputs,
    /// Closed-loop voltage gain A_v
    pub gain: f64,
    /// Ideal output voltage (V)
    pub v_out: f64,
}

/// Solve an ideal op-amp gain stage.
pub fn solve_opamp(inputs: &OpAmpInputs) -> Result<OpAmpResult> {
    require_positive_or(
        &[
            ("Vin", inputs.vin),
            ("R1", inputs.r1_kohm),
            ("R2", inputs.r2_kohm),
        ],
        "Please enter positive values for input voltage and both resistances.",
    )?;

    let r1 = kilo_ohms(inputs.r1_kohm);
    let r2 = kilo_ohms(inputs.r2_kohm);
    let gain = inputs.mode.closed_loop_gain(r1, r2);
    let v_out = gain * inputs.vin;

    debug!(mode = %inputs.mode, gain, v_out, "solved op-amp gain stage");

    Ok(OpAmpResult {
        inputs: *inputs,
        gain,
        v_out,
    })
}

impl OpAmpResult {
    /// Mode-specific explanation filled in with the actual resistor values.
    pub fn explanation(&self) -> String {
        let OpAmpInputs {
            mode,
            r1_kohm,
            r2_kohm,
            ..
        } = self.inputs;

        match mode {
            OpAmpMode::Inverting => format!(
                "In an inverting amplifier, the closed-loop gain is A_v = -R2 / R1. \
                 Here, R1 = {:.3} kΩ and R2 = {:.3} kΩ, so A_v = {:.2}. \
                 The negative sign indicates a 180° phase inversion between input and output.",
                r1_kohm, r2_kohm, self.gain
            ),
            OpAmpMode::NonInverting => format!(
                "In a non-inverting amplifier, the closed-loop gain is A_v = 1 + (R2 / R1). \
                 Here, R1 = {:.3} kΩ and R2 = {:.3} kΩ, so A_v = {:.2}. \
                 The output is in phase with the input (no inversion).",
                r1_kohm, r2_kohm, self.gain
            ),
        }
    }
}

impl fmt::Display for OpAmpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Op-Amp Numerical Results")?;
        writeln!(f, "  Mode:                   {}", self.inputs.mode)?;
        writeln!(f, "  Input voltage Vin:      {:.3} V", self.inputs.vin)?;
        writeln!(f, "  Gain A_v:               {:.2}", self.gain)?;
        writeln!(f, "  Output voltage (ideal): {:.3} V", self.v_out)?;
        writeln!(f)?;
        write!(f, "Explanation: {}", self.explanation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inverting_gain() {
        let result = solve_opamp(&OpAmpInputs::default()).unwrap();
        assert_relative_eq!(result.gain, -10.0);
        assert_relative_eq!(result.v_out, -10.0);
        assert!(result.explanation().contains("180° phase inversion"));
    }

    #[test]
    fn test_non_inverting_gain() {
        let result = solve_opamp(&OpAmpInputs {
            mode: OpAmpMode::NonInverting,
            vin: 0.5,
            ..OpAmpInputs::default()
        })
        .unwrap();
        assert_relative_eq!(result.gain, 11.0);
        assert_relative_eq!(result.v_out, 5.5);
        assert!(result.explanation().contains("A_v = 11.00"));
    }

    #[test]
    fn test_non_positive_input_voltage_is_rejected() {
        for vin in [0.0, -1.0] {
            let err = solve_opamp(&OpAmpInputs {
                vin,
                ..OpAmpInputs::default()
            })
            .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please enter positive values for input voltage and both resistances."
            );
        }
    }

    #[test]
    fn test_every_field_is_validated() {
        let setters: [fn(&mut OpAmpInputs, f64); 3] = [
            |i, v| i.vin = v,
            |i, v| i.r1_kohm = v,
            |i, v| i.r2_kohm = v,
        ];

        for mode in [OpAmpMode::Inverting, OpAmpMode::NonInverting] {
            for (field, set) in setters.iter().enumerate() {
                for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
                    let mut inputs = OpAmpInputs {
                        mode,
                        ..OpAmpInputs::default()
                    };
                    set(&mut inputs, bad);
                    let err = solve_opamp(&inputs).unwrap_err();
                    assert!(
                        err.is_input_error(),
                        "field {} = {} accepted in {} mode",
                        field,
                        bad,
                        mode
                    );
                }
            }
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(OpAmpMode::from_name("inverting"), Some(OpAmpMode::Inverting));
        assert_eq!(
            OpAmpMode::from_name("Non-Inverting"),
            Some(OpAmpMode::NonInverting)
        );
        assert_eq!(OpAmpMode::from_name("differential"), None);
    }
}
