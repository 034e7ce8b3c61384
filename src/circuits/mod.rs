//! Single operating-point solvers.
//!
//! This module provides one pure function per circuit topology:
//! - RC low-pass at a test frequency, RL step response, LC resonance
//! - Inverting and non-inverting op-amp gain stages
//!
//! Each solver validates its inputs, scales them to SI, evaluates the
//! closed-form equations and returns an immutable result record.

mod opamp;
mod rlc;

pub use opamp::{solve_opamp, OpAmpInputs, OpAmpMode, OpAmpResult};
pub use rlc::{
    solve_lc, solve_rc, solve_rl, LcInputs, LcResult, RcInputs, RcResult, RlInputs, RlResult,
};

use std::fmt;

/// Which topology produced an [`OperatingPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Rc,
    Rl,
    Lc,
    Inverting,
    NonInverting,
}

impl Topology {
    /// One-line description shown above the input form.
    pub fn hint(&self) -> &'static str {
        match self {
            Topology::Rc => {
                "RC low-pass filter driven by sinusoidal input. Calculates cutoff frequency and \
                 gain at test frequency."
            }
            Topology::Rl => {
                "Series RL circuit excited by a DC step. Computes time constant, current growth \
                 and inductor voltage."
            }
            Topology::Lc => {
                "Ideal LC resonant circuit. Computes resonant frequency and angular frequency."
            }
            Topology::Inverting => "Inverting amplifier: output is -R2/R1 times the input.",
            Topology::NonInverting => {
                "Non-inverting amplifier: output is 1 + R2/R1 times the input."
            }
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Rc => "rc",
            Topology::Rl => "rl",
            Topology::Lc => "lc",
            Topology::Inverting => "inverting",
            Topology::NonInverting => "non-inverting",
        };
        f.write_str(name)
    }
}

/// The result of any single operating-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperatingPoint {
    Rc(RcResult),
    Rl(RlResult),
    Lc(LcResult),
    OpAmp(OpAmpResult),
}

impl OperatingPoint {
    /// Get the topology that produced this result.
    pub fn topology(&self) -> Topology {
        match self {
            OperatingPoint::Rc(_) => Topology::Rc,
            OperatingPoint::Rl(_) => Topology::Rl,
            OperatingPoint::Lc(_) => Topology::Lc,
            OperatingPoint::OpAmp(o) => match o.inputs.mode {
                OpAmpMode::Inverting => Topology::Inverting,
                OpAmpMode::NonInverting => Topology::NonInverting,
            },
        }
    }

    /// Get the plain-language interpretation of this result.
    pub fn explanation(&self) -> String {
        match self {
            OperatingPoint::Rc(r) => r.explanation().to_string(),
            OperatingPoint::Rl(r) => r.explanation().to_string(),
            OperatingPoint::Lc(r) => r.explanation().to_string(),
            OperatingPoint::OpAmp(r) => r.explanation(),
        }
    }
}

impl From<RcResult> for OperatingPoint {
    fn from(result: RcResult) -> Self {
        OperatingPoint::Rc(result)
    }
}

impl From<RlResult> for OperatingPoint {
    fn from(result: RlResult) -> Self {
        OperatingPoint::Rl(result)
    }
}

impl From<LcResult> for OperatingPoint {
    fn from(result: LcResult) -> Self {
        OperatingPoint::Lc(result)
    }
}

impl From<OpAmpResult> for OperatingPoint {
    fn from(result: OpAmpResult) -> Self {
        OperatingPoint::OpAmp(result)
    }
}

impl fmt::Display for OperatingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingPoint::Rc(r) => fmt::Display::fmt(r, f),
            OperatingPoint::Rl(r) => fmt::Display::fmt(r, f),
            OperatingPoint::Lc(r) => fmt::Display::fmt(r, f),
            OperatingPoint::OpAmp(r) => fmt::Display::fmt(r, f),
        }
    }
}
