//! # Circuit Lab Core
//!
//! Closed-form calculators for teaching basic electronics.
//!
//! This library provides:
//! - RC, RL and LC operating-point solvers with plain-language interpretation
//! - Inverting and non-inverting op-amp gain stages
//! - RC/RLC filter frequency-response sweeps and characteristic frequencies
//! - A chart surface with explicit ownership and SVG export
//!
//! ## Architecture
//!
//! - [`circuits`] - single operating-point solvers
//! - [`filters`] - filter sweeps and characteristic calculator
//! - [`interpret`] - ratio thresholds and canned explanations
//! - [`chart`] - chart renderer interface and SVG renderer
//! - [`units`] / [`validate`] - unit scaling and input checks shared by all solvers
//!
//! Every solver is a pure function: it validates its inputs (all finite and
//! strictly positive), scales form units (kΩ, nF, mH, ms) to SI, evaluates
//! the textbook equations and returns a value record. No state survives a
//! call.
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! circuitlab rc --vs 5 --freq 1000 --r 10 --c 1
//! circuitlab filter --svg response.svg bpf --r 100 --l 10 --c 1
//! ```
//!
//! ### Library
//!
//! ```
//! use circuitlab_core::circuits::{solve_opamp, OpAmpInputs};
//!
//! let result = solve_opamp(&OpAmpInputs::default()).unwrap();
//! assert_eq!(result.gain, -10.0);
//! ```

pub mod chart;
pub mod circuits;
pub mod error;
pub mod filters;
pub mod interpret;
pub mod units;
pub mod validate;

// Re-export main types for convenience
pub use circuits::{OperatingPoint, Topology};
pub use error::{LabError, Result};
pub use filters::{analyze_filter, calculate_characteristics, FilterCircuit, FilterKind, SweepConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmFilterLab;
