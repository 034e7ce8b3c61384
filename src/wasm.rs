//! WASM bindings for Circuit Lab.
//!
//! This module provides JavaScript-friendly bindings so the calculators can
//! back a web page directly.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { solve_rc, WasmFilterLab } from 'circuitlab_core';
//!
//! await init();
//!
//! resultsDiv.textContent = solve_rc(5, 1000, 10, 1);
//!
//! const lab = new WasmFilterLab();
//! lab.analyze("bpf", 100, 10, 1);
//! chart.data = lab.frequencies().map((f, i) => ({ x: f, y: lab.magnitudes()[i] }));
//! const svg = lab.export_svg();
//! ```

use wasm_bindgen::prelude::*;

use crate::chart::{export_chart, replace_chart, SvgChart, SvgRenderer};
use crate::circuits::{self, LcInputs, OpAmpInputs, OpAmpMode, RcInputs, RlInputs};
use crate::error::LabError;
use crate::filters::{self, FilterAnalysis, FilterCircuit, FilterKind, SweepConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: LabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn filter_circuit(kind: &str, r: f64, l: f64, c: f64) -> Result<FilterCircuit, JsValue> {
    let kind = FilterKind::from_tag(kind)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown filter type '{}'", kind)))?;
    Ok(match kind {
        FilterKind::LowPass => FilterCircuit::LowPass { r_kohm: r, c_nf: c },
        FilterKind::HighPass => FilterCircuit::HighPass { r_kohm: r, c_nf: c },
        FilterKind::BandPass => FilterCircuit::BandPass {
            r_ohm: r,
            l_mh: l,
            c_nf: c,
        },
    })
}

/// Solve an RC low-pass at a test frequency.
///
/// # Arguments
/// * `vs` - Input amplitude (V peak)
/// * `frequency` - Test frequency (Hz)
/// * `r_kohm` - Resistance (kΩ)
/// * `c_nf` - Capacitance (nF)
#[wasm_bindgen]
pub fn solve_rc(vs: f64, frequency: f64, r_kohm: f64, c_nf: f64) -> Result<String, JsValue> {
    circuits::solve_rc(&RcInputs {
        vs,
        frequency_hz: frequency,
        r_kohm,
        c_nf,
    })
    .map(|r| r.to_string())
    .map_err(to_js)
}

/// Solve an RL step response at an observation time.
#[wasm_bindgen]
pub fn solve_rl(vs: f64, r_ohm: f64, l_mh: f64, t_ms: f64) -> Result<String, JsValue> {
    circuits::solve_rl(&RlInputs {
        vs,
        r_ohm,
        l_mh,
        t_ms,
    })
    .map(|r| r.to_string())
    .map_err(to_js)
}

/// Solve an ideal LC resonator.
#[wasm_bindgen]
pub fn solve_lc(l_mh: f64, c_nf: f64) -> Result<String, JsValue> {
    circuits::solve_lc(&LcInputs { l_mh, c_nf })
        .map(|r| r.to_string())
        .map_err(to_js)
}

/// Solve an op-amp gain stage.
///
/// # Arguments
/// * `mode` - `"inverting"` or `"non-inverting"`
#[wasm_bindgen]
pub fn solve_opamp(mode: &str, vin: f64, r1_kohm: f64, r2_kohm: f64) -> Result<String, JsValue> {
    let mode = OpAmpMode::from_name(mode)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown op-amp mode '{}'", mode)))?;
    circuits::solve_opamp(&OpAmpInputs {
        mode,
        vin,
        r1_kohm,
        r2_kohm,
    })
    .map(|r| r.to_string())
    .map_err(to_js)
}

/// Closed-form filter frequencies. `l_mh` is ignored for `lpf`/`hpf`.
#[wasm_bindgen]
pub fn filter_frequencies(kind: &str, r: f64, l_mh: f64, c_nf: f64) -> Result<String, JsValue> {
    let circuit = filter_circuit(kind, r, l_mh, c_nf)?;
    filters::calculate_characteristics(&circuit)
        .map(|c| c.to_string())
        .map_err(to_js)
}

/// Get the form hint for a filter type.
#[wasm_bindgen]
pub fn filter_hint(kind: &str) -> Option<String> {
    FilterKind::from_tag(kind).map(|k| k.hint().to_string())
}

/// Filter analyzer session owning the current response chart.
///
/// Each analysis replaces the previous chart; the session never holds more
/// than one.
#[wasm_bindgen]
pub struct WasmFilterLab {
    renderer: SvgRenderer,
    chart: Option<SvgChart>,
    analysis: Option<FilterAnalysis>,
    config: SweepConfig,
}

#[wasm_bindgen]
impl WasmFilterLab {
    /// Create a session with the default 81-point sweep.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmFilterLab {
        WasmFilterLab {
            renderer: SvgRenderer::new(),
            chart: None,
            analysis: None,
            config: SweepConfig::default(),
        }
    }

    /// Sweep a filter and redraw the chart.
    ///
    /// # Arguments
    /// * `kind` - `"lpf"`, `"hpf"` or `"bpf"`
    /// * `r` - Resistance (kΩ for lpf/hpf, Ω for bpf)
    /// * `l_mh` - Inductance (mH), ignored for lpf/hpf
    /// * `c_nf` - Capacitance (nF)
    ///
    /// # Returns
    /// The text report for the analysis.
    #[wasm_bindgen]
    pub fn analyze(&mut self, kind: &str, r: f64, l_mh: f64, c_nf: f64) -> Result<String, JsValue> {
        let circuit = filter_circuit(kind, r, l_mh, c_nf)?;
        let analysis = filters::analyze_filter(&circuit, &self.config).map_err(to_js)?;

        let chart = replace_chart(&mut self.renderer, self.chart.take(), &analysis.sweep);
        self.chart = Some(chart);

        let report = analysis.to_string();
        self.analysis = Some(analysis);
        Ok(report)
    }

    /// Rounded sweep frequencies of the last analysis (x values).
    #[wasm_bindgen]
    pub fn frequencies(&self) -> Vec<f64> {
        self.analysis
            .as_ref()
            .map(|a| a.sweep.points().into_iter().map(|(x, _)| x).collect())
            .unwrap_or_default()
    }

    /// Magnitudes of the last analysis (y values).
    #[wasm_bindgen]
    pub fn magnitudes(&self) -> Vec<f64> {
        self.analysis
            .as_ref()
            .map(|a| a.sweep.magnitudes())
            .unwrap_or_default()
    }

    /// Dataset label of the last analysis.
    #[wasm_bindgen(getter)]
    pub fn label(&self) -> Option<String> {
        self.analysis.as_ref().map(|a| a.sweep.label.clone())
    }

    /// Export the current chart as an SVG document.
    #[wasm_bindgen]
    pub fn export_svg(&self) -> Result<String, JsValue> {
        let bytes = export_chart(&self.renderer, self.chart.as_ref()).map_err(to_js)?;
        String::from_utf8(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WasmFilterLab {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
