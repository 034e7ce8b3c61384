//! Circuit Lab - basic electronics calculator
//!
//! # Usage
//!
//! ```bash
//! circuitlab rc --vs 5 --freq 1000 --r 10 --c 1
//! circuitlab opamp --mode non-inverting --vin 0.5 --r1 10 --r2 47
//! circuitlab filter --svg response.svg lpf --r 10 --c 1
//! circuitlab filter --export bpf
//! circuitlab cutoff bpf --r 100 --l 10 --c 1
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, Level};

use circuitlab_core::{
    analyze_filter, calculate_characteristics,
    chart::{export_chart, replace_chart, SvgRenderer, DEFAULT_EXPORT_FILE},
    circuits::{
        solve_lc, solve_opamp, solve_rc, solve_rl, LcInputs, OpAmpInputs, OpAmpMode,
        OperatingPoint, RcInputs, RlInputs,
    },
    filters::{DEFAULT_SWEEP_SAMPLES, DEFAULT_SWEEP_SPAN},
    FilterCircuit, LabError, Result, SweepConfig,
};

/// Basic electronics calculator: RC/RL/LC circuits, op-amps and filters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// RC low-pass driven by a sinusoid
    Rc {
        /// Input amplitude Vs (V peak)
        #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
        vs: f64,
        /// Test frequency f (Hz)
        #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
        freq: f64,
        /// Resistance R (kΩ)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        r: f64,
        /// Capacitance C (nF)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        c: f64,
    },
    /// Series RL circuit excited by a DC step
    Rl {
        /// Step voltage Vs (V)
        #[arg(long, default_value_t = 12.0, allow_negative_numbers = true)]
        vs: f64,
        /// Resistance R (Ω)
        #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
        r: f64,
        /// Inductance L (mH)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        l: f64,
        /// Observation time t (ms)
        #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
        t: f64,
    },
    /// Ideal LC resonant circuit
    Lc {
        /// Inductance L (mH)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        l: f64,
        /// Capacitance C (nF)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        c: f64,
    },
    /// Ideal op-amp gain stage
    Opamp {
        /// Feedback configuration
        #[arg(long, value_enum, default_value_t = OpAmpMode::Inverting)]
        mode: OpAmpMode,
        /// Input voltage Vin (V)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        vin: f64,
        /// Input resistor R1 (kΩ)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        r1: f64,
        /// Feedback resistor R2 (kΩ)
        #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
        r2: f64,
    },
    /// Sweep a filter's magnitude response
    Filter {
        /// Number of sweep samples
        #[arg(long, default_value_t = DEFAULT_SWEEP_SAMPLES)]
        samples: usize,
        /// Sweep from f/SPAN to f*SPAN around the characteristic frequency
        #[arg(long, default_value_t = DEFAULT_SWEEP_SPAN)]
        span: f64,
        /// Write the response chart as SVG to PATH
        #[arg(long, value_name = "PATH")]
        svg: Option<PathBuf>,
        /// Write the response chart to filter-response.svg
        #[arg(long, conflicts_with = "svg")]
        export: bool,
        #[command(subcommand)]
        circuit: FilterArgs,
    },
    /// Closed-form filter frequencies without a sweep
    Cutoff {
        #[command(subcommand)]
        circuit: FilterArgs,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum FilterArgs {
    /// RC low-pass filter
    Lpf {
        /// Resistance R (kΩ)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        r: f64,
        /// Capacitance C (nF)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        c: f64,
    },
    /// RC high-pass filter
    Hpf {
        /// Resistance R (kΩ)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        r: f64,
        /// Capacitance C (nF)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        c: f64,
    },
    /// Series RLC band-pass filter
    Bpf {
        /// Resistance R (Ω)
        #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
        r: f64,
        /// Inductance L (mH)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        l: f64,
        /// Capacitance C (nF)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        c: f64,
    },
}

impl From<FilterArgs> for FilterCircuit {
    fn from(args: FilterArgs) -> Self {
        match args {
            FilterArgs::Lpf { r, c } => FilterCircuit::LowPass { r_kohm: r, c_nf: c },
            FilterArgs::Hpf { r, c } => FilterCircuit::HighPass { r_kohm: r, c_nf: c },
            FilterArgs::Bpf { r, l, c } => FilterCircuit::BandPass {
                r_ohm: r,
                l_mh: l,
                c_nf: c,
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LabError::Input { message }) => {
            eprintln!("Input Error: {}", message);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Rc { vs, freq, r, c } => {
            let result = solve_rc(&RcInputs {
                vs,
                frequency_hz: freq,
                r_kohm: r,
                c_nf: c,
            })?;
            print_operating_point(result.into());
        }

        Command::Rl { vs, r, l, t } => {
            let result = solve_rl(&RlInputs {
                vs,
                r_ohm: r,
                l_mh: l,
                t_ms: t,
            })?;
            print_operating_point(result.into());
        }

        Command::Lc { l, c } => {
            let result = solve_lc(&LcInputs { l_mh: l, c_nf: c })?;
            print_operating_point(result.into());
        }

        Command::Opamp { mode, vin, r1, r2 } => {
            let result = solve_opamp(&OpAmpInputs {
                mode,
                vin,
                r1_kohm: r1,
                r2_kohm: r2,
            })?;
            print_operating_point(result.into());
        }

        Command::Filter {
            samples,
            span,
            svg,
            export,
            circuit,
        } => {
            let circuit = FilterCircuit::from(circuit);
            let config = SweepConfig::new().with_samples(samples).with_span(span);
            let analysis = analyze_filter(&circuit, &config)?;

            println!("{}", circuit.kind().hint());
            println!();
            println!("{}", analysis);
            println!();
            println!("{:>14}  {}", "f (Hz)", analysis.sweep.label);
            for sample in &analysis.sweep.samples {
                println!("{:>14.0}  {:.4}", sample.display_frequency_hz, sample.magnitude);
            }

            let svg = svg.or_else(|| export.then(|| PathBuf::from(DEFAULT_EXPORT_FILE)));
            if let Some(path) = svg {
                let mut renderer = SvgRenderer::new();
                let chart = replace_chart(&mut renderer, None, &analysis.sweep);
                let image = export_chart(&renderer, Some(&chart))?;
                fs::write(&path, image).map_err(|source| LabError::ChartWrite {
                    path: path.display().to_string(),
                    source,
                })?;
                info!(path = %path.display(), "wrote response chart");
            }
        }

        Command::Cutoff { circuit } => {
            let characteristics = calculate_characteristics(&FilterCircuit::from(circuit))?;
            println!("{}", characteristics);
        }
    }

    Ok(())
}

fn print_operating_point(point: OperatingPoint) {
    println!("{}", point.topology().hint());
    println!();
    println!("{}", point);
}
