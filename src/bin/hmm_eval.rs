//! Decode an experiment with both algorithms and print per-state estimations.
//!
//! Usage: `hmm_eval <MODEL> <DATA> [--format table|csv] [--log-level warn]`

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hmm_eval::{evaluate, AlgorithmReport, Evaluation, Model, ObservationSequence};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hmm_eval")]
#[command(about = "Viterbi and Forward-Backward decoding with per-state estimation", long_about = None)]
struct Cli {
    /// Model description file
    model: PathBuf,

    /// Experiment data file (time, true state, symbol per step)
    data: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.log_level))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Load both inputs, evaluate, and write the report to `out`.
fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let model_file = File::open(&cli.model)
        .with_context(|| format!("failed to open model file {}", cli.model.display()))?;
    let data_file = File::open(&cli.data)
        .with_context(|| format!("failed to open data file {}", cli.data.display()))?;

    let model = Model::from_reader(BufReader::new(model_file))
        .context("fatal problem while reading model")?;
    let data = ObservationSequence::from_reader(&model, BufReader::new(data_file))
        .context("fatal problem while reading experiment data")?;
    info!(
        states = model.n_states(),
        alphabet = model.alphabet_size(),
        steps = data.len(),
        "inputs loaded"
    );

    let evaluation = evaluate(&model, &data);
    match cli.format {
        OutputFormat::Table => write_table(out, &model, &evaluation)?,
        OutputFormat::Csv => write_csv(out, &model, &evaluation)?,
    }
    Ok(())
}

fn state_label(model: &Model, state: usize) -> &str {
    model.state_name(state).unwrap_or("?")
}

fn predicted_names(model: &Model, report: &AlgorithmReport) -> String {
    report
        .predicted
        .iter()
        .map(|&s| state_label(model, s))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_table<W: Write>(out: &mut W, model: &Model, evaluation: &Evaluation) -> io::Result<()> {
    let width = model
        .state_names()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(5)
        .max(5);

    for report in evaluation.reports() {
        writeln!(out, "== {} ==", report.algorithm)?;
        writeln!(out, "predicted: {}", predicted_names(model, report))?;
        writeln!(out, "accuracy:  {:.4}", report.accuracy())?;
        writeln!(
            out,
            "{:<width$} {:>6} {:>6} {:>6} {:>6} {:>9}",
            "state", "TP", "FP", "TN", "FN", "F"
        )?;
        for (s, e) in report.estimations.iter().enumerate() {
            writeln!(
                out,
                "{:<width$} {:>6} {:>6} {:>6} {:>6} {:>9.4}",
                state_label(model, s),
                e.true_positives,
                e.false_positives,
                e.true_negatives,
                e.false_negatives,
                e.f_measure
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, model: &Model, evaluation: &Evaluation) -> io::Result<()> {
    writeln!(out, "algorithm,state,tp,fp,tn,fn,f_measure")?;
    for report in evaluation.reports() {
        for (s, e) in report.estimations.iter().enumerate() {
            writeln!(
                out,
                "{},{},{},{},{},{},{}",
                report.algorithm,
                state_label(model, s),
                e.true_positives,
                e.false_positives,
                e.true_negatives,
                e.false_negatives,
                e.f_measure
            )?;
        }
    }
    Ok(())
}
