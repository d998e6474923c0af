//! fixtab: fixed-point constant tables for HDL synthesis
//!
//! ```text
//! fixtab coeffs   --input Decimal_coefficients.txt --output fixed_point_filter_coefficients.txt
//! fixtab truncate --input binary.txt --width 16
//! fixtab lut      --output pdf_lut.txt --entries 4096 --bits 12
//! ```

mod args;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use fixtab_core::{
    encode_stream, truncate_stream, BitWidthTruncator, FixedPointEncoder, LiteralStyle,
    StreamReport, TableFormatter,
};
use fixtab_lut::{LutBuilder, LutConfig};
use tracing_subscriber::EnvFilter;

use args::{error_policy, Cli, CoeffsArgs, Command, LutArgs, TruncateArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("fixtab={0},fixtab_core={0},fixtab_lut={0}", default_level).into()
            }),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Coeffs(args) => run_coeffs(args),
        Command::Truncate(args) => run_truncate(args),
        Command::Lut(args) => run_lut(args),
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("open input {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path).with_context(|| format!("create output {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn log_report(what: &str, report: StreamReport, output: &Path) {
    if report.skipped > 0 {
        tracing::warn!("{} skipped line(s)", report.skipped);
    }
    tracing::info!("wrote {} {} to {}", report.written, what, output.display());
}

fn run_coeffs(args: CoeffsArgs) -> Result<()> {
    // both files must open before any line is processed
    let input = open_input(&args.input)?;
    let output = open_output(&args.output)?;

    let encoder = FixedPointEncoder::new(args.strategy.into(), args.overflow.into());
    tracing::info!(
        "encoding {} ({})",
        args.input.display(),
        encoder.strategy().description()
    );

    let report = encode_stream(
        input,
        output,
        &encoder,
        &TableFormatter::one_per_line(),
        error_policy(args.skip_invalid),
    )
    .context("encode coefficients")?;

    log_report("coefficients", report, &args.output);
    Ok(())
}

/// Ask for the width on stdout, or on stderr when stdout carries the table.
fn prompt_width(table_on_stdout: bool) -> Result<usize> {
    let prompt = "Enter bit width of coefficients: ";
    if table_on_stdout {
        let mut stderr = io::stderr();
        write!(stderr, "{}", prompt)?;
        stderr.flush()?;
    } else {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read bit width")?;
    line.trim()
        .parse()
        .with_context(|| format!("invalid bit width {:?}", line.trim()))
}

fn run_truncate(args: TruncateArgs) -> Result<()> {
    let input = open_input(&args.input)?;

    let truncator = match (args.width, args.drop) {
        (Some(width), _) => BitWidthTruncator::new(args.input_width, width),
        (None, Some(drop)) => BitWidthTruncator::dropping(args.input_width, drop),
        (None, None) => {
            let width = prompt_width(args.output.as_os_str() == "-")?;
            BitWidthTruncator::new(args.input_width, width)
        }
    }
    .context("truncation width")?;

    let output = open_output(&args.output)?;
    tracing::info!(
        "truncating {} from {} to {} bits",
        args.input.display(),
        truncator.input_width(),
        truncator.width()
    );

    let report = truncate_stream(
        input,
        output,
        &truncator,
        &TableFormatter::new(1, LiteralStyle::Bare),
        error_policy(args.skip_invalid),
    )
    .context("truncate binary literals")?;

    log_report("literals", report, &args.output);
    Ok(())
}

fn load_lut_config(args: &LutArgs) -> Result<LutConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => LutConfig::default(),
    };

    if let Some(d) = args.distribution {
        config.distribution = d.into();
    }
    if let Some(mean) = args.mean {
        config.mean = mean;
    }
    if let Some(std_dev) = args.std_dev {
        config.std_dev = std_dev;
    }
    if let Some(span) = args.span {
        config.span_sigmas = span;
    }
    if let Some(entries) = args.entries {
        config.entries = entries;
    }
    if let Some(bits) = args.bits {
        config.bits = bits;
    }
    if let Some(row_len) = args.row_len {
        config.row_len = row_len;
    }
    if let Some(sweep) = args.sweep {
        config.sweep = sweep.into();
    }
    if let Some(overflow) = args.overflow {
        config.overflow = overflow.into();
    }
    Ok(config)
}

fn run_lut(args: LutArgs) -> Result<()> {
    let config = load_lut_config(&args)?;
    let builder = LutBuilder::new(config).context("invalid LUT configuration")?;
    let output = open_output(&args.output)?;

    let table = builder.build().context("build lookup table")?;
    if table.len() != config.entries {
        tracing::warn!(
            "sweep produced {} entries, {} requested",
            table.len(),
            config.entries
        );
    }

    let written = if args.annotate {
        table.write_listing(output)
    } else {
        table.write_table(output, &config.formatter())
    };
    written.with_context(|| format!("write {}", args.output.display()))?;

    tracing::info!(
        "wrote {} x {}-bit entries to {}",
        table.len(),
        config.bits,
        args.output.display()
    );
    Ok(())
}
