use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use fixtab_core::{EncodingStrategy, ErrorPolicy};
use fixtab_lut::{DistributionKind, SweepMode};
use fixtab_math::OverflowPolicy;

/// Generate fixed-point constant tables for HDL synthesis
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode decimal filter coefficients as 32-bit hex literals
    Coeffs(CoeffsArgs),
    /// Cut 64-bit binary literals down to a narrower width
    Truncate(TruncateArgs),
    /// Build a quantized probability-density lookup table
    Lut(LutArgs),
}

#[derive(Args, Debug)]
pub struct CoeffsArgs {
    /// Decimal coefficients, one per line
    #[arg(long, default_value = "Decimal_coefficients.txt")]
    pub input: PathBuf,

    /// Output file ("-" for stdout)
    #[arg(long, default_value = "fixed_point_filter_coefficients.txt")]
    pub output: PathBuf,

    /// Sign convention for negative coefficients
    #[arg(long, value_enum, default_value_t = StrategyArg::OffsetMagnitude)]
    pub strategy: StrategyArg,

    /// Handling of coefficients outside [-1, 1]
    #[arg(long, value_enum, default_value_t = OverflowArg::Saturate)]
    pub overflow: OverflowArg,

    /// Warn and skip malformed lines instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").args(["width", "drop"])))]
pub struct TruncateArgs {
    /// Binary literals, one per line
    #[arg(long, default_value = "binary.txt")]
    pub input: PathBuf,

    /// Output file ("-" for stdout)
    #[arg(long, default_value = "binary_filter_coefficients.txt")]
    pub output: PathBuf,

    /// Width of every input line
    #[arg(long, default_value_t = fixtab_core::DEFAULT_INPUT_WIDTH)]
    pub input_width: usize,

    /// Bits to keep (prompted for when neither --width nor --drop is given)
    #[arg(long)]
    pub width: Option<usize>,

    /// Least-significant bits to drop
    #[arg(long)]
    pub drop: Option<usize>,

    /// Warn and skip malformed lines instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

#[derive(Args, Debug)]
pub struct LutArgs {
    /// Output file ("-" for stdout)
    #[arg(long, default_value = "pdf_lut.txt")]
    pub output: PathBuf,

    /// JSON LutConfig; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub distribution: Option<DistributionArg>,

    #[arg(long, allow_negative_numbers = true)]
    pub mean: Option<f64>,

    #[arg(long)]
    pub std_dev: Option<f64>,

    /// Half-width of the swept domain in standard deviations
    #[arg(long)]
    pub span: Option<f64>,

    /// Number of table addresses
    #[arg(long)]
    pub entries: Option<usize>,

    /// Bits per entry
    #[arg(long)]
    pub bits: Option<u32>,

    /// Entries per output row
    #[arg(long)]
    pub row_len: Option<usize>,

    #[arg(long, value_enum)]
    pub sweep: Option<SweepArg>,

    #[arg(long, value_enum)]
    pub overflow: Option<OverflowArg>,

    /// Write `address<TAB>bits<TAB>density` lines instead of the ROM table
    #[arg(long)]
    pub annotate: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    OffsetMagnitude,
    TwosComplement,
    SignMagnitude,
}

impl From<StrategyArg> for EncodingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::OffsetMagnitude => EncodingStrategy::OffsetMagnitude,
            StrategyArg::TwosComplement => EncodingStrategy::TwosComplement,
            StrategyArg::SignMagnitude => EncodingStrategy::SignMagnitude,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OverflowArg {
    Saturate,
    Reject,
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Saturate => OverflowPolicy::Saturate,
            OverflowArg::Reject => OverflowPolicy::Reject,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DistributionArg {
    Gaussian,
    Laplace,
}

impl From<DistributionArg> for DistributionKind {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Gaussian => DistributionKind::Gaussian,
            DistributionArg::Laplace => DistributionKind::Laplace,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SweepArg {
    Indexed,
    Accumulated,
}

impl From<SweepArg> for SweepMode {
    fn from(arg: SweepArg) -> Self {
        match arg {
            SweepArg::Indexed => SweepMode::Indexed,
            SweepArg::Accumulated => SweepMode::Accumulated,
        }
    }
}

pub fn error_policy(skip_invalid: bool) -> ErrorPolicy {
    if skip_invalid {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    }
}
