use std::io::{self, Write};

use fixtab_core::TableFormatter;
use fixtab_math::{BitQuantizer, BitVector, OverflowPolicy, FULL_SCALE};
use serde::{Deserialize, Serialize};

use crate::density::{Density, DistributionKind};
use crate::sweep::{Sweep, SweepMode};
use crate::LutError;

/// Largest table the builder accepts (a 24-bit address space).
pub const MAX_ENTRIES: usize = 1 << 24;

/// Layout of a density LUT. Defaults reproduce the standard-normal ROM:
/// 4096 × 12-bit entries over `[-2σ, 2σ)`, written 10 per row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LutConfig {
    pub distribution: DistributionKind,
    pub mean: f64,
    pub std_dev: f64,
    /// Half-width of the domain in standard deviations
    pub span_sigmas: f64,
    /// Number of addresses
    pub entries: usize,
    /// Bits per entry
    pub bits: u32,
    /// Entries per output row
    pub row_len: usize,
    pub sweep: SweepMode,
    pub overflow: OverflowPolicy,
}

impl Default for LutConfig {
    fn default() -> Self {
        Self {
            distribution: DistributionKind::Gaussian,
            mean: 0.0,
            std_dev: 1.0,
            span_sigmas: 2.0,
            entries: 4096,
            bits: 12,
            row_len: 10,
            sweep: SweepMode::Indexed,
            overflow: OverflowPolicy::Saturate,
        }
    }
}

impl LutConfig {
    pub fn validate(&self) -> Result<(), LutError> {
        if self.entries == 0 {
            return Err(LutError::EmptyTable);
        }
        if self.entries > MAX_ENTRIES {
            return Err(LutError::TooManyEntries(self.entries));
        }
        if !(self.span_sigmas.is_finite() && self.span_sigmas > 0.0) {
            return Err(LutError::InvalidSpan(self.span_sigmas));
        }
        // density parameters and bit width are checked by their constructors
        self.distribution.build(self.mean, self.std_dev)?;
        BitQuantizer::new(self.bits, self.overflow)?;

        // every sample point must be distinct, so dx has to move the
        // widest-magnitude end of the domain
        let sweep = self.sweep();
        let at = if sweep.start().abs() > sweep.end().abs() {
            sweep.start()
        } else {
            sweep.end()
        };
        let dx = sweep.dx();
        if !(at + dx > at && at - dx < at) {
            return Err(LutError::StepTooSmall { dx, at });
        }
        Ok(())
    }

    /// `[mean - span·σ, mean + span·σ)` split into `entries` steps.
    pub fn sweep(&self) -> Sweep {
        let half = self.span_sigmas * self.std_dev;
        Sweep::new(self.mean - half, self.mean + half, self.entries, self.sweep)
    }

    pub fn formatter(&self) -> TableFormatter {
        TableFormatter::new(self.row_len, Default::default())
    }
}

/// One ROM word.
#[derive(Debug, Clone, PartialEq)]
pub struct LutEntry {
    pub address: usize,
    /// Sample point
    pub x: f64,
    /// Density before quantization
    pub density: f64,
    pub value: BitVector,
}

/// Address-ordered quantized samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    entries: Vec<LutEntry>,
}

impl LookupTable {
    pub fn entries(&self) -> &[LutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, address: usize) -> Option<&LutEntry> {
        self.entries.get(address)
    }

    /// Binary literals laid out by `formatter`.
    pub fn write_table<W: Write>(&self, out: W, formatter: &TableFormatter) -> io::Result<W> {
        let mut table = formatter.writer(out);
        for entry in &self.entries {
            table.push(&entry.value.to_binary_string())?;
        }
        table.finish()
    }

    pub fn render(&self, formatter: &TableFormatter) -> String {
        formatter.render(self.entries.iter().map(|e| e.value.to_binary_string()))
    }

    /// One line per address: `address<TAB>bits<TAB>density`.
    pub fn write_listing<W: Write>(&self, mut out: W) -> io::Result<W> {
        for entry in &self.entries {
            writeln!(out, "{}\t{}\t{:.6}", entry.address, entry.value, entry.density)?;
        }
        out.flush()?;
        Ok(out)
    }
}

/// Samples a density across its sweep and quantizes each sample.
pub struct LutBuilder {
    config: LutConfig,
    density: Box<dyn Density>,
    quantizer: BitQuantizer,
}

impl LutBuilder {
    pub fn new(config: LutConfig) -> Result<Self, LutError> {
        config.validate()?;
        let density = config.distribution.build(config.mean, config.std_dev)?;
        let quantizer = BitQuantizer::new(config.bits, config.overflow)?;
        Ok(Self {
            config,
            density,
            quantizer,
        })
    }

    /// Use a custom density; `config.mean`/`std_dev` are taken from it.
    pub fn with_density(config: LutConfig, density: Box<dyn Density>) -> Result<Self, LutError> {
        let config = LutConfig {
            mean: density.mean(),
            std_dev: density.std_dev(),
            ..config
        };
        config.validate()?;
        let quantizer = BitQuantizer::new(config.bits, config.overflow)?;
        Ok(Self {
            config,
            density,
            quantizer,
        })
    }

    pub fn config(&self) -> &LutConfig {
        &self.config
    }

    pub fn build(&self) -> Result<LookupTable, LutError> {
        let sweep = self.config.sweep();
        let mut entries = Vec::with_capacity(self.config.entries + 1);
        let mut saturated = 0usize;

        for (address, x) in sweep.points().enumerate() {
            let density = self.density.density(x);
            if density >= FULL_SCALE {
                saturated += 1;
            }
            let value = self
                .quantizer
                .quantize(density)
                .map_err(|source| LutError::Sample { address, source })?;
            entries.push(LutEntry {
                address,
                x,
                density,
                value,
            });
        }

        if saturated > 0 {
            tracing::warn!(saturated, "density exceeds full scale; entries clipped to all ones");
        }
        tracing::debug!(
            entries = entries.len(),
            dx = sweep.dx(),
            peak = self.density.peak(),
            "lookup table built"
        );
        Ok(LookupTable { entries })
    }
}
