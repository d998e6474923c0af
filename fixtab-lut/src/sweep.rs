use serde::{Deserialize, Serialize};

/// How sample points are generated across the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// `x_k = start + k·dx` for `k in 0..steps`: always exactly `steps` points
    #[default]
    Indexed,
    /// `x += dx` while `x < end`. Matches tables generated by running accumulation;
    /// rounding in the sum can add or lose one point at the end of the domain.
    Accumulated,
}

/// Sample points over the half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    start: f64,
    end: f64,
    steps: usize,
    mode: SweepMode,
}

impl Sweep {
    /// `steps` must be non-zero and `end > start`; the builder validates both.
    pub fn new(start: f64, end: f64, steps: usize, mode: SweepMode) -> Self {
        Self {
            start,
            end,
            steps,
            mode,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Step between samples, `(end - start) / steps`.
    pub fn dx(&self) -> f64 {
        (self.end - self.start) / self.steps as f64
    }

    pub fn points(&self) -> SweepIter {
        SweepIter {
            sweep: *self,
            k: 0,
            x: self.start,
        }
    }
}

pub struct SweepIter {
    sweep: Sweep,
    k: usize,
    x: f64,
}

impl Iterator for SweepIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let sweep = &self.sweep;
        match sweep.mode {
            SweepMode::Indexed => {
                if self.k >= sweep.steps {
                    return None;
                }
                let x = sweep.start + self.k as f64 * sweep.dx();
                self.k += 1;
                Some(x)
            }
            SweepMode::Accumulated => {
                // rounding may add one point past `steps`, never more
                if self.k > sweep.steps || !(self.x < sweep.end) {
                    return None;
                }
                let x = self.x;
                let next = x + sweep.dx();
                // a step below the float spacing at x would stall the sum
                self.x = if next > x { next } else { sweep.end };
                self.k += 1;
                Some(x)
            }
        }
    }
}
