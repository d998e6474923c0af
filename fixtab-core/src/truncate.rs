use thiserror::Error;

/// Default width of pre-encoded binary literals.
pub const DEFAULT_INPUT_WIDTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TruncateError {
    #[error("line has {actual} characters, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("target width {width} must be in 1..={input_width}")]
    InvalidWidth { width: usize, input_width: usize },
}

/// Keeps the `width` most-significant characters of each binary literal.
///
/// Pure string prefixing: nothing is parsed or rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitWidthTruncator {
    input_width: usize,
    width: usize,
}

impl BitWidthTruncator {
    pub fn new(input_width: usize, width: usize) -> Result<Self, TruncateError> {
        if width == 0 || width > input_width {
            return Err(TruncateError::InvalidWidth { width, input_width });
        }
        Ok(Self { input_width, width })
    }

    /// Drop `drop` least-significant characters, keeping `input_width - drop`.
    pub fn dropping(input_width: usize, drop: usize) -> Result<Self, TruncateError> {
        let width = input_width.saturating_sub(drop);
        Self::new(input_width, width)
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Prefix of `line`. Trailing whitespace (including `\r`) is ignored.
    ///
    /// The line must be exactly `input_width` characters. Longer lines are
    /// rejected as well as shorter ones: the kept prefix is only the
    /// most-significant part of the word when the line has the width the
    /// truncator was configured for, so an overlong line means the input file
    /// does not hold the words the caller expects.
    pub fn truncate<'a>(&self, line: &'a str) -> Result<&'a str, TruncateError> {
        let line = line.trim_end();
        let actual = line.chars().count();
        if actual != self.input_width {
            return Err(TruncateError::Length {
                expected: self.input_width,
                actual,
            });
        }
        let end = line
            .char_indices()
            .nth(self.width)
            .map_or(line.len(), |(idx, _)| idx);
        Ok(&line[..end])
    }
}

impl Default for BitWidthTruncator {
    fn default() -> Self {
        Self {
            input_width: DEFAULT_INPUT_WIDTH,
            width: DEFAULT_INPUT_WIDTH,
        }
    }
}
