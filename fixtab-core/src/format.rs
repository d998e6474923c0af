use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// How a single table entry is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralStyle {
    /// `"body",`, the constant-array element syntax HDL tools consume
    #[default]
    Quoted,
    /// `body`, entries in a row separated by a space
    Bare,
}

/// Entry quoting and row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormatter {
    row_len: usize,
    style: LiteralStyle,
}

impl TableFormatter {
    /// `row_len` entries per line; zero is treated as one.
    pub fn new(row_len: usize, style: LiteralStyle) -> Self {
        Self {
            row_len: row_len.max(1),
            style,
        }
    }

    /// One quoted literal per line (coefficient files).
    pub fn one_per_line() -> Self {
        Self::new(1, LiteralStyle::Quoted)
    }

    pub fn row_len(&self) -> usize {
        self.row_len
    }

    pub fn style(&self) -> LiteralStyle {
        self.style
    }

    pub fn literal(&self, body: &str) -> String {
        match self.style {
            LiteralStyle::Quoted => format!("\"{}\",", body),
            LiteralStyle::Bare => body.to_string(),
        }
    }

    pub fn writer<W: Write>(&self, out: W) -> TableWriter<W> {
        TableWriter {
            formatter: *self,
            out,
            column: 0,
            entries: 0,
        }
    }

    /// Render a whole table in memory.
    pub fn render<I, S>(&self, entries: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        let mut column = 0;
        for entry in entries {
            out.push_str(self.separator(column));
            out.push_str(&self.literal(entry.as_ref()));
            column += 1;
            if column == self.row_len {
                out.push('\n');
                column = 0;
            }
        }
        if column > 0 {
            out.push('\n');
        }
        out
    }

    /// Text placed before the entry at `column` within its row.
    fn separator(&self, column: usize) -> &'static str {
        match self.style {
            LiteralStyle::Bare if column > 0 => " ",
            _ => "",
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::one_per_line()
    }
}

/// Streams entries through a [`TableFormatter`], breaking rows as it goes.
///
/// Every row, including a final partial one, ends with `\n` once
/// [`finish`](TableWriter::finish) is called.
pub struct TableWriter<W: Write> {
    formatter: TableFormatter,
    out: W,
    column: usize,
    entries: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn push(&mut self, body: &str) -> io::Result<()> {
        self.out
            .write_all(self.formatter.separator(self.column).as_bytes())?;
        self.out.write_all(self.formatter.literal(body).as_bytes())?;
        self.column += 1;
        self.entries += 1;

        if self.column == self.formatter.row_len {
            self.out.write_all(b"\n")?;
            self.column = 0;
        }
        Ok(())
    }

    /// Entries written so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Terminate a partial row, flush, and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        if self.column > 0 {
            self.out.write_all(b"\n")?;
            self.column = 0;
        }
        self.out.flush()?;
        Ok(self.out)
    }
}
