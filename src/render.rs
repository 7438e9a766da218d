//! Side-by-side line rendering
//!
//! Lines are positioned relative to the ascii block with cursor moves
//! rather than absolute coordinates: each line re-anchors its value
//! column from its own label length, so every value lands at the same
//! offset no matter how long the label was.

use crate::term::{visible_width, Emitter, Palette, Seq};
use std::io::{self, Write};

/// One labeled line of system information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLine {
    pub label: String,
    pub value: String,
    pub suppress_separator: bool,
    /// 1-based palette slot for the label, defaults to slot 1
    pub label_slot: Option<usize>,
}

impl InfoLine {
    pub fn new(label: &str, value: String) -> Self {
        InfoLine {
            label: label.to_string(),
            value,
            suppress_separator: false,
            label_slot: None,
        }
    }
}

/// Output of a provider: labeled lines or pre-formatted raw lines
#[derive(Debug, Clone)]
pub enum RenderItem {
    Line(InfoLine),
    Raw(String),
}

/// Per-run render state shared across provider invocations
///
/// `label_width` must be final before the first render call; alignment
/// is never corrected retroactively.
pub struct Session<'a> {
    emitter: &'a Emitter,
    palette: &'a Palette,
    separator: &'a str,
    ascii_width: usize,
    label_width: usize,
    info_height: usize,
}

impl<'a> Session<'a> {
    pub fn new(
        emitter: &'a Emitter,
        palette: &'a Palette,
        separator: &'a str,
        ascii_width: usize,
        label_width: usize,
    ) -> Self {
        Session {
            emitter,
            palette,
            separator,
            ascii_width,
            label_width,
            info_height: 0,
        }
    }

    /// Reserved width of the label column: the widest label plus one
    pub fn label_column_width<'p>(labels: impl Iterator<Item = &'p str>) -> usize {
        labels.map(visible_width).max().unwrap_or(0) + 1
    }

    /// Lines emitted so far
    pub fn info_height(&self) -> usize {
        self.info_height
    }

    pub fn render<W: Write>(&mut self, out: &mut W, item: &RenderItem) -> io::Result<()> {
        match item {
            RenderItem::Raw(text) => self.render_raw(out, text),
            RenderItem::Line(line) => self.render_line(out, line),
        }
    }

    fn render_raw<W: Write>(&mut self, out: &mut W, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.emitter.print(out, Seq::Right(self.ascii_width))?;
        writeln!(out, "{}{}", text, self.palette.reset())?;
        self.info_height += 1;
        Ok(())
    }

    fn render_line<W: Write>(&mut self, out: &mut W, line: &InfoLine) -> io::Result<()> {
        // a provider opts out by handing over an empty value
        if line.value.is_empty() {
            return Ok(());
        }
        let slot = line.label_slot.unwrap_or(1);
        self.emitter.print(out, Seq::Right(self.ascii_width))?;
        write!(
            out,
            "{}{}{}{}",
            self.palette.bold(),
            self.palette.slot(slot),
            line.label,
            self.palette.reset()
        )?;
        if !line.suppress_separator {
            write!(out, "{}", self.separator)?;
        }
        // re-anchor the value column from this line's own label length
        self.emitter.print(out, Seq::Left(visible_width(&line.label)))?;
        self.emitter.print(out, Seq::Right(self.label_width))?;
        writeln!(
            out,
            "{}{}{}",
            self.palette.slot(2),
            line.value,
            self.palette.reset()
        )?;
        self.info_height += 1;
        Ok(())
    }
}

/// Newlines needed below the info column so the cursor clears the
/// taller of the two blocks
pub fn bottom_gap(art_height: usize, info_height: usize) -> usize {
    art_height.saturating_sub(info_height)
}
