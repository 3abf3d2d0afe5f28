//! Render target that types output straight into a byte stream.
//!
//! Streams cannot move back: only the newest line of the newest block accepts
//! characters, link rewrites are no-ops, and `clear` just ends the current
//! line. Write errors are kept and surfaced by [`StreamTarget::finish`] so the
//! animation itself never fails.

use std::io::{self, Write};

use anyhow::{Context, Result};
use folio_core::{BlockId, LineRef, NewLine, NodeRef, Region, RenderTarget, Segment};

const UNDERLINE_ON: &str = "\x1b[4m";
const UNDERLINE_OFF: &str = "\x1b[24m";
/// Payload text never reaches the terminal as control sequences: tabs expand
/// and other control characters are dropped.
const TAB: &str = "    ";

pub struct StreamTarget<W: Write> {
    out: W,
    /// Underline link regions with ANSI escapes.
    styled: bool,
    echo: bool,
    next_block: u64,
    block: Option<BlockId>,
    next_line: usize,
    current: Option<LineRef>,
    /// A line has been started and not yet terminated.
    line_open: bool,
    underline: bool,
    error: Option<io::Error>,
}

impl<W: Write> StreamTarget<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            echo: true,
            next_block: 0,
            block: None,
            next_line: 0,
            current: None,
            line_open: false,
            underline: false,
            error: None,
        }
    }

    /// Whether submitted commands are echoed after the prompt.
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Terminates the last line, flushes, and returns the writer.
    pub fn finish(mut self) -> Result<W> {
        self.end_line();
        self.flush();
        if let Some(err) = self.error.take() {
            return Err(err).context("Failed to write output");
        }
        Ok(self.out)
    }

    fn emit(&mut self, s: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(s.as_bytes()) {
            self.error = Some(err);
        }
    }

    fn flush(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.flush() {
            self.error = Some(err);
        }
    }

    fn set_underline(&mut self, on: bool) {
        if !self.styled || self.underline == on {
            return;
        }
        self.emit(if on { UNDERLINE_ON } else { UNDERLINE_OFF });
        self.underline = on;
    }

    fn end_line(&mut self) {
        self.set_underline(false);
        if self.line_open {
            self.emit("\n");
            self.line_open = false;
        }
    }
}

fn neutralize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => out.push_str(TAB),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

impl<W: Write> RenderTarget for StreamTarget<W> {
    fn echo(&mut self, prompt: &str, command: &str) {
        if !self.echo {
            return;
        }
        self.end_line();
        let line = neutralize(&format!("{prompt} {command}"));
        self.emit(&line);
        self.line_open = true;
    }

    fn open_block(&mut self) -> BlockId {
        self.end_line();
        let id = BlockId(self.next_block);
        self.next_block += 1;
        self.block = Some(id);
        self.next_line = 0;
        self.current = None;
        id
    }

    fn push_line(&mut self, block: BlockId, _line: NewLine<'_>) -> Option<LineRef> {
        if self.block != Some(block) {
            return None;
        }
        self.end_line();
        let line = LineRef {
            block,
            line: self.next_line,
        };
        self.next_line += 1;
        self.current = Some(line);
        // Blank lines are open too, so the next line starts after an empty one.
        self.line_open = true;
        Some(line)
    }

    fn write(&mut self, node: NodeRef, ch: char) {
        if self.current != Some(node.line) {
            return;
        }
        let mut buf = [0u8; 4];
        let text = match ch {
            '\t' => TAB,
            c if c.is_control() => return,
            c => &*c.encode_utf8(&mut buf),
        };
        self.set_underline(node.region == Region::Link);
        self.emit(text);
    }

    fn rewrite(&mut self, _line: LineRef, _segments: Vec<Segment>) {}

    fn clear(&mut self) {
        self.end_line();
        self.block = None;
        self.current = None;
        tracing::debug!("clear has no effect on streamed output");
    }

    fn scroll_to_bottom(&mut self) {
        self.flush();
    }
}
