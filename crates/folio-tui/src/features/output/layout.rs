//! Output layout.
//!
//! Flattens the output buffer into terminal rows: echo lines and block lines
//! are word-wrapped to the viewport width (grapheme and display-width aware),
//! and every row keeps its styled runs so links stay clickable after wrapping.

use folio_core::{Child, RenderedLine, Segment};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::common::sanitize_for_display;

/// Extra indent of wrapped continuation rows of a bullet line.
pub const HANGING_INDENT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunKind {
    /// Indentation and plain output.
    Text,
    /// Prompt of an echoed command.
    Prompt,
    /// The echoed command.
    Command,
    Link { href: String },
}

/// A styled stretch of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub kind: RunKind,
}

impl Run {
    fn new(text: impl Into<String>, kind: RunKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One terminal row of output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualRow {
    pub runs: Vec<Run>,
}

impl VisualRow {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Link target under display column `column`, if any.
    pub fn link_at(&self, column: usize) -> Option<&str> {
        let mut start = 0;
        for run in &self.runs {
            let end = start + run.width();
            if column < end {
                return match &run.kind {
                    RunKind::Link { href } => Some(href),
                    _ => None,
                };
            }
            start = end;
        }
        None
    }

    fn push(&mut self, text: &str, kind: &RunKind) {
        match self.runs.last_mut() {
            Some(last) if last.kind == *kind => last.text.push_str(text),
            _ => self.runs.push(Run::new(text, kind.clone())),
        }
    }
}

/// Lays out every child of the output for a viewport `width` columns wide.
///
/// Block lines are indented by `margin` columns; echo lines start at column 0.
pub fn layout_children(children: &[Child], width: usize, margin: usize) -> Vec<VisualRow> {
    let mut rows = Vec::new();
    for child in children {
        match child {
            Child::Echo { prompt, command } => {
                let pieces = [
                    Run::new(sanitize_for_display(prompt), RunKind::Prompt),
                    Run::new(" ", RunKind::Text),
                    Run::new(sanitize_for_display(command), RunKind::Command),
                ];
                rows.extend(wrap(&pieces, width, 0, 0));
            }
            Child::Block(block) => {
                for line in &block.lines {
                    rows.extend(layout_line(line, width, margin));
                }
            }
        }
    }
    rows
}

fn layout_line(line: &RenderedLine, width: usize, margin: usize) -> Vec<VisualRow> {
    let pieces: Vec<Run> = line
        .segments()
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Run::new(sanitize_for_display(&text), RunKind::Text),
            Segment::Link { text, target } => Run::new(
                sanitize_for_display(&text),
                RunKind::Link {
                    href: target.href(),
                },
            ),
        })
        .collect();

    let hang = if line.bullet {
        leading_whitespace_width(&line.text()) + HANGING_INDENT
    } else {
        0
    };
    wrap(&pieces, width, margin, hang)
}

fn leading_whitespace_width(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

struct Cell<'a> {
    text: &'a str,
    width: usize,
    piece: usize,
}

impl Cell<'_> {
    fn is_space(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Greedy word wrap of `pieces` into rows of at most `width` columns.
///
/// Every row starts with `margin` columns of indentation; continuation rows
/// add `hang` more. Whitespace at a break is dropped and words longer than a
/// row are split by grapheme.
fn wrap(pieces: &[Run], width: usize, margin: usize, hang: usize) -> Vec<VisualRow> {
    let first_avail = width.saturating_sub(margin).max(1);
    let cont_avail = width.saturating_sub(margin + hang).max(1);

    let cells: Vec<Cell<'_>> = pieces
        .iter()
        .enumerate()
        .flat_map(|(piece, run)| {
            run.text.graphemes(true).map(move |g| Cell {
                text: g,
                width: g.width(),
                piece,
            })
        })
        .collect();

    let mut rows: Vec<Vec<&Cell<'_>>> = vec![Vec::new()];
    let mut col = 0;
    let avail = |row: usize| if row == 0 { first_avail } else { cont_avail };

    for token in cells.chunk_by(|a, b| a.is_space() == b.is_space()) {
        let token_width: usize = token.iter().map(|c| c.width).sum();
        let current = rows.len() - 1;

        if col + token_width <= avail(current) {
            rows[current].extend(token);
            col += token_width;
            continue;
        }

        if token[0].is_space() {
            if col > 0 {
                rows.push(Vec::new());
                col = 0;
            }
            continue;
        }

        if col > 0 && token_width <= cont_avail {
            rows.push(token.iter().collect());
            col = token_width;
            continue;
        }

        for cell in token {
            if col > 0 && col + cell.width > avail(rows.len() - 1) {
                rows.push(Vec::new());
                col = 0;
            }
            if let Some(row) = rows.last_mut() {
                row.push(cell);
            }
            col += cell.width;
        }
    }

    rows.into_iter()
        .enumerate()
        .map(|(idx, cells)| {
            let mut row = VisualRow::default();
            let indent = if idx == 0 { margin } else { margin + hang };
            if indent > 0 {
                row.push(&" ".repeat(indent), &RunKind::Text);
            }
            for cell in cells {
                row.push(cell.text, &pieces[cell.piece].kind);
            }
            row
        })
        .collect()
}
