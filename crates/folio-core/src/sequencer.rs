//! Line sequencer: animates one payload line by line.
//!
//! A [`RenderSession`] is a state machine. It never touches a clock itself;
//! each call returns the [`Action`]s the owner must apply to its scheduler
//! (start or stop the per-character tick, schedule the next line step) along
//! with the events it produced.
//!
//! ```text
//! Idle -> TypingLine(i, c) -> LineComplete(i) -> TypingLine(i+1, 0) -> ... -> Done
//!   \______________________________ cancel() _______________________________/-> Cancelled
//! ```
//!
//! Blank lines go straight to `LineComplete`. Once the cursor passes the last
//! line the link post-process pass runs and the session is `Done`.

use std::collections::VecDeque;

use crate::classify::{LineKind, classify, is_bullet};
use crate::clock::Millis;
use crate::config::TypingConfig;
use crate::linkify::linkify;
use crate::output::{BlockId, LineRef, NewLine, Region, RenderTarget};
use crate::typist::{Typist, TypistStep};

/// Where a session is in its animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TypingLine {
        line: usize,
        region: Region,
        chars: usize,
    },
    LineComplete(usize),
    Done,
    Cancelled,
}

/// Scheduler work requested by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run the next line step after this delay.
    StepAfter(Millis),
    /// Start the recurring character tick.
    StartTicking(Millis),
    /// Stop the recurring character tick.
    StopTicking,
    /// The line at this index is complete.
    LineCompleted(usize),
    /// All lines are complete and post-processed.
    Finished,
}

/// The line currently being typed.
#[derive(Debug)]
struct CurrentLine {
    index: usize,
    line: LineRef,
    plain: bool,
    typist: Typist,
    /// Regions still to type after the current one.
    queued: VecDeque<(Region, String)>,
}

/// Animation state for one payload.
#[derive(Debug)]
pub struct RenderSession {
    lines: Vec<String>,
    cursor: usize,
    /// Typed plain text per line; empty for blank and link lines.
    typed: Vec<String>,
    rendered: Vec<LineRef>,
    block: Option<BlockId>,
    current: Option<CurrentLine>,
    phase: Phase,
    typing: TypingConfig,
}

impl RenderSession {
    pub fn new(payload: &str, typing: TypingConfig) -> Self {
        let lines: Vec<String> = payload.split('\n').map(str::to_string).collect();
        Self {
            typed: Vec::with_capacity(lines.len()),
            rendered: Vec::with_capacity(lines.len()),
            lines,
            cursor: 0,
            block: None,
            current: None,
            phase: Phase::Idle,
            typing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Typed plain text recorded so far, by line.
    pub fn typed(&self) -> &[String] {
        &self.typed
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Done | Phase::Cancelled)
    }

    /// Opens the session's output block and processes the first line.
    pub fn start<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> Vec<Action> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        self.block = Some(target.open_block());
        self.step(target)
    }

    /// Processes the line at the cursor.
    pub fn step<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> Vec<Action> {
        let Some(block) = self.block else {
            return Vec::new();
        };
        if self.is_over() || self.current.is_some() {
            return Vec::new();
        }

        let index = self.cursor;
        let Some(source) = self.lines.get(index) else {
            self.post_process(target);
            self.phase = Phase::Done;
            return vec![Action::Finished];
        };

        let fallback = LineRef { block, line: index };
        let bullet = is_bullet(source);
        match classify(source) {
            LineKind::Blank => {
                let line = target.push_line(block, NewLine::Blank).unwrap_or(fallback);
                self.rendered.push(line);
                self.typed.push(String::new());
                self.cursor += 1;
                self.phase = Phase::LineComplete(index);
                target.scroll_to_bottom();
                vec![
                    Action::LineCompleted(index),
                    Action::StepAfter(self.typing.blank_line_delay_ms),
                ]
            }
            LineKind::PlainText => {
                let line = target
                    .push_line(block, NewLine::Text { bullet })
                    .unwrap_or(fallback);
                self.rendered.push(line);
                let text = source.clone();
                self.begin_line(index, line, true, Region::Body, text, VecDeque::new());
                vec![Action::StartTicking(self.typing.char_delay_ms)]
            }
            LineKind::LinkLine { before, url, after } => {
                let new_line = NewLine::Linked {
                    url,
                    has_after: !after.is_empty(),
                    bullet,
                };
                let line = target.push_line(block, new_line).unwrap_or(fallback);
                self.rendered.push(line);

                let mut queued = VecDeque::with_capacity(2);
                queued.push_back((Region::Link, url.to_string()));
                if !after.is_empty() {
                    queued.push_back((Region::After, after.to_string()));
                }
                let before = before.to_string();
                self.begin_line(index, line, false, Region::Before, before, queued);
                vec![Action::StartTicking(self.typing.char_delay_ms)]
            }
        }
    }

    /// Advances the current typist by one character.
    pub fn tick<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> Vec<Action> {
        let Some(current) = self.current.as_mut() else {
            return vec![Action::StopTicking];
        };

        match current.typist.tick(target) {
            TypistStep::Typed(_) => {
                self.phase = Phase::TypingLine {
                    line: current.index,
                    region: current.typist.node().region,
                    chars: current.typist.typed_len(),
                };
                Vec::new()
            }
            TypistStep::Finished => vec![Action::StopTicking],
            TypistStep::Complete(text) => {
                if let Some((region, next)) = current.queued.pop_front() {
                    current.typist = Typist::new(current.line.region(region), next);
                    self.phase = Phase::TypingLine {
                        line: current.index,
                        region,
                        chars: 0,
                    };
                    return vec![
                        Action::StopTicking,
                        Action::StartTicking(self.typing.char_delay_ms),
                    ];
                }

                let index = current.index;
                let record = if current.plain { text } else { String::new() };
                self.current = None;
                self.typed.push(record);
                self.cursor += 1;
                self.phase = Phase::LineComplete(index);
                target.scroll_to_bottom();
                vec![
                    Action::StopTicking,
                    Action::LineCompleted(index),
                    Action::StepAfter(self.typing.line_delay_ms),
                ]
            }
        }
    }

    /// Stops the session where it is. Already typed output stays.
    pub fn cancel(&mut self) {
        if !self.is_over() {
            self.current = None;
            self.phase = Phase::Cancelled;
        }
    }

    /// Rewrites every line with non-empty typed text into link-aware segments.
    ///
    /// Works from the recorded typed text, so running it again produces the
    /// same content. Blank and link lines are never touched.
    pub fn post_process<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        for (typed, line) in self.typed.iter().zip(&self.rendered) {
            if !typed.is_empty() {
                target.rewrite(*line, linkify(typed));
            }
        }
    }

    fn begin_line(
        &mut self,
        index: usize,
        line: LineRef,
        plain: bool,
        region: Region,
        text: String,
        queued: VecDeque<(Region, String)>,
    ) {
        self.current = Some(CurrentLine {
            index,
            line,
            plain,
            typist: Typist::new(line.region(region), text),
            queued,
        });
        self.phase = Phase::TypingLine {
            line: index,
            region,
            chars: 0,
        };
    }
}
