//! Character typist: reveals a string into one node, a character per tick.

use crate::output::{NodeRef, RenderTarget};

/// Result of one typist tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypistStep {
    /// A character was placed; more ticks are needed.
    Typed(char),
    /// Nothing was left to place. Carries the fully revealed string.
    /// Reported exactly once.
    Complete(String),
    /// Ticked again after completion; nothing happens.
    Finished,
}

/// Reveals `target` into `node` one Unicode scalar per tick.
///
/// Completion is detected on the tick after the last character, so an empty
/// target completes on its first tick.
#[derive(Debug, Clone)]
pub struct Typist {
    node: NodeRef,
    target: String,
    /// Byte offset of the next character to place.
    offset: usize,
    finished: bool,
}

impl Typist {
    pub fn new(node: NodeRef, target: impl Into<String>) -> Self {
        Self {
            node,
            target: target.into(),
            offset: 0,
            finished: false,
        }
    }

    pub fn node(&self) -> NodeRef {
        self.node
    }

    /// Number of characters placed so far.
    pub fn typed_len(&self) -> usize {
        self.target[..self.offset].chars().count()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> TypistStep {
        if self.finished {
            return TypistStep::Finished;
        }

        if let Some(ch) = self.target[self.offset..].chars().next() {
            self.offset += ch.len_utf8();
            target.write(self.node, ch);
            target.scroll_to_bottom();
            TypistStep::Typed(ch)
        } else {
            self.finished = true;
            TypistStep::Complete(self.target.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{NewLine, OutputBuffer, Region};

    fn body_node(out: &mut OutputBuffer) -> NodeRef {
        let block = out.open_block();
        out.push_line(block, NewLine::Text { bullet: false })
            .unwrap()
            .region(Region::Body)
    }

    #[test]
    fn test_empty_target_completes_on_first_tick_once() {
        let mut out = OutputBuffer::new();
        let node = body_node(&mut out);
        let mut typist = Typist::new(node, "");

        assert_eq!(typist.tick(&mut out), TypistStep::Complete(String::new()));
        assert_eq!(typist.tick(&mut out), TypistStep::Finished);
        assert_eq!(typist.tick(&mut out), TypistStep::Finished);
    }

    #[test]
    fn test_types_every_char_in_order() {
        let mut out = OutputBuffer::new();
        let node = body_node(&mut out);
        let mut typist = Typist::new(node, "héllo 🎉");

        let mut typed = String::new();
        let completed = loop {
            match typist.tick(&mut out) {
                TypistStep::Typed(ch) => typed.push(ch),
                TypistStep::Complete(text) => break text,
                TypistStep::Finished => panic!("finished before completing"),
            }
        };

        assert_eq!(typed, "héllo 🎉");
        assert_eq!(completed, "héllo 🎉");
        assert_eq!(typist.typed_len(), 7);
        assert_eq!(
            out.line(node.line).unwrap().region_text(Region::Body),
            Some("héllo 🎉")
        );
    }

    #[test]
    fn test_markup_is_written_verbatim() {
        let mut out = OutputBuffer::new();
        let node = body_node(&mut out);
        let mut typist = Typist::new(node, "<b>x</b>");
        while !matches!(typist.tick(&mut out), TypistStep::Complete(_)) {}

        assert_eq!(out.line(node.line).unwrap().text(), "<b>x</b>");
    }

    #[test]
    fn test_detached_node_is_tolerated() {
        let mut out = OutputBuffer::new();
        let node = body_node(&mut out);
        out.clear();

        let mut typist = Typist::new(node, "ab");
        assert_eq!(typist.tick(&mut out), TypistStep::Typed('a'));
        assert_eq!(typist.tick(&mut out), TypistStep::Typed('b'));
        assert_eq!(typist.tick(&mut out), TypistStep::Complete("ab".into()));
        assert!(out.is_empty());
    }
}
