//! Render targets.
//!
//! The engine writes into a [`RenderTarget`]: it opens one block per payload,
//! appends lines to it, places characters into line regions, and finally
//! rewrites finished plain-text lines into link-aware [`Segment`]s.
//!
//! [`OutputBuffer`] is the in-memory target used by the interactive UI. Nodes
//! are addressed by block id, so writes that arrive after a clear find no
//! block and are dropped silently.

use crate::linkify::{LinkTarget, Segment};

/// Identifies one output block (one rendered payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

/// A line inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRef {
    pub block: BlockId,
    pub line: usize,
}

/// A writable region of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The whole line (plain-text lines).
    Body,
    /// Text before the URL of a link line.
    Before,
    /// The URL of a link line.
    Link,
    /// Text after the URL of a link line.
    After,
}

/// A display node: one region of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub line: LineRef,
    pub region: Region,
}

impl LineRef {
    pub fn region(self, region: Region) -> NodeRef {
        NodeRef { line: self, region }
    }
}

/// Shape of a line being appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewLine<'a> {
    /// Blank placeholder, complete on arrival.
    Blank,
    /// Empty plain-text node.
    Text { bullet: bool },
    /// Empty before / link / after regions; the link points at `url`.
    Linked {
        url: &'a str,
        has_after: bool,
        bullet: bool,
    },
}

/// Sink the render engine writes into.
///
/// Writes never fail from the engine's point of view: a node that no longer
/// exists turns the write into a no-op.
pub trait RenderTarget {
    /// Echoes a submitted command after the prompt.
    fn echo(&mut self, prompt: &str, command: &str);

    /// Appends a new, empty output block.
    fn open_block(&mut self) -> BlockId;

    /// Appends a line to a block. Returns `None` if the block is gone.
    fn push_line(&mut self, block: BlockId, line: NewLine<'_>) -> Option<LineRef>;

    /// Appends one character to a node.
    fn write(&mut self, node: NodeRef, ch: char);

    /// Replaces a finished line's content with link-aware segments.
    fn rewrite(&mut self, line: LineRef, segments: Vec<Segment>);

    /// Removes every child of the output.
    fn clear(&mut self);

    /// Keeps the most recent output in view.
    fn scroll_to_bottom(&mut self);
}

/// Content of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContent {
    Blank,
    Text(String),
    Linked {
        before: String,
        link: String,
        href: String,
        after: Option<String>,
    },
    Formatted(Vec<Segment>),
}

/// One line of an output block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub bullet: bool,
    pub content: LineContent,
}

impl RenderedLine {
    /// Visible text of the line.
    pub fn text(&self) -> String {
        self.segments().iter().map(Segment::text).collect()
    }

    /// The line as display segments.
    pub fn segments(&self) -> Vec<Segment> {
        match &self.content {
            LineContent::Blank => Vec::new(),
            LineContent::Text(text) => vec![Segment::Text(text.clone())],
            LineContent::Linked {
                before,
                link,
                href,
                after,
            } => {
                let mut segments = Vec::with_capacity(3);
                if !before.is_empty() {
                    segments.push(Segment::Text(before.clone()));
                }
                segments.push(Segment::Link {
                    text: link.clone(),
                    target: LinkTarget::Url(href.clone()),
                });
                if let Some(after) = after
                    && !after.is_empty()
                {
                    segments.push(Segment::Text(after.clone()));
                }
                segments
            }
            LineContent::Formatted(segments) => segments.clone(),
        }
    }

    /// Text of a single region, if the line has it.
    pub fn region_text(&self, region: Region) -> Option<&str> {
        match (&self.content, region) {
            (LineContent::Text(text), Region::Body) => Some(text.as_str()),
            (LineContent::Linked { before, .. }, Region::Before) => Some(before.as_str()),
            (LineContent::Linked { link, .. }, Region::Link) => Some(link.as_str()),
            (LineContent::Linked { after, .. }, Region::After) => after.as_deref(),
            _ => None,
        }
    }

    fn region_mut(&mut self, region: Region) -> Option<&mut String> {
        match (&mut self.content, region) {
            (LineContent::Text(text), Region::Body) => Some(text),
            (LineContent::Linked { before, .. }, Region::Before) => Some(before),
            (LineContent::Linked { link, .. }, Region::Link) => Some(link),
            (LineContent::Linked { after, .. }, Region::After) => after.as_mut(),
            _ => None,
        }
    }
}

/// Lines produced by one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub lines: Vec<RenderedLine>,
}

/// A child of the output container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Echo { prompt: String, command: String },
    Block(Block),
}

/// In-memory render target for the interactive UI.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    children: Vec<Child>,
    next_block: u64,
    scroll_requests: u64,
    revision: u64,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of scroll-to-bottom requests so far.
    ///
    /// Views compare this against the last value they saw to decide whether
    /// to jump back to the bottom.
    pub fn scroll_requests(&self) -> u64 {
        self.scroll_requests
    }

    /// Bumped on every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.children.iter().rev().find_map(|child| match child {
            Child::Block(block) if block.id == id => Some(block),
            _ => None,
        })
    }

    pub fn line(&self, line: LineRef) -> Option<&RenderedLine> {
        self.block(line.block)?.lines.get(line.line)
    }

    fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.children.iter_mut().rev().find_map(|child| match child {
            Child::Block(block) if block.id == id => Some(block),
            _ => None,
        })
    }

    fn line_mut(&mut self, line: LineRef) -> Option<&mut RenderedLine> {
        self.block_mut(line.block)?.lines.get_mut(line.line)
    }
}

impl RenderTarget for OutputBuffer {
    fn echo(&mut self, prompt: &str, command: &str) {
        self.children.push(Child::Echo {
            prompt: prompt.to_string(),
            command: command.to_string(),
        });
        self.revision += 1;
    }

    fn open_block(&mut self) -> BlockId {
        let id = BlockId(self.next_block);
        self.next_block += 1;
        self.children.push(Child::Block(Block {
            id,
            lines: Vec::new(),
        }));
        self.revision += 1;
        id
    }

    fn push_line(&mut self, block: BlockId, line: NewLine<'_>) -> Option<LineRef> {
        let (bullet, content) = match line {
            NewLine::Blank => (false, LineContent::Blank),
            NewLine::Text { bullet } => (bullet, LineContent::Text(String::new())),
            NewLine::Linked {
                url,
                has_after,
                bullet,
            } => (
                bullet,
                LineContent::Linked {
                    before: String::new(),
                    link: String::new(),
                    href: url.to_string(),
                    after: has_after.then(String::new),
                },
            ),
        };

        let target = self.block_mut(block)?;
        target.lines.push(RenderedLine { bullet, content });
        let line = target.lines.len() - 1;
        self.revision += 1;
        Some(LineRef { block, line })
    }

    fn write(&mut self, node: NodeRef, ch: char) {
        let Some(region) = self
            .line_mut(node.line)
            .and_then(|line| line.region_mut(node.region))
        else {
            return;
        };
        region.push(ch);
        self.revision += 1;
    }

    fn rewrite(&mut self, line: LineRef, segments: Vec<Segment>) {
        if let Some(target) = self.line_mut(line) {
            target.content = LineContent::Formatted(segments);
            self.revision += 1;
        }
    }

    fn clear(&mut self) {
        self.children.clear();
        self.revision += 1;
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fills_regions_in_place() {
        let mut out = OutputBuffer::new();
        let block = out.open_block();
        let line = out
            .push_line(
                block,
                NewLine::Linked {
                    url: "https://example.com",
                    has_after: false,
                    bullet: false,
                },
            )
            .unwrap();

        for ch in "Site: ".chars() {
            out.write(line.region(Region::Before), ch);
        }
        for ch in "https://example.com".chars() {
            out.write(line.region(Region::Link), ch);
        }
        // No after region was created, so this is dropped.
        out.write(line.region(Region::After), 'x');

        let rendered = out.line(line).unwrap();
        assert_eq!(rendered.region_text(Region::Before), Some("Site: "));
        assert_eq!(rendered.region_text(Region::Link), Some("https://example.com"));
        assert_eq!(rendered.region_text(Region::After), None);
        assert_eq!(rendered.text(), "Site: https://example.com");
    }

    #[test]
    fn test_writes_after_clear_are_noops() {
        let mut out = OutputBuffer::new();
        let block = out.open_block();
        let line = out.push_line(block, NewLine::Text { bullet: false }).unwrap();
        out.clear();

        out.write(line.region(Region::Body), 'a');
        assert!(out.push_line(block, NewLine::Blank).is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_block_ids_are_not_reused_after_clear() {
        let mut out = OutputBuffer::new();
        let first = out.open_block();
        out.clear();
        let second = out.open_block();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let mut out = OutputBuffer::new();
        let block = out.open_block();
        let line = out.push_line(block, NewLine::Text { bullet: true }).unwrap();
        out.write(line.region(Region::Body), 'h');
        out.rewrite(line, vec![Segment::Text("h".into())]);

        let rendered = out.line(line).unwrap();
        assert!(rendered.bullet);
        assert_eq!(rendered.content, LineContent::Formatted(vec![Segment::Text("h".into())]));
    }

    #[test]
    fn test_scroll_requests_count() {
        let mut out = OutputBuffer::new();
        out.scroll_to_bottom();
        out.scroll_to_bottom();
        assert_eq!(out.scroll_requests(), 2);
    }
}
