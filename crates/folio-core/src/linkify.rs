//! Link detection for finished plain-text lines.
//!
//! After a payload has been typed, plain-text lines are rewritten into
//! [`Segment`]s so URLs and email addresses become clickable. Typing itself
//! never goes through here.

use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url pattern"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").expect("valid email pattern")
});

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute web address.
    Url(String),
    /// Email address (opened as `mailto:`).
    Mailto(String),
}

impl LinkTarget {
    /// Returns the address handed to the system opener.
    pub fn href(&self) -> String {
        match self {
            LinkTarget::Url(url) => url.clone(),
            LinkTarget::Mailto(address) => format!("mailto:{address}"),
        }
    }
}

/// A run of display text, optionally linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { text: String, target: LinkTarget },
}

impl Segment {
    /// Visible text of the segment.
    pub fn text(&self) -> &str {
        match self {
            Segment::Text(text) | Segment::Link { text, .. } => text,
        }
    }

    /// Returns the link target, if any.
    pub fn target(&self) -> Option<&LinkTarget> {
        match self {
            Segment::Text(_) => None,
            Segment::Link { target, .. } => Some(target),
        }
    }
}

/// Converts URLs and email addresses in `text` into link segments.
///
/// URLs win over emails: an address embedded in a URL stays part of the URL.
/// The visible text of the returned segments always concatenates back to `text`.
pub fn linkify(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in URL.find_iter(text) {
        push_emails(&mut segments, &text[cursor..m.start()]);
        segments.push(Segment::Link {
            text: m.as_str().to_string(),
            target: LinkTarget::Url(m.as_str().to_string()),
        });
        cursor = m.end();
    }
    push_emails(&mut segments, &text[cursor..]);

    segments
}

fn push_emails(segments: &mut Vec<Segment>, text: &str) {
    let mut cursor = 0;
    for m in EMAIL.find_iter(text) {
        push_text(segments, &text[cursor..m.start()]);
        segments.push(Segment::Link {
            text: m.as_str().to_string(),
            target: LinkTarget::Mailto(m.as_str().to_string()),
        });
        cursor = m.end();
    }
    push_text(segments, &text[cursor..]);
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}
