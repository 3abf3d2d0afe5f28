//! Core of the folio terminal portfolio.
//!
//! Everything here is terminal-agnostic: the command registry, the line
//! classifier and link detection, the virtual-time scheduler, and the render
//! engine that types command output into a [`RenderTarget`].

pub mod classify;
pub mod clock;
pub mod config;
pub mod engine;
pub mod linkify;
pub mod logging;
pub mod output;
pub mod registry;
pub mod sequencer;
pub mod shell;
pub mod typist;

pub use classify::{LineKind, classify, is_bullet};
pub use clock::{Fired, Millis, Scheduler, TimerId};
pub use config::{CommandSpec, Config, NavItem, SessionPolicy, TypingConfig};
pub use engine::{EngineEvent, RenderEngine, SessionId};
pub use linkify::{LinkTarget, Segment, linkify};
pub use output::{
    Block, BlockId, Child, LineContent, LineRef, NewLine, NodeRef, OutputBuffer, Region,
    RenderTarget, RenderedLine,
};
pub use registry::{CommandEntry, CommandOutput, CommandRegistry, Producer};
pub use shell::{Completion, Outcome, Shell, not_found_message};
