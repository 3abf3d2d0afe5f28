//! Render engine.
//!
//! Owns the render target, the virtual-time scheduler, and every live
//! [`RenderSession`]. Hosts feed it payloads with [`RenderEngine::render`] and
//! drive it with [`RenderEngine::advance_to`]; everything else happens inside
//! timer wakes on the caller's thread.

use std::collections::BTreeMap;

use crate::clock::{Millis, Scheduler};
use crate::config::{SessionPolicy, TypingConfig};
use crate::output::{OutputBuffer, RenderTarget};
use crate::sequencer::{Action, RenderSession};

/// Identifies one render session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

#[derive(Debug, Default)]
struct SessionSeq {
    next: u64,
}

impl SessionSeq {
    fn next_id(&mut self) -> SessionId {
        let id = SessionId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WakeKind {
    /// Process the next line.
    Step,
    /// Place the next character.
    Tick,
}

/// Timer payload: every timer belongs to exactly one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wake {
    session: SessionId,
    kind: WakeKind,
}

/// Observable engine progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    SessionStarted(SessionId),
    LineCompleted { session: SessionId, line: usize },
    SessionFinished(SessionId),
    SessionCancelled(SessionId),
    /// The output was cleared by an empty payload.
    Cleared,
}

/// Drives typing animations into a render target.
#[derive(Debug)]
pub struct RenderEngine<T: RenderTarget = OutputBuffer> {
    target: T,
    scheduler: Scheduler<Wake>,
    sessions: BTreeMap<SessionId, RenderSession>,
    seq: SessionSeq,
    typing: TypingConfig,
    policy: SessionPolicy,
    events: Vec<EngineEvent>,
}

impl Default for RenderEngine<OutputBuffer> {
    fn default() -> Self {
        Self::new(
            OutputBuffer::new(),
            TypingConfig::default(),
            SessionPolicy::default(),
        )
    }
}

impl<T: RenderTarget> RenderEngine<T> {
    pub fn new(target: T, typing: TypingConfig, policy: SessionPolicy) -> Self {
        Self {
            target,
            scheduler: Scheduler::new(),
            sessions: BTreeMap::new(),
            seq: SessionSeq::default(),
            typing,
            policy,
            events: Vec::new(),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn typing(&self) -> TypingConfig {
        self.typing
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// True while any session is still typing or waiting for its next line.
    pub fn is_animating(&self) -> bool {
        !self.sessions.is_empty()
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Virtual time of the next pending wake.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Starts animating `payload`.
    ///
    /// An empty or whitespace-only payload runs no animation and clears the
    /// whole output instead; `None` is returned in that case.
    pub fn render(&mut self, payload: &str) -> Option<SessionId> {
        if self.policy == SessionPolicy::Cancel {
            self.cancel_all();
        }

        if payload.trim().is_empty() {
            self.target.clear();
            self.events.push(EngineEvent::Cleared);
            tracing::debug!("output cleared");
            return None;
        }

        let id = self.seq.next_id();
        let mut session = RenderSession::new(payload, self.typing);
        tracing::debug!(
            session = id.0,
            lines = session.line_count(),
            "render session started"
        );
        self.events.push(EngineEvent::SessionStarted(id));
        let actions = session.start(&mut self.target);
        self.sessions.insert(id, session);
        self.apply(id, actions);
        Some(id)
    }

    /// Cancels one session. Its typed output stays; its timers are dropped.
    pub fn cancel(&mut self, id: SessionId) -> bool {
        let Some(mut session) = self.sessions.remove(&id) else {
            return false;
        };
        session.cancel();
        let dropped = self.scheduler.cancel_where(|wake| wake.session == id);
        tracing::debug!(session = id.0, timers = dropped, "render session cancelled");
        self.events.push(EngineEvent::SessionCancelled(id));
        true
    }

    /// Cancels every live session.
    pub fn cancel_all(&mut self) {
        let ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    /// Fires every wake due at or before `now`, in due order.
    pub fn advance_to(&mut self, now: Millis) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            let Wake { session: id, kind } = fired.payload;
            let Some(session) = self.sessions.get_mut(&id) else {
                // Stale timer of a finished session.
                self.scheduler.cancel(fired.id);
                continue;
            };
            let actions = match kind {
                WakeKind::Step => session.step(&mut self.target),
                WakeKind::Tick => session.tick(&mut self.target),
            };
            self.apply(id, actions);
        }
    }

    /// Advances the clock by `delta` ms.
    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.scheduler.now().saturating_add(delta));
    }

    /// Runs every live session to completion, jumping the clock forward.
    pub fn finish_all(&mut self) {
        while self.is_animating() {
            let Some(due) = self.scheduler.next_due() else {
                break;
            };
            self.advance_to(due);
        }
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn apply(&mut self, id: SessionId, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::StepAfter(delay) => {
                    self.scheduler.schedule_once(
                        delay,
                        Wake {
                            session: id,
                            kind: WakeKind::Step,
                        },
                    );
                }
                Action::StartTicking(interval) => {
                    self.scheduler.schedule_every(
                        interval,
                        Wake {
                            session: id,
                            kind: WakeKind::Tick,
                        },
                    );
                }
                Action::StopTicking => {
                    self.scheduler
                        .cancel_where(|wake| wake.session == id && wake.kind == WakeKind::Tick);
                }
                Action::LineCompleted(line) => {
                    self.events
                        .push(EngineEvent::LineCompleted { session: id, line });
                }
                Action::Finished => {
                    self.sessions.remove(&id);
                    self.scheduler.cancel_where(|wake| wake.session == id);
                    tracing::debug!(session = id.0, "render session finished");
                    self.events.push(EngineEvent::SessionFinished(id));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Child, LineRef};

    fn engine(policy: SessionPolicy) -> RenderEngine {
        RenderEngine::new(OutputBuffer::new(), TypingConfig::default(), policy)
    }

    fn line_text(engine: &RenderEngine, id: usize, line: usize) -> String {
        let Some(Child::Block(block)) = engine.target().children().get(id) else {
            panic!("no block at {id}");
        };
        engine
            .target()
            .line(LineRef {
                block: block.id,
                line,
            })
            .map(|l| l.text())
            .unwrap_or_default()
    }

    #[test]
    fn test_first_line_starts_immediately_and_types_on_ticks() {
        let mut engine = engine(SessionPolicy::Cancel);
        engine.render("hi");

        assert_eq!(line_text(&engine, 0, 0), "");
        engine.advance_to(15);
        assert_eq!(line_text(&engine, 0, 0), "h");
        engine.advance_to(30);
        assert_eq!(line_text(&engine, 0, 0), "hi");
        assert!(engine.is_animating());
    }

    #[test]
    fn test_line_timing_follows_delays() {
        let mut engine = engine(SessionPolicy::Cancel);
        let id = engine.render("ab\n\ncd").unwrap();

        // "ab": ticks at 15 and 30, completion at 45, next step at 125.
        engine.advance_to(45);
        engine.drain_events();
        engine.advance_to(124);
        assert!(engine.drain_events().is_empty());
        engine.advance_to(125);
        // The blank line completes immediately on its step.
        assert_eq!(
            engine.drain_events(),
            vec![EngineEvent::LineCompleted { session: id, line: 1 }]
        );
        // "cd" starts at 175 and its first char lands at 190.
        engine.advance_to(189);
        assert_eq!(line_text(&engine, 0, 2), "");
        engine.advance_to(190);
        assert_eq!(line_text(&engine, 0, 2), "c");
    }

    #[test]
    fn test_line_complete_events_match_line_count() {
        let mut engine = engine(SessionPolicy::Cancel);
        let id = engine.render("one\n\nhttps://x.io\n  • four").unwrap();
        engine.finish_all();

        let events = engine.drain_events();
        let completed: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::LineCompleted { session, line } if *session == id => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(completed, vec![0, 1, 2, 3]);
        assert_eq!(events.last(), Some(&EngineEvent::SessionFinished(id)));
        assert!(!engine.is_animating());
        assert_eq!(engine.next_deadline(), None);
    }

    #[test]
    fn test_empty_payload_clears_everything() {
        let mut engine = engine(SessionPolicy::Cancel);
        engine.target_mut().echo("$", "about");
        engine.render("text");
        engine.finish_all();
        assert!(!engine.target().is_empty());

        assert_eq!(engine.render(""), None);
        assert!(engine.target().is_empty());
        assert_eq!(engine.render("  \n\t"), None);
        assert!(engine.target().is_empty());
    }

    #[test]
    fn test_cancel_policy_stops_previous_session() {
        let mut engine = engine(SessionPolicy::Cancel);
        let first = engine.render("aaaa").unwrap();
        engine.advance_to(15);
        let second = engine.render("bb").unwrap();

        assert!(
            engine
                .drain_events()
                .contains(&EngineEvent::SessionCancelled(first))
        );
        engine.finish_all();
        assert_eq!(line_text(&engine, 0, 0), "a");
        assert_eq!(line_text(&engine, 1, 0), "bb");
        assert!(
            engine
                .drain_events()
                .contains(&EngineEvent::SessionFinished(second))
        );
    }

    #[test]
    fn test_overlap_policy_keeps_both_sessions_typing() {
        let mut engine = engine(SessionPolicy::Overlap);
        engine.render("aaaa").unwrap();
        engine.advance_to(15);
        engine.render("bb").unwrap();
        assert_eq!(engine.active_sessions(), 2);

        engine.finish_all();
        assert_eq!(line_text(&engine, 0, 0), "aaaa");
        assert_eq!(line_text(&engine, 1, 0), "bb");
    }

    #[test]
    fn test_overlap_writes_after_clear_are_dropped() {
        let mut engine = engine(SessionPolicy::Overlap);
        engine.render("first line\nsecond line").unwrap();
        engine.advance_to(30);
        engine.render("");
        engine.finish_all();

        assert!(engine.target().is_empty());
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_unique_session_ids() {
        let mut engine = engine(SessionPolicy::Overlap);
        let a = engine.render("a").unwrap();
        let b = engine.render("b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_advance_by_moves_clock() {
        let mut engine = engine(SessionPolicy::Cancel);
        engine.advance_by(100);
        engine.advance_by(50);
        assert_eq!(engine.now(), 150);
    }
}
