//! Per-session state for the video player controller.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ports::PlayerHandle;

/// Where the bounded initialization machine currently stands.
///
/// `Attempting(n)` counts started bind attempts; exhaustion of the
/// attempt budget lands in `GaveUp`, a degraded but non-fatal state in
/// which the embed plays with its native chrome only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    Idle,
    Attempting(u8),
    Ready,
    GaveUp,
}

impl InitPhase {
    pub fn is_attempting(&self) -> bool {
        matches!(self, InitPhase::Attempting(_))
    }

    /// The current attempt number, when one is in flight.
    pub fn attempt(&self) -> Option<u8> {
        match self {
            InitPhase::Attempting(n) => Some(*n),
            _ => None,
        }
    }
}

/// One live binding of embed surface, handle, and timers. The session
/// owns its tasks exclusively; [`PlayerSession::invalidate`] is the
/// only teardown path, so nothing survives it.
pub(crate) struct PlayerSession {
    /// Identity of the current session. Every async continuation
    /// captures the generation it was spawned under and discards
    /// itself when the counter has moved on.
    pub generation: u64,
    pub embed_url: Option<String>,
    pub handle: Option<Arc<dyn PlayerHandle>>,
    /// Cached after the first successful retrieval, 0 until known.
    pub duration_secs: f64,
    pub phase: InitPhase,
    pub poll_task: Option<JoinHandle<()>>,
    pub event_task: Option<JoinHandle<()>>,
    /// Armed timers, init sequences, and deferred clears.
    pub pending: Vec<JoinHandle<()>>,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self {
            generation: 0,
            embed_url: None,
            handle: None,
            duration_secs: 0.0,
            phase: InitPhase::Idle,
            poll_task: None,
            event_task: None,
            pending: Vec::new(),
        }
    }

    /// Tear down everything owned by the current session and invalidate
    /// its identity. Returns the old handle so the caller can issue a
    /// best-effort pause outside the lock.
    pub fn invalidate(&mut self) -> Option<Arc<dyn PlayerHandle>> {
        self.generation = self.generation.wrapping_add(1);
        for task in self.pending.drain(..) {
            task.abort();
        }
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
        if let Some(task) = self.event_task.take() {
            task.abort();
        }
        self.embed_url = None;
        self.duration_secs = 0.0;
        self.phase = InitPhase::Idle;
        self.handle.take()
    }
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("generation", &self.generation)
            .field("embed_url", &self.embed_url)
            .field("has_handle", &self.handle.is_some())
            .field("duration_secs", &self.duration_secs)
            .field("phase", &self.phase)
            .field("polling", &self.poll_task.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_moves_the_generation_and_clears_state() {
        let mut session = PlayerSession::new();
        session.embed_url = Some("https://player.example/video/1".to_string());
        session.duration_secs = 12.0;
        session.phase = InitPhase::Attempting(3);

        let generation = session.generation;
        assert!(session.invalidate().is_none());

        assert_eq!(session.generation, generation + 1);
        assert_eq!(session.embed_url, None);
        assert_eq!(session.duration_secs, 0.0);
        assert_eq!(session.phase, InitPhase::Idle);
    }

    #[test]
    fn attempt_number_is_only_visible_mid_flight() {
        assert_eq!(InitPhase::Attempting(2).attempt(), Some(2));
        assert_eq!(InitPhase::Idle.attempt(), None);
        assert_eq!(InitPhase::Ready.attempt(), None);
        assert!(!InitPhase::GaveUp.is_attempting());
    }
}
