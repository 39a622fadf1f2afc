//! Per-identity reputation record.

use serde::Serialize;

use super::tier::ReputationTier;
use crate::domain::{Identity, Timestamp};

/// Score plus rolling task window for one identity.
///
/// The tier is never stored; [`tier`](Self::tier) derives it from the
/// current score on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationRecord {
    score: u32,
    tasks_in_window: u32,
    window_started: Timestamp,
    registered_at: Timestamp,
}

impl ReputationRecord {
    /// Fresh record at `score`, window opening at `now`.
    pub fn new(score: u32, now: Timestamp) -> Self {
        Self {
            score,
            tasks_in_window: 0,
            window_started: now,
            registered_at: now,
        }
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tier derived from the current score.
    pub fn tier(&self) -> ReputationTier {
        ReputationTier::from_score(self.score)
    }

    /// When the record was created.
    pub fn registered_at(&self) -> Timestamp {
        self.registered_at
    }

    /// Add `amount`, clamped at `max_score`.
    pub fn increase(&mut self, amount: u32, max_score: u32) -> u32 {
        self.score = self.score.saturating_add(amount).min(max_score);
        self.score
    }

    /// Subtract `amount`, clamped at zero.
    pub fn decrease(&mut self, amount: u32) -> u32 {
        self.score = self.score.saturating_sub(amount);
        self.score
    }

    /// Tasks counted in the window containing `now`.
    pub fn tasks_in_window(&self, now: Timestamp, window_secs: u64) -> u32 {
        if self.window_expired(now, window_secs) {
            0
        } else {
            self.tasks_in_window
        }
    }

    /// Count one accepted task, opening a new window if the old one lapsed.
    pub fn record_task(&mut self, now: Timestamp, window_secs: u64) -> u32 {
        if self.window_expired(now, window_secs) {
            self.window_started = now;
            self.tasks_in_window = 0;
        }
        self.tasks_in_window = self.tasks_in_window.saturating_add(1);
        self.tasks_in_window
    }

    fn window_expired(&self, now: Timestamp, window_secs: u64) -> bool {
        now.secs_since(self.window_started) >= window_secs
    }
}

/// Read-only view of a record for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReputationSnapshot {
    pub identity: Identity,
    pub score: u32,
    pub tier: ReputationTier,
    pub tasks_in_window: u32,
}

/// Outcome reported by the task-execution subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    /// Task completed correctly
    Success,
    /// Task failed or timed out
    Failure,
    /// Peer misbehaved (forged result, protocol abuse)
    Malicious,
}
