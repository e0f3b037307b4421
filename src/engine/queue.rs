// src/engine/queue.rs

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::TriggerReason;
use crate::types::TriggerWhileRunningBehaviour;

/// Triggers that arrived while a build was running.
///
/// Every rebuild compiles the whole tree from its current state, so queued
/// entries carry no payload beyond their reason. With `max_pending = 1`
/// (the default) a burst of changes during a build yields exactly one
/// follow-up build.
#[derive(Debug)]
pub struct TriggerQueue {
    behaviour: TriggerWhileRunningBehaviour,
    max_pending: usize,
    pending: VecDeque<TriggerReason>,
}

impl TriggerQueue {
    /// Create a new queue with the given behaviour and maximum pending reruns.
    ///
    /// `max_pending` is clamped to at least 1.
    pub fn new(behaviour: TriggerWhileRunningBehaviour, max_pending: usize) -> Self {
        Self {
            behaviour,
            max_pending: max_pending.max(1),
            pending: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Record a trigger that arrived mid-build. Returns whether it was kept.
    ///
    /// - `Queue`: append; past `max_pending`, the oldest entries are dropped.
    /// - `Drop`: discard.
    pub fn record_trigger(&mut self, reason: TriggerReason) -> bool {
        match self.behaviour {
            TriggerWhileRunningBehaviour::Queue => {
                self.pending.push_back(reason);
                if self.pending.len() > self.max_pending {
                    warn!(
                        pending = self.pending.len(),
                        max_pending = self.max_pending,
                        "too many queued rebuilds; dropping oldest"
                    );
                    while self.pending.len() > self.max_pending {
                        self.pending.pop_front();
                    }
                } else {
                    debug!(?reason, pending = self.pending.len(), "queued rebuild");
                }
                true
            }
            TriggerWhileRunningBehaviour::Drop => {
                debug!(?reason, "build in progress; dropping trigger (drop mode)");
                false
            }
        }
    }

    /// Pop the next rebuild to start, oldest first.
    pub fn take_next(&mut self) -> Option<TriggerReason> {
        self.pending.pop_front()
    }

    /// Forget everything queued (used on shutdown).
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
