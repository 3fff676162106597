//! Avatar movement along the adventure path.
//!
//! The animator is a tick-driven state machine: transitions enqueue timed moves,
//! and `tick(now_ms)` applies every move whose deadline has passed. Each move
//! carries the generation it was scheduled under; starting a new transition bumps
//! the generation so stale moves from an earlier chain are dropped instead of
//! interleaving with the new one.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{DEFAULT_AGENT_POSITION, TimingConfig};
use crate::layout::PathPosition;

/// Millisecond time source (`performance.now()` in the browser).
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub position: PathPosition,
    pub current_level_index: usize,
    pub is_moving: bool,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            position: DEFAULT_AGENT_POSITION,
            current_level_index: 0,
            is_moving: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScheduledMove {
    due_ms: f64,
    generation: u64,
    position: PathPosition,
    level_index: usize,
    /// Last move of its chain: the agent comes to rest.
    settle: bool,
}

#[derive(Debug)]
pub struct Animator {
    agent: AgentState,
    timing: TimingConfig,
    fallback: PathPosition,
    generation: u64,
    pending: Vec<ScheduledMove>,
}

impl Animator {
    pub fn new(timing: TimingConfig, fallback: PathPosition) -> Self {
        Self {
            agent: AgentState {
                position: fallback,
                ..AgentState::default()
            },
            timing,
            fallback,
            generation: 0,
            pending: Vec::new(),
        }
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, for hosts that schedule their own wakeups.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.iter().map(|m| m.due_ms).reduce(f64::min)
    }

    fn start_chain(&mut self) -> u64 {
        self.generation += 1;
        if !self.pending.is_empty() {
            debug!(dropped = self.pending.len(), "cancelling in-flight animation chain");
        }
        self.pending.clear();
        self.generation
    }

    /// Walks the agent from the start of the path up to `target`, one waypoint
    /// every `replay_step_ms`. A zero target or an empty path snaps instantly.
    /// The last waypoint is `target` itself, where the agent comes to rest.
    pub fn replay(&mut self, target: usize, positions: &[PathPosition], now_ms: f64) {
        let generation = self.start_chain();
        let target = target.min(positions.len().saturating_sub(1));
        if target == 0 {
            self.agent = AgentState {
                position: positions.first().copied().unwrap_or(self.fallback),
                current_level_index: 0,
                is_moving: false,
            };
            debug!(agent = ?self.agent, "replay snapped to path start");
            return;
        }
        self.agent.is_moving = true;
        for (step, position) in positions[..=target].iter().enumerate() {
            self.pending.push(ScheduledMove {
                due_ms: now_ms + step as f64 * self.timing.replay_step_ms,
                generation,
                position: *position,
                level_index: step,
                settle: step == target,
            });
        }
        debug!(target, generation, "replay scheduled");
        self.tick(now_ms);
    }

    /// Single hop to the level matching `completed_levels`, after
    /// `advance_delay_ms`. Returns whether a hop was scheduled.
    pub fn advance(
        &mut self,
        completed_levels: usize,
        level_count: usize,
        positions: &[PathPosition],
        now_ms: f64,
    ) -> bool {
        let target = completed_levels.min(level_count.saturating_sub(1));
        if target == self.agent.current_level_index || target >= positions.len() {
            trace!(target, current = self.agent.current_level_index, "advance not needed");
            return false;
        }
        let generation = self.start_chain();
        self.agent.is_moving = true;
        self.pending.push(ScheduledMove {
            due_ms: now_ms + self.timing.advance_delay_ms,
            generation,
            position: positions[target],
            level_index: target,
            settle: true,
        });
        debug!(from = self.agent.current_level_index, to = target, generation, "advance scheduled");
        true
    }

    /// Applies due moves in deadline order. Returns whether the agent changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut due: Vec<ScheduledMove> = Vec::new();
        self.pending.retain(|m| {
            if m.due_ms <= now_ms {
                due.push(*m);
                false
            } else {
                true
            }
        });
        if due.is_empty() {
            return false;
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        let (before, current) = (self.agent, self.generation);
        for mv in due.into_iter().filter(|m| m.generation == current) {
            self.agent.position = mv.position;
            self.agent.current_level_index = mv.level_index;
            if mv.settle {
                self.agent.is_moving = false;
            }
        }
        self.agent != before
    }
}
