//! Poll cycle lifecycle.
//!
//! Every scrape runs one cycle: `Idle -> Fetching -> Extracting ->
//! Serializing -> Idle`. The cycle owns its [`Registry`], so nothing survives
//! from one scrape to the next and concurrent scrapes never share state.

use std::fmt;
use std::time::Instant;

use tracing::{debug, trace};

use crate::registry::Registry;

/// Phase of a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Fetching,
    Extracting,
    Serializing,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Fetching => "fetching",
            CyclePhase::Extracting => "extracting",
            CyclePhase::Serializing => "serializing",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State owned by a single poll cycle.
#[derive(Debug)]
pub struct PollCycle {
    name: &'static str,
    phase: CyclePhase,
    started: Instant,
    registry: Registry,
}

impl PollCycle {
    /// Start a new cycle with an empty registry.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            phase: CyclePhase::Idle,
            started: Instant::now(),
            registry: Registry::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Move to `phase`.
    pub fn enter(&mut self, phase: CyclePhase) {
        if self.phase != phase {
            trace!(cycle = self.name, from = %self.phase, to = %phase, "Poll cycle transition");
            self.phase = phase;
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry; marks the cycle as extracting.
    pub fn registry_mut(&mut self) -> &mut Registry {
        self.enter(CyclePhase::Extracting);
        &mut self.registry
    }

    /// Serialize the cycle's output with `render` and return to idle.
    pub fn finish<F>(mut self, render: F) -> String
    where
        F: FnOnce(&Registry) -> String,
    {
        self.enter(CyclePhase::Serializing);
        let output = render(&self.registry);
        self.enter(CyclePhase::Idle);

        debug!(
            cycle = self.name,
            families = self.registry.len(),
            samples = self.registry.sample_count(),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Poll cycle complete"
        );

        output
    }
}
