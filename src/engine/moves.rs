//! Dance move catalog and the lazily refilled move queue.
//!
//! The queue never runs dry: whenever fewer than [`REFILL_BELOW`] moves remain
//! after a pop, a fresh run of [`RUN_LENGTH`] uniformly random moves is
//! appended. Repeats are allowed. Randomness comes from any [`Rng`] so tests can
//! pass a seeded generator and get a reproducible sequence.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub const RUN_LENGTH: usize = 8;
pub const REFILL_BELOW: usize = 3;
/// Number of upcoming moves shown next to the current one.
pub const PREVIEW_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MoveKind {
    Deploy,
    Sync,
    Launch,
}

/// Display data for a move (immutable catalog entry).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MoveInfo {
    /// Same tag the move serializes to in snapshots.
    pub key: &'static str,
    pub label: &'static str,
    pub action: &'static str,
    pub animation: &'static str,
    pub color: &'static str,
    pub glyph: &'static str,
}

impl MoveKind {
    pub const ALL: [MoveKind; 3] = [MoveKind::Deploy, MoveKind::Sync, MoveKind::Launch];

    pub fn info(self) -> MoveInfo {
        match self {
            MoveKind::Deploy => MoveInfo {
                key: "deploy",
                label: "Deploy",
                action: "Spin",
                animation: "dance-spin",
                color: "from-purple-500 to-pink-500",
                glyph: "🌀",
            },
            MoveKind::Sync => MoveInfo {
                key: "sync",
                label: "Sync Node",
                action: "Slide",
                animation: "dance-slide",
                color: "from-blue-500 to-cyan-500",
                glyph: "↔️",
            },
            MoveKind::Launch => MoveInfo {
                key: "launch",
                label: "Launch RPC",
                action: "Jump",
                animation: "dance-jump",
                color: "from-green-500 to-emerald-500",
                glyph: "⬆️",
            },
        }
    }
}

pub struct MoveSequencer<R = SmallRng> {
    queue: VecDeque<MoveKind>,
    rng: R,
}

impl MoveSequencer<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MoveSequencer<R> {
    /// Empty until [`reset`](Self::reset) generates the first run.
    pub fn new(rng: R) -> Self {
        Self { queue: VecDeque::with_capacity(RUN_LENGTH + REFILL_BELOW), rng }
    }

    /// Drop the queue and start over with a single fresh run.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.refill();
    }

    pub fn generate_run(&mut self) -> Vec<MoveKind> {
        (0..RUN_LENGTH).map(|_| MoveKind::ALL[self.rng.gen_range(0..MoveKind::ALL.len())]).collect()
    }

    fn refill(&mut self) {
        let run = self.generate_run();
        self.queue.extend(run);
    }

    /// Pop the head. Refills when the remainder drops below the threshold.
    pub fn next(&mut self) -> Option<MoveKind> {
        let head = self.queue.pop_front();
        if self.queue.len() < REFILL_BELOW {
            self.refill();
        }
        head
    }

    pub fn current(&self) -> Option<MoveKind> {
        self.queue.front().copied()
    }

    /// Up to `n` moves queued behind the current one. Because the queue only
    /// refills below [`REFILL_BELOW`], this can be one short of `n` right
    /// before a refill.
    pub fn peek(&self, n: usize) -> Vec<MoveKind> {
        self.queue.iter().skip(1).take(n).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
