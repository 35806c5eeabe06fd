//! Session leaderboard
//!
//! Keeps the best finished runs in memory, top 10. Nothing is written to
//! disk; a new process starts with an empty board.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_ENTRIES: usize = 10;

/// Points per second survived
pub const POINTS_PER_SECOND: f32 = 10.0;

/// Score for a run that lasted `elapsed` seconds
pub fn score_for(elapsed: f32) -> u64 {
    let points = (crate::sanitize_dt(elapsed) * POINTS_PER_SECOND).floor();
    points as u64
}

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u64,
    /// Seconds survived
    pub elapsed: f32,
    /// RNG seed the run was played with
    pub seed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScores {
    pub entries: Vec<RunRecord>,
}

impl SessionScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Slot a score would be inserted at, None if it falls off the board.
    ///
    /// Ties go after existing entries, so earlier runs keep their place.
    fn insertion_slot(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_ENTRIES).then_some(slot)
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.insertion_slot(score).is_some()
    }

    /// Rank a score would get (1-indexed)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.insertion_slot(score).map(|slot| slot + 1)
    }

    /// Record a finished run. Returns its rank, if it made the board.
    pub fn add_run(&mut self, elapsed: f32, seed: u64) -> Option<usize> {
        let score = score_for(elapsed);
        let slot = self.insertion_slot(score)?;
        self.entries.insert(slot, RunRecord { score, elapsed, seed });
        self.entries.truncate(MAX_ENTRIES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }
}
