//! Stream prefetcher: detects monotonically increasing line-aligned access
//! runs and issues bounded-lookahead prefetches.
//!
//! # State machine
//!
//! | From | Condition on read `k` | To | Side effect |
//! |---|---|---|---|
//! | `Idle` | first read | `Training` | `last = k`, `streak = 1` |
//! | `Training` | `k = last + 1` | `Training` if `streak+1 < trigger`, else `Streaming` | increment `streak`; on entry to `Streaming`, issue initial burst |
//! | `Training` | `k ≠ last + 1` | `Training` | `last = k`, `streak = 1` |
//! | `Streaming` | `k = last + 1` | `Streaming` | `last = k`; top up prefetches |
//! | `Streaming` | `k ≠ last + 1` | `Training` | `last = k`, `streak = 1` |
//!
//! The entire state is three integers (a state discriminant, `last`, and
//! `streak`); transitions are equality comparisons. This realises the
//! target sub-2K-gate hardware budget this model stands in for.

use super::Prefetcher;
use crate::common::addr::LineKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Training,
    Streaming,
}

/// A stream prefetcher tracking one ascending access run at a time.
#[derive(Clone, Copy, Debug)]
pub struct StreamPrefetcher {
    state: State,
    last: Option<LineKey>,
    streak: u32,
    /// Consecutive-sequential reads required to arm streaming.
    trigger: u32,
    /// Maximum distance ahead of `last` at which prefetches are proposed.
    lookahead: u64,
}

impl StreamPrefetcher {
    /// Creates a prefetcher with the given `trigger` and `lookahead`
    /// parameters, starting in the `Idle` state.
    #[must_use]
    pub const fn new(trigger: u32, lookahead: u64) -> Self {
        Self {
            state: State::Idle,
            last: None,
            streak: 0,
            trigger,
            lookahead,
        }
    }

    /// Returns `true` if the prefetcher is currently in the `Streaming`
    /// state.
    #[inline]
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.state == State::Streaming
    }

    fn advances_from_last(&self, key: LineKey) -> bool {
        self.last.is_some_and(|last| key.follows(last))
    }

    fn burst(&self, last: LineKey) -> Vec<LineKey> {
        (1..=self.lookahead).map(|i| last.offset(i)).collect()
    }

    fn enter_training(&mut self, key: LineKey) -> Vec<LineKey> {
        self.state = State::Training;
        self.last = Some(key);
        self.streak = 1;
        Vec::new()
    }
}

impl Prefetcher for StreamPrefetcher {
    fn observe(&mut self, key: LineKey) -> Vec<LineKey> {
        match self.state {
            State::Idle => self.enter_training(key),
            State::Training => {
                if self.advances_from_last(key) {
                    let streak = self.streak + 1;
                    self.last = Some(key);
                    self.streak = streak;
                    if streak >= self.trigger {
                        self.state = State::Streaming;
                        self.burst(key)
                    } else {
                        Vec::new()
                    }
                } else {
                    self.enter_training(key)
                }
            }
            State::Streaming => {
                if self.advances_from_last(key) {
                    self.last = Some(key);
                    self.burst(key)
                } else {
                    self.enter_training(key)
                }
            }
        }
    }
}
