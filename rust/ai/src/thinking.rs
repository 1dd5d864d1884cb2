//! Artificial latency before an opponent answers.
//!
//! Purely presentational: the decision is made first and returned after the
//! sleep, and nothing is ever cancelled.

use std::time::Duration;

use headsup_engine::player::{PlayerAction, Seat};
use headsup_engine::snapshot::TableSnapshot;
use rand::Rng;

use crate::AIOpponent;

/// Uniform delay range; `min == max` gives a fixed pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    pub min: Duration,
    pub max: Duration,
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1_000),
            max: Duration::from_millis(2_500),
        }
    }
}

impl ThinkingDelay {
    /// Answer immediately.
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn fixed(d: Duration) -> Self {
        Self { min: d, max: d }
    }

    /// `base_ms` to `base_ms * 2.5`, the default shape scaled.
    pub fn from_millis(base_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(base_ms),
            max: Duration::from_millis(base_ms.saturating_mul(5) / 2),
        }
    }

    pub fn is_none(&self) -> bool {
        self.max.is_zero()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.random_range(lo..=hi))
    }
}

/// Decides, then waits out a sampled delay before handing the action back.
pub async fn decide_with_delay<A, R>(
    ai: &mut A,
    snapshot: &TableSnapshot,
    seat: Seat,
    delay: &ThinkingDelay,
    rng: &mut R,
) -> PlayerAction
where
    A: AIOpponent + ?Sized,
    R: Rng + ?Sized,
{
    let action = ai.decide(snapshot, seat);
    let pause = delay.sample(rng);
    if !pause.is_zero() {
        tracing::trace!(?pause, "opponent thinking");
        tokio::time::sleep(pause).await;
    }
    action
}
