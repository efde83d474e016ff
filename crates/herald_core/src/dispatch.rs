//! # Dispatch Loop
//!
//! One tick of event delivery, driven by the host scheduler:
//!
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. started = now                                                    │
//! │ 2. while queue non-empty:                                           │
//! │    ├─ budget bounded, ≥1 processed, elapsed > budget → STALL, break │
//! │    ├─ pop front event                                               │
//! │    ├─ snapshot subscribers for its kind                             │
//! │    │    ├─ found   → invoke each in insertion order with &event     │
//! │    │    └─ missing → warn (stale), drop                             │
//! │    └─ elapsed = now - started                                       │
//! │ 3. report dispatched / stale / remaining / elapsed                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A stall is a cooperative pause: the remaining events stay queued and the
//! next tick picks them up. At least one event is always processed per tick
//! so a tiny budget cannot starve the queue.

use std::time::{Duration, Instant};

use crate::config::BusConfig;

/// Upper bound for a bounded per-tick budget.
pub const MAX_TICK_BUDGET: Duration = Duration::from_millis(500);

/// Per-tick wall-clock budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchBudget {
    /// Always drain the queue fully.
    #[default]
    Unlimited,
    /// Stop once this much time has elapsed in the tick.
    Bounded(Duration),
}

impl DispatchBudget {
    /// Returns the limit, if bounded.
    #[inline]
    #[must_use]
    pub const fn limit(self) -> Option<Duration> {
        match self {
            Self::Unlimited => None,
            Self::Bounded(limit) => Some(limit),
        }
    }

    /// Returns `true` if the budget is unlimited.
    #[inline]
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl From<&BusConfig> for DispatchBudget {
    fn from(config: &BusConfig) -> Self {
        match config.time_budget_secs {
            Some(secs) if secs.is_finite() && secs >= 0.0 => {
                Self::Bounded(Duration::from_secs_f32(secs.min(MAX_TICK_BUDGET.as_secs_f32())))
            }
            _ => Self::Unlimited,
        }
    }
}

/// Outcome of delivering a single event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Delivery {
    /// Subscribers were found and invoked.
    Delivered,
    /// The kind lost all subscribers after enqueue; the event was dropped.
    Stale,
}

/// Statistics for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Events delivered to at least one subscriber.
    pub dispatched: u32,
    /// Events dropped because their kind had no subscribers left.
    pub stale: u32,
    /// Events left in the queue when the tick ended.
    pub remaining: usize,
    /// Wall-clock time spent in the tick.
    pub elapsed: Duration,
    /// The tick stopped early on its budget.
    pub stalled: bool,
}

impl TickReport {
    /// Events popped this tick (delivered or stale).
    #[inline]
    #[must_use]
    pub const fn processed(&self) -> u32 {
        self.dispatched + self.stale
    }
}

/// Runs one tick.
///
/// `step` pops and delivers the front event, returning `None` once the queue
/// is empty. `pending` reports the current queue length.
pub(crate) fn run_tick<S, P>(budget: DispatchBudget, mut step: S, pending: P) -> TickReport
where
    S: FnMut() -> Option<Delivery>,
    P: Fn() -> usize,
{
    let started = Instant::now();
    let mut report = TickReport::default();
    let mut elapsed = Duration::ZERO;

    loop {
        if let Some(limit) = budget.limit() {
            if report.processed() > 0 && elapsed > limit {
                let remaining = pending();
                if remaining > 0 {
                    report.stalled = true;
                    tracing::info!(
                        elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
                        budget_us = u64::try_from(limit.as_micros()).unwrap_or(u64::MAX),
                        remaining,
                        "dispatch stalled on tick budget, resuming next tick"
                    );
                }
                break;
            }
        }

        match step() {
            Some(Delivery::Delivered) => report.dispatched += 1,
            Some(Delivery::Stale) => report.stale += 1,
            None => break,
        }

        elapsed = started.elapsed();
    }

    report.elapsed = started.elapsed();
    report.remaining = pending();
    report
}

/// Accumulated dispatch statistics across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Ticks recorded.
    pub ticks: u64,
    /// Total events delivered.
    pub dispatched: u64,
    /// Total stale drops.
    pub stale: u64,
    /// Ticks that stopped on the budget.
    pub stalls: u64,
    /// Slowest tick.
    pub max_tick: Duration,
}

impl DispatchStats {
    /// Records a tick.
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.dispatched += u64::from(report.dispatched);
        self.stale += u64::from(report.stale);
        if report.stalled {
            self.stalls += 1;
        }
        self.max_tick = self.max_tick.max(report.elapsed);
    }

    /// Fraction of ticks that stalled.
    #[must_use]
    pub fn stall_ratio(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.stalls as f64 / self.ticks as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::thread;

    fn fake_queue(len: usize) -> Cell<usize> {
        Cell::new(len)
    }

    #[test]
    fn test_unlimited_drains_everything() {
        let queue = fake_queue(10);
        let report = run_tick(
            DispatchBudget::Unlimited,
            || {
                let n = queue.get();
                if n == 0 {
                    return None;
                }
                queue.set(n - 1);
                Some(Delivery::Delivered)
            },
            || queue.get(),
        );

        assert_eq!(report.dispatched, 10);
        assert_eq!(report.remaining, 0);
        assert!(!report.stalled);
    }

    #[test]
    fn test_stale_counted_separately() {
        let queue = fake_queue(4);
        let report = run_tick(
            DispatchBudget::Unlimited,
            || {
                let n = queue.get();
                if n == 0 {
                    return None;
                }
                queue.set(n - 1);
                Some(if n % 2 == 0 { Delivery::Stale } else { Delivery::Delivered })
            },
            || queue.get(),
        );

        assert_eq!(report.dispatched, 2);
        assert_eq!(report.stale, 2);
        assert_eq!(report.processed(), 4);
    }

    #[test]
    fn test_budget_stalls_after_first_event() {
        let queue = fake_queue(5);
        let report = run_tick(
            DispatchBudget::Bounded(Duration::from_millis(1)),
            || {
                let n = queue.get();
                if n == 0 {
                    return None;
                }
                thread::sleep(Duration::from_millis(3));
                queue.set(n - 1);
                Some(Delivery::Delivered)
            },
            || queue.get(),
        );

        assert_eq!(report.dispatched, 1);
        assert_eq!(report.remaining, 4);
        assert!(report.stalled);
    }

    #[test]
    fn test_zero_budget_still_makes_progress() {
        let queue = fake_queue(3);
        let report = run_tick(
            DispatchBudget::Bounded(Duration::ZERO),
            || {
                let n = queue.get();
                if n == 0 {
                    return None;
                }
                thread::sleep(Duration::from_millis(1));
                queue.set(n - 1);
                Some(Delivery::Delivered)
            },
            || queue.get(),
        );

        assert_eq!(report.dispatched, 1);
        assert_eq!(report.remaining, 2);
    }

    #[test]
    fn test_budget_from_config() {
        assert_eq!(DispatchBudget::from(&BusConfig::default()), DispatchBudget::Unlimited);
        assert_eq!(
            DispatchBudget::from(&BusConfig::bounded(0.25)),
            DispatchBudget::Bounded(Duration::from_secs_f32(0.25))
        );
        assert_eq!(
            DispatchBudget::from(&BusConfig::bounded(3.0)).limit(),
            Some(MAX_TICK_BUDGET)
        );
    }

    #[test]
    fn test_huge_budget_clamps() {
        for secs in [1.0e20, f32::MAX] {
            assert_eq!(
                DispatchBudget::from(&BusConfig::bounded(secs)).limit(),
                Some(MAX_TICK_BUDGET)
            );
        }
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = DispatchStats::default();
        stats.record(&TickReport {
            dispatched: 3,
            stale: 1,
            remaining: 2,
            elapsed: Duration::from_millis(2),
            stalled: true,
        });
        stats.record(&TickReport {
            dispatched: 2,
            elapsed: Duration::from_millis(1),
            ..TickReport::default()
        });

        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.dispatched, 5);
        assert_eq!(stats.stale, 1);
        assert_eq!(stats.stalls, 1);
        assert_eq!(stats.max_tick, Duration::from_millis(2));
        assert!((stats.stall_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
