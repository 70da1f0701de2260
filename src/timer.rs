//! Repeating timers for gravity
//!
//! The game never sleeps or spawns threads itself. It asks a [`Scheduler`]
//! for a repeating timer and gets back a [`TimerHandle`]; the host loop
//! delivers fired handles back to the game.

use std::time::{Duration, Instant};

/// Identifies one scheduled repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub trait Scheduler {
    /// Start a timer that fires every `interval` until cancelled
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;
    /// Stop a timer. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct Repeating {
    handle: TimerHandle,
    interval: Duration,
    next_fire: Instant,
}

/// Wall-clock scheduler driven by polling from the frame loop
#[derive(Debug, Default)]
pub struct IntervalTimer {
    next_id: u64,
    timers: Vec<Repeating>,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles of every timer due at `now`. Each fires at most once per call
    /// and is re-armed one interval after `now`, so a stalled frame never
    /// produces a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if now >= timer.next_fire {
                timer.next_fire = now + timer.interval;
                fired.push(timer.handle);
            }
        }
        fired
    }

    /// Earliest upcoming fire time, if any timer is active
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.next_fire).min()
    }

    fn schedule_at(&mut self, now: Instant, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.push(Repeating {
            handle,
            interval,
            next_fire: now + interval,
        });
        handle
    }
}

impl Scheduler for IntervalTimer {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.schedule_at(Instant::now(), interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}
