//=========================================================================
// Scheduler
//=========================================================================
//
// Deferred, cancelable callbacks on a virtual clock.
//
// Architecture:
//   schedule(owner, delay) → TimerHandle
//        ↓
//   BinaryHeap<(due, handle)> + HashMap<handle, owner>   (live entries)
//        ↓
//   advance(delta) → pop_due() → Expired { handle, owner }
//
// Cancellation removes the live entry; stale heap entries are skipped when
// popped. Every timer belongs to an entity so the scene can cancel all of an
// entity's pending work when it is destroyed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::world::EntityId;

//=== TimerHandle =========================================================

/// Identifies one scheduled callback. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

//=== Expired =============================================================

/// A timer whose due time has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired {
    pub handle: TimerHandle,
    pub owner: EntityId,
}

//=== Scheduler ===========================================================

/// Virtual-time timer queue owned by a scene.
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    queue: BinaryHeap<Reverse<(Duration, TimerHandle)>>,
    live: HashMap<TimerHandle, EntityId>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 0,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Schedules a callback for `owner` once `delay` has elapsed.
    pub fn schedule(&mut self, owner: EntityId, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let due = self.now.saturating_add(delay);
        self.queue.push(Reverse((due, handle)));
        self.live.insert(handle, owner);

        debug!("Scheduled {:?} for entity {} at {:?}", handle, owner, due);
        handle
    }

    /// Cancels a pending callback. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let cancelled = self.live.remove(&handle).is_some();
        if cancelled {
            debug!("Cancelled {:?}", handle);
        }
        cancelled
    }

    /// Cancels every pending callback owned by `owner`, returning how many were dropped.
    pub fn cancel_owned_by(&mut self, owner: EntityId) -> usize {
        let before = self.live.len();
        self.live.retain(|_, entry_owner| *entry_owner != owner);
        let cancelled = before - self.live.len();

        if cancelled > 0 {
            debug!("Cancelled {} timer(s) owned by entity {}", cancelled, owner);
        }
        cancelled
    }

    //--- Clock ------------------------------------------------------------

    /// Moves the clock forward. Due callbacks are collected with [`pop_due`](Self::pop_due).
    pub fn advance(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }

    /// Pops the earliest callback whose due time has been reached.
    ///
    /// Callbacks due at the same instant come out in scheduling order.
    pub fn pop_due(&mut self) -> Option<Expired> {
        self.pop_due_before(TimerHandle(u64::MAX))
    }

    /// Handle the next `schedule` call will return.
    ///
    /// Every callback scheduled from now on compares greater or equal.
    pub fn horizon(&self) -> TimerHandle {
        TimerHandle(self.next_handle)
    }

    /// Like [`pop_due`](Self::pop_due), but only for callbacks scheduled
    /// before `bound` (see [`horizon`](Self::horizon)).
    ///
    /// Callbacks scheduled while draining are left for a later drain, so a
    /// callback that reschedules itself with no delay cannot loop forever.
    pub fn pop_due_before(&mut self, bound: TimerHandle) -> Option<Expired> {
        while let Some(Reverse((due, handle))) = self.queue.peek().copied() {
            // Newer entries are due no earlier than older due ones and win
            // ties by handle, so the first one seen ends the drain.
            if due > self.now || handle >= bound {
                return None;
            }
            self.queue.pop();

            if let Some(owner) = self.live.remove(&handle) {
                return Some(Expired { handle, owner });
            }
        }
        None
    }

    //--- Queries ----------------------------------------------------------

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.live.len()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::World;
    use glam::Vec3;

    fn two_owners() -> (EntityId, EntityId) {
        let mut world = World::new();
        (world.spawn("A", Vec3::ZERO), world.spawn("B", Vec3::ZERO))
    }

    fn drain(scheduler: &mut Scheduler) -> Vec<Expired> {
        std::iter::from_fn(|| scheduler.pop_due()).collect()
    }

    #[test]
    fn nothing_due_before_delay() {
        let (a, _) = two_owners();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(a, Duration::from_secs(3));

        scheduler.advance(Duration::from_millis(2999));
        assert!(scheduler.pop_due().is_none());
        assert!(scheduler.is_pending(handle));
    }

    #[test]
    fn fires_once_at_due_time() {
        let (a, _) = two_owners();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(a, Duration::from_secs(1));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(scheduler.pop_due(), Some(Expired { handle, owner: a }));
        assert!(scheduler.pop_due().is_none());
        assert!(!scheduler.is_pending(handle));

        scheduler.advance(Duration::from_secs(10));
        assert!(scheduler.pop_due().is_none());
    }

    #[test]
    fn due_in_time_then_schedule_order() {
        let (a, b) = two_owners();
        let mut scheduler = Scheduler::new();
        let late = scheduler.schedule(a, Duration::from_secs(2));
        let first = scheduler.schedule(b, Duration::from_secs(1));
        let second = scheduler.schedule(a, Duration::from_secs(1));

        scheduler.advance(Duration::from_secs(5));
        let handles: Vec<_> = drain(&mut scheduler).into_iter().map(|e| e.handle).collect();

        assert_eq!(handles, vec![first, second, late]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let (a, _) = two_owners();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(a, Duration::from_secs(1));

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));

        scheduler.advance(Duration::from_secs(2));
        assert!(scheduler.pop_due().is_none());
    }

    #[test]
    fn cancel_owned_by_only_touches_owner() {
        let (a, b) = two_owners();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(a, Duration::from_secs(1));
        scheduler.schedule(a, Duration::from_secs(2));
        let kept = scheduler.schedule(b, Duration::from_secs(1));

        assert_eq!(scheduler.cancel_owned_by(a), 2);
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.advance(Duration::from_secs(3));
        assert_eq!(drain(&mut scheduler), vec![Expired { handle: kept, owner: b }]);
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let (a, _) = two_owners();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(a, Duration::ZERO);

        assert_eq!(scheduler.pop_due().map(|e| e.handle), Some(handle));
    }

    #[test]
    fn delay_is_relative_to_current_clock() {
        let (a, _) = two_owners();
        let mut scheduler = Scheduler::new();
        scheduler.advance(Duration::from_secs(10));
        scheduler.schedule(a, Duration::from_secs(1));

        scheduler.advance(Duration::from_millis(500));
        assert!(scheduler.pop_due().is_none());

        scheduler.advance(Duration::from_millis(500));
        assert!(scheduler.pop_due().is_some());
        assert_eq!(scheduler.now(), Duration::from_secs(11));
    }

    #[test]
    fn drain_before_horizon_skips_newer_timers() {
        let (a, b) = two_owners();
        let mut scheduler = Scheduler::new();
        let old = scheduler.schedule(a, Duration::ZERO);
        let horizon = scheduler.horizon();

        let newer = scheduler.schedule(b, Duration::ZERO);
        assert_eq!(
            scheduler.pop_due_before(horizon),
            Some(Expired { handle: old, owner: a })
        );
        assert!(scheduler.pop_due_before(horizon).is_none());
        assert!(scheduler.is_pending(newer));

        assert_eq!(scheduler.pop_due().map(|e| e.handle), Some(newer));
    }
}
