//! Deferred tasks on a virtual clock
//!
//! Each task lives in a named slot holding at most one deadline, so callbacks
//! are replaced rather than stacked.

/// Named deferred tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSlot {
    /// Settle all eyes after a drop animation
    Render,
    /// Build the next level after a win
    LevelAdvance,
    /// Next countdown decrement
    CountdownTick,
}

impl TaskSlot {
    /// All slots, in tie-break order
    pub const ALL: [TaskSlot; 3] = [TaskSlot::Render, TaskSlot::LevelAdvance, TaskSlot::CountdownTick];

    fn index(self) -> usize {
        self as usize
    }
}

/// Millisecond clock plus one optional deadline per slot
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    deadlines: [Option<u64>; 3],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `slot` to fire `delay_ms` from now, replacing any pending deadline
    pub fn schedule(&mut self, slot: TaskSlot, delay_ms: u64) {
        self.deadlines[slot.index()] = Some(self.now_ms + delay_ms);
    }

    pub fn cancel(&mut self, slot: TaskSlot) {
        self.deadlines[slot.index()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.deadlines = [None; 3];
    }

    pub fn is_pending(&self, slot: TaskSlot) -> bool {
        self.deadlines[slot.index()].is_some()
    }

    pub fn deadline(&self, slot: TaskSlot) -> Option<u64> {
        self.deadlines[slot.index()]
    }

    /// Pop the earliest task due at or before `until`
    ///
    /// The clock moves to that task's deadline so anything it reschedules is
    /// measured from when it was due, not from the end of the frame.
    pub fn pop_due(&mut self, until: u64) -> Option<TaskSlot> {
        let (slot, deadline) = TaskSlot::ALL
            .iter()
            .filter_map(|&slot| self.deadline(slot).map(|d| (slot, d)))
            .filter(|&(_, d)| d <= until)
            .min_by_key(|&(slot, d)| (d, slot.index()))?;

        self.deadlines[slot.index()] = None;
        self.now_ms = self.now_ms.max(deadline);
        Some(slot)
    }

    /// Move the clock forward to `until` (never backward)
    pub fn advance_to(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending() {
        let mut s = Scheduler::new();
        s.schedule(TaskSlot::Render, 150);
        s.schedule(TaskSlot::Render, 0);
        assert_eq!(s.deadline(TaskSlot::Render), Some(0));

        assert_eq!(s.pop_due(0), Some(TaskSlot::Render));
        assert_eq!(s.pop_due(1000), None);
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(TaskSlot::CountdownTick, 100);
        s.schedule(TaskSlot::LevelAdvance, 800);
        s.schedule(TaskSlot::Render, 150);

        assert_eq!(s.pop_due(500), Some(TaskSlot::CountdownTick));
        assert_eq!(s.now(), 100);
        assert_eq!(s.pop_due(500), Some(TaskSlot::Render));
        assert_eq!(s.now(), 150);
        assert_eq!(s.pop_due(500), None);

        s.advance_to(500);
        assert_eq!(s.now(), 500);
        assert!(s.is_pending(TaskSlot::LevelAdvance));
    }

    #[test]
    fn test_ties_break_by_slot() {
        let mut s = Scheduler::new();
        s.schedule(TaskSlot::CountdownTick, 100);
        s.schedule(TaskSlot::Render, 100);
        assert_eq!(s.pop_due(100), Some(TaskSlot::Render));
        assert_eq!(s.pop_due(100), Some(TaskSlot::CountdownTick));
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        for slot in TaskSlot::ALL {
            s.schedule(slot, 10);
        }
        s.cancel(TaskSlot::Render);
        assert!(!s.is_pending(TaskSlot::Render));
        s.cancel_all();
        assert!(TaskSlot::ALL.iter().all(|&slot| !s.is_pending(slot)));
    }
}
