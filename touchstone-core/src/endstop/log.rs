//! Trigger event log
//!
//! Fixed-capacity FIFO of switch hits. The step interrupt pushes, the main
//! context reports and acknowledges later. Acknowledgement is strictly in
//! order: only the oldest event can be popped.

use heapless::{Deque, Vec};

use super::error::EndstopError;
use super::switch::SwitchId;

/// Default number of hits the log holds
pub const DEFAULT_LOG_CAPACITY: usize = 10;

/// One recorded switch hit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerEvent {
    /// Switch that triggered
    pub switch: SwitchId,
    /// Compensated axis position at the step that triggered it
    pub position: f64,
}

/// Bounded FIFO of unreported hits
#[derive(Debug)]
pub struct TriggerEventLog<const CAP: usize = DEFAULT_LOG_CAPACITY> {
    events: Deque<TriggerEvent, CAP>,
    /// Hits lost because the log was full
    dropped: u32,
}

impl<const CAP: usize> Default for TriggerEventLog<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> TriggerEventLog<CAP> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Record a hit
    ///
    /// Never blocks. When the log is full the new hit is dropped, counted and
    /// a warning is emitted; returns `false` in that case.
    pub fn push(&mut self, switch: SwitchId, position: f64) -> bool {
        match self.events.push_back(TriggerEvent { switch, position }) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                warn!("endstop log full, dropped hit on {} at {}", switch, position);
                false
            }
        }
    }

    /// Oldest unreported hit
    pub fn front(&self) -> Option<TriggerEvent> {
        self.events.front().copied()
    }

    /// Pop the oldest hit if it belongs to `switch`
    ///
    /// Leaves the log untouched on failure.
    pub fn acknowledge(&mut self, switch: SwitchId) -> Result<TriggerEvent, EndstopError> {
        match self.events.front() {
            Some(event) if event.switch == switch => {
                self.events
                    .pop_front()
                    .ok_or(EndstopError::OutOfOrderAcknowledgement)
            }
            _ => Err(EndstopError::OutOfOrderAcknowledgement),
        }
    }

    /// Check if any hit is waiting to be reported
    pub fn has_unreported_hits(&self) -> bool {
        !self.events.is_empty()
    }

    /// Visit every pending hit, oldest first
    ///
    /// `report` returns `true` to acknowledge the hit it was given. A hit that
    /// cannot be acknowledged because an older one is still pending stays in
    /// the log.
    pub fn drain_and_report<F>(&mut self, mut report: F)
    where
        F: FnMut(&TriggerEvent) -> bool,
    {
        for event in self.pending().iter() {
            if report(event) && self.acknowledge(event.switch).is_err() {
                warn!("hit on {} acknowledged ahead of older hits", event.switch);
            }
        }
    }

    /// Copy of the pending hits, oldest first
    ///
    /// Lets a caller visit the hits after releasing whatever guards the log.
    pub fn pending(&self) -> Vec<TriggerEvent, CAP> {
        self.events.iter().copied().collect()
    }

    /// Iterate pending hits, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TriggerEvent> {
        self.events.iter()
    }

    /// Number of pending hits
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no hit is pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of pending hits
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Number of hits dropped because the log was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard every pending hit
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
