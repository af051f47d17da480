//! Units their owner chose to come back to later this turn

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitQueue {
    queue: VecDeque<UnitId>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer a unit; a unit already waiting moves to the back
    pub fn push(&mut self, unit: UnitId) {
        self.remove(unit);
        self.queue.push_back(unit);
    }

    pub fn remove(&mut self, unit: UnitId) {
        self.queue.retain(|&u| u != unit);
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.queue.contains(&unit)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
