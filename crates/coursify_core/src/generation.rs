//! crates/coursify_core/src/generation.rs
//!
//! Per-view load generations. Every load takes a ticket; a completion is
//! applied only if no newer load for the same view started since, and no
//! mode transition happened in between.

use crate::domain::View;
use std::collections::BTreeMap;

/// Proof that a load for `view` was started at `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub view: View,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct LoadGenerations {
    current: BTreeMap<View, u64>,
}

impl LoadGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load, making every earlier ticket for the view stale.
    pub fn begin(&mut self, view: View) -> LoadTicket {
        let generation = self.current.entry(view).or_insert(0);
        *generation += 1;
        LoadTicket {
            view,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current.get(&ticket.view).copied().unwrap_or(0) == ticket.generation
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate_all(&mut self) {
        for view in View::ALL {
            *self.current.entry(view).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_load_makes_older_ticket_stale() {
        let mut generations = LoadGenerations::new();
        let first = generations.begin(View::Available);
        let second = generations.begin(View::Available);
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }

    #[test]
    fn views_are_tracked_separately() {
        let mut generations = LoadGenerations::new();
        let purchased = generations.begin(View::Purchased);
        generations.begin(View::Available);
        assert!(generations.is_current(purchased));
    }

    #[test]
    fn invalidate_all_discards_in_flight_loads() {
        let mut generations = LoadGenerations::new();
        let ticket = generations.begin(View::AdminCourses);
        generations.invalidate_all();
        assert!(!generations.is_current(ticket));
        let fresh = generations.begin(View::AdminCourses);
        assert!(generations.is_current(fresh));
    }
}
