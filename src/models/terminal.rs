//! Terminal model and static conveyor topology.
//!
//! # Reference Layout
//!
//! | Terminal | Conveyors |
//! |----------|-----------|
//! | 1–5, 7 | 3 |
//! | 8 | 2 |
//! | 0, 6 | 0 (no baggage service) |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Conveyor, Job};

/// Terminal identifier.
pub type TerminalId = u8;

/// A terminal and its conveyors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    /// Terminal identifier.
    pub id: TerminalId,
    /// Conveyors, indexed by position.
    pub conveyors: Vec<Conveyor>,
}

impl Terminal {
    /// Creates a terminal with `conveyor_count` empty conveyors.
    pub fn new(id: TerminalId, conveyor_count: usize) -> Self {
        Self {
            id,
            conveyors: (0..conveyor_count).map(Conveyor::new).collect(),
        }
    }

    /// Number of conveyors.
    pub fn conveyor_count(&self) -> usize {
        self.conveyors.len()
    }

    /// Whether the terminal offers baggage service.
    pub fn has_conveyors(&self) -> bool {
        !self.conveyors.is_empty()
    }

    /// Conveyor whose available date is minimal; ties go to the lowest
    /// index. `None` when the terminal has no conveyors.
    pub fn earliest_available(&self, jobs: &[Job], epoch_ms: i64) -> Option<usize> {
        self.conveyors
            .iter()
            .min_by_key(|c| c.available_ms(jobs, epoch_ms))
            .map(|c| c.index)
    }

    /// Number of jobs across all conveyors.
    pub fn job_count(&self) -> usize {
        self.conveyors.iter().map(Conveyor::len).sum()
    }
}

/// Static terminal → conveyor-count mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalLayout {
    conveyors: BTreeMap<TerminalId, usize>,
}

impl TerminalLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self {
            conveyors: BTreeMap::new(),
        }
    }

    /// The reference airport layout (terminals 0–8).
    pub fn reference() -> Self {
        let mut layout = Self::new();
        for id in 0..=8 {
            let count = match id {
                1..=5 | 7 => 3,
                8 => 2,
                _ => 0,
            };
            layout = layout.with_terminal(id, count);
        }
        layout
    }

    /// Adds or replaces a terminal.
    pub fn with_terminal(mut self, id: TerminalId, conveyor_count: usize) -> Self {
        self.conveyors.insert(id, conveyor_count);
        self
    }

    /// Conveyor count for a terminal; `None` if the terminal is unknown.
    pub fn conveyor_count(&self, id: TerminalId) -> Option<usize> {
        self.conveyors.get(&id).copied()
    }

    /// Whether the terminal exists and has at least one conveyor.
    pub fn serves(&self, id: TerminalId) -> bool {
        self.conveyor_count(id).is_some_and(|n| n > 0)
    }

    /// Terminal ids with their conveyor counts, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (TerminalId, usize)> + '_ {
        self.conveyors.iter().map(|(&id, &n)| (id, n))
    }

    /// Builds empty terminals for every configured id.
    pub fn build_terminals(&self) -> Vec<Terminal> {
        self.iter().map(|(id, n)| Terminal::new(id, n)).collect()
    }
}

impl Default for TerminalLayout {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flight;

    #[test]
    fn test_reference_layout() {
        let layout = TerminalLayout::reference();
        for id in [1, 2, 3, 4, 5, 7] {
            assert_eq!(layout.conveyor_count(id), Some(3));
        }
        assert_eq!(layout.conveyor_count(8), Some(2));
        assert_eq!(layout.conveyor_count(0), Some(0));
        assert_eq!(layout.conveyor_count(6), Some(0));
        assert_eq!(layout.conveyor_count(9), None);
        assert!(layout.serves(1));
        assert!(!layout.serves(6));
        assert!(!layout.serves(42));
    }

    #[test]
    fn test_build_terminals() {
        let terminals = TerminalLayout::new()
            .with_terminal(2, 1)
            .with_terminal(1, 3)
            .build_terminals();
        assert_eq!(terminals.len(), 2);
        assert_eq!(terminals[0].id, 1);
        assert_eq!(terminals[0].conveyor_count(), 3);
        assert_eq!(terminals[1].conveyors[0].index, 0);
    }

    #[test]
    fn test_earliest_available_ties_lowest_index() {
        let mut t = Terminal::new(1, 3);
        let jobs = vec![Job::for_flight(&Flight::new("A", 0, 100), 1)];
        assert_eq!(t.earliest_available(&jobs, 0), Some(0));

        t.conveyors[0].push(0);
        assert_eq!(t.earliest_available(&jobs, 0), Some(1));
        assert!(Terminal::new(6, 0).earliest_available(&jobs, 0).is_none());
    }

    #[test]
    fn test_layout_json_round_trip() {
        let layout = TerminalLayout::reference();
        let json = serde_json::to_string(&layout).unwrap();
        let back: TerminalLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
