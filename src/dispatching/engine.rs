//! Rule engine for flight ordering.
//!
//! Applies dispatching rules in sequence, falling through to the next rule
//! only on ties. Flights that tie on every rule keep their input order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule};
use crate::models::Flight;

/// A sequential rule engine for flight prioritization.
///
/// # Example
/// ```
/// use u_baggage::dispatching::RuleEngine;
/// use u_baggage::models::Flight;
///
/// let flights = vec![Flight::new("B", 2_000, 10), Flight::new("A", 1_000, 10)];
/// let engine = RuleEngine::release_date();
/// assert_eq!(engine.sort_indices(&flights), vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine (keeps input order).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// ERD engine used by the list scheduler: earliest release first,
    /// ties kept in input order.
    pub fn release_date() -> Self {
        Self::new().with_rule(rules::Erd)
    }

    /// Appends a rule, consulted only when all earlier rules tie.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Orders two flights (`Less` = `a` is dispatched first).
    pub fn compare(&self, a: &Flight, b: &Flight) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    /// Sorts flights by priority (highest priority first).
    ///
    /// Returns indices into the original slice. The sort is stable.
    pub fn sort_indices(&self, flights: &[Flight]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..flights.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&flights[a], &flights[b]));
        indices
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::release_date()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(flights: &[Flight], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| flights[i].code.clone()).collect()
    }

    #[test]
    fn test_erd_ordering() {
        let flights = vec![
            Flight::new("late", 5_000, 1),
            Flight::new("early", 1_000, 1),
            Flight::new("middle", 3_000, 1),
        ];
        let engine = RuleEngine::release_date();
        assert_eq!(codes(&flights, &engine.sort_indices(&flights)), ["early", "middle", "late"]);
    }

    #[test]
    fn test_erd_ties_keep_input_order() {
        let flights = vec![
            Flight::new("first", 1_000, 9),
            Flight::new("second", 1_000, 1),
            Flight::new("third", 1_000, 5),
        ];
        let engine = RuleEngine::release_date();
        assert_eq!(codes(&flights, &engine.sort_indices(&flights)), ["first", "second", "third"]);
    }

    #[test]
    fn test_empty_engine_keeps_input_order() {
        let flights = vec![Flight::new("B", 9_000, 1), Flight::new("A", 1_000, 1)];
        assert_eq!(RuleEngine::new().sort_indices(&flights), vec![0, 1]);
    }

    #[test]
    fn test_compare() {
        let engine = RuleEngine::default();
        let early = Flight::new("early", 1_000, 1);
        let late = Flight::new("late", 2_000, 1);
        assert_eq!(engine.compare(&early, &late), Ordering::Less);
        assert_eq!(engine.compare(&late, &early), Ordering::Greater);
        assert_eq!(engine.compare(&early, &early), Ordering::Equal);
    }

    #[test]
    fn test_empty_flights() {
        let engine = RuleEngine::default();
        assert!(engine.sort_indices(&[]).is_empty());
    }

    #[test]
    fn test_debug_lists_rules() {
        let text = format!("{:?}", RuleEngine::release_date());
        assert!(text.contains("ERD"));
    }
}
