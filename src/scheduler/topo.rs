//! Topological ordering of wagons over relationship edges.
//!
//! # Algorithm
//! Kahn's algorithm. Among wagons whose predecessors are all emitted, the
//! one with the lowest `sequence` goes first (input position breaks
//! remaining ties), so the order is stable for a given input.
//!
//! The sorter does not decide what a cycle means. It reports
//! [`TopoOrder::CycleDetected`] and leaves fallback or failure to the
//! caller.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::models::{Relationship, Wagon};

/// Outcome of a topological sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopoOrder {
    /// All wagons, as indices into the input slice.
    Ordered(Vec<usize>),
    /// Wagon IDs that could not be ordered (members of, or behind, a cycle),
    /// in sequence order.
    CycleDetected(Vec<String>),
}

impl TopoOrder {
    /// Whether a cycle was found.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CycleDetected(_))
    }
}

/// Orders wagons so every predecessor precedes its successors.
///
/// Relationships naming unknown wagons are ignored.
pub fn topological_order(wagons: &[Wagon], relationships: &[Relationship]) -> TopoOrder {
    let index: HashMap<&str, usize> = wagons
        .iter()
        .enumerate()
        .map(|(i, w)| (w.id.as_str(), i))
        .collect();

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); wagons.len()];
    let mut in_degree = vec![0usize; wagons.len()];

    for rel in relationships {
        let (Some(&from), Some(&to)) = (
            index.get(rel.predecessor_wagon_id.as_str()),
            index.get(rel.successor_wagon_id.as_str()),
        ) else {
            continue;
        };
        successors[from].push(to);
        in_degree[to] += 1;
    }

    let mut ready: BinaryHeap<Reverse<(i32, usize)>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, d)| *d == 0)
        .map(|(i, _)| Reverse((wagons[i].sequence, i)))
        .collect();

    let mut order = Vec::with_capacity(wagons.len());
    while let Some(Reverse((_, node))) = ready.pop() {
        order.push(node);
        for &next in &successors[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse((wagons[next].sequence, next)));
            }
        }
    }

    if order.len() == wagons.len() {
        return TopoOrder::Ordered(order);
    }

    let mut remaining: Vec<usize> = (0..wagons.len()).filter(|&i| in_degree[i] > 0).collect();
    remaining.sort_by_key(|&i| (wagons[i].sequence, i));
    TopoOrder::CycleDetected(remaining.into_iter().map(|i| wagons[i].id.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wagons() -> Vec<Wagon> {
        vec![
            Wagon::new("A", "t", 1),
            Wagon::new("B", "t", 2),
            Wagon::new("C", "t", 3),
        ]
    }

    #[test]
    fn test_no_relationships_keeps_sequence() {
        let mut ws = wagons();
        ws.reverse(); // C, B, A in input
        assert_eq!(topological_order(&ws, &[]), TopoOrder::Ordered(vec![2, 1, 0]));
    }

    #[test]
    fn test_edges_override_sequence() {
        // C must precede A
        let rels = vec![Relationship::finish_to_start("C", "A")];
        assert_eq!(
            topological_order(&wagons(), &rels),
            TopoOrder::Ordered(vec![1, 2, 0])
        );
    }

    #[test]
    fn test_chain() {
        let rels = vec![
            Relationship::finish_to_start("A", "B"),
            Relationship::finish_to_start("B", "C"),
        ];
        assert_eq!(
            topological_order(&wagons(), &rels),
            TopoOrder::Ordered(vec![0, 1, 2])
        );
    }

    #[test]
    fn test_cycle_detected() {
        let rels = vec![
            Relationship::finish_to_start("B", "C"),
            Relationship::finish_to_start("C", "B"),
        ];
        let order = topological_order(&wagons(), &rels);
        assert!(order.is_cyclic());
        assert_eq!(order, TopoOrder::CycleDetected(vec!["B".into(), "C".into()]));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let rels = vec![Relationship::finish_to_start("A", "A")];
        assert_eq!(
            topological_order(&wagons(), &rels),
            TopoOrder::CycleDetected(vec!["A".into()])
        );
    }

    #[test]
    fn test_unknown_wagons_ignored() {
        let rels = vec![Relationship::finish_to_start("Z", "A")];
        assert_eq!(
            topological_order(&wagons(), &rels),
            TopoOrder::Ordered(vec![0, 1, 2])
        );
    }
}
