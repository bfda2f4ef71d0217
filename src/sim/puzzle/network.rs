//! Network puzzles: shortest-path routing and OSI layer repair.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::{PuzzleAction, RejectReason, Verdict};

pub const GRAPH_PENALTY: u32 = 15;
pub const PROTOCOL_PENALTY: u32 = 20;

// ── Graph routing ──

/// Walk from `start` to `target`; only the shortest route counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRoute {
    pub adjacency: BTreeMap<String, Vec<String>>,
    pub start: String,
    pub target: String,
    /// Shortest route, computed when the puzzle is built
    pub optimal: Vec<String>,
    /// Nodes walked so far; always starts with `start`
    pub path: Vec<String>,
}

/// Breadth-first shortest path. Neighbors are explored in listed order, so
/// ties resolve toward earlier entries.
pub fn shortest_path(
    adjacency: &BTreeMap<String, Vec<String>>,
    start: &str,
    target: &str,
) -> Option<Vec<String>> {
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    parents.insert(start, start);

    while let Some(node) = queue.pop_front() {
        if node == target {
            let mut path = vec![node.to_string()];
            let mut cursor = node;
            while cursor != start {
                cursor = parents[cursor];
                path.push(cursor.to_string());
            }
            path.reverse();
            return Some(path);
        }
        for next in adjacency.get(node).into_iter().flatten() {
            if !parents.contains_key(next.as_str()) {
                parents.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    None
}

impl GraphRoute {
    pub fn new(edges: &[(&str, &[&str])], start: &str, target: &str) -> Self {
        let adjacency: BTreeMap<String, Vec<String>> = edges
            .iter()
            .map(|(node, next)| {
                (
                    (*node).to_string(),
                    next.iter().map(|n| (*n).to_string()).collect(),
                )
            })
            .collect();
        let optimal = shortest_path(&adjacency, start, target).unwrap_or_default();
        Self {
            adjacency,
            start: start.to_string(),
            target: target.to_string(),
            optimal,
            path: vec![start.to_string()],
        }
    }

    /// Level 7 network
    pub fn standard() -> Self {
        Self::new(
            &[
                ("A", &["B", "C"]),
                ("B", &["A", "D", "E"]),
                ("C", &["A", "F"]),
                ("D", &["B"]),
                ("E", &["B", "F"]),
                ("F", &["C", "E"]),
            ],
            "A",
            "F",
        )
    }

    pub fn current(&self) -> &str {
        self.path.last().map_or(self.start.as_str(), String::as_str)
    }

    pub fn neighbors(&self) -> &[String] {
        self.adjacency
            .get(self.current())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_solved(&self) -> bool {
        self.path == self.optimal
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Move(node) = action else {
            return None;
        };
        if self.is_solved() || !self.neighbors().contains(node) {
            return None;
        }
        self.path.push(node.clone());
        if *node != self.target {
            return Some(Verdict::Pending);
        }
        if self.is_solved() {
            Some(Verdict::Solved)
        } else {
            self.path = vec![self.start.clone()];
            Some(Verdict::reject(GRAPH_PENALTY, RejectReason::NonOptimalPath))
        }
    }
}

// ── Protocol repair ──

/// Repair exactly the corrupted layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRepair {
    pub layers: Vec<String>,
    pub corrupted: Vec<usize>,
    pub repaired: Vec<usize>,
}

impl ProtocolRepair {
    /// Level 14: OSI stack with Network, Session and Application corrupted
    pub fn standard() -> Self {
        Self {
            layers: [
                "Physical",
                "Data Link",
                "Network",
                "Transport",
                "Session",
                "Presentation",
                "Application",
            ]
            .iter()
            .map(|l| (*l).to_string())
            .collect(),
            corrupted: vec![2, 4, 6],
            repaired: Vec::new(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.corrupted.iter().all(|layer| self.repaired.contains(layer))
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Repair(index) = action else {
            return None;
        };
        let Some(layer) = usize::try_from(*index)
            .ok()
            .filter(|&layer| layer < self.layers.len())
        else {
            return Some(Verdict::reject(PROTOCOL_PENALTY, RejectReason::OutOfRange));
        };
        if !self.corrupted.contains(&layer) {
            return Some(Verdict::reject(PROTOCOL_PENALTY, RejectReason::NotCorrupted));
        }
        if !self.repaired.contains(&layer) {
            self.repaired.push(layer);
        }
        Some(if self.is_solved() {
            Verdict::Solved
        } else {
            Verdict::Pending
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(route: &mut GraphRoute, nodes: &[&str]) -> Vec<Option<Verdict>> {
        nodes
            .iter()
            .map(|n| route.apply(&PuzzleAction::Move((*n).to_string())))
            .collect()
    }

    #[test]
    fn test_optimal_path_computed() {
        let route = GraphRoute::standard();
        assert_eq!(route.optimal, ["A", "C", "F"]);
        assert_eq!(route.path, ["A"]);
    }

    #[test]
    fn test_optimal_walk_solves() {
        let mut route = GraphRoute::standard();
        let verdicts = walk(&mut route, &["C", "F"]);
        assert_eq!(verdicts, [Some(Verdict::Pending), Some(Verdict::Solved)]);
    }

    #[test]
    fn test_longer_walk_rejected() {
        let mut route = GraphRoute::standard();
        let verdicts = walk(&mut route, &["B", "E", "F"]);
        assert_eq!(
            verdicts.last().copied().flatten(),
            Some(Verdict::reject(15, RejectReason::NonOptimalPath))
        );
        assert_eq!(route.path, ["A"]);
    }

    #[test]
    fn test_non_adjacent_move_ignored() {
        let mut route = GraphRoute::standard();
        assert_eq!(walk(&mut route, &["F"]), [None]);
        assert_eq!(walk(&mut route, &["Z"]), [None]);
        assert_eq!(route.path, ["A"]);
    }

    #[test]
    fn test_backtracking_allowed() {
        let mut route = GraphRoute::standard();
        walk(&mut route, &["B", "A"]);
        assert_eq!(route.current(), "A");
        assert_eq!(route.path, ["A", "B", "A"]);
    }

    #[test]
    fn test_protocol_repair() {
        let mut proto = ProtocolRepair::standard();
        assert_eq!(
            proto.apply(&PuzzleAction::Repair(3)),
            Some(Verdict::reject(20, RejectReason::NotCorrupted))
        );
        assert_eq!(
            proto.apply(&PuzzleAction::Repair(7)),
            Some(Verdict::reject(20, RejectReason::OutOfRange))
        );
        assert_eq!(proto.apply(&PuzzleAction::Repair(2)), Some(Verdict::Pending));
        assert_eq!(proto.apply(&PuzzleAction::Repair(2)), Some(Verdict::Pending));
        assert_eq!(proto.apply(&PuzzleAction::Repair(6)), Some(Verdict::Pending));
        assert_eq!(proto.apply(&PuzzleAction::Repair(4)), Some(Verdict::Solved));
        assert_eq!(proto.repaired.len(), 3);
    }
}
