//! Data-structure puzzles: stack replay, linked-list repair, hash collision
//! placement and tree traversal.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PuzzleAction, RejectReason, Verdict};

pub const STACK_PENALTY: u32 = 20;
pub const LINKED_LIST_PENALTY: u32 = 25;
pub const HASH_TABLE_PENALTY: u32 = 20;
pub const TREE_PENALTY: u32 = 20;

/// Slots in the collision table
pub const HASH_TABLE_SIZE: usize = 7;

// ── Stack replay ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackOp {
    Push(i32),
    Pop,
}

impl fmt::Display for StackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackOp::Push(value) => write!(f, "push({value})"),
            StackOp::Pop => f.write_str("pop()"),
        }
    }
}

/// Fixed operation list replayed one step per `execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackReplay {
    pub operations: Vec<StackOp>,
    pub stack: Vec<i32>,
    /// Index of the next operation
    pub cursor: usize,
    pub expected: Vec<i32>,
}

impl StackReplay {
    /// Level 10 program
    pub fn standard() -> Self {
        Self {
            operations: vec![
                StackOp::Push(5),
                StackOp::Push(3),
                StackOp::Pop,
                StackOp::Push(7),
                StackOp::Pop,
                StackOp::Push(1),
            ],
            stack: Vec::new(),
            cursor: 0,
            expected: vec![5, 1],
        }
    }

    /// Operation the next `execute` will run
    pub fn next_operation(&self) -> Option<StackOp> {
        self.operations.get(self.cursor).copied()
    }

    pub fn is_solved(&self) -> bool {
        self.cursor == self.operations.len() && self.stack == self.expected
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        if *action != PuzzleAction::Execute {
            return None;
        }
        match self.next_operation()? {
            StackOp::Push(value) => self.stack.push(value),
            StackOp::Pop => {
                self.stack.pop();
            }
        }
        self.cursor += 1;

        if self.cursor < self.operations.len() {
            return Some(Verdict::Pending);
        }
        if self.is_solved() {
            Some(Verdict::Solved)
        } else {
            self.stack.clear();
            self.cursor = 0;
            Some(Verdict::reject(STACK_PENALTY, RejectReason::StackMismatch))
        }
    }
}

// ── Linked list repair ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    pub id: u32,
    pub value: String,
}

/// Pointers are added one at a time and judged once the count matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRepair {
    pub nodes: Vec<ListNode>,
    pub target: Vec<Link>,
    pub links: Vec<Link>,
}

impl LinkRepair {
    /// Level 11: A -> B -> C -> D
    pub fn standard() -> Self {
        let nodes = ["A", "B", "C", "D"]
            .iter()
            .zip(1..)
            .map(|(value, id)| ListNode {
                id,
                value: (*value).to_string(),
            })
            .collect();
        Self {
            nodes,
            target: vec![
                Link { from: 1, to: 2 },
                Link { from: 2, to: 3 },
                Link { from: 3, to: 4 },
            ],
            links: Vec::new(),
        }
    }

    fn sorted(links: &[Link]) -> Vec<Link> {
        let mut links = links.to_vec();
        links.sort_unstable();
        links
    }

    pub fn is_solved(&self) -> bool {
        Self::sorted(&self.links) == Self::sorted(&self.target)
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Connect { from, to } = action else {
            return None;
        };
        if self.links.len() >= self.target.len() {
            return None;
        }
        self.links.push(Link {
            from: *from,
            to: *to,
        });
        if self.links.len() < self.target.len() {
            return Some(Verdict::Pending);
        }
        if self.is_solved() {
            Some(Verdict::Solved)
        } else {
            self.links.clear();
            Some(Verdict::reject(LINKED_LIST_PENALTY, RejectReason::WrongLinks))
        }
    }
}

// ── Hash collision placement ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub key: String,
    pub hash: usize,
}

/// Colliding keys placed by hand. Any in-range slot is accepted once per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashPlacement {
    pub table: Vec<Option<String>>,
    pub collisions: Vec<Collision>,
    /// Keys placed so far, in placement order
    pub placed: Vec<String>,
}

impl HashPlacement {
    /// Level 8 collisions
    pub fn standard() -> Self {
        let collisions = [("data_01", 1), ("data_08", 1), ("data_03", 3), ("data_10", 3)]
            .iter()
            .map(|(key, hash)| Collision {
                key: (*key).to_string(),
                hash: *hash,
            })
            .collect();
        Self {
            table: vec![None; HASH_TABLE_SIZE],
            collisions,
            placed: Vec::new(),
        }
    }

    pub fn is_placed(&self, key: &str) -> bool {
        self.placed.iter().any(|k| k == key)
    }

    /// Linear probing: first free slot at or after `hash`, wrapping around
    pub fn probe_slot(&self, hash: usize) -> Option<usize> {
        (0..self.table.len())
            .map(|offset| (hash + offset) % self.table.len())
            .find(|&slot| self.table[slot].is_none())
    }

    pub fn is_solved(&self) -> bool {
        self.collisions.iter().all(|c| self.is_placed(&c.key))
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Resolve { key, position } = action else {
            return None;
        };
        let Some(slot) = usize::try_from(*position)
            .ok()
            .filter(|&slot| slot < self.table.len())
        else {
            return Some(Verdict::reject(HASH_TABLE_PENALTY, RejectReason::OutOfRange));
        };
        if !self.collisions.iter().any(|c| &c.key == key) {
            return Some(Verdict::reject(HASH_TABLE_PENALTY, RejectReason::UnknownKey));
        }
        if self.is_placed(key) {
            return Some(Verdict::Pending);
        }
        self.table[slot] = Some(key.clone());
        self.placed.push(key.clone());
        Some(if self.is_solved() {
            Verdict::Solved
        } else {
            Verdict::Pending
        })
    }
}

// ── Tree traversal ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(value: i32) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn branch(value: i32, left: TreeNode, right: TreeNode) -> Self {
        Self {
            value,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Left subtree, node, right subtree
    pub fn in_order(&self) -> Vec<i32> {
        let mut out = Vec::new();
        self.walk_in_order(&mut out);
        out
    }

    fn walk_in_order(&self, out: &mut Vec<i32>) {
        if let Some(left) = &self.left {
            left.walk_in_order(out);
        }
        out.push(self.value);
        if let Some(right) = &self.right {
            right.walk_in_order(out);
        }
    }
}

/// Visit every node in in-order sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeTraversal {
    pub root: TreeNode,
    pub target: Vec<i32>,
    pub visited: Vec<i32>,
}

impl TreeTraversal {
    pub fn new(root: TreeNode) -> Self {
        let target = root.in_order();
        Self {
            root,
            target,
            visited: Vec::new(),
        }
    }

    /// Level 6 tree
    pub fn standard() -> Self {
        Self::new(TreeNode::branch(
            50,
            TreeNode::branch(30, TreeNode::leaf(20), TreeNode::leaf(40)),
            TreeNode::branch(70, TreeNode::leaf(60), TreeNode::leaf(80)),
        ))
    }

    pub fn is_solved(&self) -> bool {
        self.visited == self.target
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Traverse(value) = action else {
            return None;
        };
        if self.visited.len() >= self.target.len() {
            return None;
        }
        self.visited.push(*value);
        if self.visited.len() < self.target.len() {
            return Some(Verdict::Pending);
        }
        if self.is_solved() {
            Some(Verdict::Solved)
        } else {
            self.visited.clear();
            Some(Verdict::reject(TREE_PENALTY, RejectReason::WrongTraversal))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_replay_solves_on_last_op() {
        let mut puzzle = StackReplay::standard();
        for _ in 0..5 {
            assert_eq!(puzzle.apply(&PuzzleAction::Execute), Some(Verdict::Pending));
        }
        assert_eq!(puzzle.stack, vec![5]);
        assert_eq!(puzzle.apply(&PuzzleAction::Execute), Some(Verdict::Solved));
        assert_eq!(puzzle.stack, vec![5, 1]);
        assert_eq!(puzzle.apply(&PuzzleAction::Execute), None);
    }

    #[test]
    fn test_stack_mismatch_detected_at_end() {
        let mut puzzle = StackReplay::standard();
        puzzle.expected = vec![5, 3];
        for _ in 0..5 {
            assert_eq!(puzzle.apply(&PuzzleAction::Execute), Some(Verdict::Pending));
        }
        assert_eq!(
            puzzle.apply(&PuzzleAction::Execute),
            Some(Verdict::reject(20, RejectReason::StackMismatch))
        );
        assert_eq!(puzzle.cursor, 0);
        assert!(puzzle.stack.is_empty());
    }

    #[test]
    fn test_stack_op_display() {
        let ops: Vec<String> = StackReplay::standard()
            .operations
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ops, ["push(5)", "push(3)", "pop()", "push(7)", "pop()", "push(1)"]);
    }

    #[test]
    fn test_links_compared_as_sorted_multiset() {
        let mut puzzle = LinkRepair::standard();
        puzzle.apply(&PuzzleAction::Connect { from: 3, to: 4 });
        puzzle.apply(&PuzzleAction::Connect { from: 1, to: 2 });
        assert_eq!(
            puzzle.apply(&PuzzleAction::Connect { from: 2, to: 3 }),
            Some(Verdict::Solved)
        );
    }

    #[test]
    fn test_wrong_links_clear() {
        let mut puzzle = LinkRepair::standard();
        puzzle.apply(&PuzzleAction::Connect { from: 1, to: 2 });
        assert_eq!(
            puzzle.apply(&PuzzleAction::Connect { from: 2, to: 4 }),
            Some(Verdict::Pending)
        );
        assert_eq!(
            puzzle.apply(&PuzzleAction::Connect { from: 4, to: 3 }),
            Some(Verdict::reject(25, RejectReason::WrongLinks))
        );
        assert!(puzzle.links.is_empty());
    }

    #[test]
    fn test_hash_slot_range() {
        let mut puzzle = HashPlacement::standard();
        let resolve = |key: &str, position| PuzzleAction::Resolve {
            key: key.to_string(),
            position,
        };
        assert_eq!(
            puzzle.apply(&resolve("data_01", 7)),
            Some(Verdict::reject(20, RejectReason::OutOfRange))
        );
        assert_eq!(
            puzzle.apply(&resolve("data_01", -1)),
            Some(Verdict::reject(20, RejectReason::OutOfRange))
        );
        assert_eq!(
            puzzle.apply(&resolve("data_99", 2)),
            Some(Verdict::reject(20, RejectReason::UnknownKey))
        );
        assert!(puzzle.placed.is_empty());
    }

    #[test]
    fn test_hash_any_slot_accepted_once_per_key() {
        let mut puzzle = HashPlacement::standard();
        let resolve = |key: &str, position| PuzzleAction::Resolve {
            key: key.to_string(),
            position,
        };
        assert_eq!(puzzle.apply(&resolve("data_01", 6)), Some(Verdict::Pending));
        assert_eq!(puzzle.apply(&resolve("data_01", 0)), Some(Verdict::Pending));
        assert_eq!(puzzle.placed.len(), 1);
        assert_eq!(puzzle.table[6].as_deref(), Some("data_01"));
        puzzle.apply(&resolve("data_08", 0));
        puzzle.apply(&resolve("data_03", 0));
        assert_eq!(puzzle.apply(&resolve("data_10", 0)), Some(Verdict::Solved));
    }

    #[test]
    fn test_linear_probe() {
        let mut puzzle = HashPlacement::standard();
        assert_eq!(puzzle.probe_slot(1), Some(1));
        puzzle.table[1] = Some("data_01".into());
        assert_eq!(puzzle.probe_slot(1), Some(2));
        puzzle.table[6] = Some("x".into());
        assert_eq!(puzzle.probe_slot(6), Some(0));
    }

    #[test]
    fn test_tree_in_order_target() {
        let puzzle = TreeTraversal::standard();
        assert_eq!(puzzle.target, vec![20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn test_tree_wrong_traversal_resets() {
        let mut puzzle = TreeTraversal::standard();
        for value in [50, 30, 20, 40, 70, 60] {
            assert_eq!(puzzle.apply(&PuzzleAction::Traverse(value)), Some(Verdict::Pending));
        }
        assert_eq!(
            puzzle.apply(&PuzzleAction::Traverse(80)),
            Some(Verdict::reject(20, RejectReason::WrongTraversal))
        );
        assert!(puzzle.visited.is_empty());

        for value in [20, 30, 40, 50, 60, 70] {
            puzzle.apply(&PuzzleAction::Traverse(value));
        }
        assert_eq!(puzzle.apply(&PuzzleAction::Traverse(80)), Some(Verdict::Solved));
    }
}
