//! Line-arrangement puzzles (code fragment, algorithm reconstruction)
//!
//! The player permutes a fixed set of source lines. A check succeeds when the
//! rendered text matches the canonical text, so interchangeable lines may sit
//! in either slot.

use serde::{Deserialize, Serialize};

use super::{PuzzleAction, RejectReason, Verdict};

pub const CODE_FRAGMENT_PENALTY: u32 = 10;
pub const ALGORITHM_PENALTY: u32 = 15;

const ESCAPE_LINES: [&str; 6] = [
    "function escape() {",
    "  if (corruption.level < 50) {",
    "    return true;",
    "  }",
    "  return false;",
    "}",
];
const ESCAPE_SHUFFLE: [usize; 6] = [5, 2, 0, 4, 1, 3];

const BUBBLE_SORT_LINES: [&str; 12] = [
    "function bubbleSort(arr) {",
    "  for (let i = 0; i < arr.length; i++) {",
    "    for (let j = 0; j < arr.length - i - 1; j++) {",
    "      if (arr[j] > arr[j + 1]) {",
    "        let temp = arr[j];",
    "        arr[j] = arr[j + 1];",
    "        arr[j + 1] = temp;",
    "      }",
    "    }",
    "  }",
    "  return arr;",
    "}",
];
const BUBBLE_SORT_SHUFFLE: [usize; 12] = [11, 3, 1, 6, 0, 9, 4, 7, 2, 5, 8, 10];

/// A permutation over fixed source lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArrangement {
    /// Lines in canonical order
    pub lines: Vec<String>,
    /// Current arrangement: `order[slot]` is the line shown in that slot
    pub order: Vec<usize>,
    /// Health lost on a failed check
    pub penalty: u32,
}

impl CodeArrangement {
    pub fn new(lines: &[&str], order: &[usize], penalty: u32) -> Self {
        Self {
            lines: lines.iter().map(|line| (*line).to_string()).collect(),
            order: order.to_vec(),
            penalty,
        }
    }

    /// Level 1: the `escape()` function
    pub fn code_fragment() -> Self {
        Self::new(&ESCAPE_LINES, &ESCAPE_SHUFFLE, CODE_FRAGMENT_PENALTY)
    }

    /// Level 4: bubble sort
    pub fn bubble_sort() -> Self {
        Self::new(&BUBBLE_SORT_LINES, &BUBBLE_SORT_SHUFFLE, ALGORITHM_PENALTY)
    }

    /// Lines in the order the player currently sees them
    pub fn rendered(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&idx| self.lines[idx].as_str())
    }

    pub fn is_solved(&self) -> bool {
        self.rendered().eq(self.lines.iter().map(String::as_str))
    }

    fn is_permutation(&self, order: &[usize]) -> bool {
        if order.len() != self.lines.len() {
            return false;
        }
        let mut seen = vec![false; order.len()];
        order.iter().all(|&idx| {
            idx < seen.len() && !std::mem::replace(&mut seen[idx], true)
        })
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        match action {
            PuzzleAction::Reorder(order) => {
                if !self.is_permutation(order) {
                    return None;
                }
                self.order = order.clone();
                Some(Verdict::Pending)
            }
            PuzzleAction::MoveLine { from, to } => {
                if *from >= self.order.len() || *to >= self.order.len() {
                    return None;
                }
                let line = self.order.remove(*from);
                self.order.insert(*to, line);
                Some(Verdict::Pending)
            }
            PuzzleAction::Check => Some(if self.is_solved() {
                Verdict::Solved
            } else {
                Verdict::reject(self.penalty, RejectReason::WrongOrder)
            }),
            _ => None,
        }
    }
}
