//! Memory sequence puzzle
//!
//! A random sequence over four symbols, replayed one symbol at a time. Any
//! wrong symbol wipes the partial replay.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{PuzzleAction, RejectReason, Verdict};

pub const MEMORY_PENALTY: u32 = 20;
/// Symbols are drawn from `0..MEMORY_ALPHABET`
pub const MEMORY_ALPHABET: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySequence {
    pub sequence: Vec<u8>,
    /// Correct prefix entered so far
    pub input: Vec<u8>,
}

impl MemorySequence {
    /// Sequence length grows by one every two levels
    pub fn length_for_level(level_id: u8) -> usize {
        4 + usize::from(level_id / 2)
    }

    pub fn generate<R: Rng + ?Sized>(level_id: u8, rng: &mut R) -> Self {
        let sequence = (0..Self::length_for_level(level_id))
            .map(|_| rng.random_range(0..MEMORY_ALPHABET))
            .collect();
        Self::from_sequence(sequence)
    }

    pub fn from_sequence(sequence: Vec<u8>) -> Self {
        Self {
            sequence,
            input: Vec::new(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.input == self.sequence
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Input(symbol) = action else {
            return None;
        };
        let expected = *self.sequence.get(self.input.len())?;
        if *symbol != expected {
            self.input.clear();
            return Some(Verdict::reject(MEMORY_PENALTY, RejectReason::WrongSymbol));
        }
        self.input.push(*symbol);
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
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_length_scales_with_level() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(MemorySequence::generate(3, &mut rng).sequence.len(), 5);
        assert_eq!(MemorySequence::generate(1, &mut rng).sequence.len(), 4);
        assert_eq!(MemorySequence::generate(15, &mut rng).sequence.len(), 11);
        let seq = MemorySequence::generate(15, &mut rng);
        assert!(seq.sequence.iter().all(|&s| s < MEMORY_ALPHABET));
    }

    #[test]
    fn test_full_replay_solves() {
        let mut puzzle = MemorySequence::from_sequence(vec![2, 0, 3, 3, 1]);
        for &symbol in &[2, 0, 3, 3] {
            assert_eq!(puzzle.apply(&PuzzleAction::Input(symbol)), Some(Verdict::Pending));
        }
        assert_eq!(puzzle.apply(&PuzzleAction::Input(1)), Some(Verdict::Solved));
        assert_eq!(puzzle.apply(&PuzzleAction::Input(1)), None);
    }

    #[test]
    fn test_mistake_at_any_position_resets() {
        let target = vec![2, 0, 3, 3, 1];
        for k in 0..target.len() {
            let mut puzzle = MemorySequence::from_sequence(target.clone());
            for &symbol in &target[..k] {
                puzzle.apply(&PuzzleAction::Input(symbol));
            }
            let wrong = (target[k] + 1) % MEMORY_ALPHABET;
            assert_eq!(
                puzzle.apply(&PuzzleAction::Input(wrong)),
                Some(Verdict::reject(20, RejectReason::WrongSymbol))
            );
            assert!(puzzle.input.is_empty());
        }
    }
}
