//! Autoplay - picks the next correct move for any puzzle
//!
//! Used by the demo binary to run a whole campaign headlessly, and by tests
//! that need a level solved without spelling out every move.

use super::puzzle::{PuzzleAction, PuzzleState};

/// Next move that makes progress toward a solution, or `None` when the
/// puzzle is finished or has wandered somewhere autoplay cannot recover from
pub fn next_action(puzzle: &PuzzleState) -> Option<PuzzleAction> {
    match puzzle {
        PuzzleState::CodeFragment(p) | PuzzleState::AlgorithmReconstruction(p) => {
            Some(if p.is_solved() {
                PuzzleAction::Check
            } else {
                PuzzleAction::Reorder((0..p.lines.len()).collect())
            })
        }
        PuzzleState::LogicGate(p) => p.first_unsolved().map(|gate| PuzzleAction::AnswerGate {
            id: gate.id,
            output: gate.expected(),
        }),
        PuzzleState::MemorySequence(p) => {
            p.sequence.get(p.input.len()).copied().map(PuzzleAction::Input)
        }
        PuzzleState::TerminalHacking(p) => p
            .next_command()
            .map(|cmd| PuzzleAction::Command(cmd.to_string())),
        PuzzleState::BinaryTree(p) => {
            if !p.target.starts_with(&p.visited) {
                return None;
            }
            p.target.get(p.visited.len()).copied().map(PuzzleAction::Traverse)
        }
        PuzzleState::GraphTraversal(p) => {
            if !p.optimal.starts_with(&p.path) {
                return None;
            }
            p.optimal.get(p.path.len()).cloned().map(PuzzleAction::Move)
        }
        PuzzleState::HashTable(p) => {
            let collision = p.collisions.iter().find(|c| !p.is_placed(&c.key))?;
            let slot = p.probe_slot(collision.hash)?;
            Some(PuzzleAction::Resolve {
                key: collision.key.clone(),
                position: i64::try_from(slot).ok()?,
            })
        }
        PuzzleState::DynamicProgramming(p) | PuzzleState::RecursionLoop(p) => {
            p.next_step().map(|step| PuzzleAction::Step(step.to_string()))
        }
        PuzzleState::MultiAlgorithm(p) => (!p.is_solved()).then_some(PuzzleAction::Solve),
        PuzzleState::StackOverflow(p) => p.next_operation().map(|_| PuzzleAction::Execute),
        PuzzleState::LinkedListCorruption(p) => p
            .target
            .iter()
            .find(|link| !p.links.contains(link))
            .map(|link| PuzzleAction::Connect {
                from: link.from,
                to: link.to,
            }),
        PuzzleState::DatabaseCorruption(p) => (!p.is_solved()).then_some(PuzzleAction::Query),
        PuzzleState::NetworkProtocol(p) => p
            .corrupted
            .iter()
            .find(|layer| !p.repaired.contains(layer))
            .and_then(|&layer| i64::try_from(layer).ok())
            .map(PuzzleAction::Repair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{get_level, levels};
    use crate::sim::puzzle::Verdict;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_solves_every_puzzle_without_mistakes() {
        let mut rng = Pcg32::seed_from_u64(11);
        for level in levels() {
            let mut puzzle = PuzzleState::new(level, &mut rng);
            let mut moves = 0;
            loop {
                let action = next_action(&puzzle)
                    .unwrap_or_else(|| panic!("level {} stalled", level.id));
                let verdict = puzzle.apply(&action).unwrap();
                assert!(!verdict.is_rejected(), "level {}: {action:?} rejected", level.id);
                moves += 1;
                if verdict == Verdict::Solved {
                    break;
                }
                assert!(moves < 64, "level {} never finished", level.id);
            }
        }
    }

    #[test]
    fn test_hash_moves_use_linear_probing() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut puzzle = PuzzleState::new(get_level(8).unwrap(), &mut rng);
        let mut slots = Vec::new();
        while let Some(action) = next_action(&puzzle) {
            if let PuzzleAction::Resolve { position, .. } = &action {
                slots.push(*position);
            }
            if puzzle.apply(&action).unwrap() == Verdict::Solved {
                break;
            }
        }
        assert_eq!(slots, [1, 2, 3, 4]);
    }
}
