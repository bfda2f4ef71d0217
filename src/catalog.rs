//! Level catalog
//!
//! Fifteen immutable level descriptors, ordered by id. Everything here is
//! static data: lookups never allocate or mutate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::error::GameError;

/// Ranked difficulty tiers (declaration order is the ranking)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
    Nightmare,
    Impossible,
    Legendary,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
            Difficulty::Nightmare => "Nightmare",
            Difficulty::Impossible => "Impossible",
            Difficulty::Legendary => "Legendary",
        }
    }
}

/// The puzzle variant a level drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PuzzleKind {
    CodeFragment,
    LogicGate,
    MemorySequence,
    AlgorithmReconstruction,
    TerminalHacking,
    BinaryTree,
    GraphTraversal,
    HashTable,
    DynamicProgramming,
    MultiAlgorithm,
    StackOverflow,
    LinkedListCorruption,
    RecursionLoop,
    DatabaseCorruption,
    NetworkProtocol,
}

impl PuzzleKind {
    /// Identifier used by presentation layers and named actions
    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleKind::CodeFragment => "codeFragment",
            PuzzleKind::LogicGate => "logicGate",
            PuzzleKind::MemorySequence => "memorySequence",
            PuzzleKind::AlgorithmReconstruction => "algorithmReconstruction",
            PuzzleKind::TerminalHacking => "terminalHacking",
            PuzzleKind::BinaryTree => "binaryTree",
            PuzzleKind::GraphTraversal => "graphTraversal",
            PuzzleKind::HashTable => "hashTable",
            PuzzleKind::DynamicProgramming => "dynamicProgramming",
            PuzzleKind::MultiAlgorithm => "multiAlgorithm",
            PuzzleKind::StackOverflow => "stackOverflow",
            PuzzleKind::LinkedListCorruption => "linkedListCorruption",
            PuzzleKind::RecursionLoop => "recursionLoop",
            PuzzleKind::DatabaseCorruption => "databaseCorruption",
            PuzzleKind::NetworkProtocol => "networkProtocol",
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one corruption level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelDescriptor {
    /// 1-based, contiguous
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub puzzle: PuzzleKind,
    pub enemy_count: u8,
    /// Seconds on the countdown at level start
    pub time_limit: u32,
    /// Drives the ambient glitch ramp (0..1)
    pub corruption_rate: f32,
    pub required_score: u32,
    /// Cosmetic tag for icon selection
    pub corruption_type: &'static str,
}

impl LevelDescriptor {
    /// Index of this level in `level_progress`
    pub fn index(&self) -> usize {
        usize::from(self.id) - 1
    }
}

static LEVELS: [LevelDescriptor; LEVEL_COUNT] = [
    LevelDescriptor {
        id: 1,
        name: "INITIALIZATION ERROR",
        description: "Basic system corruption detected. Restore simple code fragments to prevent cascade failure.",
        difficulty: Difficulty::Easy,
        puzzle: PuzzleKind::CodeFragment,
        enemy_count: 1,
        time_limit: 120,
        corruption_rate: 0.1,
        required_score: 1,
        corruption_type: "startup_failure",
    },
    LevelDescriptor {
        id: 2,
        name: "LOGIC GATE MALFUNCTION",
        description: "Circuit pathways corrupted. Repair logic sequences under surveillance.",
        difficulty: Difficulty::Medium,
        puzzle: PuzzleKind::LogicGate,
        enemy_count: 2,
        time_limit: 90,
        corruption_rate: 0.2,
        required_score: 3,
        corruption_type: "circuit_damage",
    },
    LevelDescriptor {
        id: 3,
        name: "MEMORY FRAGMENTATION",
        description: "Neural pathways scrambled. Reconstruct memory patterns while evading hunters.",
        difficulty: Difficulty::Hard,
        puzzle: PuzzleKind::MemorySequence,
        enemy_count: 3,
        time_limit: 75,
        corruption_rate: 0.3,
        required_score: 5,
        corruption_type: "memory_leak",
    },
    LevelDescriptor {
        id: 4,
        name: "SORTING ALGORITHM CHAOS",
        description: "Core sorting functions destroyed. Rebuild algorithms before data becomes irretrievable.",
        difficulty: Difficulty::Extreme,
        puzzle: PuzzleKind::AlgorithmReconstruction,
        enemy_count: 4,
        time_limit: 90,
        corruption_rate: 0.4,
        required_score: 8,
        corruption_type: "algorithm_decay",
    },
    LevelDescriptor {
        id: 5,
        name: "KERNEL PANIC",
        description: "System core compromised. Execute emergency protocols before total collapse.",
        difficulty: Difficulty::Nightmare,
        puzzle: PuzzleKind::TerminalHacking,
        enemy_count: 5,
        time_limit: 60,
        corruption_rate: 0.5,
        required_score: 12,
        corruption_type: "kernel_breach",
    },
    LevelDescriptor {
        id: 6,
        name: "TREE STRUCTURE COLLAPSE",
        description: "Hierarchical data corrupted. Navigate through broken tree structures to restore order.",
        difficulty: Difficulty::Extreme,
        puzzle: PuzzleKind::BinaryTree,
        enemy_count: 4,
        time_limit: 100,
        corruption_rate: 0.4,
        required_score: 15,
        corruption_type: "tree_corruption",
    },
    LevelDescriptor {
        id: 7,
        name: "NETWORK TOPOLOGY BREACH",
        description: "Connection matrices compromised. Restore pathways through the corrupted network.",
        difficulty: Difficulty::Nightmare,
        puzzle: PuzzleKind::GraphTraversal,
        enemy_count: 5,
        time_limit: 85,
        corruption_rate: 0.5,
        required_score: 18,
        corruption_type: "network_failure",
    },
    LevelDescriptor {
        id: 8,
        name: "HASH COLLISION CASCADE",
        description: "Data indexing systems failing. Resolve collisions before information becomes lost forever.",
        difficulty: Difficulty::Impossible,
        puzzle: PuzzleKind::HashTable,
        enemy_count: 6,
        time_limit: 70,
        corruption_rate: 0.6,
        required_score: 22,
        corruption_type: "hash_breakdown",
    },
    LevelDescriptor {
        id: 9,
        name: "RECURSIVE STACK OVERFLOW",
        description: "Function calls spiraling out of control. Implement memoization to prevent infinite loops.",
        difficulty: Difficulty::Impossible,
        puzzle: PuzzleKind::DynamicProgramming,
        enemy_count: 7,
        time_limit: 65,
        corruption_rate: 0.7,
        required_score: 25,
        corruption_type: "recursion_bomb",
    },
    LevelDescriptor {
        id: 10,
        name: "STACK FRAME CORRUPTION",
        description: "Call stack integrity compromised. Restore proper stack operations before system crash.",
        difficulty: Difficulty::Nightmare,
        puzzle: PuzzleKind::StackOverflow,
        enemy_count: 6,
        time_limit: 80,
        corruption_rate: 0.6,
        required_score: 28,
        corruption_type: "stack_breach",
    },
    LevelDescriptor {
        id: 11,
        name: "LINKED LIST FRAGMENTATION",
        description: "Pointer chains severed. Reconnect broken links while avoiding data hunters.",
        difficulty: Difficulty::Impossible,
        puzzle: PuzzleKind::LinkedListCorruption,
        enemy_count: 7,
        time_limit: 75,
        corruption_rate: 0.7,
        required_score: 30,
        corruption_type: "pointer_chaos",
    },
    LevelDescriptor {
        id: 12,
        name: "INFINITE RECURSION TRAP",
        description: "Functions calling themselves endlessly. Break the cycle before stack explosion.",
        difficulty: Difficulty::Impossible,
        puzzle: PuzzleKind::RecursionLoop,
        enemy_count: 8,
        time_limit: 70,
        corruption_rate: 0.8,
        required_score: 32,
        corruption_type: "recursion_hell",
    },
    LevelDescriptor {
        id: 13,
        name: "DATABASE INTEGRITY FAILURE",
        description: "Relational structures corrupted. Restore database queries and relationships.",
        difficulty: Difficulty::Legendary,
        puzzle: PuzzleKind::DatabaseCorruption,
        enemy_count: 8,
        time_limit: 90,
        corruption_rate: 0.7,
        required_score: 35,
        corruption_type: "db_meltdown",
    },
    LevelDescriptor {
        id: 14,
        name: "PROTOCOL STACK MELTDOWN",
        description: "Network layers collapsing. Rebuild communication protocols layer by layer.",
        difficulty: Difficulty::Legendary,
        puzzle: PuzzleKind::NetworkProtocol,
        enemy_count: 9,
        time_limit: 85,
        corruption_rate: 0.8,
        required_score: 38,
        corruption_type: "protocol_decay",
    },
    LevelDescriptor {
        id: 15,
        name: "SYSTEM SINGULARITY",
        description: "All subsystems failing simultaneously. Master every corruption type to escape the void.",
        difficulty: Difficulty::Legendary,
        puzzle: PuzzleKind::MultiAlgorithm,
        enemy_count: 10,
        time_limit: 120,
        corruption_rate: 0.9,
        required_score: 40,
        corruption_type: "total_collapse",
    },
];

/// All levels in id order
pub fn levels() -> &'static [LevelDescriptor] {
    &LEVELS
}

/// Look up a level by its 1-based id
pub fn get_level(id: u8) -> Result<&'static LevelDescriptor, GameError> {
    usize::from(id)
        .checked_sub(1)
        .and_then(|idx| LEVELS.get(idx))
        .ok_or(GameError::LevelNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_contiguous_and_sorted() {
        for (idx, level) in levels().iter().enumerate() {
            assert_eq!(level.index(), idx);
        }
        assert_eq!(levels().len(), LEVEL_COUNT);
    }

    #[test]
    fn test_required_score_non_decreasing() {
        for pair in levels().windows(2) {
            assert!(pair[0].required_score <= pair[1].required_score);
        }
    }

    #[test]
    fn test_get_level_bounds() {
        assert_eq!(get_level(1).unwrap().puzzle, PuzzleKind::CodeFragment);
        assert_eq!(get_level(15).unwrap().puzzle, PuzzleKind::MultiAlgorithm);
        assert_eq!(get_level(0), Err(GameError::LevelNotFound(0)));
        assert_eq!(get_level(16), Err(GameError::LevelNotFound(16)));
    }

    #[test]
    fn test_every_puzzle_kind_used_once() {
        let mut kinds: Vec<&str> = levels().iter().map(|l| l.puzzle.as_str()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), LEVEL_COUNT);
    }

    #[test]
    fn test_difficulty_ranking() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Impossible < Difficulty::Legendary);
        assert_eq!(get_level(6).unwrap().difficulty.as_str(), "Extreme");
    }
}
