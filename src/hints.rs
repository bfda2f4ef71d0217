//! Tiered hint tables
//!
//! Every puzzle kind carries three hints, from general to near-answer. Shown
//! hints are prefixed with their tier marker (💡 general, 🔍 specific, ⚡
//! near-answer). The logic gate puzzle also builds hints from live state,
//! pointing at the first gate that is still unanswered.

use crate::catalog::PuzzleKind;
use crate::consts::MAX_HINT_LEVEL;
use crate::sim::puzzle::{LogicCircuit, PuzzleState};

/// Marker shown in front of each hint tier
pub const TIER_MARKERS: [&str; 3] = ["💡", "🔍", "⚡"];

/// Static hint tiers for a puzzle kind, without markers
pub fn static_hints(kind: PuzzleKind) -> &'static [&'static str; 3] {
    match kind {
        PuzzleKind::CodeFragment => &[
            "Try to arrange the code lines in logical execution order",
            "Look for function declaration, condition check, and return statements",
            "The function should start with 'function escape()' and end with the closing brace",
        ],
        PuzzleKind::LogicGate => &[
            "Remember basic logic: AND needs both inputs true, OR needs at least one true",
            "NOT gate inverts the input, XOR is true when inputs are different",
            "Check each gate type carefully - AND, OR, NOT, XOR have different rules",
        ],
        PuzzleKind::MemorySequence => &[
            "Watch the sequence carefully and memorize the pattern",
            "Click the colors in the exact same order they were shown",
            "If you make a mistake, the sequence resets - start over from the beginning",
        ],
        PuzzleKind::AlgorithmReconstruction => &[
            "Bubble sort compares adjacent elements and swaps them if they're in wrong order",
            "The outer loop controls passes, inner loop does the comparisons",
            "Structure: function declaration → outer loop → inner loop → comparison → swap → return",
        ],
        PuzzleKind::TerminalHacking => &[
            "Follow the command sequence shown at the bottom of the terminal",
            "Start with 'scan' to detect threats, then 'isolate' them",
            "Complete sequence: scan → isolate → purge → restore",
        ],
        PuzzleKind::BinaryTree => &[
            "In-order traversal visits: left subtree → root → right subtree",
            "Start from the leftmost node and work your way up and right",
            "Correct order: 20, 30, 40, 50, 60, 70, 80",
        ],
        PuzzleKind::GraphTraversal => &[
            "Find the shortest path from A to F through the network",
            "Look for direct connections between nodes",
            "Optimal path: A → C → F (only 3 steps)",
        ],
        PuzzleKind::HashTable => &[
            "Use linear probing to resolve hash collisions",
            "If a slot is occupied, try the next available slot",
            "Place each key in the first empty slot after its hash position",
        ],
        PuzzleKind::DynamicProgramming => &[
            "Break down the fibonacci calculation step by step",
            "Each step shows how larger problems depend on smaller ones",
            "Follow the recursive breakdown from fib(8) down to base cases",
        ],
        PuzzleKind::StackOverflow => &[
            "Execute stack operations in the given sequence",
            "Push adds elements to top, pop removes from top",
            "Follow each operation carefully and watch the stack state change",
        ],
        PuzzleKind::LinkedListCorruption => &[
            "Reconnect the nodes in alphabetical order: A→B→C→D",
            "Click the connection buttons to link nodes together",
            "Each node should point to the next one in sequence",
        ],
        PuzzleKind::RecursionLoop => &[
            "Trace through the factorial calculation step by step",
            "Each recursive call multiplies by the current number",
            "Follow the pattern: 4! = 4 × 3 × 2 × 1 = 24",
        ],
        PuzzleKind::DatabaseCorruption => &[
            "Execute the SQL queries in order to restore database integrity",
            "First query filters users, second query joins tables",
            "Click EXECUTE on each query when it becomes available",
        ],
        PuzzleKind::NetworkProtocol => &[
            "Repair the corrupted OSI layers (highlighted in red)",
            "Click REPAIR on layers that show corruption",
            "Focus on layers 3, 5, and 7 (Network, Session, Application)",
        ],
        PuzzleKind::MultiAlgorithm => &[
            "Complete each algorithm challenge in sequence",
            "Start with sorting, then search, tree, graph, and hash",
            "Each challenge tests a different computer science concept",
        ],
    }
}

/// Hint text for the live puzzle at `tier` (clamped to the top tier)
pub fn hint_for(puzzle: &PuzzleState, tier: u8) -> String {
    let tier = usize::from(tier.min(MAX_HINT_LEVEL));
    let text = match puzzle {
        PuzzleState::LogicGate(circuit) => gate_hint(circuit, tier),
        _ => None,
    }
    .unwrap_or_else(|| static_hints(puzzle.kind())[tier].to_string());
    format!("{} {text}", TIER_MARKERS[tier])
}

fn gate_hint(circuit: &LogicCircuit, tier: usize) -> Option<String> {
    if tier == 0 {
        return None;
    }
    let gate = circuit.first_unsolved()?;
    let inputs = gate
        .inputs
        .iter()
        .map(|&bit| if bit { "1" } else { "0" })
        .collect::<Vec<_>>()
        .join(", ");
    Some(if tier == 1 {
        format!(
            "Gate {} is still unsolved ({} of {} answered): apply the {} rule to inputs [{}]",
            gate.id,
            circuit.solved_count(),
            circuit.gates.len(),
            gate.kind,
            inputs
        )
    } else {
        format!(
            "Gate {} ({} of [{}]) outputs {}",
            gate.id,
            gate.kind,
            inputs,
            u8::from(gate.expected())
        )
    })
}
