//! Puzzle variants
//!
//! One state shape and one validator per puzzle kind, gathered into the
//! [`PuzzleState`] sum type. Validators mutate their own variant in place and
//! report a [`Verdict`]; the session layers damage and level completion on top.
//!
//! A validator returns `None` when the action means nothing for its variant
//! (wrong action name, unknown gate, non-adjacent move...). The variant is
//! left untouched in that case.

pub mod arrange;
pub mod logic;
pub mod memory;
pub mod network;
pub mod sequences;
pub mod structures;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{LevelDescriptor, PuzzleKind};
use crate::error::GameError;

pub use arrange::CodeArrangement;
pub use logic::{Gate, GateKind, LogicCircuit};
pub use memory::MemorySequence;
pub use network::{GraphRoute, ProtocolRepair};
pub use sequences::{Challenge, ChallengeKind, ChallengeRun, QueryBatch, StepTrace, TerminalSession};
pub use structures::{Collision, HashPlacement, Link, LinkRepair, StackOp, StackReplay, TreeNode, TreeTraversal};

/// Why a validator rejected an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Arranged lines do not render the canonical code
    WrongOrder,
    /// Gate output does not match its truth table
    WrongOutput,
    /// Memory symbol differs from the sequence
    WrongSymbol,
    /// Traversal visited nodes in the wrong order
    WrongTraversal,
    /// Replayed stack does not hold the expected values
    StackMismatch,
    /// Accumulated links differ from the target list
    WrongLinks,
    /// Trace step out of order
    WrongStep,
    /// Terminal command out of sequence
    WrongCommand,
    /// Layer is not corrupted
    NotCorrupted,
    /// Key is not one of the colliding keys
    UnknownKey,
    /// Numeric input outside the accepted range
    OutOfRange,
    /// Reached the target by a longer path
    NonOptimalPath,
}

/// Outcome of a single puzzle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Accepted, puzzle not finished
    Pending,
    /// Puzzle finished
    Solved,
    /// Wrong move: costs `penalty` health and one failure
    Rejected { penalty: u32, reason: RejectReason },
}

impl Verdict {
    pub(crate) fn reject(penalty: u32, reason: RejectReason) -> Self {
        Verdict::Rejected { penalty, reason }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected { .. })
    }
}

/// A typed puzzle move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleAction {
    /// Replace the arrangement with a new permutation of line indices
    Reorder(Vec<usize>),
    /// Drag the line at `from` so it lands at `to`
    MoveLine { from: usize, to: usize },
    /// Compile the current arrangement
    Check,
    /// Submit a gate output
    AnswerGate { id: u32, output: bool },
    /// Mark the current challenge solved
    Solve,
    /// Append a memory symbol
    Input(u8),
    /// Visit a tree node by value
    Traverse(i32),
    /// Run the next stack operation
    Execute,
    /// Add a pointer between two list nodes
    Connect { from: u32, to: u32 },
    /// Submit the next trace step
    Step(String),
    /// Execute the next query
    Query,
    /// Repair a protocol layer
    Repair(i64),
    /// Place a colliding key in a table slot
    Resolve { key: String, position: i64 },
    /// Walk to an adjacent graph node
    Move(String),
    /// Type a terminal command
    Command(String),
}

#[derive(Deserialize)]
struct GateAnswer {
    id: u32,
    output: bool,
}

#[derive(Deserialize)]
struct Endpoints<T> {
    from: T,
    to: T,
}

#[derive(Deserialize)]
struct Placement {
    key: String,
    position: i64,
}

fn decode<T: DeserializeOwned>(payload: Option<&Value>) -> Option<T> {
    payload.and_then(|value| serde_json::from_value(value.clone()).ok())
}

impl PuzzleAction {
    /// Action name as presentation layers spell it
    pub fn name(&self) -> &'static str {
        match self {
            PuzzleAction::Reorder(_) => "reorder",
            PuzzleAction::MoveLine { .. } => "moveLine",
            PuzzleAction::Check => "check",
            PuzzleAction::AnswerGate { .. } | PuzzleAction::Solve => "solve",
            PuzzleAction::Input(_) => "input",
            PuzzleAction::Traverse(_) => "traverse",
            PuzzleAction::Execute => "execute",
            PuzzleAction::Connect { .. } => "connect",
            PuzzleAction::Step(_) => "step",
            PuzzleAction::Query => "query",
            PuzzleAction::Repair(_) => "repair",
            PuzzleAction::Resolve { .. } => "resolve",
            PuzzleAction::Move(_) => "move",
            PuzzleAction::Command(_) => "command",
        }
    }

    /// Build a typed action from a generic `(name, payload)` pair.
    ///
    /// Returns `None` for unknown names or payloads of the wrong shape.
    pub fn from_named(name: &str, payload: Option<&Value>) -> Option<Self> {
        let action = match name {
            "reorder" => PuzzleAction::Reorder(decode(payload)?),
            "moveLine" => {
                let Endpoints { from, to } = decode::<Endpoints<usize>>(payload)?;
                PuzzleAction::MoveLine { from, to }
            }
            "check" => PuzzleAction::Check,
            "solve" => match payload {
                Some(value) if !value.is_null() => {
                    let GateAnswer { id, output } = decode(payload)?;
                    PuzzleAction::AnswerGate { id, output }
                }
                _ => PuzzleAction::Solve,
            },
            "input" => PuzzleAction::Input(decode(payload)?),
            "traverse" => PuzzleAction::Traverse(decode(payload)?),
            "execute" => PuzzleAction::Execute,
            "connect" => {
                let Endpoints { from, to } = decode::<Endpoints<u32>>(payload)?;
                PuzzleAction::Connect { from, to }
            }
            "step" => PuzzleAction::Step(decode(payload)?),
            "query" => PuzzleAction::Query,
            "repair" => PuzzleAction::Repair(decode(payload)?),
            "resolve" => {
                let Placement { key, position } = decode(payload)?;
                PuzzleAction::Resolve { key, position }
            }
            "move" => PuzzleAction::Move(decode(payload)?),
            "command" => PuzzleAction::Command(decode(payload)?),
            _ => return None,
        };
        Some(action)
    }
}

/// Live puzzle state, one variant per puzzle kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PuzzleState {
    CodeFragment(CodeArrangement),
    LogicGate(LogicCircuit),
    MemorySequence(MemorySequence),
    AlgorithmReconstruction(CodeArrangement),
    TerminalHacking(TerminalSession),
    BinaryTree(TreeTraversal),
    GraphTraversal(GraphRoute),
    HashTable(HashPlacement),
    DynamicProgramming(StepTrace),
    MultiAlgorithm(ChallengeRun),
    StackOverflow(StackReplay),
    LinkedListCorruption(LinkRepair),
    RecursionLoop(StepTrace),
    DatabaseCorruption(QueryBatch),
    NetworkProtocol(ProtocolRepair),
}

impl PuzzleState {
    /// Fresh puzzle for a level. Only the memory sequence draws from `rng`.
    pub fn new<R: Rng + ?Sized>(level: &LevelDescriptor, rng: &mut R) -> Self {
        match level.puzzle {
            PuzzleKind::CodeFragment => PuzzleState::CodeFragment(CodeArrangement::code_fragment()),
            PuzzleKind::LogicGate => PuzzleState::LogicGate(LogicCircuit::standard()),
            PuzzleKind::MemorySequence => {
                PuzzleState::MemorySequence(MemorySequence::generate(level.id, rng))
            }
            PuzzleKind::AlgorithmReconstruction => {
                PuzzleState::AlgorithmReconstruction(CodeArrangement::bubble_sort())
            }
            PuzzleKind::TerminalHacking => {
                PuzzleState::TerminalHacking(TerminalSession::new(level.time_limit))
            }
            PuzzleKind::BinaryTree => PuzzleState::BinaryTree(TreeTraversal::standard()),
            PuzzleKind::GraphTraversal => PuzzleState::GraphTraversal(GraphRoute::standard()),
            PuzzleKind::HashTable => PuzzleState::HashTable(HashPlacement::standard()),
            PuzzleKind::DynamicProgramming => {
                PuzzleState::DynamicProgramming(StepTrace::fibonacci(8))
            }
            PuzzleKind::MultiAlgorithm => PuzzleState::MultiAlgorithm(ChallengeRun::standard()),
            PuzzleKind::StackOverflow => PuzzleState::StackOverflow(StackReplay::standard()),
            PuzzleKind::LinkedListCorruption => {
                PuzzleState::LinkedListCorruption(LinkRepair::standard())
            }
            PuzzleKind::RecursionLoop => PuzzleState::RecursionLoop(StepTrace::factorial(4)),
            PuzzleKind::DatabaseCorruption => {
                PuzzleState::DatabaseCorruption(QueryBatch::standard())
            }
            PuzzleKind::NetworkProtocol => PuzzleState::NetworkProtocol(ProtocolRepair::standard()),
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        match self {
            PuzzleState::CodeFragment(_) => PuzzleKind::CodeFragment,
            PuzzleState::LogicGate(_) => PuzzleKind::LogicGate,
            PuzzleState::MemorySequence(_) => PuzzleKind::MemorySequence,
            PuzzleState::AlgorithmReconstruction(_) => PuzzleKind::AlgorithmReconstruction,
            PuzzleState::TerminalHacking(_) => PuzzleKind::TerminalHacking,
            PuzzleState::BinaryTree(_) => PuzzleKind::BinaryTree,
            PuzzleState::GraphTraversal(_) => PuzzleKind::GraphTraversal,
            PuzzleState::HashTable(_) => PuzzleKind::HashTable,
            PuzzleState::DynamicProgramming(_) => PuzzleKind::DynamicProgramming,
            PuzzleState::MultiAlgorithm(_) => PuzzleKind::MultiAlgorithm,
            PuzzleState::StackOverflow(_) => PuzzleKind::StackOverflow,
            PuzzleState::LinkedListCorruption(_) => PuzzleKind::LinkedListCorruption,
            PuzzleState::RecursionLoop(_) => PuzzleKind::RecursionLoop,
            PuzzleState::DatabaseCorruption(_) => PuzzleKind::DatabaseCorruption,
            PuzzleState::NetworkProtocol(_) => PuzzleKind::NetworkProtocol,
        }
    }

    /// Pure comparison of the live state against the target captured at init
    pub fn is_solved(&self) -> bool {
        match self {
            PuzzleState::CodeFragment(p) | PuzzleState::AlgorithmReconstruction(p) => p.is_solved(),
            PuzzleState::LogicGate(p) => p.is_solved(),
            PuzzleState::MemorySequence(p) => p.is_solved(),
            PuzzleState::TerminalHacking(p) => p.is_solved(),
            PuzzleState::BinaryTree(p) => p.is_solved(),
            PuzzleState::GraphTraversal(p) => p.is_solved(),
            PuzzleState::HashTable(p) => p.is_solved(),
            PuzzleState::DynamicProgramming(p) | PuzzleState::RecursionLoop(p) => p.is_solved(),
            PuzzleState::MultiAlgorithm(p) => p.is_solved(),
            PuzzleState::StackOverflow(p) => p.is_solved(),
            PuzzleState::LinkedListCorruption(p) => p.is_solved(),
            PuzzleState::DatabaseCorruption(p) => p.is_solved(),
            PuzzleState::NetworkProtocol(p) => p.is_solved(),
        }
    }

    /// Route an action to the active variant's validator
    pub fn apply(&mut self, action: &PuzzleAction) -> Result<Verdict, GameError> {
        let kind = self.kind();
        let verdict = match self {
            PuzzleState::CodeFragment(p) | PuzzleState::AlgorithmReconstruction(p) => p.apply(action),
            PuzzleState::LogicGate(p) => p.apply(action),
            PuzzleState::MemorySequence(p) => p.apply(action),
            PuzzleState::TerminalHacking(p) => p.apply(action),
            PuzzleState::BinaryTree(p) => p.apply(action),
            PuzzleState::GraphTraversal(p) => p.apply(action),
            PuzzleState::HashTable(p) => p.apply(action),
            PuzzleState::DynamicProgramming(p) | PuzzleState::RecursionLoop(p) => p.apply(action),
            PuzzleState::MultiAlgorithm(p) => p.apply(action),
            PuzzleState::StackOverflow(p) => p.apply(action),
            PuzzleState::LinkedListCorruption(p) => p.apply(action),
            PuzzleState::DatabaseCorruption(p) => p.apply(action),
            PuzzleState::NetworkProtocol(p) => p.apply(action),
        };
        verdict.ok_or_else(|| GameError::invalid_action(action.name(), kind))
    }
}
