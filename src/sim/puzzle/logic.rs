//! Logic gate puzzle
//!
//! Four gates with fixed inputs. Each gate is answered independently; solved
//! gates stay solved through later mistakes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PuzzleAction, RejectReason, Verdict};

pub const LOGIC_GATE_PENALTY: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    And,
    Or,
    Not,
    Xor,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Xor => "XOR",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u32,
    pub kind: GateKind,
    pub inputs: Vec<bool>,
    /// Output the player has correctly submitted, if any
    pub output: Option<bool>,
}

impl Gate {
    pub fn new(id: u32, kind: GateKind, inputs: &[bool]) -> Self {
        Self {
            id,
            kind,
            inputs: inputs.to_vec(),
            output: None,
        }
    }

    /// Truth-table output for this gate's inputs
    pub fn expected(&self) -> bool {
        let a = self.inputs.first().copied().unwrap_or(false);
        let b = self.inputs.get(1).copied().unwrap_or(false);
        match self.kind {
            GateKind::And => a && b,
            GateKind::Or => a || b,
            GateKind::Not => !a,
            GateKind::Xor => a != b,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.output == Some(self.expected())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicCircuit {
    pub gates: Vec<Gate>,
}

impl LogicCircuit {
    /// Level 2 circuit
    pub fn standard() -> Self {
        Self {
            gates: vec![
                Gate::new(1, GateKind::And, &[true, false]),
                Gate::new(2, GateKind::Or, &[false, true]),
                Gate::new(3, GateKind::Not, &[true]),
                Gate::new(4, GateKind::Xor, &[true, true]),
            ],
        }
    }

    pub fn solved_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_solved()).count()
    }

    /// First gate still waiting for a correct answer
    pub fn first_unsolved(&self) -> Option<&Gate> {
        self.gates.iter().find(|g| !g.is_solved())
    }

    pub fn is_solved(&self) -> bool {
        self.gates.iter().all(Gate::is_solved)
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::AnswerGate { id, output } = action else {
            return None;
        };
        let gate = self.gates.iter_mut().find(|g| g.id == *id)?;
        if *output != gate.expected() {
            return Some(Verdict::reject(LOGIC_GATE_PENALTY, RejectReason::WrongOutput));
        }
        gate.output = Some(*output);
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

    fn answer(id: u32, output: bool) -> PuzzleAction {
        PuzzleAction::AnswerGate { id, output }
    }

    #[test]
    fn test_truth_tables() {
        let circuit = LogicCircuit::standard();
        let expected: Vec<bool> = circuit.gates.iter().map(Gate::expected).collect();
        assert_eq!(expected, vec![false, true, false, false]);
    }

    #[test]
    fn test_and_gate_answer() {
        let mut circuit = LogicCircuit::standard();
        assert_eq!(circuit.apply(&answer(1, false)), Some(Verdict::Pending));
        assert!(circuit.gates[0].is_solved());
    }

    #[test]
    fn test_wrong_answer_keeps_other_gates() {
        let mut circuit = LogicCircuit::standard();
        circuit.apply(&answer(2, true));
        assert_eq!(
            circuit.apply(&answer(1, true)),
            Some(Verdict::reject(15, RejectReason::WrongOutput))
        );
        assert!(circuit.gates[1].is_solved());
        assert!(!circuit.gates[0].is_solved());
        assert_eq!(circuit.solved_count(), 1);
    }

    #[test]
    fn test_repeat_answer_not_double_counted() {
        let mut circuit = LogicCircuit::standard();
        circuit.apply(&answer(1, false));
        circuit.apply(&answer(1, false));
        circuit.apply(&answer(1, false));
        assert_eq!(circuit.apply(&answer(2, true)), Some(Verdict::Pending));
        assert_eq!(circuit.solved_count(), 2);
    }

    #[test]
    fn test_all_gates_solve() {
        let mut circuit = LogicCircuit::standard();
        circuit.apply(&answer(1, false));
        circuit.apply(&answer(2, true));
        circuit.apply(&answer(3, false));
        assert_eq!(circuit.apply(&answer(4, false)), Some(Verdict::Solved));
        assert!(circuit.first_unsolved().is_none());
    }

    #[test]
    fn test_unknown_gate_ignored() {
        let mut circuit = LogicCircuit::standard();
        assert_eq!(circuit.apply(&answer(9, true)), None);
        assert_eq!(circuit.apply(&PuzzleAction::Solve), None);
    }
}
