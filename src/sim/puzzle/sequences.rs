//! Ordered-replay puzzles: recursion traces, query batches, the terminal
//! and the final multi-challenge gauntlet.

use serde::{Deserialize, Serialize};

use super::{PuzzleAction, RejectReason, Verdict};

pub const RECURSION_PENALTY: u32 = 30;
pub const DYNAMIC_PROGRAMMING_PENALTY: u32 = 25;
pub const TERMINAL_PENALTY: u32 = 25;

// ── Step traces ──

/// Canonical textual steps replayed in exact order. Mistakes cost health but
/// keep progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrace {
    pub steps: Vec<String>,
    /// Index of the next expected step
    pub cursor: usize,
    pub penalty: u32,
}

impl StepTrace {
    pub fn new(steps: Vec<String>, penalty: u32) -> Self {
        Self {
            steps,
            cursor: 0,
            penalty,
        }
    }

    /// Unwinding of `factorial(n)` down to its value
    pub fn factorial(n: u64) -> Self {
        let mut steps = vec![format!("factorial({n})")];
        let mut factors: Vec<String> = Vec::new();
        for k in (2..=n).rev() {
            factors.push(k.to_string());
            steps.push(format!("{} * factorial({})", factors.join(" * "), k - 1));
        }
        factors.push("1".to_string());
        steps.push(factors.join(" * "));
        steps.push((1..=n).product::<u64>().to_string());
        Self::new(steps, RECURSION_PENALTY)
    }

    /// Top-down breakdown of `fib(n)` to its base cases
    pub fn fibonacci(n: u64) -> Self {
        let mut steps: Vec<String> = (3..=n)
            .rev()
            .map(|k| format!("fib({k}) = fib({}) + fib({})", k - 1, k - 2))
            .collect();
        steps.push("fib(2) = 1, fib(1) = 1".to_string());
        Self::new(steps, DYNAMIC_PROGRAMMING_PENALTY)
    }

    pub fn next_step(&self) -> Option<&str> {
        self.steps.get(self.cursor).map(String::as_str)
    }

    pub fn is_solved(&self) -> bool {
        self.cursor == self.steps.len()
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Step(step) = action else {
            return None;
        };
        let expected = self.next_step()?;
        if step != expected {
            return Some(Verdict::reject(self.penalty, RejectReason::WrongStep));
        }
        self.cursor += 1;
        Some(if self.is_solved() {
            Verdict::Solved
        } else {
            Verdict::Pending
        })
    }
}

// ── Query batch ──

/// Queries executed strictly in order; each execute just advances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBatch {
    pub queries: Vec<String>,
    pub executed: usize,
}

impl QueryBatch {
    /// Level 13 queries
    pub fn standard() -> Self {
        Self {
            queries: vec![
                "SELECT * FROM users WHERE age > 25".to_string(),
                "SELECT u.name, o.product FROM users u JOIN orders o ON u.id = o.user_id"
                    .to_string(),
            ],
            executed: 0,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.executed == self.queries.len()
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        if *action != PuzzleAction::Query || self.is_solved() {
            return None;
        }
        self.executed += 1;
        Some(if self.is_solved() {
            Verdict::Solved
        } else {
            Verdict::Pending
        })
    }
}

// ── Terminal ──

/// Emergency command console with a scrolling log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSession {
    pub required: Vec<String>,
    pub executed: Vec<String>,
    pub log: Vec<String>,
}

impl TerminalSession {
    pub fn new(time_limit: u32) -> Self {
        Self {
            required: ["scan", "isolate", "purge", "restore"]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            executed: Vec::new(),
            log: vec![
                "CRITICAL SYSTEM FAILURE DETECTED".to_string(),
                "INITIATING EMERGENCY PROTOCOLS...".to_string(),
                "MULTIPLE SECURITY BREACHES ACTIVE".to_string(),
                format!("TIME TO TOTAL SYSTEM COLLAPSE: {time_limit} SECONDS"),
                String::new(),
                "Available commands: scan, isolate, purge, restore, escape".to_string(),
            ],
        }
    }

    pub fn next_command(&self) -> Option<&str> {
        self.required.get(self.executed.len()).map(String::as_str)
    }

    pub fn is_solved(&self) -> bool {
        self.executed == self.required
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        let PuzzleAction::Command(input) = action else {
            return None;
        };
        let expected = self.next_command()?;
        let command = input.trim().to_lowercase();
        let correct = command == expected;
        self.log.push(format!("> {command}"));

        if !correct {
            self.log
                .push("INVALID COMMAND. System integrity compromised.".to_string());
            return Some(Verdict::reject(TERMINAL_PENALTY, RejectReason::WrongCommand));
        }
        self.executed.push(command);
        self.log.push(format!(
            "Command executed successfully. Progress: {}/{}",
            self.executed.len(),
            self.required.len()
        ));
        Some(if self.is_solved() {
            Verdict::Solved
        } else {
            Verdict::Pending
        })
    }
}

// ── Multi-challenge ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Sort,
    Search,
    Tree,
    Graph,
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub kind: ChallengeKind,
    pub prompt: String,
    pub solved: bool,
}

/// Five challenges cleared in order by a generic solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRun {
    pub challenges: Vec<Challenge>,
    pub current: usize,
}

impl ChallengeRun {
    /// Level 15 gauntlet
    pub fn standard() -> Self {
        let challenge = |kind, prompt: &str| Challenge {
            kind,
            prompt: prompt.to_string(),
            solved: false,
        };
        Self {
            challenges: vec![
                challenge(ChallengeKind::Sort, "[64, 34, 25, 12, 22, 11, 90]"),
                challenge(ChallengeKind::Search, "find 7 in [1, 3, 5, 7, 9, 11, 13]"),
                challenge(ChallengeKind::Tree, "balance"),
                challenge(ChallengeKind::Graph, "shortest_path"),
                challenge(ChallengeKind::Hash, "collision_resolution"),
            ],
            current: 0,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.challenges.iter().all(|c| c.solved)
    }

    pub(super) fn apply(&mut self, action: &PuzzleAction) -> Option<Verdict> {
        if *action != PuzzleAction::Solve {
            return None;
        }
        let challenge = self.challenges.get_mut(self.current)?;
        challenge.solved = true;
        self.current += 1;
        Some(if self.is_solved() {
            Verdict::Solved
        } else {
            Verdict::Pending
        })
    }
}
