use crate::byte::{Byte, Mask, Operation};

use serde::{Deserialize, Serialize};

use std::fmt;

/// Shift amount applied by a single button press, and the amount the solver
/// considers when testing the shift operations.
pub const SHIFT_AMOUNT: u32 = 1;

/// Which single operation turns the start byte into the target, or
/// `TwoStep` when none does.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    LogicalShiftLeft,
    LogicalShiftRight,
    ArithmeticShiftLeft,
    ArithmeticShiftRight,
    AndMask,
    OrMask,
    TwoStep,
}

// Checked in order; the first hit wins.
const SINGLE_STEP: [Classification; 6] = [
    Classification::LogicalShiftLeft,
    Classification::LogicalShiftRight,
    Classification::ArithmeticShiftLeft,
    Classification::ArithmeticShiftRight,
    Classification::AndMask,
    Classification::OrMask,
];

impl Classification {
    pub fn is_single_step(self) -> bool {
        self != Classification::TwoStep
    }

    /// The operations this classification prescribes for reaching `target`.
    /// The masks are always the target itself, or zero for the clearing step.
    pub fn operations(self, target: Byte) -> Vec<Operation> {
        let op = match self {
            Classification::LogicalShiftLeft => Operation::LogicalShiftLeft(SHIFT_AMOUNT),
            Classification::LogicalShiftRight => Operation::LogicalShiftRight(SHIFT_AMOUNT),
            Classification::ArithmeticShiftLeft => Operation::ArithmeticShiftLeft(SHIFT_AMOUNT),
            Classification::ArithmeticShiftRight => {
                Operation::ArithmeticShiftRight(SHIFT_AMOUNT)
            }
            Classification::AndMask => Operation::AndMask(target.into()),
            Classification::OrMask => Operation::OrMask(target.into()),
            Classification::TwoStep => {
                return vec![
                    Operation::AndMask(Mask::zero()),
                    Operation::OrMask(target.into()),
                ]
            }
        };
        vec![op]
    }

    fn reaches(self, start: Byte, target: Byte) -> bool {
        self.operations(target)
            .into_iter()
            .fold(start, |b, op| b.apply(op))
            == target
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::LogicalShiftLeft => "logical-shift-left",
            Classification::LogicalShiftRight => "logical-shift-right",
            Classification::ArithmeticShiftLeft => "arithmetic-shift-left",
            Classification::ArithmeticShiftRight => "arithmetic-shift-right",
            Classification::AndMask => "and-mask",
            Classification::OrMask => "or-mask",
            Classification::TwoStep => "two-step",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn classify_single_step(target: Byte, start: Byte) -> Classification {
    SINGLE_STEP
        .iter()
        .copied()
        .find(|c| c.reaches(start, target))
        .unwrap_or(Classification::TwoStep)
}

/// Clears every bit with an all-zero AND mask, then sets the target's bits
/// with an OR mask. Returns (intermediate, result); works for any pair.
pub fn two_step_plan(target: Byte, start: Byte) -> (Byte, Byte) {
    let cleared = start.and_mask(Mask::zero());
    (cleared, cleared.or_mask(target.into()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub op: Operation,
    pub before: Byte,
    pub after: Byte,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub classification: Classification,
    pub start: Byte,
    pub target: Byte,
    pub steps: Vec<Step>,
}

impl Solution {
    pub fn result(&self) -> Byte {
        self.steps.last().map(|s| s.after).unwrap_or(self.start)
    }

    /// Replays the steps through the primitives and checks they chain from
    /// start to target.
    pub fn verify(&self) -> bool {
        let mut at = self.start;
        for step in self.steps.iter() {
            if step.before != at || at.apply(step.op) != step.after {
                return false;
            }
            at = step.after;
        }
        at == self.target
    }

    /// Two lines per step: the operation, then `before ==> after`.
    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(2 * self.steps.len());
        for step in self.steps.iter() {
            out.push(step.op.to_string());
            out.push(format!("{} ==> {}", step.before, step.after));
        }
        out
    }
}

pub fn solve(target: Byte, start: Byte) -> Solution {
    let classification = classify_single_step(target, start);
    let mut steps = Vec::new();
    let mut at = start;
    for op in classification.operations(target) {
        let after = at.apply(op);
        steps.push(Step {
            op,
            before: at,
            after,
        });
        at = after;
    }
    Solution {
        classification,
        start,
        target,
        steps,
    }
}
