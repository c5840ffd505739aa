use crate::byte::{notation, Byte, Operation};
use crate::solve::{self, Solution, SHIFT_AMOUNT};

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::mem;
use std::str::FromStr;

pub const HELP: &[&str] = &[
    "Change your current binary into the target binary with as few steps as possible",
    "You can use logical shift, arithmetic shift, AND masking or OR masking to reach the target",
    "To start the game, generate a new pair of binaries",
    "To perform a mask, select the type of mask and enter the mask",
    "To perform a shift, select the mode then shift left or right",
    "Switch between logical and arithmetic shift by reselecting the mode",
    "Once you reach the target binary, the quickest solution will be shown",
    "To play again generate new binaries",
];

/// The control the player currently has selected. Exactly one can be
/// active at a time.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "logical")]
    LogicalShift,
    #[serde(rename = "arithmetic")]
    ArithmeticShift,
    #[serde(rename = "and")]
    AndMask,
    #[serde(rename = "or")]
    OrMask,
}

impl Mode {
    pub fn is_shift(self) -> bool {
        match self {
            Mode::LogicalShift | Mode::ArithmeticShift => true,
            Mode::AndMask | Mode::OrMask => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::LogicalShift => "logical",
            Mode::ArithmeticShift => "arithmetic",
            Mode::AndMask => "and",
            Mode::OrMask => "or",
        }
    }
}

impl FromStr for Mode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logical" | "l" => Ok(Mode::LogicalShift),
            "arithmetic" | "a" => Ok(Mode::ArithmeticShift),
            "and" => Ok(Mode::AndMask),
            "or" => Ok(Mode::OrMask),
            _ => Err(format!("Unknown mode: `{}`", s)),
        }
    }
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub start: Byte,
    pub target: Byte,
    pub current: Byte,
    pub steps: usize,
    pub mode: Option<Mode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Active(Round),
    Solved(Round),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    NotActive,
    WrongMode,
    InvalidMask(notation::ErrorKind),
}

#[derive(Clone, Debug)]
pub struct Session {
    state: State,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session { state: State::Idle }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn round(&self) -> Option<&Round> {
        match self.state {
            State::Idle => None,
            State::Active(ref r) | State::Solved(ref r) => Some(r),
        }
    }

    pub fn is_solved(&self) -> bool {
        match self.state {
            State::Solved(_) => true,
            _ => false,
        }
    }

    /// Starts a new round from a random pair, redrawing the start byte
    /// until it differs from the target.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Round {
        let target = Byte::random(rng);
        let mut start = Byte::random(rng);
        while start == target {
            start = Byte::random(rng);
        }
        self.begin(start, target);
        match self.state {
            State::Active(ref r) => r,
            _ => unreachable!(),
        }
    }

    /// Starts a round from a fixed pair. A pair that is already equal is
    /// solved in zero steps.
    pub fn begin(&mut self, start: Byte, target: Byte) {
        self.state = State::Active(Round {
            start,
            target,
            current: start,
            steps: 0,
            mode: None,
        });
        if start == target {
            self.finish();
        }
    }

    pub fn select_mode(&mut self, mode: Mode) -> Result<(), ActionError> {
        self.active_round()?.mode = Some(mode);
        Ok(())
    }

    /// Shifts the current byte by one bit using the selected shift mode.
    pub fn shift(&mut self, direction: Direction) -> Result<Operation, ActionError> {
        let op = match (self.active_round()?.mode, direction) {
            (Some(Mode::LogicalShift), Direction::Left) => {
                Operation::LogicalShiftLeft(SHIFT_AMOUNT)
            }
            (Some(Mode::LogicalShift), Direction::Right) => {
                Operation::LogicalShiftRight(SHIFT_AMOUNT)
            }
            (Some(Mode::ArithmeticShift), Direction::Left) => {
                Operation::ArithmeticShiftLeft(SHIFT_AMOUNT)
            }
            (Some(Mode::ArithmeticShift), Direction::Right) => {
                Operation::ArithmeticShiftRight(SHIFT_AMOUNT)
            }
            _ => return Err(ActionError::WrongMode),
        };
        self.perform(op)?;
        Ok(op)
    }

    /// Applies `input` with the selected mask mode. Rejected input leaves
    /// the round untouched and does not count as a step.
    pub fn submit_mask(&mut self, input: &str) -> Result<Operation, ActionError> {
        let mode = self.active_round()?.mode;
        let mask = match mode {
            Some(Mode::AndMask) | Some(Mode::OrMask) => notation::parse_mask(input)
                .map_err(|e| ActionError::InvalidMask(e.kind().clone()))?,
            _ => return Err(ActionError::WrongMode),
        };
        let op = if mode == Some(Mode::AndMask) {
            Operation::AndMask(mask)
        } else {
            Operation::OrMask(mask)
        };
        self.perform(op)?;
        Ok(op)
    }

    /// The recommended solution, available once the round is solved.
    pub fn solution(&self) -> Option<Solution> {
        match self.state {
            State::Solved(ref r) => Some(solve::solve(r.target, r.start)),
            _ => None,
        }
    }

    fn active_round(&mut self) -> Result<&mut Round, ActionError> {
        match self.state {
            State::Active(ref mut r) => Ok(r),
            _ => Err(ActionError::NotActive),
        }
    }

    fn perform(&mut self, op: Operation) -> Result<Byte, ActionError> {
        let round = self.active_round()?;
        round.current = round.current.apply(op);
        round.steps += 1;
        let current = round.current;
        if current == round.target {
            self.finish();
        }
        Ok(current)
    }

    fn finish(&mut self) {
        if let State::Active(round) = mem::replace(&mut self.state, State::Idle) {
            self.state = State::Solved(Round { mode: None, ..round });
        }
    }
}
