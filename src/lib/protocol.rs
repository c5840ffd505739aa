extern crate serde;
use serde::{Deserialize, Serialize};

use crate::byte::{Byte, OpKind};
use crate::game::{Direction, Mode};
use crate::solve::Classification;

/// One request per line on the worker's stdin.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "op", content = "body", rename_all = "lowercase")]
pub enum Command {
    Generate,
    Mode {
        mode: Mode,
    },
    Shift {
        direction: Direction,
    },
    Mask {
        mask: String,
    },
    State,
    Solution,
    Apply {
        operation: OpKind,
        byte: Byte,
        operand: Option<String>,
    },
    Decode {
        byte: Byte,
    },
    ValidateMask {
        mask: String,
    },
    Solve {
        start: Byte,
        target: Byte,
    },
    Shutdown,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "op", content = "body", rename_all = "lowercase")]
pub enum Response {
    Ok,
    Err {
        error: String,
    },
    Round {
        start: Byte,
        target: Byte,
        current: Byte,
        denary: i8,
        steps: usize,
        solved: bool,
    },
    Byte {
        byte: Byte,
        denary: i8,
    },
    Valid {
        valid: bool,
    },
    Solution {
        classification: Classification,
        messages: Vec<String>,
    },
}
