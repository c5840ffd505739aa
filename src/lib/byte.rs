mod display;
pub mod notation;

use rand::Rng;
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};

use std::str::FromStr;

/// Width of every value the game manipulates. Masks and bit strings shorter
/// than this are extended on the left.
pub const BYTE_WIDTH: usize = 8;

const SIGN_BIT: u8 = 1 << (BYTE_WIDTH - 1);

/// An 8-bit two's complement value.
///
/// Bits are numbered MSB-first, so bit 0 is the sign bit. Every operation
/// returns a new `Byte`.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Byte {
    bits: u8,
}

/// An AND/OR operand, already zero-extended to `BYTE_WIDTH`.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Mask {
    bits: u8,
}

impl Byte {
    pub fn from_bits(bits: u8) -> Self {
        Byte { bits }
    }

    pub fn zero() -> Self {
        Byte { bits: 0 }
    }

    pub fn from_denary(value: i8) -> Self {
        Byte { bits: value as u8 }
    }

    /// Draws `BYTE_WIDTH` independent fair bits, MSB first.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bits = (0..BYTE_WIDTH).fold(0u8, |acc, _| (acc << 1) | rng.gen::<bool>() as u8);
        Byte { bits }
    }

    pub fn bits(self) -> u8 {
        self.bits
    }

    pub fn sign_bit(self) -> bool {
        self.bits & SIGN_BIT != 0
    }

    /// Bit `i`, counting from the most significant bit. `i` must be less
    /// than `BYTE_WIDTH`.
    pub fn bit(self, i: usize) -> bool {
        (self.bits >> (BYTE_WIDTH - 1 - i)) & 1 == 1
    }

    /// Two's complement value: -128 for the sign bit plus the weights of the
    /// remaining seven bits.
    pub fn to_denary(self) -> i8 {
        let magnitude = (self.bits & !SIGN_BIT) as i8;
        if self.sign_bit() {
            i8::MIN + magnitude
        } else {
            magnitude
        }
    }

    pub fn logical_shift_left(self, n: u32) -> Byte {
        Byte {
            bits: self.bits.checked_shl(n).unwrap_or(0),
        }
    }

    pub fn logical_shift_right(self, n: u32) -> Byte {
        Byte {
            bits: self.bits.checked_shr(n).unwrap_or(0),
        }
    }

    /// Logical shift, then the original sign bit is written back over bit 0.
    /// Only the sign position is patched: for `n > 1` the bits below it are
    /// not replicated.
    pub fn arithmetic_shift_left(self, n: u32) -> Byte {
        self.logical_shift_left(n).with_sign(self.sign_bit())
    }

    pub fn arithmetic_shift_right(self, n: u32) -> Byte {
        self.logical_shift_right(n).with_sign(self.sign_bit())
    }

    pub fn and_mask(self, mask: Mask) -> Byte {
        Byte {
            bits: self.bits & mask.bits,
        }
    }

    pub fn or_mask(self, mask: Mask) -> Byte {
        Byte {
            bits: self.bits | mask.bits,
        }
    }

    pub fn apply(self, op: Operation) -> Byte {
        match op {
            Operation::LogicalShiftLeft(n) => self.logical_shift_left(n),
            Operation::LogicalShiftRight(n) => self.logical_shift_right(n),
            Operation::ArithmeticShiftLeft(n) => self.arithmetic_shift_left(n),
            Operation::ArithmeticShiftRight(n) => self.arithmetic_shift_right(n),
            Operation::AndMask(m) => self.and_mask(m),
            Operation::OrMask(m) => self.or_mask(m),
        }
    }

    fn with_sign(self, sign: bool) -> Byte {
        let bits = self.bits & !SIGN_BIT;
        Byte {
            bits: if sign { bits | SIGN_BIT } else { bits },
        }
    }
}

impl Mask {
    pub fn from_bits(bits: u8) -> Self {
        Mask { bits }
    }

    pub fn zero() -> Self {
        Mask { bits: 0 }
    }

    pub fn ones() -> Self {
        Mask { bits: 0xff }
    }

    pub fn bits(self) -> u8 {
        self.bits
    }

    pub fn parse(text: &str) -> Result<Mask, notation::ParseError> {
        notation::parse_mask(text)
    }
}

impl From<Byte> for Mask {
    fn from(b: Byte) -> Mask {
        Mask { bits: b.bits }
    }
}

/// Whether `input` may be submitted as a mask: one to `BYTE_WIDTH`
/// characters, all `0` or `1`.
pub fn validate_mask(input: &str) -> bool {
    notation::parse_mask(input).is_ok()
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Operation {
    LogicalShiftLeft(u32),
    LogicalShiftRight(u32),
    ArithmeticShiftLeft(u32),
    ArithmeticShiftRight(u32),
    AndMask(Mask),
    OrMask(Mask),
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::LogicalShiftLeft(_) => OpKind::LogicalShiftLeft,
            Operation::LogicalShiftRight(_) => OpKind::LogicalShiftRight,
            Operation::ArithmeticShiftLeft(_) => OpKind::ArithmeticShiftLeft,
            Operation::ArithmeticShiftRight(_) => OpKind::ArithmeticShiftRight,
            Operation::AndMask(_) => OpKind::AndMask,
            Operation::OrMask(_) => OpKind::OrMask,
        }
    }
}

/// An operation without its operand, as named on the command line and in
/// the worker protocol.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum OpKind {
    LogicalShiftLeft,
    LogicalShiftRight,
    ArithmeticShiftLeft,
    ArithmeticShiftRight,
    AndMask,
    OrMask,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperandError {
    Missing,
    BadShiftAmount(String),
    BadMask(notation::ErrorKind),
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::LogicalShiftLeft => "lsl",
            OpKind::LogicalShiftRight => "lsr",
            OpKind::ArithmeticShiftLeft => "asl",
            OpKind::ArithmeticShiftRight => "asr",
            OpKind::AndMask => "and",
            OpKind::OrMask => "or",
        }
    }

    pub fn is_shift(&self) -> bool {
        match self {
            OpKind::AndMask | OpKind::OrMask => false,
            _ => true,
        }
    }

    /// Builds the full operation. Shifts default to a single bit when no
    /// operand is given; masks require one.
    pub fn with_operand(&self, operand: Option<&str>) -> Result<Operation, OperandError> {
        if self.is_shift() {
            let n = match operand {
                None => 1,
                Some(s) => s
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| OperandError::BadShiftAmount(s.to_owned()))?,
            };
            return Ok(match self {
                OpKind::LogicalShiftLeft => Operation::LogicalShiftLeft(n),
                OpKind::LogicalShiftRight => Operation::LogicalShiftRight(n),
                OpKind::ArithmeticShiftLeft => Operation::ArithmeticShiftLeft(n),
                _ => Operation::ArithmeticShiftRight(n),
            });
        }
        let mask = match operand {
            None => return Err(OperandError::Missing),
            Some(s) => notation::parse_mask(s).map_err(|e| OperandError::BadMask(e.kind().clone()))?,
        };
        Ok(match self {
            OpKind::AndMask => Operation::AndMask(mask),
            _ => Operation::OrMask(mask),
        })
    }
}

impl FromStr for OpKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lsl" | "logical-shift-left" => Ok(OpKind::LogicalShiftLeft),
            "lsr" | "logical-shift-right" => Ok(OpKind::LogicalShiftRight),
            "asl" | "arithmetic-shift-left" => Ok(OpKind::ArithmeticShiftLeft),
            "asr" | "arithmetic-shift-right" => Ok(OpKind::ArithmeticShiftRight),
            "and" => Ok(OpKind::AndMask),
            "or" => Ok(OpKind::OrMask),
            _ => Err(format!("Unknown operation: `{}`", s)),
        }
    }
}

impl Serialize for OpKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OpKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Serialize for Byte {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&notation::render(*self))
    }
}

impl<'de> Deserialize<'de> for Byte {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        notation::parse(&s).map_err(|e| de::Error::custom(format!("bad byte: {:?}", e)))
    }
}
