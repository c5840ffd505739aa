use super::*;
use std::fmt;

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", notation::render(*self))
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", notation::render_mask(*self))
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn shift_name(f: &mut fmt::Formatter, name: &str, n: u32) -> fmt::Result {
    if n == 1 {
        write!(f, "{}", name)
    } else {
        write!(f, "{} by {}", name, n)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::LogicalShiftLeft(n) => shift_name(f, "Logical left shift", *n),
            Operation::LogicalShiftRight(n) => shift_name(f, "Logical right shift", *n),
            Operation::ArithmeticShiftLeft(n) => shift_name(f, "Arithmetic left shift", *n),
            Operation::ArithmeticShiftRight(n) => shift_name(f, "Arithmetic right shift", *n),
            Operation::AndMask(m) => write!(f, "AND mask with {}", m),
            Operation::OrMask(m) => write!(f, "OR mask with {}", m),
        }
    }
}

impl fmt::Display for OperandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperandError::Missing => write!(f, "missing mask operand"),
            OperandError::BadShiftAmount(s) => write!(f, "bad shift amount: '{}'", s),
            OperandError::BadMask(why) => write!(f, "bad mask: {:?}", why),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let byte = Byte::from_bits(0b1011_1000);
        assert_eq!(byte.to_string(), "10111000");
        assert_eq!(Mask::from_bits(5).to_string(), "00000101");
        assert_eq!(Operation::LogicalShiftLeft(1).to_string(), "Logical left shift");
        assert_eq!(
            Operation::ArithmeticShiftRight(2).to_string(),
            "Arithmetic right shift by 2"
        );
        assert_eq!(
            Operation::AndMask(byte.into()).to_string(),
            "AND mask with 10111000"
        );
    }
}
