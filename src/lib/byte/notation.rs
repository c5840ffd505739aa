use super::*;

pub fn render(b: Byte) -> String {
    format!("{:08b}", b.bits())
}

pub fn render_mask(m: Mask) -> String {
    format!("{:08b}", m.bits())
}

/// The shortest bit string that `canonicalize` sign-extends back to `b`.
pub fn render_minimal(b: Byte) -> String {
    let full = render(b);
    let bytes = full.as_bytes();
    let mut start = 0;
    while start < BYTE_WIDTH - 1 && bytes[start] == bytes[start + 1] {
        start += 1;
    }
    full[start..].to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Empty,
    TooLong,
    WrongLength,
    BadCharacter(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError<'a> {
    loc: &'a str,
    why: ErrorKind,
}

impl<'a> ParseError<'a> {
    pub fn kind(&self) -> &ErrorKind {
        &self.why
    }

    pub fn loc(&self) -> &'a str {
        self.loc
    }
}

// Returns the value of `text` read as an unsigned binary number, along with
// the number of digits.
fn parse_bits(text: &str) -> Result<(u8, usize), ParseError> {
    if text.is_empty() {
        return Err(ParseError {
            loc: text,
            why: ErrorKind::Empty,
        });
    }
    let mut value: u8 = 0;
    for (i, (off, ch)) in text.char_indices().enumerate() {
        let bit = match ch {
            '0' => 0,
            '1' => 1,
            _ => {
                return Err(ParseError {
                    loc: &text[off..off + ch.len_utf8()],
                    why: ErrorKind::BadCharacter(ch),
                })
            }
        };
        if i >= BYTE_WIDTH {
            return Err(ParseError {
                loc: text,
                why: ErrorKind::TooLong,
            });
        }
        value = (value << 1) | bit;
    }
    Ok((value, text.len()))
}

/// Sign-extends a bit string of one to `BYTE_WIDTH` digits: a leading `1`
/// pads with ones, a leading `0` with zeros.
pub fn canonicalize(text: &str) -> Result<Byte, ParseError> {
    let (value, len) = parse_bits(text)?;
    if len < BYTE_WIDTH && text.starts_with('1') {
        return Ok(Byte::from_bits(value | (0xff << len)));
    }
    Ok(Byte::from_bits(value))
}

/// Parses an already-canonical byte: exactly `BYTE_WIDTH` binary digits.
pub fn parse(text: &str) -> Result<Byte, ParseError> {
    let (value, len) = parse_bits(text)?;
    if len != BYTE_WIDTH {
        return Err(ParseError {
            loc: text,
            why: ErrorKind::WrongLength,
        });
    }
    Ok(Byte::from_bits(value))
}

/// Parses user mask input, zero-extending it to `BYTE_WIDTH`.
pub fn parse_mask(text: &str) -> Result<Mask, ParseError> {
    let (value, _) = parse_bits(text)?;
    Ok(Mask::from_bits(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        let cases = &[
            ("0", "00000000"),
            ("1", "11111111"),
            ("101", "11111101"),
            ("011", "00000011"),
            ("11001", "11111001"),
            ("0101", "00000101"),
            ("1000000", "11000000"),
            ("10111000", "10111000"),
            ("00000001", "00000001"),
        ];
        for (input, want) in cases {
            let got = canonicalize(input).unwrap();
            assert_eq!(render(got), *want, "canonicalize({})", input);
        }
    }

    #[test]
    fn test_canonicalize_idempotent() {
        for v in 0..=255u8 {
            let s = render(Byte::from_bits(v));
            assert_eq!(render(canonicalize(&s).unwrap()), s);
            assert_eq!(parse(&s).unwrap(), Byte::from_bits(v));
        }
    }

    #[test]
    fn test_minimal_round_trip() {
        for v in -128..=127i8 {
            let byte = Byte::from_denary(v);
            let minimal = render_minimal(byte);
            let back = canonicalize(&minimal).unwrap();
            assert_eq!(back.to_denary(), v, "minimal={}", minimal);
        }
        assert_eq!(render_minimal(Byte::from_denary(-3)), "101");
        assert_eq!(render_minimal(Byte::from_denary(5)), "0101");
        assert_eq!(render_minimal(Byte::from_denary(0)), "0");
        assert_eq!(render_minimal(Byte::from_denary(-1)), "1");
        assert_eq!(render_minimal(Byte::from_denary(-128)), "10000000");
    }

    #[test]
    fn test_errors() {
        let cases = &[
            ("", ErrorKind::Empty),
            ("100000000", ErrorKind::TooLong),
            ("10x", ErrorKind::BadCharacter('x')),
            ("1111111111111111", ErrorKind::TooLong),
        ];
        for (input, why) in cases {
            match canonicalize(input) {
                Ok(b) => panic!("canonicalize({:?}) = {}, expected {:?}", input, b, why),
                Err(e) => assert_eq!(e.kind(), why, "canonicalize({:?})", input),
            }
        }

        let err = parse("1011").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::WrongLength);
        let err = parse("1011201").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::BadCharacter('2'));
        assert_eq!(err.loc(), "2");
    }

    #[test]
    fn test_parse_mask() {
        assert_eq!(parse_mask("1").unwrap(), Mask::from_bits(1));
        assert_eq!(parse_mask("10111001").unwrap(), Mask::from_bits(0b1011_1001));
        assert_eq!(render_mask(parse_mask("11").unwrap()), "00000011");
        assert!(parse_mask("").is_err());
        assert!(parse_mask("111111111").is_err());
    }
}
