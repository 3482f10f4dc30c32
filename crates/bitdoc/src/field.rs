//! Definition of table fields used to build a [crate::layout::Layout].

use crate::{bits, errors::ParseError};

/// A single labelled field of a bit-field table, identified by its most significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Bit position where the field starts (its most significant bit).
    pub bit: u32,
    /// Text printed in the field's cell.
    pub label: String,
}

impl Field {
    pub fn new(bit: u32, label: impl Into<String>) -> Self {
        Field {
            bit,
            label: label.into(),
        }
    }

    /// Parses `<bit> <label>` from one line. `line` is the 1-based line number used in errors.
    ///
    /// A leading LaTeX comment character is ignored. Blank lines yield `None`.
    pub fn parse_line(line: usize, text: &str) -> Result<Option<Self>, ParseError> {
        let text = text.trim();
        let text = text.strip_prefix('%').unwrap_or(text).trim();
        if text.is_empty() {
            return Ok(None);
        }

        let (bit, label) = match text.split_once(char::is_whitespace) {
            Some((bit, label)) => (bit, label.trim()),
            None => (text, ""),
        };

        let bit = bits::parse_bit(bit).ok_or_else(|| ParseError::InvalidBitPosition {
            line,
            text: bit.to_string(),
        })?;

        if label.is_empty() {
            return Err(ParseError::MissingLabel { line });
        }

        Ok(Some(Field::new(bit, label)))
    }
}

/// Parses every non-blank line of `text` as a [Field], in order.
pub fn parse_fields(text: &str) -> Result<Vec<Field>, ParseError> {
    let mut fields = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if let Some(field) = Field::parse_line(index + 1, line)? {
            fields.push(field);
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields("31 imm\n11 rd\n\n6 opcode\n").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new(31, "imm"),
                Field::new(11, "rd"),
                Field::new(6, "opcode")
            ]
        );
    }

    #[test]
    fn test_parse_commented_line() {
        let field = Field::parse_line(1, "%  24 rs2").unwrap();
        assert_eq!(field, Some(Field::new(24, "rs2")));
    }

    #[test]
    fn test_parse_label_keeps_inner_spaces() {
        let field = Field::parse_line(1, "31 imm[11:0] hi").unwrap();
        assert_eq!(field, Some(Field::new(31, "imm[11:0] hi")));
    }

    #[test]
    fn test_parse_invalid_bit() {
        assert_eq!(
            parse_fields("31 imm\nxx rd\n").unwrap_err(),
            ParseError::InvalidBitPosition {
                line: 2,
                text: "xx".to_string()
            }
        );
    }

    #[test]
    fn test_parse_signed_bit() {
        assert_eq!(
            Field::parse_line(4, "% +31 imm").unwrap_err(),
            ParseError::InvalidBitPosition {
                line: 4,
                text: "+31".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_label() {
        assert_eq!(
            parse_fields("\n7\n").unwrap_err(),
            ParseError::MissingLabel { line: 2 }
        );
    }
}
