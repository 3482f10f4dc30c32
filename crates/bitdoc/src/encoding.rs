//! Encoding descriptions and their compiled, ordered field map.
//!
//! A description alternates field-name lines with span lines:
//!
//! ```text
//! s_imm
//! 31 11-5
//! 11 4-0
//! ```
//!
//! [EncodingDef::parse] only groups lines into per-field records.
//! [Encoding::compile] then resolves every record into [Span]s with its own
//! width tracking, so nothing carries over from one field to the next.

use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    errors::ParseError,
    span::{Span, SpanLine},
};

/// A named field and its span lines, as written in the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    /// 1-based line number of the name line.
    pub line: usize,
    pub lines: Vec<SpanLine>,
}

/// Description split into fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodingDef {
    pub fields: Vec<FieldDef>,
}

impl EncodingDef {
    /// Groups the lines of `text` into [FieldDef]s. A line starting with an
    /// ASCII digit is a span line; any other non-blank line names a new field.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut fields: Vec<FieldDef> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            if text.starts_with(|c: char| c.is_ascii_digit()) {
                let span_line = SpanLine::parse(line, text)?;
                fields
                    .last_mut()
                    .ok_or(ParseError::SpanBeforeField { line })?
                    .lines
                    .push(span_line);
            } else {
                fields.push(FieldDef {
                    name: text.to_string(),
                    line,
                    lines: Vec::new(),
                });
            }
        }

        Ok(EncodingDef { fields })
    }
}

/// A field resolved into spans, with its width when right-aligned at bit 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub spans: Vec<Span>,
    /// Highest destination bit plus one.
    pub width: u32,
}

impl TryFrom<&FieldDef> for CompiledField {
    type Error = ParseError;

    fn try_from(value: &FieldDef) -> Result<Self, Self::Error> {
        let mut spans = Vec::new();
        let mut max_destination = 0;

        for line in &value.lines {
            for span in line.spans() {
                max_destination = max_destination.max(span.high);
                spans.push(span);
            }
        }

        if spans.is_empty() {
            return Err(ParseError::EmptyField {
                name: value.name.clone(),
            });
        }

        Ok(CompiledField {
            spans,
            width: max_destination + 1,
        })
    }
}

impl CompiledField {
    /// Assembles the field's value from `word` by OR-ing every span's contribution.
    pub fn extract(&self, word: u64) -> u64 {
        self.spans
            .iter()
            .fold(0, |value, span| value | span.extract(word))
    }
}

/// Compiled fields keyed by name, iterated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Encoding {
    pub fields: IndexMap<String, CompiledField>,
}

impl Encoding {
    /// Compiles every field of `def`. Fails on empty or repeated fields.
    pub fn compile(def: &EncodingDef) -> Result<Self, ParseError> {
        let mut fields = IndexMap::with_capacity(def.fields.len());

        for field in &def.fields {
            if fields.contains_key(&field.name) {
                return Err(ParseError::DuplicateField {
                    name: field.name.clone(),
                });
            }

            let compiled = CompiledField::try_from(field)?;
            debug!(
                name = %field.name,
                spans = compiled.spans.len(),
                width = compiled.width,
                "compiled field"
            );
            fields.insert(field.name.clone(), compiled);
        }

        Ok(Encoding { fields })
    }

    pub fn get(&self, name: &str) -> Option<&CompiledField> {
        self.fields.get(name)
    }

    /// Value of field `name` in `word`, or `None` for an unknown field.
    pub fn extract(&self, name: &str, word: u64) -> Option<u64> {
        self.get(name).map(|field| field.extract(word))
    }
}

impl FromStr for Encoding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::compile(&EncodingDef::parse(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_fields() {
        let def = EncodingDef::parse("\nrd\n11 4-0\n\ns_imm\n31 11-5\n11 4-0\n").unwrap();
        let names: Vec<&str> = def.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["rd", "s_imm"]);
        assert_eq!(def.fields[0].line, 2);
        assert_eq!(def.fields[1].lines.len(), 2);
        assert_eq!(def.fields[1].lines[1].line, 7);
    }

    #[test]
    fn test_span_before_field() {
        assert_eq!(
            EncodingDef::parse("\n19 4-0\nrs1\n").unwrap_err(),
            ParseError::SpanBeforeField { line: 2 }
        );
    }

    #[test]
    fn test_compile_s_imm() {
        let encoding: Encoding = "s_imm\n31 11-5\n11 4-0\n".parse().unwrap();
        let field = encoding.get("s_imm").unwrap();
        assert_eq!(field.spans, vec![Span::new(31, 11, 5), Span::new(11, 4, 0)]);
        assert_eq!(field.width, 12);
    }

    #[test]
    fn test_width_does_not_leak_between_fields() {
        let encoding: Encoding = "j_imm\n31 20 10-1 11 19-12\nrd\n11 4-0\n".parse().unwrap();
        assert_eq!(encoding.get("j_imm").unwrap().width, 21);
        assert_eq!(encoding.get("rd").unwrap().width, 5);
    }

    #[test]
    fn test_declaration_order() {
        let encoding: Encoding = "rs2\n24 4-0\nrs1\n19 4-0\nfunct3\n14 2-0\n".parse().unwrap();
        let names: Vec<&str> = encoding.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["rs2", "rs1", "funct3"]);
    }

    #[test]
    fn test_duplicate_field() {
        assert_eq!(
            "rd\n11 4-0\nrd\n11 4-0\n".parse::<Encoding>().unwrap_err(),
            ParseError::DuplicateField {
                name: "rd".to_string()
            }
        );
    }

    #[test]
    fn test_signed_destination() {
        assert_eq!(
            "rs1\n19 +4-0\n".parse::<Encoding>().unwrap_err(),
            ParseError::InvalidRange {
                line: 2,
                text: "+4-0".to_string()
            }
        );
    }

    #[test]
    fn test_empty_field() {
        assert_eq!(
            "rd\nrs1\n19 4-0\n".parse::<Encoding>().unwrap_err(),
            ParseError::EmptyField {
                name: "rd".to_string()
            }
        );
    }

    #[test]
    fn test_extract_b_imm() {
        let encoding: Encoding = "b_imm\n31 12 10-5\n11 4-1 11\n".parse().unwrap();
        // beq x0, x0, -4
        assert_eq!(encoding.extract("b_imm", 0xfe000ee3), Some(0x1ffc));
        assert_eq!(encoding.extract("nope", 0), None);
    }
}
