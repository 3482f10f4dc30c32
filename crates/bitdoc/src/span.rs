//! Spans: contiguous runs of source bits mapped onto a destination bit range.

use crate::{
    bits::{self, format_mask, shift_word},
    errors::ParseError,
};

/// Inclusive destination bit range `high..=low`, written `"<high>-<low>"` or `"<bit>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub high: u32,
    pub low: u32,
}

impl BitRange {
    pub fn new(high: u32, low: u32) -> Self {
        BitRange { high, low }
    }

    /// Parses one destination token. `line` is the 1-based line number used in errors.
    pub fn parse(line: usize, text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidRange {
            line,
            text: text.to_string(),
        };

        let (high, low) = match text.split_once('-') {
            Some((high, low)) => (high, low),
            None => (text, text),
        };
        let high = bits::parse_bit(high).ok_or_else(invalid)?;
        let low = bits::parse_bit(low).ok_or_else(invalid)?;

        if low > high {
            return Err(invalid());
        }
        if high >= 64 {
            return Err(ParseError::BitOutOfRange { line, bit: high });
        }

        Ok(BitRange { high, low })
    }

    pub fn width(&self) -> u32 {
        bits::span_width(self.high, self.low)
    }
}

/// One line of an encoding description: an explicit source bit followed by
/// destination ranges that take consecutive source bits downwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanLine {
    /// 1-based line number in the description.
    pub line: usize,
    pub source: u32,
    pub destinations: Vec<BitRange>,
}

impl SpanLine {
    /// Parses `<source-bit> <dest-range> [<dest-range> ...]`.
    pub fn parse(line: usize, text: &str) -> Result<Self, ParseError> {
        let mut tokens = text.split_whitespace();

        let source = tokens.next().unwrap_or_default();
        let source = bits::parse_bit(source).ok_or_else(|| ParseError::InvalidBitPosition {
            line,
            text: source.to_string(),
        })?;

        let destinations = tokens
            .map(|token| BitRange::parse(line, token))
            .collect::<Result<Vec<_>, _>>()?;

        if destinations.is_empty() {
            return Err(ParseError::MissingDestination { line });
        }

        Ok(SpanLine {
            line,
            source,
            destinations,
        })
    }

    /// Resolves the line into [Span]s, advancing the source cursor past each range.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        let mut source = i64::from(self.source);
        self.destinations.iter().map(move |range| {
            let span = Span {
                source,
                high: range.high,
                low: range.low,
            };
            source -= i64::from(range.width());
            span
        })
    }
}

/// Source bits `source..=source - (high - low)` land in destination bits `high..=low`.
///
/// `source` may go negative when a line maps more bits than lie below its source bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub source: i64,
    pub high: u32,
    pub low: u32,
}

impl Span {
    pub fn new(source: i64, high: u32, low: u32) -> Self {
        Span { source, high, low }
    }

    pub fn width(&self) -> u32 {
        bits::span_width(self.high, self.low)
    }

    /// Right shift that moves the span into place; negative means a left shift.
    pub fn shift(&self) -> i64 {
        self.source - i64::from(self.high)
    }

    /// Ones at the destination bits of this span.
    pub fn mask(&self) -> u64 {
        bits::mask(self.high, self.low)
    }

    /// C expression for this span, e.g. `(input >> 15) & 0x0001f`.
    pub fn term(&self, source_name: &str) -> String {
        let mask = format_mask(self.mask());
        let shift = self.shift();

        if shift > 0 {
            format!("({source_name} >> {shift}) & {mask}")
        } else if shift < 0 {
            format!("({source_name} << {}) & {mask}", -shift)
        } else {
            format!("{source_name} & {mask}")
        }
    }

    /// Evaluates [Span::term] on `word`.
    pub fn extract(&self, word: u64) -> u64 {
        shift_word(word, self.shift()) & self.mask()
    }
}
