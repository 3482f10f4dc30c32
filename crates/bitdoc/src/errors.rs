//! Error types for parsing descriptions, laying out tables and patching documents.

/// Errors produced when reading a field list or an encoding description.
///
/// Line numbers are 1-based and count every line of the input, blank ones included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A bit position or source bit is not a non-negative integer.
    #[error("line {line}: invalid bit position `{text}`")]
    InvalidBitPosition { line: usize, text: String },
    /// A table field line has a bit position but no label.
    #[error("line {line}: missing field label")]
    MissingLabel { line: usize },
    /// A destination range is malformed or has `low > high`.
    #[error("line {line}: invalid destination range `{text}`")]
    InvalidRange { line: usize, text: String },
    /// A destination bit does not fit in a 64-bit word.
    #[error("line {line}: destination bit {bit} is out of range")]
    BitOutOfRange { line: usize, bit: u32 },
    /// A span line has no destination ranges after its source bit.
    #[error("line {line}: span line has no destination ranges")]
    MissingDestination { line: usize },
    /// A span line appears before any field name.
    #[error("line {line}: span line before any field name")]
    SpanBeforeField { line: usize },
    /// A field name was declared twice.
    #[error("field `{name}` is declared more than once")]
    DuplicateField { name: String },
    /// A field name is followed by no span lines.
    #[error("field `{name}` has no spans")]
    EmptyField { name: String },
}

/// Errors produced when deriving widths from a field list (see [crate::layout::Layout]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// There is no field to derive the last width from.
    #[error("field list is empty")]
    EmptyFieldList,
    /// Bit positions must strictly decrease, most significant field first.
    #[error("bit position {bit} of field {index} is not below the previous position {previous}")]
    NotDecreasing {
        index: usize,
        bit: u32,
        previous: u32,
    },
}

/// Errors produced when patching a document (see [crate::patch]).
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The document has no definition block at all.
    #[error("no `{marker}` line found")]
    NoDefinitionBlock { marker: &'static str },
    /// Input ended inside a definition block.
    #[error("definition block opened on line {line} is never closed by `{marker}`")]
    UnterminatedDefinition { line: usize, marker: &'static str },
    /// Input ended inside a previously generated output block.
    #[error("output block opened on line {line} is never closed by `{marker}`")]
    UnterminatedOutput { line: usize, marker: &'static str },
    /// An output block that does not follow a definition block.
    #[error("output block on line {line} does not follow a definition block")]
    OrphanedOutput { line: usize },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
