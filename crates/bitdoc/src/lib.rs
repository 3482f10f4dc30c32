//! # bitdoc
//!
//! Documentation helpers for instruction encodings.
//!
//! - **Tables**: list fields as `<bit> <label>` lines, most significant first.
//!   Widths follow from consecutive bit positions and the table is rendered as
//!   LaTeX or ASCII. [patch] keeps such tables up to date inside a document.
//! - **Extraction expressions**: describe each field as spans of source bits
//!   landing in destination bit ranges, and get the C expression that
//!   reassembles the field from a packed word.
//!
//! ## Example
//!
//! ```
//! use bitdoc::config::Config;
//! use bitdoc::encoding::Encoding;
//! use bitdoc::field::Field;
//! use bitdoc::layout::Layout;
//!
//! let layout = Layout::compute(&[Field::new(31, "imm"), Field::new(11, "rd"), Field::new(6, "opcode")]).unwrap();
//! let widths: Vec<u64> = layout.fields.iter().map(|f| f.width).collect();
//! assert_eq!(widths, vec![20, 5, 7]);
//!
//! let encoding: Encoding = "rs1\n19 4-0\n".parse().unwrap();
//! let text = bitdoc::expression::render(&encoding, &Config::default());
//! assert_eq!(text, "rs1 = (input >> 15) & 0x0001f /* 5 */\n");
//! ```

pub mod bits;
pub mod config;
pub mod disasm;
pub mod encoding;
pub mod errors;
pub mod expression;
pub mod field;
pub mod layout;
pub mod patch;
pub mod render;
#[cfg(feature = "serde")]
pub mod serde;
pub mod span;
