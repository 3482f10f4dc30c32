//! Layout: field widths derived from consecutive bit positions.

use tracing::debug;

use crate::{errors::LayoutError, field::Field};

/// A [Field] with its derived width in bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub bit: u32,
    pub label: String,
    pub width: u64,
}

/// Widths of an ordered field list. Use [Layout::compute] to build from [Field]s,
/// then hand it to [crate::render].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    total_bits: u64,
    /// Laid out fields, most significant first.
    pub fields: Vec<FieldLayout>,
}

impl Layout {
    /// Derives each field's width from the next field's bit position; the last
    /// field runs down to bit 0. Fails on an empty list or when bit positions
    /// do not strictly decrease.
    pub fn compute(fields: &[Field]) -> Result<Self, LayoutError> {
        let first = fields.first().ok_or(LayoutError::EmptyFieldList)?;
        let total_bits = u64::from(first.bit) + 1;

        let mut laid_out = Vec::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            let width = match fields.get(index + 1) {
                Some(next) if next.bit >= field.bit => {
                    return Err(LayoutError::NotDecreasing {
                        index: index + 1,
                        bit: next.bit,
                        previous: field.bit,
                    });
                }
                Some(next) => u64::from(field.bit - next.bit),
                None => u64::from(field.bit) + 1,
            };

            debug!(bit = field.bit, label = %field.label, width, "laid out field");

            laid_out.push(FieldLayout {
                bit: field.bit,
                label: field.label.clone(),
                width,
            });
        }

        Ok(Self {
            total_bits,
            fields: laid_out,
        })
    }

    /// Bits covered by the whole table: the first field's bit position plus one.
    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    /// Share of the page width given to `field`: `width / total_bits * scale`.
    pub fn column_fraction(&self, field: &FieldLayout, scale: f64) -> f64 {
        field.width as f64 / self.total_bits as f64 * scale
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn widths(layout: &Layout) -> Vec<u64> {
        layout.fields.iter().map(|field| field.width).collect()
    }

    #[test]
    fn test_single_field() {
        let layout = Layout::compute(&[Field::new(6, "opcode")]).unwrap();
        assert_eq!(widths(&layout), vec![7]);
        assert_eq!(layout.total_bits(), 7);
    }

    #[test]
    fn test_u_type_widths() {
        let layout = Layout::compute(&[
            Field::new(31, "imm"),
            Field::new(11, "rd"),
            Field::new(6, "opcode"),
        ])
        .unwrap();

        assert_eq!(widths(&layout), vec![20, 5, 7]);
        assert_eq!(layout.total_bits(), 32);
    }

    #[test]
    fn test_column_fractions() {
        let layout = Layout::compute(&[
            Field::new(31, "imm"),
            Field::new(11, "rd"),
            Field::new(6, "opcode"),
        ])
        .unwrap();

        let fractions: Vec<f64> = layout
            .fields
            .iter()
            .map(|field| layout.column_fraction(field, 0.9))
            .collect();

        assert_eq!(fractions, vec![20.0 / 32.0 * 0.9, 5.0 / 32.0 * 0.9, 7.0 / 32.0 * 0.9]);
    }

    #[test]
    fn test_empty_field_list() {
        assert_eq!(Layout::compute(&[]), Err(LayoutError::EmptyFieldList));
    }

    #[test]
    fn test_not_decreasing() {
        assert_eq!(
            Layout::compute(&[Field::new(11, "rd"), Field::new(11, "rs1")]),
            Err(LayoutError::NotDecreasing {
                index: 1,
                bit: 11,
                previous: 11
            })
        );
    }

    proptest! {
        #[test]
        fn test_widths_follow_bit_positions(bits in prop::collection::btree_set(0u32..512, 1..24)) {
            let bits: Vec<u32> = bits.into_iter().rev().collect();
            let fields: Vec<Field> = bits.iter().map(|&bit| Field::new(bit, "f")).collect();

            let layout = Layout::compute(&fields).unwrap();
            let widths = widths(&layout);

            for i in 0..bits.len() - 1 {
                prop_assert_eq!(widths[i], u64::from(bits[i] - bits[i + 1]));
            }
            prop_assert_eq!(widths[bits.len() - 1], u64::from(bits[bits.len() - 1]) + 1);
            prop_assert_eq!(widths.iter().sum::<u64>(), u64::from(bits[0]) + 1);
        }
    }
}
