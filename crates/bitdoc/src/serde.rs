//! JSON shapes for configuration and compiled encodings.
//!
//! [ConfigDef] is read from a configuration file and converted into
//! [crate::config::Config]; every key is optional and falls back to the
//! default. [EncodingReport] is the serialisable view of a compiled
//! [crate::encoding::Encoding], one entry per field in declaration order.

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;

/// Configuration file contents.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDef {
    /// Character cells per bit in ASCII tables.
    pub spaces_per_bit: Option<usize>,
    /// Fraction of `\textwidth` taken by a LaTeX table.
    pub column_scale: Option<f64>,
    /// Name of the packed word in extraction expressions.
    pub source_name: Option<String>,
}

/// A resolved span with its shift and mask.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SpanReport {
    pub source: i64,
    pub high: u32,
    pub low: u32,
    /// Right shift applied to the source word; negative for a left shift.
    pub shift: i64,
    pub mask: u64,
}

/// A compiled field: its name, width and spans.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub name: String,
    pub width: u32,
    pub spans: Vec<SpanReport>,
    /// The C expression that extracts the field.
    pub expression: String,
}

/// Every field of an encoding, in declaration order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EncodingReport {
    pub fields: Vec<FieldReport>,
}

impl EncodingReport {
    pub fn new(encoding: &Encoding, source_name: &str) -> Self {
        let fields = encoding
            .fields
            .iter()
            .map(|(name, field)| FieldReport {
                name: name.clone(),
                width: field.width,
                spans: field
                    .spans
                    .iter()
                    .map(|span| SpanReport {
                        source: span.source,
                        high: span.high,
                        low: span.low,
                        shift: span.shift(),
                        mask: span.mask(),
                    })
                    .collect(),
                expression: crate::expression::expression(field, source_name),
            })
            .collect();

        EncodingReport { fields }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;

    use super::*;

    #[test]
    fn test_config_def_defaults() {
        let def: ConfigDef = serde_json::from_str(r#"{ "spaces_per_bit": 3 }"#).unwrap();
        let config = Config::from(def);
        assert_eq!(config.spaces_per_bit, 3);
        assert_eq!(config.column_scale, 0.9);
        assert_eq!(config.source_name, "input");
    }

    #[test]
    fn test_config_def_rejects_unknown_keys() {
        assert!(serde_json::from_str::<ConfigDef>(r#"{ "spaces": 3 }"#).is_err());
    }

    #[test]
    fn test_encoding_report() {
        let encoding: Encoding = "rs1\n19 4-0\ns_imm\n31 11-5\n11 4-0\n".parse().unwrap();
        let report = EncodingReport::new(&encoding, "input");

        assert_eq!(report.fields.len(), 2);
        assert_eq!(report.fields[0].name, "rs1");
        assert_eq!(
            report.fields[0].spans,
            vec![SpanReport {
                source: 19,
                high: 4,
                low: 0,
                shift: 15,
                mask: 0x1f
            }]
        );
        assert_eq!(report.fields[1].width, 12);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fields"][0]["expression"], "(input >> 15) & 0x0001f");
    }
}
