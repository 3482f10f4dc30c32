//! Rendering options shared by the table renderer and the expression generator.

/// Options controlling generated output. [Config::default] gives the stock layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Character cells per bit in ASCII tables.
    pub spaces_per_bit: usize,
    /// Fraction of `\textwidth` the whole LaTeX table spans.
    pub column_scale: f64,
    /// Name of the packed word in extraction expressions.
    pub source_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            spaces_per_bit: 2,
            column_scale: 0.9,
            source_name: "input".to_string(),
        }
    }
}

impl Config {
    pub fn set_spaces_per_bit(&mut self, spaces_per_bit: usize) -> &mut Self {
        self.spaces_per_bit = spaces_per_bit;
        self
    }

    pub fn set_column_scale(&mut self, column_scale: f64) -> &mut Self {
        self.column_scale = column_scale;
        self
    }

    pub fn set_source_name(&mut self, source_name: impl Into<String>) -> &mut Self {
        self.source_name = source_name.into();
        self
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::ConfigDef> for Config {
    fn from(value: crate::serde::ConfigDef) -> Self {
        let defaults = Config::default();
        Config {
            spaces_per_bit: value.spaces_per_bit.unwrap_or(defaults.spaces_per_bit),
            column_scale: value.column_scale.unwrap_or(defaults.column_scale),
            source_name: value.source_name.unwrap_or(defaults.source_name),
        }
    }
}
