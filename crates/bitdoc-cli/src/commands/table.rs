use std::path::PathBuf;

use anyhow::{Context, Result};
use bitdoc::{
    config::Config,
    field::parse_fields,
    layout::Layout,
    render::{self, Style},
};

use super::read_input;

#[derive(clap::Args)]
pub struct TableCmd {
    /// Field list file; stdin when omitted
    input: Option<PathBuf>,

    /// Draw an ASCII diagram instead of a LaTeX tabular
    #[clap(long)]
    ascii: bool,

    /// Character cells per bit in ASCII output
    #[clap(long)]
    spaces_per_bit: Option<usize>,

    /// Fraction of \textwidth used by a LaTeX table
    #[clap(long)]
    column_scale: Option<f64>,
}

impl TableCmd {
    pub fn run(&self, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(spaces_per_bit) = self.spaces_per_bit {
            config.set_spaces_per_bit(spaces_per_bit);
        }
        if let Some(column_scale) = self.column_scale {
            config.set_column_scale(column_scale);
        }

        let text = read_input(self.input.as_deref())?;
        let fields = parse_fields(&text).context("Invalid field list")?;
        let layout = Layout::compute(&fields).context("Invalid field list")?;

        let style = if self.ascii { Style::Ascii } else { Style::Latex };
        print!("{}", render::render(&layout, style, &config));

        Ok(())
    }
}
