use std::path::PathBuf;

use anyhow::{Context, Result};
use bitdoc::{config::Config, encoding::Encoding, expression, serde::EncodingReport};

use super::read_input;

#[derive(clap::Args)]
pub struct ExtractCmd {
    /// Encoding description file; stdin when omitted
    input: Option<PathBuf>,

    /// Print the compiled fields as JSON
    #[clap(long)]
    json: bool,

    /// Name of the packed word in the generated expressions
    #[clap(long)]
    source_name: Option<String>,
}

impl ExtractCmd {
    pub fn run(&self, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(source_name) = &self.source_name {
            config.set_source_name(source_name.as_str());
        }

        let text = read_input(self.input.as_deref())?;
        let encoding: Encoding = text.parse().context("Invalid encoding description")?;

        if self.json {
            let report = EncodingReport::new(&encoding, &config.source_name);
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", expression::render(&encoding, &config));
        }

        Ok(())
    }
}
