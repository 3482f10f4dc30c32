mod disasm;
mod extract;
mod patch;
mod table;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use bitdoc::config::Config;
use clap::Subcommand;

pub use disasm::DisasmCmd;
pub use extract::ExtractCmd;
pub use patch::PatchCmd;
pub use table::TableCmd;

#[derive(Subcommand)]
pub enum Command {
    /// Render a bit-field table from `<bit> <label>` lines
    Table(TableCmd),
    /// Regenerate the tables of a LaTeX document in place
    Patch(PatchCmd),
    /// Print extraction expressions for an encoding description
    Extract(ExtractCmd),
    /// Disassemble RV32I words given as hex, one per line
    Disasm(DisasmCmd),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Command::Table(cmd) => cmd.run(config),
            Command::Patch(cmd) => cmd.run(config),
            Command::Extract(cmd) => cmd.run(config),
            Command::Disasm(cmd) => cmd.run(),
        }
    }
}

/// Reads `path`, or stdin when it is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
