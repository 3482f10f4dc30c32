use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use bitdoc::disasm::Disassembler;

use super::read_input;

#[derive(clap::Args)]
pub struct DisasmCmd {
    /// File of hex instruction words; stdin when omitted
    input: Option<PathBuf>,

    /// Address of the first word, hex with 0x prefix or decimal
    #[clap(long, default_value = "0", value_parser = parse_address)]
    base: u32,
}

fn parse_address(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|err| format!("invalid address '{s}': {err}"))
}

impl DisasmCmd {
    pub fn run(&self) -> Result<()> {
        let disasm = Disassembler::new().context("Failed to build RV32I field table")?;
        let text = read_input(self.input.as_deref())?;

        let mut pc = self.base;
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let digits = line.trim_start_matches("0x").trim_start_matches("0X");
            let word = u32::from_str_radix(digits, 16).map_err(|err| {
                anyhow!("line {}: invalid instruction word '{line}': {err}", index + 1)
            })?;

            println!("{word:08x} {}", disasm.decode(pc, word));
            pc = pc.wrapping_add(4);
        }

        Ok(())
    }
}
