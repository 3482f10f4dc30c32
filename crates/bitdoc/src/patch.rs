//! In-place regeneration of bit-field tables inside LaTeX documents.
//!
//! A document carries its field list between comment markers, followed by
//! the generated table between a second marker pair:
//!
//! ```text
//! % Begin encoding definition
//! % 31 imm
//! % 11 rd
//! % 6 opcode
//! % End encoding definition
//! % Begin encoding output
//! \begin{tabular}...
//! % End encoding output
//! ```
//!
//! Everything outside the output block is copied through unchanged, so
//! patching the result again produces the same document.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{config::Config, errors::PatchError, field::Field, layout::Layout, render};

pub const DEFINITION_BEGIN: &str = "% Begin encoding definition";
pub const DEFINITION_END: &str = "% End encoding definition";
pub const OUTPUT_BEGIN: &str = "% Begin encoding output";
pub const OUTPUT_END: &str = "% End encoding output";

fn is_marker(line: &str, marker: &str) -> bool {
    line.trim() == marker
}

/// Regenerates the output block after every definition block of `document`.
///
/// An existing output block may be separated from its definition block by
/// blank lines and is replaced where it stands. A missing output block is
/// inserted directly after the definition block. An output block anywhere
/// else is rejected.
pub fn patch_document(document: &str, config: &Config) -> Result<String, PatchError> {
    let mut lines = document
        .split_inclusive('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .peekable();

    let mut out = String::with_capacity(document.len());
    let mut blocks = 0;

    while let Some((begin, line)) = lines.next() {
        if is_marker(line, OUTPUT_BEGIN) {
            return Err(PatchError::OrphanedOutput { line: begin });
        }
        out.push_str(line);
        if !is_marker(line, DEFINITION_BEGIN) {
            continue;
        }

        let mut fields = Vec::new();
        loop {
            let Some((number, line)) = lines.next() else {
                return Err(PatchError::UnterminatedDefinition {
                    line: begin,
                    marker: DEFINITION_END,
                });
            };
            out.push_str(line);

            if is_marker(line, DEFINITION_END) {
                break;
            }
            if let Some(field) = Field::parse_line(number, line)? {
                fields.push(field);
            }
        }

        let layout = Layout::compute(&fields)?;

        let mut gap = String::new();
        while let Some((_, line)) = lines.next_if(|(_, line)| line.trim().is_empty()) {
            gap.push_str(line);
        }

        let stale = lines
            .peek()
            .filter(|(_, line)| is_marker(line, OUTPUT_BEGIN))
            .map(|&(start, _)| start);

        if let Some(start) = stale {
            out.push_str(&gap);
            gap.clear();
            lines.next();
            loop {
                match lines.next() {
                    Some((_, line)) if is_marker(line, OUTPUT_END) => break,
                    Some(_) => {}
                    None => {
                        return Err(PatchError::UnterminatedOutput {
                            line: start,
                            marker: OUTPUT_END,
                        });
                    }
                }
            }
            debug!(line = start, "replacing previous output block");
        }

        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(OUTPUT_BEGIN);
        out.push('\n');
        out.push_str(&render::latex(&layout, config));
        out.push_str(OUTPUT_END);
        out.push('\n');
        out.push_str(&gap);

        debug!(line = begin, fields = layout.fields.len(), "generated table");
        blocks += 1;
    }

    if blocks == 0 {
        return Err(PatchError::NoDefinitionBlock {
            marker: DEFINITION_BEGIN,
        });
    }

    Ok(out)
}

/// Patches the file at `path` in place. Returns `false` when the file was
/// already up to date and has not been touched.
///
/// The new content is written to a sibling file that then replaces the
/// original, so a failure never leaves a half-written document behind.
pub fn patch_file(path: &Path, config: &Config) -> Result<bool, PatchError> {
    let original = fs::read_to_string(path)?;
    let patched = patch_document(&original, config)?;

    if patched == original {
        info!(path = %path.display(), "already up to date");
        return Ok(false);
    }

    // Replace the file a symlink points at, not the link itself.
    let target = fs::canonicalize(path)?;
    let permissions = fs::metadata(&target)?.permissions();

    let scratch = scratch_path(&target);
    let written = write_synced(&scratch, &patched)
        .and_then(|()| fs::set_permissions(&scratch, permissions))
        .and_then(|()| fs::rename(&scratch, &target));
    if let Err(err) = written {
        let _ = fs::remove_file(&scratch);
        return Err(err.into());
    }

    info!(path = %path.display(), "rewrote encoding tables");
    Ok(true)
}

fn scratch_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bitdoc-tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
