use crate::app::models::{ContentBlock, Snapshot, StructureLine, TextEncoding};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const SECTION_DIVIDER_WIDTH: usize = 20;
const FILE_DIVIDER_WIDTH: usize = 40;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_structure(lines: &[StructureLine]) -> String {
        lines
            .iter()
            .map(|line| {
                let indent = "  ".repeat(line.depth);
                let marker = if line.is_dir { "/" } else { "" };
                format!("{}{}{}", indent, line.name, marker)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn generate_content(blocks: &[ContentBlock]) -> String {
        blocks
            .iter()
            .map(|block| {
                let body = match &block.body {
                    Ok(text) => text.clone(),
                    Err(e) => format!("Error reading file: {}", e),
                };
                format!(
                    "\n/{}\n{}\n{}",
                    block.relative_path,
                    "-".repeat(FILE_DIVIDER_WIDTH),
                    body
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_full_output(structure: &str, content: &str) -> String {
        let divider = "=".repeat(SECTION_DIVIDER_WIDTH);
        let mut out = format!("STRUKTUR DIREKTORI\n{}\n", divider);
        out.push_str(structure);
        out.push_str(&format!("\n\nDETAIL FILE\n{}\n", divider));
        out.push_str(content);
        out
    }

    pub fn render(snapshot: &Snapshot) -> String {
        let structure = Self::generate_structure(&snapshot.structure);
        let content = Self::generate_content(&snapshot.content);
        Self::format_full_output(&structure, &content)
    }

    /// Overwrites `path` with the report encoded as `encoding`.
    pub fn write_report(path: &Path, report: &str, encoding: TextEncoding) -> Result<()> {
        let bytes = encoding
            .encode(report)
            .context(format!("Failed to encode report as {}", encoding))?;
        fs::write(path, bytes).context(format!("Failed to write report to {:?}", path))?;
        Ok(())
    }

    pub fn skip_notice(target: &str) -> String {
        format!("Folder '{}' not found, skipping.", target)
    }

    pub fn completion_notice(path: &Path) -> String {
        format!("Snapshot saved to {}", path.display())
    }
}
