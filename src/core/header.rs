//! Header framing for generated `.env` files.
//!
//! Pulled files are wrapped in a recognizable metadata block so a reader
//! knows the file was generated and from which template. The block is
//! bounded by a fixed rule line ([`constants::HEADER_RULE`]) appearing
//! twice, which makes it strippable: every pull strips first and prepends a
//! fresh header, so repeated pulls never stack headers. The `.env` parser
//! strips headers too, so a pulled file can be pushed straight back.

use chrono::Utc;

use crate::core::constants::HEADER_RULE;

/// Remove every header block from `text`.
///
/// A block is a pair of rule lines plus everything between them. Blank
/// lines left immediately after a removed block are dropped as well. A rule
/// line without a closing partner is kept verbatim. Idempotent: output
/// contains no complete blocks, so stripping again is a no-op.
pub fn strip(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim_end() == HEADER_RULE {
            // Only strip when a closing rule line exists further down.
            if let Some(close) = lines[i + 1..]
                .iter()
                .position(|l| l.trim_end() == HEADER_RULE)
            {
                i += close + 2;
                // Swallow blank lines left behind by the removed block.
                while i < lines.len() && lines[i].trim().is_empty() {
                    i += 1;
                }
                continue;
            }
        }
        kept.push(line);
        i += 1;
    }

    let mut out = kept.join("\n");
    if !out.is_empty() && text.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Prepend a fresh header block naming the template `source` to `body`.
///
/// The body is expected to be already stripped; callers compose
/// `prepend(strip(text), ..)` so re-runs replace rather than accumulate.
pub fn prepend(body: &str, source: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        "{rule}\n# Generated by envault pull from \"{source}\"\n# {timestamp}\n# Do not commit this file. Edit the template instead.\n{rule}\n\n{body}",
        rule = HEADER_RULE,
    )
}
