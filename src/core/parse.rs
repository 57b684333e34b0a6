//! Order-preserving `.env` document model.
//!
//! Parsing keeps enough structure to reproduce the file later: every
//! comment and blank line survives in [`ParseOutcome::lines`], in order.
//! Lost on purpose: trailing inline comments on variable lines, a leading
//! BOM, and any previously generated header block (see [`crate::core::header`]).
//!
//! The parser is pure over a string; reading the file and deciding whether
//! an empty result is fatal are both the caller's job, so partial results
//! stay inspectable.

use std::collections::HashMap;

use tracing::debug;

use crate::core::header;

const BOM: &str = "\u{feff}";

/// A single `KEY=value` assignment with its attached context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVariable {
    pub key: String,
    pub value: String,
    /// Trimmed text of the comment line immediately above, if any.
    pub comment: Option<String>,
    /// 1-based line number in the (header-stripped) source.
    pub line: usize,
}

/// One physical line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLine {
    /// A `#` comment line, kept verbatim.
    Comment(String),
    /// A blank (whitespace-only) line.
    Empty,
    /// A valid assignment.
    Variable { key: String, value: String },
}

/// Result of parsing one `.env` document.
///
/// Invariant: `variables` is exactly the subset of `lines` tagged
/// [`EnvLine::Variable`], in the same relative order. Duplicate keys are
/// retained in both (see [`ParseOutcome::unique_variables`]).
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub variables: Vec<EnvVariable>,
    pub lines: Vec<EnvLine>,
    /// Non-fatal issues, e.g. invalid variable names or duplicate keys.
    pub warnings: Vec<String>,
}

impl ParseOutcome {
    /// Variables deduplicated by key: first-occurrence order, last value
    /// wins. This is what gets pushed to the provider.
    pub fn unique_variables(&self) -> Vec<EnvVariable> {
        let mut order: Vec<String> = Vec::new();
        let mut latest: HashMap<&str, &EnvVariable> = HashMap::new();

        for var in &self.variables {
            if !latest.contains_key(var.key.as_str()) {
                order.push(var.key.clone());
            }
            latest.insert(var.key.as_str(), var);
        }

        order
            .iter()
            .map(|k| (*latest.get(k.as_str()).unwrap()).clone())
            .collect()
    }
}

/// Check that a key is a valid environment variable name:
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `.env` content into an order-preserving document.
pub fn parse(content: &str) -> ParseOutcome {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let content = header::strip(content);

    let mut outcome = ParseOutcome::default();
    // Comment text waiting to attach to the next variable. Set by comment
    // lines, cleared by blank lines and by the variable that consumes it.
    let mut pending_comment: Option<String> = None;
    let mut last_line_of: HashMap<String, usize> = HashMap::new();

    for (idx, raw) in content.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            pending_comment = None;
            outcome.lines.push(EnvLine::Empty);
            continue;
        }

        if trimmed.starts_with('#') {
            pending_comment = Some(trimmed[1..].trim().to_string());
            outcome.lines.push(EnvLine::Comment(raw.to_string()));
            continue;
        }

        let Some((key_part, value_part)) = trimmed.split_once('=') else {
            // No assignment, not a comment: silently ignored.
            debug!(line = lineno, "skipping unrecognized line");
            continue;
        };

        let key = key_part.trim();
        if !is_valid_key(key) {
            outcome
                .warnings
                .push(format!("Line {}: Invalid variable name", lineno));
            continue;
        }

        let value = parse_value(value_part);

        if let Some(prev) = last_line_of.insert(key.to_string(), lineno) {
            outcome.warnings.push(format!(
                "Line {}: duplicate key '{}' overrides value from line {}",
                lineno, key, prev
            ));
        }

        outcome.lines.push(EnvLine::Variable {
            key: key.to_string(),
            value: value.clone(),
        });
        outcome.variables.push(EnvVariable {
            key: key.to_string(),
            value,
            comment: pending_comment.take(),
            line: lineno,
        });
    }

    debug!(
        variables = outcome.variables.len(),
        lines = outcome.lines.len(),
        warnings = outcome.warnings.len(),
        "parsed env document"
    );

    outcome
}

/// Parse the right-hand side of an assignment.
///
/// Quoted values take everything up to the matching close quote; a quote
/// with no closing partner is treated literally. Unquoted values stop at
/// the first `#` preceded by whitespace, so `http://x#y` keeps its
/// fragment while `value # comment` drops the comment.
fn parse_value(raw: &str) -> String {
    let trimmed = raw.trim();

    for quote in ['"', '\''] {
        if let Some(rest) = trimmed.strip_prefix(quote) {
            if let Some(end) = rest.find(quote) {
                return rest[..end].to_string();
            }
            // No closing quote: fall through to unquoted handling.
        }
    }

    let mut prev_is_space = false;
    for (i, ch) in trimmed.char_indices() {
        if ch == '#' && prev_is_space {
            return trimmed[..i].trim_end().to_string();
        }
        prev_is_space = ch.is_whitespace();
    }

    trimmed.to_string()
}
