//! Template codec for `.tpl` reference files.
//!
//! A template mirrors the source `.env` line for line. Comments and blank
//! lines pass through verbatim; each variable line is rewritten as
//! `KEY=ref://{vaultId}/{itemId}/{fieldId}` using the provider-assigned
//! field ids. Field ids are used instead of labels because labels can
//! collide or be renamed; the id is stable across value-only updates.
//!
//! Resolving `ref://` references back into values is the provider's inject
//! operation, not this codec's job.

use std::collections::BTreeMap;

use crate::core::constants::REF_SCHEME;
use crate::core::parse::EnvLine;
use crate::error::{Result, TemplateError};

/// Render the template text for a document.
///
/// Fails with [`TemplateError::MissingFieldId`] if any variable key lacks
/// an entry in `field_ids` — that means the create/update result silently
/// dropped a field, which is a defect upstream, not a user error.
pub fn generate(
    vault_id: &str,
    item_id: &str,
    lines: &[EnvLine],
    field_ids: &BTreeMap<String, String>,
) -> Result<String> {
    let mut out = String::new();

    for line in lines {
        match line {
            EnvLine::Empty => out.push('\n'),
            EnvLine::Comment(text) => {
                out.push_str(text);
                out.push('\n');
            }
            EnvLine::Variable { key, .. } => {
                let field_id = field_ids
                    .get(key)
                    .ok_or_else(|| TemplateError::MissingFieldId(key.clone()))?;
                out.push_str(&format!(
                    "{}={}://{}/{}/{}\n",
                    key, REF_SCHEME, vault_id, item_id, field_id
                ));
            }
        }
    }

    Ok(out)
}

/// Keys of well-formed reference lines in a template.
///
/// Used by pull's dry-run to report what would be resolved without calling
/// the provider.
pub fn reference_keys(template: &str) -> Vec<String> {
    let prefix = format!("{}://", REF_SCHEME);
    template
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            value.trim().starts_with(&prefix).then(|| key.trim().to_string())
        })
        .collect()
}
