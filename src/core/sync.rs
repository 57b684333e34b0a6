//! Synchronization between an env document and a provider item.
//!
//! One invocation walks a fixed sequence: check the CLI, check auth (with a
//! single sign-in attempt), resolve the vault (offering to create it),
//! resolve the item, then create or update. Updates are computed as a field
//! diff and applied in place so the item id and surviving field ids stay
//! stable; existing `.tpl` files keep resolving after a value-only push.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::parse::EnvVariable;
use crate::core::provider::{FieldSpec, ProviderClient, SecretItem};
use crate::error::{ProviderError, Result};

/// Knobs for one sync invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Store fields as concealed (masked) instead of plain text.
    pub concealed: bool,
    /// Skip confirmation prompts.
    pub force: bool,
}

/// How one sync invocation ended.
#[derive(Debug)]
pub enum SyncOutcome {
    /// A new item was created.
    Created(SecretItem),
    /// An existing item was updated in place.
    Updated(SecretItem),
    /// The user declined a confirmation; nothing was changed.
    Cancelled,
}

/// Interactive yes/no confirmation, abstracted for testability.
pub trait ConfirmPrompt {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// The change set applied to an existing item.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldDiff {
    /// Labels present on the item but absent locally, to be deleted.
    pub delete: Vec<String>,
    /// Every desired key, (re)written with its current value.
    pub upsert: Vec<FieldSpec>,
}

impl FieldDiff {
    /// Compute the diff between an item's existing field labels and the
    /// desired variable set. Built-in provider fields must already be
    /// excluded from `existing` (see [`SecretItem::fields`]).
    pub fn compute(
        existing: &BTreeMap<String, String>,
        desired: &[EnvVariable],
        concealed: bool,
    ) -> Self {
        let delete = existing
            .keys()
            .filter(|label| !desired.iter().any(|v| v.key == **label))
            .cloned()
            .collect();
        let upsert = field_specs(desired, concealed);
        Self { delete, upsert }
    }
}

/// Convert variables into field write specs, preserving order.
pub fn field_specs(variables: &[EnvVariable], concealed: bool) -> Vec<FieldSpec> {
    variables
        .iter()
        .map(|v| FieldSpec::new(v.key.clone(), v.value.clone(), concealed))
        .collect()
}

/// Ensure the provider CLI is present and a session is authenticated,
/// attempting one interactive sign-in if needed.
pub fn ensure_ready(provider: &dyn ProviderClient) -> Result<()> {
    provider.check_cli()?;
    if !provider.is_authenticated()? {
        debug!("not authenticated, attempting sign-in");
        provider.sign_in()?;
    }
    Ok(())
}

/// Synchronize `variables` onto the item `title` in `vault_name`.
///
/// Creates the vault (after confirmation) if it does not exist, then
/// creates the item or updates it in place via a field diff. Declining any
/// confirmation returns [`SyncOutcome::Cancelled`] without side effects
/// beyond what already happened.
pub fn sync(
    provider: &dyn ProviderClient,
    prompt: &dyn ConfirmPrompt,
    vault_name: &str,
    title: &str,
    variables: &[EnvVariable],
    opts: SyncOptions,
) -> Result<SyncOutcome> {
    ensure_ready(provider)?;

    // Resolve the vault by exact name.
    let vaults = provider.list_vaults()?;
    let vault = match vaults.into_iter().find(|v| v.name == vault_name) {
        Some(v) => v,
        None => {
            if !opts.force
                && !prompt.confirm(&format!(
                    "vault '{}' does not exist, create it?",
                    vault_name
                ))?
            {
                return Ok(SyncOutcome::Cancelled);
            }
            provider.create_vault(vault_name).map_err(|e| {
                ProviderError::VaultCreateFailed {
                    name: vault_name.to_string(),
                    detail: e.to_string(),
                }
            })?
        }
    };
    debug!(vault = %vault.name, id = %vault.id, "resolved vault");

    // Resolve the item by exact title.
    let existing = provider
        .list_items(vault_name)?
        .into_iter()
        .find(|i| i.title == title);

    match existing {
        None => {
            let fields = field_specs(variables, opts.concealed);
            let item = provider
                .create_item(vault_name, title, &fields)
                .map_err(|e| ProviderError::ItemCreateFailed {
                    title: title.to_string(),
                    detail: e.to_string(),
                })?;
            debug!(item = %item.id, fields = fields.len(), "created item");
            Ok(SyncOutcome::Created(item))
        }
        Some(summary) => {
            if !opts.force
                && !prompt.confirm(&format!(
                    "item '{}' already exists in vault '{}', update it?",
                    title, vault_name
                ))?
            {
                return Ok(SyncOutcome::Cancelled);
            }

            let current = provider.get_item(vault_name, title)?;
            let diff = FieldDiff::compute(&current.fields, variables, opts.concealed);
            debug!(
                delete = diff.delete.len(),
                upsert = diff.upsert.len(),
                "computed field diff"
            );

            let item = provider
                .edit_item(vault_name, &summary.id, &diff.delete, &diff.upsert)
                .map_err(|e| ProviderError::ItemUpdateFailed {
                    title: title.to_string(),
                    detail: e.to_string(),
                })?;
            Ok(SyncOutcome::Updated(item))
        }
    }
}
